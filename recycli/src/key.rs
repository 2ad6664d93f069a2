#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

/// Map keyed by item identity.
///
/// Hash-based with `std`, ordered without it.
#[cfg(feature = "std")]
pub type IdentityMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub type IdentityMap<V> = BTreeMap<String, V>;

#[cfg(feature = "std")]
pub type IdentitySet = HashSet<String>;
#[cfg(not(feature = "std"))]
pub type IdentitySet = BTreeSet<String>;

// Borrowed-key variants used while indexing a single sequence.
#[cfg(feature = "std")]
pub(crate) type BorrowedIndex<'a> = HashMap<&'a str, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type BorrowedIndex<'a> = BTreeMap<&'a str, usize>;
