use alloc::string::ToString;

use crate::key::IdentitySet;
use crate::{RecycliError, TypeTag};

/// A typed, identity-bearing row.
///
/// `PartialEq` is the content snapshot: two items sharing an [`id`](RecyclerItem::id) that
/// compare unequal reconcile into a change operation.
pub trait RecyclerItem: Clone + PartialEq + Send + Sync + 'static {
    /// Stable identity; must be non-empty and unique within one bound sequence.
    fn id(&self) -> &str;

    /// Selects the binder that renders this item.
    fn type_tag(&self) -> TypeTag;
}

/// Checks that every identity is non-empty and unique.
pub fn check_identities<I: RecyclerItem>(items: &[I]) -> Result<(), RecycliError> {
    let mut seen = IdentitySet::new();
    for (position, item) in items.iter().enumerate() {
        let id = item.id();
        if id.is_empty() {
            return Err(RecycliError::EmptyIdentity { position });
        }
        if !seen.insert(id.to_string()) {
            return Err(RecycliError::DuplicateIdentity { id: id.to_string() });
        }
    }
    Ok(())
}
