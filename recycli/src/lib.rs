//! A headless list-rendering core.
//!
//! For the engine that owns a rendered list and talks to a viewport host, see the
//! `recycli-adapter` crate.
//!
//! This crate holds the pieces that do not depend on any host: the binder registry mapping
//! item types to view construction, identity-keyed list reconciliation (on the calling thread
//! or on a background worker), and the pagination rules deciding which sentinel rows to show
//! and when to request the next page.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

#[cfg(feature = "std")]
mod background;
pub mod config;
mod diff;
mod emitter;
mod error;
mod fenwick;
mod item;
mod key;
mod pagination;
mod registry;
mod state;
mod types;


#[cfg(feature = "std")]
pub use background::{BackgroundDiffer, DiffOutcome, DiffReadyCallback};
pub use diff::{EditOp, EditScript, reconcile};
pub use emitter::{UpdateBatcher, UpdateSink};
pub use error::RecycliError;
pub use item::{RecyclerItem, check_identities};
pub use key::{IdentityMap, IdentitySet};
pub use pagination::{
    DEFAULT_LOAD_THRESHOLD, LoadAction, LoadCallbacks, Pagination, SentinelProvider,
};
pub use registry::{BindFn, Binder, BinderRegistry, Binding, CreateViewFn, WarmUpFn};
pub use state::PaginationState;
pub use types::{
    Align, DiffMode, Edge, LoadMode, RequestState, TypeTag, ViewType, VisibleWindow,
};
