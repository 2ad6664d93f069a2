use alloc::string::String;

use crate::{TypeTag, ViewType};

/// Misuse and resolution failures.
///
/// All variants describe programmer errors: they are returned from the call that detects
/// them and are never swallowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecycliError {
    #[error("type tag `{tag}` is registered by more than one binder")]
    DuplicateTypeTag { tag: TypeTag },

    #[error("no binder is registered for type tag `{tag}`")]
    UnregisteredType { tag: TypeTag },

    #[error("view type {view_type:?} is not known to this registry")]
    UnknownViewType { view_type: ViewType },

    #[error("a plain item list was bound to an adapter configured for pagination")]
    PlainBindOnPaginated,

    #[error("a pagination state was bound to an adapter without pagination")]
    PaginationBindOnPlain,

    #[error("item at position {position} has an empty identity")]
    EmptyIdentity { position: usize },

    #[error("identity `{id}` appears more than once in the bound sequence")]
    DuplicateIdentity { id: String },

    #[error("position {position} is out of range for {count} items")]
    PositionOutOfRange { position: usize, count: usize },
}
