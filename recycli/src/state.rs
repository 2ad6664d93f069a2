use alloc::vec::Vec;

use crate::RequestState;

/// Caller-owned pagination snapshot.
///
/// Adapters only read it; sentinel rows are derived from it on every binding cycle.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationState<I> {
    pub items: Vec<I>,
    pub page: usize,
    pub request_state: RequestState,
    pub end_reached: bool,
}

impl<I> PaginationState<I> {
    pub fn new(items: Vec<I>, page: usize) -> Self {
        Self {
            items,
            page,
            request_state: RequestState::Idle,
            end_reached: false,
        }
    }

    pub fn with_request_state(mut self, request_state: RequestState) -> Self {
        self.request_state = request_state;
        self
    }

    pub fn with_end_reached(mut self, end_reached: bool) -> Self {
        self.end_reached = end_reached;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.request_state == RequestState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.request_state == RequestState::Error
    }
}
