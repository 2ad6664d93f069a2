use alloc::sync::Arc;

use crate::{Edge, LoadMode, PaginationState, RecyclerItem, RequestState, VisibleWindow};

/// Trigger distance, in items, from the paginated edge.
pub const DEFAULT_LOAD_THRESHOLD: usize = 5;

/// The caller's page loader.
pub trait LoadCallbacks: Send + Sync {
    fn load_range(&self, page: usize);
}

impl<F: Fn(usize) + Send + Sync> LoadCallbacks for F {
    fn load_range(&self, page: usize) {
        self(page)
    }
}

/// A deferred page request carried by error and "load more" rows.
///
/// Compares equal by page only, so rows holding actions can still be diffed by content.
#[derive(Clone)]
pub struct LoadAction {
    page: usize,
    callbacks: Arc<dyn LoadCallbacks>,
}

impl LoadAction {
    pub fn new(page: usize, callbacks: Arc<dyn LoadCallbacks>) -> Self {
        Self { page, callbacks }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn trigger(&self) {
        rdebug!(page = self.page, "LoadAction::trigger");
        self.callbacks.load_range(self.page);
    }
}

impl PartialEq for LoadAction {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
    }
}

impl core::fmt::Debug for LoadAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoadAction")
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

/// Builds the synthetic rows shown at the paginated edge.
///
/// Returning `None` skips the row. Sentinel identities must not collide with caller items.
pub trait SentinelProvider<I>: Send + Sync {
    fn progress(&self) -> Option<I> {
        None
    }

    fn error(&self, _retry: LoadAction) -> Option<I> {
        None
    }

    fn load_more(&self, _next: LoadAction) -> Option<I> {
        None
    }

    /// Invisible row that keeps the trailing edge detectable in scroll mode.
    fn probe(&self) -> Option<I> {
        None
    }
}

/// Pagination behavior of an adapter: how loads are requested and which rows show the
/// request lifecycle.
pub struct Pagination<I> {
    callbacks: Arc<dyn LoadCallbacks>,
    sentinels: Arc<dyn SentinelProvider<I>>,
    mode: LoadMode,
    load_threshold: usize,
}

impl<I> Clone for Pagination<I> {
    fn clone(&self) -> Self {
        Self {
            callbacks: Arc::clone(&self.callbacks),
            sentinels: Arc::clone(&self.sentinels),
            mode: self.mode,
            load_threshold: self.load_threshold,
        }
    }
}

impl<I: RecyclerItem> Pagination<I> {
    pub fn new(
        callbacks: impl LoadCallbacks + 'static,
        sentinels: impl SentinelProvider<I> + 'static,
    ) -> Self {
        Self {
            callbacks: Arc::new(callbacks),
            sentinels: Arc::new(sentinels),
            mode: LoadMode::Scroll,
            load_threshold: DEFAULT_LOAD_THRESHOLD,
        }
    }

    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_load_threshold(mut self, load_threshold: usize) -> Self {
        self.load_threshold = load_threshold;
        self
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn load_threshold(&self) -> usize {
        self.load_threshold
    }

    /// The sentinel row for `state`, if any.
    ///
    /// | state     | condition                          | row                       |
    /// |-----------|------------------------------------|---------------------------|
    /// | `Loading` | page > 0, items present            | progress                  |
    /// | `Error`   | page > 0, items present            | error, retries `page`     |
    /// | `Idle`    | items present, end not reached     | load-more (`page + 1`) or probe |
    pub fn sentinel(&self, state: &PaginationState<I>) -> Option<I> {
        let has_items = !state.items.is_empty();
        match state.request_state {
            RequestState::Loading if state.page > 0 && has_items => self.sentinels.progress(),
            RequestState::Error if state.page > 0 && has_items => {
                self.sentinels.error(self.action(state.page))
            }
            RequestState::Idle if has_items && !state.end_reached => match self.mode {
                LoadMode::Button => self.sentinels.load_more(self.action(state.page + 1)),
                LoadMode::Scroll => self.sentinels.probe(),
            },
            _ => None,
        }
    }

    /// Whether `window` is close enough to the paginated `edge` to load more.
    pub fn should_load(&self, state: &PaginationState<I>, window: VisibleWindow, edge: Edge) -> bool {
        if self.mode != LoadMode::Scroll || state.is_loading() || state.end_reached {
            return false;
        }
        let margin = match edge {
            Edge::Leading => window.leading_margin(),
            Edge::Trailing => window.trailing_margin(),
        };
        margin <= self.load_threshold
    }

    /// The page a new request should ask for: the same page after an error, the next one
    /// otherwise. `None` while a request is in flight.
    pub fn next_page(&self, state: &PaginationState<I>) -> Option<usize> {
        match state.request_state {
            RequestState::Loading => None,
            RequestState::Error => Some(state.page),
            RequestState::Idle => Some(state.page + 1),
        }
    }

    pub fn request(&self, page: usize) {
        rdebug!(page, "Pagination::request");
        self.callbacks.load_range(page);
    }

    fn action(&self, page: usize) -> LoadAction {
        LoadAction::new(page, Arc::clone(&self.callbacks))
    }
}

impl<I> core::fmt::Debug for Pagination<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pagination")
            .field("mode", &self.mode)
            .field("load_threshold", &self.load_threshold)
            .finish_non_exhaustive()
    }
}
