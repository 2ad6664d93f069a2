use alloc::string::String;
use alloc::sync::Arc;

use recycli::{DiffMode, IdentityMap, Pagination};

use crate::{AttachListener, FirstAppearanceListener};

/// Invoked from the diff worker when a background edit script is ready.
///
/// Hosts typically use it to wake their presentation loop, which then calls
/// [`crate::Adapter::poll_background`].
pub type OnDiffReadyCallback = Arc<dyn Fn() + Send + Sync>;

/// Delay of the second, duplicated scroll attempt.
///
/// Item animations running in the host can swallow a scroll issued right after a list
/// update; the repeat lands once they settle.
pub const DEFAULT_DUPLICATE_SCROLL_DELAY_MS: u64 = 300;

/// Configuration for [`crate::Adapter`].
///
/// Cheap to clone: callbacks and listeners are stored in `Arc`s.
pub struct AdapterOptions<I> {
    /// Reconciliation strategy. `None` latches [`recycli::config::diff_mode`] at the first
    /// binding cycle.
    pub diff_mode: Option<DiffMode>,

    /// Enables pagination; the adapter then only accepts [`recycli::PaginationState`]s.
    pub pagination: Option<Pagination<I>>,

    pub duplicate_scroll_delay_ms: u64,

    pub attach_listeners: IdentityMap<Arc<dyn AttachListener>>,

    pub first_appearance_listeners: IdentityMap<Arc<dyn FirstAppearanceListener<I>>>,

    pub on_diff_ready: Option<OnDiffReadyCallback>,
}

impl<I> Default for AdapterOptions<I> {
    fn default() -> Self {
        Self {
            diff_mode: None,
            pagination: None,
            duplicate_scroll_delay_ms: DEFAULT_DUPLICATE_SCROLL_DELAY_MS,
            attach_listeners: IdentityMap::new(),
            first_appearance_listeners: IdentityMap::new(),
            on_diff_ready: None,
        }
    }
}

impl<I> Clone for AdapterOptions<I> {
    fn clone(&self) -> Self {
        Self {
            diff_mode: self.diff_mode,
            pagination: self.pagination.clone(),
            duplicate_scroll_delay_ms: self.duplicate_scroll_delay_ms,
            attach_listeners: self.attach_listeners.clone(),
            first_appearance_listeners: self.first_appearance_listeners.clone(),
            on_diff_ready: self.on_diff_ready.clone(),
        }
    }
}

impl<I> AdapterOptions<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diff_mode(mut self, diff_mode: DiffMode) -> Self {
        self.diff_mode = Some(diff_mode);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination<I>) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_duplicate_scroll_delay_ms(mut self, delay_ms: u64) -> Self {
        self.duplicate_scroll_delay_ms = delay_ms;
        self
    }

    pub fn with_attach_listener(
        mut self,
        id: impl Into<String>,
        listener: impl AttachListener + 'static,
    ) -> Self {
        self.attach_listeners.insert(id.into(), Arc::new(listener));
        self
    }

    pub fn with_first_appearance_listener(
        mut self,
        id: impl Into<String>,
        listener: impl FirstAppearanceListener<I> + 'static,
    ) -> Self {
        self.first_appearance_listeners
            .insert(id.into(), Arc::new(listener));
        self
    }

    pub fn with_on_diff_ready(mut self, on_diff_ready: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_diff_ready = Some(Arc::new(on_diff_ready));
        self
    }
}

impl<I> core::fmt::Debug for AdapterOptions<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("diff_mode", &self.diff_mode)
            .field("pagination", &self.pagination)
            .field("duplicate_scroll_delay_ms", &self.duplicate_scroll_delay_ms)
            .field("attach_listeners", &self.attach_listeners.len())
            .field(
                "first_appearance_listeners",
                &self.first_appearance_listeners.len(),
            )
            .finish_non_exhaustive()
    }
}
