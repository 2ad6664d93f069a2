use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use recycli::{BackgroundDiffer, DiffOutcome};
use recycli::{
    BinderRegistry, DiffMode, Edge, EditScript, IdentityMap, IdentitySet, PaginationState,
    RecycliError, RecyclerItem, ViewType, check_identities, config, reconcile,
};

use crate::{AdapterOptions, AttachListener, FirstAppearanceListener, ViewportHost};

/// Imperative requests a screen can send alongside its data.
#[derive(Clone, Debug, PartialEq)]
pub enum RecyclerAction<I> {
    /// Smooth-scrolls to the item with the same identity, if it is rendered.
    ScrollToItem(I),
    ScrollToTop { smooth: bool },
}

/// Binds item sequences to a [`ViewportHost`].
///
/// The adapter owns the rendered sequence (caller items plus any pagination sentinel),
/// reconciles every new sequence against it, and forwards the resulting edit script to the
/// host. All methods are meant to be called from the host's presentation thread.
///
/// An adapter is either *plain* ([`Adapter::bind`]) or *paginated*
/// ([`Adapter::bind_pagination`]), depending on whether its options carry a
/// [`recycli::Pagination`].
pub struct Adapter<I, V, H: ViewportHost> {
    pub(crate) registry: BinderRegistry<I, V, H::Context>,
    pub(crate) options: AdapterOptions<I>,
    pub(crate) host: Option<H>,
    pub(crate) rendered: Arc<[I]>,
    pub(crate) state: Option<PaginationState<I>>,
    mode: Option<DiffMode>,
    #[cfg(feature = "std")]
    differ: Option<BackgroundDiffer<I>>,
    generation: u64,
    applied_generation: u64,
    pub(crate) scroll_check_token: u64,
    pub(crate) requested_page: Option<usize>,
    pub(crate) appeared: IdentitySet,
}

impl<I: RecyclerItem, V, H: ViewportHost> Adapter<I, V, H> {
    pub fn new(registry: BinderRegistry<I, V, H::Context>, options: AdapterOptions<I>) -> Self {
        rdebug!(
            view_types = registry.len(),
            paginated = options.pagination.is_some(),
            "Adapter::new"
        );
        Self {
            registry,
            options,
            host: None,
            rendered: Arc::from(Vec::new()),
            state: None,
            mode: None,
            #[cfg(feature = "std")]
            differ: None,
            generation: 0,
            applied_generation: 0,
            scroll_check_token: 0,
            requested_page: None,
            appeared: IdentitySet::new(),
        }
    }

    pub fn options(&self) -> &AdapterOptions<I> {
        &self.options
    }

    pub fn registry(&self) -> &BinderRegistry<I, V, H::Context> {
        &self.registry
    }

    pub fn is_paginated(&self) -> bool {
        self.options.pagination.is_some()
    }

    pub fn set_attach_listeners(&mut self, listeners: IdentityMap<Arc<dyn AttachListener>>) {
        self.options.attach_listeners = listeners;
    }

    pub fn set_first_appearance_listeners(
        &mut self,
        listeners: IdentityMap<Arc<dyn FirstAppearanceListener<I>>>,
    ) {
        self.options.first_appearance_listeners = listeners;
    }

    /// Connects a live host, warming up the binders once in its context.
    ///
    /// Anything bound before attaching is announced as one insertion. Returns the previously
    /// attached host.
    pub fn attach(&mut self, mut host: H) -> Option<H> {
        self.registry.reset_warm_up();
        self.registry.warm_up(host.context());
        if !self.rendered.is_empty() {
            host.notify_inserted(0, self.rendered.len());
        }
        rdebug!(items = self.rendered.len(), "Adapter::attach");
        self.host.replace(host)
    }

    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Binds a plain item sequence.
    pub fn bind(&mut self, items: Vec<I>) -> Result<(), RecycliError> {
        if self.is_paginated() {
            return Err(RecycliError::PlainBindOnPaginated);
        }
        self.prepare(&items)?;
        self.submit(items);
        Ok(())
    }

    /// Binds a pagination snapshot, deriving the sentinel row from it.
    ///
    /// The snapshot is stored as-is; sentinels only live in the rendered sequence.
    pub fn bind_pagination(&mut self, state: PaginationState<I>) -> Result<(), RecycliError> {
        let Some(pagination) = &self.options.pagination else {
            return Err(RecycliError::PaginationBindOnPlain);
        };

        let sentinel = pagination.sentinel(&state);
        let mut combined = Vec::with_capacity(state.items.len() + 1);
        match self.edge() {
            Edge::Leading => {
                combined.extend(sentinel);
                combined.extend(state.items.iter().cloned());
            }
            Edge::Trailing => {
                combined.extend(state.items.iter().cloned());
                combined.extend(sentinel);
            }
        }
        self.prepare(&combined)?;

        let lifecycle_changed = self.state.as_ref().is_none_or(|prev| {
            prev.page != state.page || prev.request_state != state.request_state
        });
        if lifecycle_changed {
            self.requested_page = None;
        }
        rtrace!(
            page = state.page,
            request_state = ?state.request_state,
            end_reached = state.end_reached,
            "Adapter::bind_pagination"
        );
        self.state = Some(state);
        self.submit(combined);
        Ok(())
    }

    /// Binds items into a host that already shows them.
    ///
    /// While nothing has been rendered yet, the sequence is adopted directly, with no edit
    /// script and no host notification. Otherwise this is [`Adapter::bind`].
    pub fn bind_nested(&mut self, items: Vec<I>) -> Result<(), RecycliError> {
        if self.is_paginated() {
            return Err(RecycliError::PlainBindOnPaginated);
        }
        if !self.rendered.is_empty() || self.has_pending_background() {
            return self.bind(items);
        }
        self.prepare(&items)?;
        self.latch_mode();
        self.generation += 1;
        self.applied_generation = self.generation;
        rdebug!(items = items.len(), "Adapter::bind_nested: adopted");
        self.rendered = items.into();
        Ok(())
    }

    pub fn pagination_state(&self) -> Option<&PaginationState<I>> {
        self.state.as_ref()
    }

    /// The last applied sequence, sentinels included.
    pub fn rendered(&self) -> &[I] {
        &self.rendered
    }

    pub fn item_count(&self) -> usize {
        self.rendered.len()
    }

    pub fn item_at(&self, position: usize) -> Option<&I> {
        self.rendered.get(position)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.rendered.iter().position(|item| item.id() == id)
    }

    pub fn item_view_type(&self, position: usize) -> Result<ViewType, RecycliError> {
        self.registry.resolve_type(self.item(position)?)
    }

    pub fn create_view(
        &self,
        view_type: ViewType,
        context: &H::Context,
    ) -> Result<V, RecycliError> {
        self.registry.create_view(view_type, context)
    }

    pub fn bind_view(&self, view: &mut V, position: usize) -> Result<(), RecycliError> {
        self.registry.bind(view, self.item(position)?)
    }

    /// The latched strategy, or `None` before the first binding cycle.
    pub fn diff_mode(&self) -> Option<DiffMode> {
        self.mode
    }

    /// Whether a submitted sequence has not been applied yet.
    pub fn has_pending_background(&self) -> bool {
        self.applied_generation != self.generation
    }

    /// Applies finished background edit scripts. Superseded ones are dropped.
    ///
    /// Returns how many scripts were applied.
    #[cfg(feature = "std")]
    pub fn poll_background(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.differ.as_ref().and_then(BackgroundDiffer::try_recv) {
            if self.accept(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Blocks until the latest submission is applied or `timeout` elapses.
    #[cfg(feature = "std")]
    pub fn wait_background(&mut self, timeout: std::time::Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while self.has_pending_background() {
            let now = std::time::Instant::now();
            if now >= deadline {
                return false;
            }
            let Some(outcome) = self
                .differ
                .as_ref()
                .and_then(|d| d.recv_timeout(deadline - now))
            else {
                return false;
            };
            self.accept(outcome);
        }
        true
    }

    pub(crate) fn edge(&self) -> Edge {
        if self.host.as_ref().is_some_and(|h| h.stack_from_end()) {
            Edge::Leading
        } else {
            Edge::Trailing
        }
    }

    fn item(&self, position: usize) -> Result<&I, RecycliError> {
        self.rendered
            .get(position)
            .ok_or(RecycliError::PositionOutOfRange {
                position,
                count: self.rendered.len(),
            })
    }

    /// Rejects a sequence before any state changes.
    fn prepare(&self, items: &[I]) -> Result<(), RecycliError> {
        check_identities(items)?;
        for item in items {
            self.registry.resolve_type(item)?;
        }
        Ok(())
    }

    fn submit(&mut self, items: Vec<I>) {
        let next: Arc<[I]> = items.into();
        self.generation += 1;
        match self.latch_mode() {
            #[cfg(feature = "std")]
            DiffMode::Background => {
                rtrace!(
                    generation = self.generation,
                    items = next.len(),
                    "Adapter: background submit"
                );
                if let Some(differ) = &self.differ {
                    differ.submit(self.generation, Arc::clone(&self.rendered), next);
                }
            }
            _ => {
                let script = reconcile(&self.rendered, &next);
                self.applied_generation = self.generation;
                self.apply(&script, next);
            }
        }
    }

    #[cfg(feature = "std")]
    fn accept(&mut self, outcome: DiffOutcome<I>) -> bool {
        if outcome.generation != self.generation {
            rdebug!(
                stale = outcome.generation,
                latest = self.generation,
                "Adapter: dropping superseded edit script"
            );
            return false;
        }
        self.applied_generation = outcome.generation;
        self.apply(&outcome.script, outcome.sequence);
        true
    }

    fn apply(&mut self, script: &EditScript<I>, sequence: Arc<[I]>) {
        if let Some(host) = self.host.as_mut() {
            script.dispatch_to(host);
        }
        rdebug!(
            ops = script.len(),
            items = sequence.len(),
            "Adapter: edit script applied"
        );
        self.rendered = sequence;
    }

    fn latch_mode(&mut self) -> DiffMode {
        if let Some(mode) = self.mode {
            return mode;
        }
        let requested = self.options.diff_mode.unwrap_or_else(config::diff_mode);
        let mode = self.start(requested);
        rdebug!(?mode, "Adapter: diff mode latched");
        self.mode = Some(mode);
        mode
    }

    #[cfg(feature = "std")]
    fn start(&mut self, requested: DiffMode) -> DiffMode {
        if requested == DiffMode::Synchronous {
            return requested;
        }
        match BackgroundDiffer::spawn(self.options.on_diff_ready.clone()) {
            Ok(differ) => {
                self.differ = Some(differ);
                DiffMode::Background
            }
            Err(_err) => {
                rwarn!(error = %_err, "Adapter: diff worker unavailable, reconciling synchronously");
                DiffMode::Synchronous
            }
        }
    }

    #[cfg(not(feature = "std"))]
    fn start(&mut self, _requested: DiffMode) -> DiffMode {
        DiffMode::Synchronous
    }
}

impl<I, V, H: ViewportHost> core::fmt::Debug for Adapter<I, V, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Adapter")
            .field("options", &self.options)
            .field("items", &self.rendered.len())
            .field("mode", &self.mode)
            .field("generation", &self.generation)
            .field("attached", &self.host.is_some())
            .finish_non_exhaustive()
    }
}
