use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use recycli::{
    Align, Binding, BinderRegistry, DiffMode, LoadAction, LoadMode, Pagination, PaginationState,
    RecycliError, RecyclerItem, RequestState, SentinelProvider, TypeTag, UpdateSink, ViewType,
    VisibleWindow,
};

const ROW: TypeTag = TypeTag::new("row");
const SENTINEL: TypeTag = TypeTag::new("sentinel");

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: String,
    tag: TypeTag,
    action: Option<LoadAction>,
}

impl Row {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: ROW,
            action: None,
        }
    }

    fn sentinel(id: &str, action: Option<LoadAction>) -> Self {
        Self {
            id: id.to_string(),
            tag: SENTINEL,
            action,
        }
    }
}

impl RecyclerItem for Row {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> TypeTag {
        self.tag
    }
}

fn rows(ids: &[&str]) -> Vec<Row> {
    ids.iter().map(|id| Row::new(id)).collect()
}

fn page_of(n: usize, page: usize) -> PaginationState<Row> {
    let items = (0..n).map(|i| Row::new(&format!("item{i}"))).collect();
    PaginationState::new(items, page)
}

#[derive(Default)]
struct Ctx {
    warm_ups: Cell<usize>,
}

#[derive(Default)]
struct FakeHost {
    ctx: Ctx,
    attached: bool,
    stack_from_end: bool,
    fail_scrolls: bool,
    window: VisibleWindow,
    events: Vec<(&'static str, usize, usize)>,
    posted: Vec<Task>,
    delayed: Vec<(Task, u64)>,
    scrolls: Vec<(usize, bool, Align)>,
}

impl FakeHost {
    fn live() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }
}

impl UpdateSink for FakeHost {
    fn notify_inserted(&mut self, position: usize, count: usize) {
        self.events.push(("insert", position, count));
    }

    fn notify_removed(&mut self, position: usize, count: usize) {
        self.events.push(("remove", position, count));
    }

    fn notify_moved(&mut self, from: usize, to: usize) {
        self.events.push(("move", from, to));
    }

    fn notify_changed(&mut self, position: usize, count: usize) {
        self.events.push(("change", position, count));
    }
}

impl ViewportHost for FakeHost {
    type Context = Ctx;

    fn context(&self) -> &Ctx {
        &self.ctx
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn visible_window(&self) -> VisibleWindow {
        self.window
    }

    fn stack_from_end(&self) -> bool {
        self.stack_from_end
    }

    fn post(&mut self, task: Task) {
        self.posted.push(task);
    }

    fn post_delayed(&mut self, task: Task, delay_ms: u64) {
        self.delayed.push((task, delay_ms));
    }

    fn scroll_to(&mut self, position: usize, smooth: bool, align: Align) -> Result<(), ScrollError> {
        self.scrolls.push((position, smooth, align));
        if self.fail_scrolls {
            return Err(ScrollError {
                position,
                reason: "layout pending".into(),
            });
        }
        Ok(())
    }
}

type TestAdapter = Adapter<Row, String, FakeHost>;

fn registry() -> BinderRegistry<Row, String, Ctx> {
    BinderRegistry::from_bindings([
        Binding::new(ROW, |_: &Ctx| String::from("row"), |view: &mut String, row: &Row| {
            *view = format!("row:{}", row.id)
        })
        .with_warm_up(|ctx: &Ctx| ctx.warm_ups.set(ctx.warm_ups.get() + 1)),
        Binding::new(
            SENTINEL,
            |_: &Ctx| String::from("sentinel"),
            |view: &mut String, row: &Row| *view = format!("sentinel:{}", row.id),
        ),
    ])
    .unwrap()
}

fn sync_options() -> AdapterOptions<Row> {
    AdapterOptions::new().with_diff_mode(DiffMode::Synchronous)
}

fn plain() -> TestAdapter {
    let mut adapter = Adapter::new(registry(), sync_options());
    adapter.attach(FakeHost::live());
    adapter
}

struct Sentinels;

impl SentinelProvider<Row> for Sentinels {
    fn progress(&self) -> Option<Row> {
        Some(Row::sentinel("progress", None))
    }

    fn error(&self, retry: LoadAction) -> Option<Row> {
        Some(Row::sentinel("error", Some(retry)))
    }

    fn load_more(&self, next: LoadAction) -> Option<Row> {
        Some(Row::sentinel("more", Some(next)))
    }

    fn probe(&self) -> Option<Row> {
        Some(Row::sentinel("tail", None))
    }
}

fn paginated(mode: LoadMode) -> (TestAdapter, Arc<Mutex<Vec<usize>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&requests);
    let pagination = Pagination::new(
        move |page: usize| sink.lock().unwrap().push(page),
        Sentinels,
    )
    .with_mode(mode);
    let mut adapter = Adapter::new(registry(), sync_options().with_pagination(pagination));
    adapter.attach(FakeHost::live());
    (adapter, requests)
}

fn host(adapter: &mut TestAdapter) -> &mut FakeHost {
    adapter.host_mut().unwrap()
}

fn ids(adapter: &TestAdapter) -> Vec<&str> {
    adapter.rendered().iter().map(|r| r.id.as_str()).collect()
}

fn take_events(adapter: &mut TestAdapter) -> Vec<(&'static str, usize, usize)> {
    core::mem::take(&mut host(adapter).events)
}

/// Runs every immediately posted task, like one turn of the host's event loop.
fn run_posted(adapter: &mut TestAdapter) {
    let tasks = core::mem::take(&mut host(adapter).posted);
    for task in tasks {
        adapter.run_task(task);
    }
}

#[test]
fn plain_bind_notifies_host_with_coalesced_updates() {
    let mut adapter = plain();
    adapter.bind(rows(&["a", "b", "c"])).unwrap();
    assert_eq!(take_events(&mut adapter), [("insert", 0, 3)]);

    adapter.bind(rows(&["b", "c", "d"])).unwrap();
    assert_eq!(take_events(&mut adapter), [("remove", 0, 1), ("insert", 2, 1)]);
    assert_eq!(ids(&adapter), ["b", "c", "d"]);

    adapter.bind(rows(&["b", "c", "d"])).unwrap();
    assert!(take_events(&mut adapter).is_empty());
}

#[test]
fn binding_before_attach_is_announced_on_attach() {
    let mut adapter: TestAdapter = Adapter::new(registry(), sync_options());
    adapter.bind(rows(&["a", "b"])).unwrap();
    assert_eq!(adapter.item_count(), 2);

    assert!(adapter.attach(FakeHost::live()).is_none());
    let host = host(&mut adapter);
    assert_eq!(host.events, [("insert", 0, 2)]);
    assert_eq!(host.ctx.warm_ups.get(), 1);
}

#[test]
fn every_attached_host_context_is_warmed_once() {
    let mut adapter = plain();
    let first = adapter.attach(FakeHost::live()).unwrap();
    assert_eq!(first.ctx.warm_ups.get(), 1);

    adapter.bind(rows(&["a"])).unwrap();
    assert_eq!(host(&mut adapter).ctx.warm_ups.get(), 1);

    let second = adapter.attach(FakeHost::live()).unwrap();
    assert_eq!(second.ctx.warm_ups.get(), 1);
    assert_eq!(host(&mut adapter).ctx.warm_ups.get(), 1);
    assert!(adapter.registry().is_warmed());
}

#[test]
fn detached_adapter_keeps_binding() {
    let mut adapter = plain();
    adapter.bind(rows(&["a"])).unwrap();
    let detached = adapter.detach().unwrap();
    assert_eq!(detached.events, [("insert", 0, 1)]);

    adapter.bind(rows(&["a", "b"])).unwrap();
    adapter.scroll_to_position(0, true);
    assert_eq!(ids(&adapter), ["a", "b"]);
}

#[test]
fn invalid_sequences_leave_rendered_list_untouched() {
    let mut adapter = plain();
    adapter.bind(rows(&["a", "b"])).unwrap();
    take_events(&mut adapter);

    assert_eq!(
        adapter.bind(rows(&["a", "a"])),
        Err(RecycliError::DuplicateIdentity { id: "a".into() })
    );
    assert_eq!(
        adapter.bind(rows(&[""])),
        Err(RecycliError::EmptyIdentity { position: 0 })
    );

    let mut stray = Row::new("x");
    stray.tag = TypeTag::new("stray");
    assert_eq!(
        adapter.bind(alloc::vec![stray]),
        Err(RecycliError::UnregisteredType {
            tag: TypeTag::new("stray")
        })
    );

    assert_eq!(ids(&adapter), ["a", "b"]);
    assert!(take_events(&mut adapter).is_empty());
}

#[test]
fn binding_mode_must_match_configuration() {
    let mut adapter = plain();
    assert_eq!(
        adapter.bind_pagination(page_of(3, 1)),
        Err(RecycliError::PaginationBindOnPlain)
    );

    let (mut adapter, _) = paginated(LoadMode::Scroll);
    assert_eq!(
        adapter.bind(rows(&["a"])),
        Err(RecycliError::PlainBindOnPaginated)
    );
    assert_eq!(
        adapter.bind_nested(rows(&["a"])),
        Err(RecycliError::PlainBindOnPaginated)
    );
}

#[test]
fn views_are_created_and_bound_by_position() {
    let (mut adapter, _) = paginated(LoadMode::Scroll);
    adapter.bind_pagination(page_of(2, 1)).unwrap();
    assert_eq!(adapter.item_view_type(0), Ok(ViewType(0)));
    assert_eq!(adapter.item_view_type(2), Ok(ViewType(1)));

    let ctx = Ctx::default();
    let mut view = adapter.create_view(ViewType(1), &ctx).unwrap();
    assert_eq!(view, "sentinel");
    adapter.bind_view(&mut view, 2).unwrap();
    assert_eq!(view, "sentinel:tail");

    assert_eq!(
        adapter.bind_view(&mut view, 3),
        Err(RecycliError::PositionOutOfRange {
            position: 3,
            count: 3
        })
    );
    assert_eq!(adapter.position_of("item1"), Some(1));
    assert_eq!(adapter.item_at(5), None);
}

#[test]
fn bind_nested_adopts_first_sequence_silently() {
    let mut adapter = plain();
    adapter.bind_nested(rows(&["a", "b"])).unwrap();
    assert!(take_events(&mut adapter).is_empty());
    assert_eq!(ids(&adapter), ["a", "b"]);

    adapter.bind_nested(rows(&["b", "c"])).unwrap();
    assert_eq!(take_events(&mut adapter), [("remove", 0, 1), ("insert", 1, 1)]);
}

#[test]
fn diff_mode_latches_on_first_cycle() {
    let mut adapter = plain();
    assert_eq!(adapter.diff_mode(), None);
    adapter.bind(Vec::new()).unwrap();
    assert_eq!(adapter.diff_mode(), Some(DiffMode::Synchronous));
    assert!(!adapter.has_pending_background());
}

#[test]
fn sentinel_rows_track_request_state() {
    let (mut adapter, _) = paginated(LoadMode::Scroll);

    adapter.bind_pagination(page_of(3, 1)).unwrap();
    assert_eq!(ids(&adapter), ["item0", "item1", "item2", "tail"]);

    adapter
        .bind_pagination(page_of(3, 1).with_request_state(RequestState::Loading))
        .unwrap();
    assert_eq!(ids(&adapter), ["item0", "item1", "item2", "progress"]);

    adapter
        .bind_pagination(page_of(3, 1).with_request_state(RequestState::Error))
        .unwrap();
    assert_eq!(ids(&adapter), ["item0", "item1", "item2", "error"]);

    adapter
        .bind_pagination(page_of(3, 1).with_end_reached(true))
        .unwrap();
    assert_eq!(ids(&adapter), ["item0", "item1", "item2"]);

    // Caller state is kept without sentinels.
    assert_eq!(adapter.pagination_state().unwrap().items.len(), 3);
}

#[test]
fn caller_item_colliding_with_sentinel_fails_whole_bind() {
    let (mut adapter, _) = paginated(LoadMode::Scroll);
    adapter.bind_pagination(page_of(2, 1)).unwrap();
    take_events(&mut adapter);

    let mut items = page_of(2, 1).items;
    items.push(Row::new("tail"));
    assert_eq!(
        adapter.bind_pagination(PaginationState::new(items, 2)),
        Err(RecycliError::DuplicateIdentity { id: "tail".into() })
    );
    assert_eq!(ids(&adapter), ["item0", "item1", "tail"]);
    assert!(take_events(&mut adapter).is_empty());
    assert_eq!(adapter.pagination_state().unwrap().page, 1);
}

#[test]
fn rebinding_unrelated_items_drops_previous_sentinel() {
    let (mut adapter, _) = paginated(LoadMode::Button);
    adapter.bind_pagination(page_of(10, 1)).unwrap();
    assert_eq!(adapter.rendered().last().map(|r| r.id.as_str()), Some("more"));
    take_events(&mut adapter);

    adapter
        .bind_pagination(PaginationState::new(rows(&["x", "y"]), 1).with_end_reached(true))
        .unwrap();
    assert_eq!(ids(&adapter), ["x", "y"]);
    assert_eq!(take_events(&mut adapter), [("remove", 0, 11), ("insert", 0, 2)]);
}

#[test]
fn loading_to_next_page_swaps_sentinel_for_items() {
    let (mut adapter, _) = paginated(LoadMode::Scroll);
    adapter
        .bind_pagination(page_of(3, 1).with_request_state(RequestState::Loading))
        .unwrap();
    take_events(&mut adapter);

    adapter.bind_pagination(page_of(5, 2)).unwrap();
    assert_eq!(
        ids(&adapter),
        ["item0", "item1", "item2", "item3", "item4", "tail"]
    );
    assert_eq!(take_events(&mut adapter), [("remove", 3, 1), ("insert", 3, 3)]);
}

#[test]
fn end_reached_removes_load_more_row() {
    let (mut adapter, requests) = paginated(LoadMode::Button);
    adapter.bind_pagination(page_of(3, 1)).unwrap();
    assert_eq!(ids(&adapter), ["item0", "item1", "item2", "more"]);

    adapter.item_at(3).unwrap().action.as_ref().unwrap().trigger();
    assert_eq!(*requests.lock().unwrap(), [2]);
    take_events(&mut adapter);

    adapter
        .bind_pagination(page_of(3, 1).with_end_reached(true))
        .unwrap();
    assert_eq!(take_events(&mut adapter), [("remove", 3, 1)]);
}

#[test]
fn stacked_from_end_places_sentinel_first() {
    let (mut adapter, _) = paginated(LoadMode::Scroll);
    host(&mut adapter).stack_from_end = true;
    adapter
        .bind_pagination(page_of(2, 1).with_request_state(RequestState::Loading))
        .unwrap();
    assert_eq!(ids(&adapter), ["progress", "item0", "item1"]);
}

#[test]
fn scroll_near_end_requests_next_page_once() {
    let (mut adapter, requests) = paginated(LoadMode::Scroll);
    adapter.bind_pagination(page_of(20, 1)).unwrap();
    host(&mut adapter).window = VisibleWindow::new(15, 5, 21);

    adapter.on_scrolled();
    assert_eq!(host(&mut adapter).posted, [Task::CheckNeedLoad { token: 1 }]);
    run_posted(&mut adapter);
    assert_eq!(*requests.lock().unwrap(), [2]);

    adapter.on_scroll_state_changed();
    run_posted(&mut adapter);
    assert_eq!(*requests.lock().unwrap(), [2]);

    adapter
        .bind_pagination(page_of(20, 1).with_request_state(RequestState::Loading))
        .unwrap();
    adapter.on_scrolled();
    assert!(host(&mut adapter).posted.is_empty());

    adapter.bind_pagination(page_of(40, 2)).unwrap();
    host(&mut adapter).window = VisibleWindow::new(36, 5, 41);
    adapter.on_scrolled();
    run_posted(&mut adapter);
    assert_eq!(*requests.lock().unwrap(), [2, 3]);
}

#[test]
fn load_threshold_gates_requests() {
    let (mut adapter, requests) = paginated(LoadMode::Scroll);
    adapter.bind_pagination(page_of(20, 1)).unwrap();

    host(&mut adapter).window = VisibleWindow::new(0, 5, 21);
    adapter.on_scrolled();
    run_posted(&mut adapter);
    assert!(requests.lock().unwrap().is_empty());

    // Five rows past the last visible one is still close enough.
    host(&mut adapter).window = VisibleWindow::new(11, 5, 21);
    adapter.on_scrolled();
    run_posted(&mut adapter);
    assert_eq!(*requests.lock().unwrap(), [2]);
}

#[test]
fn stacked_from_end_loads_at_leading_edge() {
    let (mut adapter, requests) = paginated(LoadMode::Scroll);
    host(&mut adapter).stack_from_end = true;
    adapter.bind_pagination(page_of(20, 1)).unwrap();

    host(&mut adapter).window = VisibleWindow::new(15, 5, 21);
    adapter.on_scrolled();
    run_posted(&mut adapter);
    assert!(requests.lock().unwrap().is_empty());

    host(&mut adapter).window = VisibleWindow::new(2, 5, 21);
    adapter.on_scrolled();
    run_posted(&mut adapter);
    assert_eq!(*requests.lock().unwrap(), [2]);
}

#[test]
fn superseded_load_checks_are_ignored() {
    let (mut adapter, requests) = paginated(LoadMode::Scroll);
    adapter.bind_pagination(page_of(20, 1)).unwrap();
    host(&mut adapter).window = VisibleWindow::new(15, 5, 21);

    adapter.on_scrolled();
    adapter.on_scrolled();
    assert_eq!(
        host(&mut adapter).posted,
        [
            Task::CheckNeedLoad { token: 1 },
            Task::CheckNeedLoad { token: 2 }
        ]
    );

    adapter.run_task(Task::CheckNeedLoad { token: 1 });
    assert!(requests.lock().unwrap().is_empty());
    adapter.run_task(Task::CheckNeedLoad { token: 2 });
    assert_eq!(*requests.lock().unwrap(), [2]);
}

#[test]
fn error_state_waits_for_explicit_retry() {
    let (mut adapter, requests) = paginated(LoadMode::Scroll);
    adapter
        .bind_pagination(page_of(20, 3).with_request_state(RequestState::Error))
        .unwrap();
    host(&mut adapter).window = VisibleWindow::new(16, 5, 21);

    adapter.on_scrolled();
    assert!(host(&mut adapter).posted.is_empty());

    let retry = adapter.item_at(20).unwrap().action.clone().unwrap();
    assert_eq!(retry.page(), 3);
    retry.trigger();
    assert_eq!(*requests.lock().unwrap(), [3]);
}

#[test]
fn button_mode_ignores_scroll_signals() {
    let (mut adapter, requests) = paginated(LoadMode::Button);
    adapter.bind_pagination(page_of(20, 1)).unwrap();
    host(&mut adapter).window = VisibleWindow::new(15, 5, 21);
    adapter.on_scrolled();
    assert!(host(&mut adapter).posted.is_empty());
    assert!(requests.lock().unwrap().is_empty());
}

#[test]
fn scroll_actions_are_posted_twice() {
    let mut adapter = plain();
    adapter.bind(rows(&["a", "b", "c"])).unwrap();

    adapter.dispatch_action(RecyclerAction::ScrollToTop { smooth: false });
    let task = Task::ScrollTo {
        position: 0,
        smooth: false,
    };
    assert_eq!(host(&mut adapter).posted, [task]);
    assert_eq!(
        host(&mut adapter).delayed,
        [(task, DEFAULT_DUPLICATE_SCROLL_DELAY_MS)]
    );

    run_posted(&mut adapter);
    adapter.run_task(task);
    assert_eq!(
        host(&mut adapter).scrolls,
        [(0, false, Align::Auto), (0, false, Align::Auto)]
    );
}

#[test]
fn scroll_to_item_resolves_identity() {
    let mut adapter = plain();
    adapter.bind(rows(&["a", "b", "c"])).unwrap();

    adapter.dispatch_action(RecyclerAction::ScrollToItem(Row::new("c")));
    run_posted(&mut adapter);
    assert_eq!(host(&mut adapter).scrolls, [(2, true, Align::Start)]);

    adapter.dispatch_action(RecyclerAction::ScrollToItem(Row::new("zz")));
    assert!(host(&mut adapter).posted.is_empty());
}

#[test]
fn unusable_scrolls_are_skipped_or_swallowed() {
    let mut adapter = plain();
    adapter.bind(rows(&["a", "b"])).unwrap();

    adapter.scroll_to_position(7, true);
    run_posted(&mut adapter);
    assert!(host(&mut adapter).scrolls.is_empty());

    host(&mut adapter).attached = false;
    adapter.scroll_to_position(1, true);
    run_posted(&mut adapter);
    assert!(host(&mut adapter).scrolls.is_empty());

    let host = host(&mut adapter);
    host.attached = true;
    host.fail_scrolls = true;
    adapter.scroll_to_position(1, false);
    run_posted(&mut adapter);
    assert_eq!(
        adapter.host().unwrap().scrolls,
        [(1, false, Align::Auto)]
    );
}

#[derive(Default)]
struct AttachCounts {
    attached: AtomicUsize,
    detached: AtomicUsize,
}

struct CountingListener(Arc<AttachCounts>);

impl AttachListener for CountingListener {
    fn on_attached(&self) {
        self.0.attached.fetch_add(1, Ordering::SeqCst);
    }

    fn on_detached(&self) {
        self.0.detached.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn attach_listeners_follow_their_identity() {
    let counts = Arc::new(AttachCounts::default());
    let options = sync_options().with_attach_listener("b", CountingListener(Arc::clone(&counts)));
    let mut adapter: TestAdapter = Adapter::new(registry(), options);
    adapter.attach(FakeHost::live());
    adapter.bind(rows(&["a", "b"])).unwrap();

    adapter.on_item_attached(0);
    adapter.on_item_attached(1);
    adapter.on_item_detached(1);
    adapter.on_item_attached(1);
    adapter.on_item_attached(9);
    assert_eq!(counts.attached.load(Ordering::SeqCst), 2);
    assert_eq!(counts.detached.load(Ordering::SeqCst), 1);

    // Moving the item does not change which listener it reaches.
    adapter.bind(rows(&["b", "a"])).unwrap();
    adapter.on_item_detached(0);
    assert_eq!(counts.detached.load(Ordering::SeqCst), 2);
}

#[test]
fn closure_pairs_act_as_attach_listeners() {
    let attached = Arc::new(AtomicUsize::new(0));
    let detached = Arc::new(AtomicUsize::new(0));
    let (on_attached, on_detached) = (Arc::clone(&attached), Arc::clone(&detached));
    let options = sync_options().with_attach_listener(
        "a",
        (
            move || {
                on_attached.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                on_detached.fetch_add(1, Ordering::SeqCst);
            },
        ),
    );
    let mut adapter: TestAdapter = Adapter::new(registry(), options);
    adapter.attach(FakeHost::live());
    adapter.bind(rows(&["a"])).unwrap();

    adapter.on_item_attached(0);
    adapter.on_item_detached(0);
    adapter.on_item_detached(3);
    assert_eq!(attached.load(Ordering::SeqCst), 1);
    assert_eq!(detached.load(Ordering::SeqCst), 1);
}

#[test]
fn first_appearance_fires_once_per_identity() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = sync_options().with_first_appearance_listener("a", move |row: &Row| {
        sink.lock().unwrap().push(row.id.clone())
    });
    let mut adapter: TestAdapter = Adapter::new(registry(), options);
    adapter.attach(FakeHost::live());
    adapter.bind(rows(&["a", "b"])).unwrap();

    adapter.on_item_attached(1);
    adapter.on_item_attached(0);
    adapter.on_item_detached(0);
    adapter.on_item_attached(0);
    adapter.bind(rows(&["b", "a"])).unwrap();
    adapter.on_item_attached(1);
    assert_eq!(*seen.lock().unwrap(), ["a"]);
}

#[test]
fn listener_maps_can_be_replaced() {
    let counts = Arc::new(AttachCounts::default());
    let mut adapter = plain();
    adapter.bind(rows(&["a"])).unwrap();

    let mut listeners = recycli::IdentityMap::new();
    listeners.insert(
        "a".to_string(),
        Arc::new(CountingListener(Arc::clone(&counts))) as Arc<dyn AttachListener>,
    );
    adapter.set_attach_listeners(listeners);
    adapter.on_item_attached(0);
    assert_eq!(counts.attached.load(Ordering::SeqCst), 1);
}

#[cfg(feature = "std")]
mod background_tests {
    use super::*;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn background() -> (TestAdapter, Arc<AtomicUsize>) {
        let ready = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ready);
        let options = AdapterOptions::new()
            .with_diff_mode(DiffMode::Background)
            .with_on_diff_ready(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        let mut adapter = Adapter::new(registry(), options);
        adapter.attach(FakeHost::live());
        (adapter, ready)
    }

    #[test]
    fn background_results_apply_on_poll() {
        let (mut adapter, _) = background();
        adapter.bind(rows(&["a", "b"])).unwrap();
        assert_eq!(adapter.diff_mode(), Some(DiffMode::Background));
        assert!(adapter.has_pending_background());
        assert_eq!(adapter.item_count(), 0);

        assert!(adapter.wait_background(WAIT));
        assert_eq!(ids(&adapter), ["a", "b"]);
        assert_eq!(take_events(&mut adapter), [("insert", 0, 2)]);
        assert_eq!(adapter.poll_background(), 0);
    }

    #[test]
    fn only_the_latest_submission_is_applied() {
        let (mut adapter, ready) = background();
        adapter.bind(rows(&["a", "b"])).unwrap();
        adapter.bind(rows(&["a", "b", "c"])).unwrap();
        adapter.bind(rows(&["c", "b", "a"])).unwrap();
        assert!(adapter.wait_background(WAIT));
        assert_eq!(ids(&adapter), ["c", "b", "a"]);

        // Every applied script started from the sequence rendered at the time.
        let mut len = 0isize;
        for (kind, _, count) in take_events(&mut adapter) {
            match kind {
                "insert" => len += count as isize,
                "remove" => len -= count as isize,
                _ => {}
            }
        }
        assert_eq!(len, 3);
        assert!(ready.load(Ordering::SeqCst) >= 1);

        adapter.bind(rows(&["a"])).unwrap();
        assert!(adapter.wait_background(WAIT));
        assert_eq!(ids(&adapter), ["a"]);
    }

    #[test]
    fn nested_bind_waits_behind_pending_work() {
        let (mut adapter, _) = background();
        adapter.bind(rows(&["a"])).unwrap();
        adapter.bind_nested(rows(&["a", "b"])).unwrap();
        assert!(adapter.wait_background(WAIT));
        assert_eq!(ids(&adapter), ["a", "b"]);
    }
}
