// Example: a paginated feed driven by a console host with a simulated clock.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use recycli::{
    Align, Binding, BinderRegistry, LoadAction, Pagination, PaginationState, RecyclerItem,
    RequestState, SentinelProvider, TypeTag, UpdateSink, VisibleWindow,
};
use recycli_adapter::{Adapter, AdapterOptions, RecyclerAction, ScrollError, Task, ViewportHost};

const POST: TypeTag = TypeTag::new("post");
const FOOTER: TypeTag = TypeTag::new("footer");

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: String,
    text: String,
    retry: Option<LoadAction>,
}

impl RecyclerItem for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> TypeTag {
        if self.id.starts_with("post-") { POST } else { FOOTER }
    }
}

fn footer(id: &str, text: &str, retry: Option<LoadAction>) -> Item {
    Item {
        id: id.to_string(),
        text: text.to_string(),
        retry,
    }
}

struct Footers;

impl SentinelProvider<Item> for Footers {
    fn progress(&self) -> Option<Item> {
        Some(footer("progress", "loading...", None))
    }

    fn error(&self, retry: LoadAction) -> Option<Item> {
        Some(footer("error", "tap to retry", Some(retry)))
    }

    fn probe(&self) -> Option<Item> {
        Some(footer("probe", "", None))
    }
}

#[derive(Default)]
struct ConsoleHost {
    now_ms: u64,
    first_visible: usize,
    count: usize,
    ready: VecDeque<Task>,
    delayed: Vec<(u64, Task)>,
}

impl ConsoleHost {
    const VISIBLE: usize = 4;

    /// Pops the next runnable task, advancing the clock to delayed ones when idle.
    fn next_task(&mut self) -> Option<Task> {
        if let Some(task) = self.ready.pop_front() {
            return Some(task);
        }
        let next = (0..self.delayed.len()).min_by_key(|&i| self.delayed[i].0)?;
        let (due, task) = self.delayed.remove(next);
        self.now_ms = self.now_ms.max(due);
        Some(task)
    }
}

impl UpdateSink for ConsoleHost {
    fn notify_inserted(&mut self, position: usize, count: usize) {
        self.count += count;
        println!("  [host] inserted {count} at {position}");
    }

    fn notify_removed(&mut self, position: usize, count: usize) {
        self.count -= count;
        println!("  [host] removed {count} at {position}");
    }

    fn notify_moved(&mut self, from: usize, to: usize) {
        println!("  [host] moved {from} -> {to}");
    }

    fn notify_changed(&mut self, position: usize, count: usize) {
        println!("  [host] changed {count} at {position}");
    }
}

impl ViewportHost for ConsoleHost {
    type Context = ();

    fn context(&self) -> &() {
        &()
    }

    fn is_attached(&self) -> bool {
        true
    }

    fn visible_window(&self) -> VisibleWindow {
        VisibleWindow::new(self.first_visible, Self::VISIBLE, self.count)
    }

    fn post(&mut self, task: Task) {
        self.ready.push_back(task);
    }

    fn post_delayed(&mut self, task: Task, delay_ms: u64) {
        self.delayed.push((self.now_ms + delay_ms, task));
    }

    fn scroll_to(&mut self, position: usize, smooth: bool, align: Align) -> Result<(), ScrollError> {
        println!("  [host] t={}ms scroll to {position} (smooth={smooth}, {align:?})", self.now_ms);
        self.first_visible = position;
        Ok(())
    }
}

fn posts(range: std::ops::Range<usize>) -> Vec<Item> {
    range
        .map(|i| Item {
            id: format!("post-{i}"),
            text: format!("post #{i}"),
            retry: None,
        })
        .collect()
}

fn drain(adapter: &mut Adapter<Item, String, ConsoleHost>) {
    while let Some(task) = adapter.host_mut().and_then(ConsoleHost::next_task) {
        adapter.run_task(task);
    }
}

fn main() {
    let requested = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&requested);
    let pagination = Pagination::new(
        move |page: usize| {
            println!("  [data] load page {page}");
            sink.lock().unwrap().push(page);
        },
        Footers,
    );

    let registry = BinderRegistry::from_bindings([
        Binding::new(POST, |_: &()| String::new(), |view: &mut String, item: &Item| {
            view.clone_from(&item.text)
        }),
        Binding::new(FOOTER, |_: &()| String::new(), |view: &mut String, item: &Item| {
            *view = format!("-- {} --", item.text)
        }),
    ])
    .unwrap();

    let mut adapter = Adapter::new(
        registry,
        AdapterOptions::new().with_pagination(pagination),
    );
    adapter.attach(ConsoleHost::default());

    println!("page 1:");
    adapter.bind_pagination(PaginationState::new(posts(0..10), 1)).unwrap();

    println!("user scrolls near the end:");
    adapter.host_mut().unwrap().first_visible = 5;
    adapter.on_scrolled();
    drain(&mut adapter);

    let page = requested.lock().unwrap().pop().unwrap_or(2);
    println!("page {page} in flight:");
    adapter
        .bind_pagination(PaginationState::new(posts(0..10), 1).with_request_state(RequestState::Loading))
        .unwrap();
    adapter.on_scrolled();
    drain(&mut adapter);

    println!("page {page} failed:");
    adapter
        .bind_pagination(PaginationState::new(posts(0..10), 1).with_request_state(RequestState::Error))
        .unwrap();
    let last = adapter.item_count() - 1;
    let mut view = adapter.create_view(adapter.item_view_type(last).unwrap(), &()).unwrap();
    adapter.bind_view(&mut view, last).unwrap();
    println!("  [view] {view}");
    if let Some(retry) = adapter.item_at(last).and_then(|item| item.retry.clone()) {
        retry.trigger();
    }

    println!("page {page} arrived:");
    adapter.bind_pagination(PaginationState::new(posts(0..20), page)).unwrap();

    println!("scroll to top:");
    adapter.dispatch_action(RecyclerAction::ScrollToTop { smooth: true });
    drain(&mut adapter);
}
