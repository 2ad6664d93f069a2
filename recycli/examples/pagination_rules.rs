// Example: which sentinel row shows for each request state, and when a page is requested.
use recycli::{
    Edge, LoadAction, LoadMode, Pagination, PaginationState, RecyclerItem, RequestState,
    SentinelProvider, TypeTag, VisibleWindow,
};

#[derive(Clone, Debug, PartialEq)]
enum Row {
    Post(String),
    Spinner,
    Retry(LoadAction),
    LoadMore(LoadAction),
}

impl RecyclerItem for Row {
    fn id(&self) -> &str {
        match self {
            Row::Post(id) => id.as_str(),
            Row::Spinner => "spinner",
            Row::Retry(_) => "retry",
            Row::LoadMore(_) => "load-more",
        }
    }

    fn type_tag(&self) -> TypeTag {
        match self {
            Row::Post(_) => TypeTag::new("post"),
            _ => TypeTag::new("sentinel"),
        }
    }
}

struct Rows;

impl SentinelProvider<Row> for Rows {
    fn progress(&self) -> Option<Row> {
        Some(Row::Spinner)
    }

    fn error(&self, retry: LoadAction) -> Option<Row> {
        Some(Row::Retry(retry))
    }

    fn load_more(&self, next: LoadAction) -> Option<Row> {
        Some(Row::LoadMore(next))
    }
}

fn main() {
    let scroll = Pagination::new(|page: usize| println!("  -> load page {page}"), Rows);
    let button = scroll.clone().with_mode(LoadMode::Button);

    let items = vec![Row::Post("p1".into()), Row::Post("p2".into())];
    for request_state in [RequestState::Idle, RequestState::Loading, RequestState::Error] {
        let state = PaginationState::new(items.clone(), 2).with_request_state(request_state);
        println!(
            "{request_state:?}: scroll={:?} button={:?}",
            scroll.sentinel(&state),
            button.sentinel(&state)
        );
    }

    let state = PaginationState::new(items, 2);
    for first_visible in [0, 10, 16] {
        let window = VisibleWindow::new(first_visible, 4, 25);
        let load = scroll.should_load(&state, window, Edge::Trailing);
        println!(
            "first_visible={first_visible} trailing_margin={} load={load}",
            window.trailing_margin()
        );
        if load {
            if let Some(page) = scroll.next_page(&state) {
                scroll.request(page);
            }
        }
    }

    let last_page = PaginationState::new(vec![Row::Post("p1".into())], 4);
    if let Some(Row::LoadMore(next)) = button.sentinel(&last_page) {
        println!("load-more button pressed:");
        next.trigger();
    }
}
