//! Host-driven events: view attachment, scroll signals, deferred tasks, scroll actions.

use alloc::string::ToString;

use recycli::{Align, LoadMode, RecyclerItem};

use crate::{Adapter, RecyclerAction, Task, ViewportHost};

impl<I: RecyclerItem, V, H: ViewportHost> Adapter<I, V, H> {
    /// The host attached the view at `position` to the viewport.
    pub fn on_item_attached(&mut self, position: usize) {
        let Some(item) = self.rendered.get(position) else {
            rtrace!(position, "Adapter::on_item_attached: out of bounds");
            return;
        };
        if let Some(listener) = self.options.attach_listeners.get(item.id()) {
            listener.on_attached();
        }
        if let Some(listener) = self.options.first_appearance_listeners.get(item.id()) {
            if self.appeared.insert(item.id().to_string()) {
                rtrace!(id = item.id(), "Adapter: first appearance");
                listener.on_first_appearance(item);
            }
        }
    }

    /// The host detached the view at `position`.
    pub fn on_item_detached(&self, position: usize) {
        let Some(item) = self.rendered.get(position) else {
            return;
        };
        if let Some(listener) = self.options.attach_listeners.get(item.id()) {
            listener.on_detached();
        }
    }

    pub fn on_scrolled(&mut self) {
        self.schedule_load_check();
    }

    pub fn on_scroll_state_changed(&mut self) {
        self.schedule_load_check();
    }

    /// Runs a task the adapter posted earlier.
    ///
    /// Load checks superseded by a newer one are ignored.
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::CheckNeedLoad { token } if token == self.scroll_check_token => {
                self.check_need_load();
            }
            Task::CheckNeedLoad { .. } => {
                rtrace!("Adapter: superseded load check");
            }
            Task::ScrollTo { position, smooth } => self.perform_scroll(position, smooth),
        }
    }

    pub fn dispatch_action(&mut self, action: RecyclerAction<I>) {
        match action {
            RecyclerAction::ScrollToItem(item) => match self.position_of(item.id()) {
                Some(position) => self.scroll_to_position(position, true),
                None => {
                    rtrace!(id = item.id(), "Adapter: scroll target not rendered");
                }
            },
            RecyclerAction::ScrollToTop { smooth } => self.scroll_to_position(0, smooth),
        }
    }

    /// Schedules a scroll now and again after the duplicate-scroll delay.
    ///
    /// Bounds are checked when each attempt runs.
    pub fn scroll_to_position(&mut self, position: usize, smooth: bool) {
        let delay_ms = self.options.duplicate_scroll_delay_ms;
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let task = Task::ScrollTo { position, smooth };
        host.post(task);
        host.post_delayed(task, delay_ms);
    }

    fn schedule_load_check(&mut self) {
        let (Some(pagination), Some(state)) = (&self.options.pagination, &self.state) else {
            return;
        };
        if pagination.mode() != LoadMode::Scroll || state.is_loading() || state.is_error() {
            return;
        }
        let Some(host) = self.host.as_mut() else {
            return;
        };
        self.scroll_check_token += 1;
        host.post(Task::CheckNeedLoad {
            token: self.scroll_check_token,
        });
    }

    fn check_need_load(&mut self) {
        let (Some(pagination), Some(state), Some(host)) =
            (&self.options.pagination, &self.state, &self.host)
        else {
            return;
        };
        if state.is_error() {
            return;
        }
        if !pagination.should_load(state, host.visible_window(), self.edge()) {
            return;
        }
        let Some(page) = pagination.next_page(state) else {
            return;
        };
        if self.requested_page == Some(page) {
            rtrace!(page, "Adapter: page already requested");
            return;
        }
        self.requested_page = Some(page);
        pagination.request(page);
    }

    fn perform_scroll(&mut self, position: usize, smooth: bool) {
        let count = self.rendered.len();
        let Some(host) = self.host.as_mut() else {
            return;
        };
        if !host.is_attached() {
            return;
        }
        if position >= count {
            rtrace!(position, count, "Adapter: scroll target out of bounds");
            return;
        }
        let align = if smooth { Align::Start } else { Align::Auto };
        if let Err(_err) = host.scroll_to(position, smooth, align) {
            rwarn!(error = %_err, "Adapter: scroll failed");
        }
    }
}
