use alloc::string::String;

use recycli::{Align, UpdateSink, VisibleWindow};

/// Deferred work the adapter asks its host to run later on the presentation thread.
///
/// Hosts hand tasks back through [`crate::Adapter::run_task`]; the adapter decides there
/// whether the task is still relevant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Task {
    /// Re-evaluate whether the viewport is close enough to the edge to load a page.
    CheckNeedLoad { token: u64 },
    ScrollTo { position: usize, smooth: bool },
}

/// A scroll the host could not carry out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("scroll to {position} failed: {reason}")]
pub struct ScrollError {
    pub position: usize,
    pub reason: String,
}

/// The virtualized surface an [`crate::Adapter`] renders into.
///
/// The host owns layout and view recycling. It receives structural notifications through
/// [`UpdateSink`], reports geometry, and schedules [`Task`]s.
pub trait ViewportHost: UpdateSink {
    /// Whatever views are created in (a parent container, a window, a style context).
    type Context;

    fn context(&self) -> &Self::Context;

    /// Whether the host is currently live; scrolls are skipped otherwise.
    fn is_attached(&self) -> bool;

    fn visible_window(&self) -> VisibleWindow;

    /// Reversed layouts paginate at the leading edge.
    fn stack_from_end(&self) -> bool {
        false
    }

    fn post(&mut self, task: Task);

    fn post_delayed(&mut self, task: Task, delay_ms: u64);

    fn scroll_to(&mut self, position: usize, smooth: bool, align: Align) -> Result<(), ScrollError>;
}
