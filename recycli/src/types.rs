use core::fmt;

/// Names the concrete shape of an item; binders are registered against tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(pub &'static str);

impl TypeTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Dense view-type id handed to the host for view recycling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewType(pub usize);

/// Where a scrolled-to item should land in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Snap the item to the leading edge.
    Start,
    End,
    /// Scroll the minimum distance that makes the item visible.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// How the next page is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadMode {
    /// Loads are triggered by the viewport approaching the end of the list.
    #[default]
    Scroll,
    /// Loads are triggered by a rendered "load more" row.
    Button,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffMode {
    /// Reconcile and dispatch on the calling thread before `bind` returns.
    Synchronous,
    /// Reconcile on a worker thread; results are applied by polling.
    Background,
}

/// The list edge where pagination happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Leading,
    Trailing,
}

/// The host's current view of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub first_visible: usize,
    pub visible_count: usize,
    pub total_count: usize,
}

impl VisibleWindow {
    pub fn new(first_visible: usize, visible_count: usize, total_count: usize) -> Self {
        Self {
            first_visible,
            visible_count,
            total_count,
        }
    }

    /// Number of items before the first visible one.
    pub fn leading_margin(&self) -> usize {
        self.first_visible
    }

    /// Number of items after the last visible one.
    pub fn trailing_margin(&self) -> usize {
        self.total_count
            .saturating_sub(self.first_visible.saturating_add(self.visible_count))
    }
}
