//! Process-wide switches shared by every adapter.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::DiffMode;

static BACKGROUND_DIFF: AtomicBool = AtomicBool::new(false);

/// Selects background reconciliation for adapters that have not latched a mode yet.
///
/// Adapters read this once, on their first binding cycle.
pub fn set_background_diff(enabled: bool) {
    BACKGROUND_DIFF.store(enabled, Ordering::Relaxed);
}

pub fn background_diff_enabled() -> bool {
    BACKGROUND_DIFF.load(Ordering::Relaxed)
}

/// The mode a new adapter should latch. Always synchronous without `std`.
pub fn diff_mode() -> DiffMode {
    if cfg!(feature = "std") && background_diff_enabled() {
        DiffMode::Background
    } else {
        DiffMode::Synchronous
    }
}
