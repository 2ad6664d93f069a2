//! Viewport-facing engine for the `recycli` crate.
//!
//! `recycli` holds the host-independent rules. This crate owns a rendered list and drives a
//! [`ViewportHost`] with it:
//!
//! - binding cycles that reconcile each new sequence and notify the host
//! - pagination sentinels and scroll-triggered page requests
//! - scroll actions, attach listeners, and first-appearance callbacks
//!
//! The host stays in charge of layout, view recycling and task scheduling. It calls back into
//! [`Adapter`] for view creation, binding, and the events it observes.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod bridge;
mod host;
mod listener;
mod options;

#[cfg(test)]
mod tests;

pub use adapter::{Adapter, RecyclerAction};
pub use host::{ScrollError, Task, ViewportHost};
pub use listener::{AttachListener, FirstAppearanceListener};
pub use options::{AdapterOptions, DEFAULT_DUPLICATE_SCROLL_DELAY_MS, OnDiffReadyCallback};
