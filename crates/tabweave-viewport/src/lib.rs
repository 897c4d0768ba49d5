//! Tabweave Viewport Watcher
//!
//! Reports the viewport width to subscribers once resizing has settled.
//! Time is supplied by the caller, which keeps the watcher deterministic and
//! free of timers: the host records raw resize events and polls with the
//! current instant from its event loop.

mod watcher;

pub use watcher::{Subscriber, ViewportWatcher, DEFAULT_DEBOUNCE};
