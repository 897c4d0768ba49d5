//! Debounced resize watcher

use std::time::{Duration, Instant};

/// Quiet period a resize burst must end with before subscribers hear of it
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Width callback. Receives the context the owner passes to `poll`.
pub type Subscriber<C> = Box<dyn FnMut(&mut C, u32) + Send>;

/// Resize waiting for its quiet period to elapse
#[derive(Debug, Clone, Copy)]
struct PendingResize {
    width: u32,
    deadline: Instant,
}

pub struct ViewportWatcher<C> {
    /// Last settled width
    width: u32,
    debounce: Duration,
    pending: Option<PendingResize>,
    subscribers: Vec<Subscriber<C>>,
}

impl<C> ViewportWatcher<C> {
    pub fn new(width: u32) -> Self {
        Self::with_debounce(width, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(width: u32, debounce: Duration) -> Self {
        Self {
            width,
            debounce,
            pending: None,
            subscribers: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// When the pending resize will settle, if one is pending
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Register a callback. It runs immediately with the current width and
    /// again after every settled resize.
    pub fn subscribe<F>(&mut self, ctx: &mut C, callback: F)
    where
        F: FnMut(&mut C, u32) + Send + 'static,
    {
        let mut callback: Subscriber<C> = Box::new(callback);
        callback(ctx, self.width);
        self.subscribers.push(callback);
    }

    /// Record a raw resize event. Any pending wait restarts.
    pub fn resize(&mut self, width: u32, now: Instant) {
        let deadline = now + self.debounce;
        if self.pending.is_some() {
            tracing::trace!(width, "Resize during debounce, restarting wait");
        }
        self.pending = Some(PendingResize { width, deadline });
    }

    /// Deliver the pending resize if its quiet period has elapsed.
    /// Returns true if subscribers were notified.
    pub fn poll(&mut self, ctx: &mut C, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                self.width = pending.width;
                tracing::debug!(
                    width = pending.width,
                    subscribers = self.subscribers.len(),
                    "Viewport resize settled"
                );
                for subscriber in self.subscribers.iter_mut() {
                    subscriber(ctx, pending.width);
                }
                true
            }
            _ => false,
        }
    }
}
