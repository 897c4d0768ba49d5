//! Container identifier allocation

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out `{prefix}-{n}` identifiers for containers that lack an `id`.
/// The counter only moves forward, so identifiers are never reused.
#[derive(Debug)]
pub struct IdAllocator {
    prefix: String,
    next: AtomicU64,
}

impl IdAllocator {
    pub const DEFAULT_PREFIX: &'static str = "TabInterface";

    pub fn new(seed: u64) -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX, seed)
    }

    pub fn with_prefix(prefix: &str, seed: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(seed),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(0)
    }
}
