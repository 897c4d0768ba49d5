//! Host events

use std::time::Instant;

use tabweave_dom::NodeId;
use tabweave_tabs::Key;

/// Something the host event loop observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Click or touch end on an element
    Tap(NodeId),
    /// An element received focus
    Focus(NodeId),
    KeyDown { target: NodeId, key: Key },
    /// Raw window resize
    Resize { width: u32, at: Instant },
    /// Event loop turn; settles pending resizes
    Tick(Instant),
    /// The location hash changed
    HashChange { fragment: String },
    /// The page finished loading
    Load,
}
