//! Active tab state
//!
//! One slot for the selected tab pair, one slot remembering the tab most
//! recently activated. A tap and the focus it causes arrive as two events for
//! the same user action; the second one finds its tab already in the memo
//! and is dropped.

use tabweave_dom::NodeId;

use crate::key::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTab {
    selected: usize,
    last_activated: Option<NodeId>,
}

impl ActiveTab {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            last_activated: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn last_activated(&self) -> Option<NodeId> {
        self.last_activated
    }

    /// Remember `tab` as the latest activation. Returns false if it repeats
    /// the previous one.
    pub fn record_activation(&mut self, tab: NodeId) -> bool {
        if self.last_activated == Some(tab) {
            return false;
        }
        self.last_activated = Some(tab);
        true
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }
}

/// Index one step from `index` in `direction`, wrapping at both ends
pub(crate) fn neighbor(index: usize, count: usize, direction: Direction) -> usize {
    if count == 0 {
        return 0;
    }
    match direction {
        Direction::Previous if index == 0 => count - 1,
        Direction::Previous => index - 1,
        Direction::Next => (index + 1) % count,
    }
}

/// First or last index
pub(crate) fn edge(count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Previous => 0,
        Direction::Next => count.saturating_sub(1),
    }
}
