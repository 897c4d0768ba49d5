//! Tab interface bound to one container

use std::sync::Arc;

use tabweave_dom::{Document, NodeId};

use crate::assemble::TabEntry;
use crate::config::Config;
use crate::ids::IdAllocator;
use crate::prototype::Prototypes;
use crate::state::ActiveTab;

/// One container's tab interface.
///
/// Holds no tabs until [`create`](TabInterface::create) succeeds and drops
/// them again on [`destroy`](TabInterface::destroy). The mounted state
/// doubles as the container's enabled marker.
pub struct TabInterface {
    pub(crate) container: NodeId,
    pub(crate) config: Arc<Config>,
    pub(crate) prototypes: Arc<Prototypes>,
    pub(crate) ids: Arc<IdAllocator>,
    pub(crate) mounted: Option<Mounted>,
}

pub(crate) struct Mounted {
    pub container_id: String,
    /// The container had no id of its own
    pub generated_id: bool,
    pub tablist: NodeId,
    pub entries: Vec<TabEntry>,
    pub state: ActiveTab,
}

impl Mounted {
    pub fn position(&self, tab: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| e.tab == tab)
    }
}

impl TabInterface {
    pub fn new(
        container: NodeId,
        config: Arc<Config>,
        prototypes: Arc<Prototypes>,
        ids: Arc<IdAllocator>,
    ) -> Self {
        Self {
            container,
            config,
            prototypes,
            ids,
            mounted: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.mounted.as_ref().map(|m| m.container_id.as_str())
    }

    pub fn tablist(&self) -> Option<NodeId> {
        self.mounted.as_ref().map(|m| m.tablist)
    }

    pub fn entries(&self) -> &[TabEntry] {
        self.mounted
            .as_ref()
            .map(|m| m.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn tabs(&self) -> Vec<NodeId> {
        self.entries().iter().map(|e| e.tab).collect()
    }

    pub fn tabpanels(&self) -> Vec<NodeId> {
        self.entries().iter().map(|e| e.tabpanel).collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.mounted.as_ref().map(|m| m.state.selected())
    }

    pub fn selected_tab(&self) -> Option<NodeId> {
        let mounted = self.mounted.as_ref()?;
        mounted.entries.get(mounted.state.selected()).map(|e| e.tab)
    }

    /// Index of the tab that `target` belongs to, if `target` sits inside
    /// one of this interface's tabs
    pub fn tab_index_for(&self, doc: &Document, target: NodeId) -> Option<usize> {
        let mounted = self.mounted.as_ref()?;
        if !doc.contains(mounted.tablist, target) {
            return None;
        }
        let tab = doc.closest(target, |d, n| d.attr(n, "role") == Some("tab"))?;
        mounted.position(tab)
    }
}
