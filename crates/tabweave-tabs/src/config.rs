//! Tab interface configuration
//!
//! Defaults match the class names and element kinds of the classic
//! TabInterface markup, so existing stylesheets keep working.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabweave_dom::{Document, NodeId};

use crate::error::TabError;
use crate::Result;

/// Lifecycle hook. Receives the document and the container element.
pub type Callback = Arc<dyn Fn(&mut Document, NodeId) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Callbacks {
    pub oninit: Option<Callback>,
    pub oncomplete: Option<Callback>,
    pub onbeforechange: Option<Callback>,
    pub onafterchange: Option<Callback>,
}

impl Callbacks {
    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, NodeId) + Send + Sync + 'static,
    {
        self.oninit = Some(Arc::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, NodeId) + Send + Sync + 'static,
    {
        self.oncomplete = Some(Arc::new(f));
        self
    }

    pub fn on_before_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, NodeId) + Send + Sync + 'static,
    {
        self.onbeforechange = Some(Arc::new(f));
        self
    }

    pub fn on_after_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, NodeId) + Send + Sync + 'static,
    {
        self.onafterchange = Some(Arc::new(f));
        self
    }

    pub(crate) fn init(&self, doc: &mut Document, container: NodeId) {
        Self::fire(&self.oninit, doc, container);
    }

    pub(crate) fn complete(&self, doc: &mut Document, container: NodeId) {
        Self::fire(&self.oncomplete, doc, container);
    }

    pub(crate) fn before_change(&self, doc: &mut Document, container: NodeId) {
        Self::fire(&self.onbeforechange, doc, container);
    }

    pub(crate) fn after_change(&self, doc: &mut Document, container: NodeId) {
        Self::fire(&self.onafterchange, doc, container);
    }

    fn fire(callback: &Option<Callback>, doc: &mut Document, container: NodeId) {
        if let Some(callback) = callback {
            callback(doc, container);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("oninit", &self.oninit.is_some())
            .field("oncomplete", &self.oncomplete.is_some())
            .field("onbeforechange", &self.onbeforechange.is_some())
            .field("onafterchange", &self.onafterchange.is_some())
            .finish()
    }
}

/// Source-order placement of the tab list relative to the panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablistPosition {
    #[default]
    Before,
    After,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum viewport width for the interface; 0 keeps it always built
    pub threshold: u32,
    /// Class added to the container while the interface is built
    pub active_class: String,
    pub tabpanel_el: String,
    pub tabpanel_class: String,
    pub tabpanel_hidden_class: String,
    pub tablist_el: String,
    pub tablist_class: String,
    pub tablist_position: TablistPosition,
    pub tab_el: String,
    pub tab_class: String,
    pub tab_active_class: String,
    pub tab_thumbnail_class: String,
    pub hide_headers: bool,
    pub heading_hidden_class: String,
    /// Focusing a tab also selects it
    pub select_on_focus: bool,
    #[serde(skip)]
    pub callbacks: Callbacks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0,
            active_class: "TabInterface-enabled".to_string(),
            tabpanel_el: "section".to_string(),
            tabpanel_class: "TabInterface-tabpanel".to_string(),
            tabpanel_hidden_class: "TabInterface-tabpanel-hidden".to_string(),
            tablist_el: "ol".to_string(),
            tablist_class: "TabInterface-tablist".to_string(),
            tablist_position: TablistPosition::Before,
            tab_el: "li".to_string(),
            tab_class: "TabInterface-tab".to_string(),
            tab_active_class: "TabInterface-active".to_string(),
            tab_thumbnail_class: "TabInterface-tab-thumbnail".to_string(),
            hide_headers: true,
            heading_hidden_class: "TabInterface-heading-hidden".to_string(),
            select_on_focus: true,
            callbacks: Callbacks::default(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON object; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Copy of this configuration with per-container overrides folded in
    pub fn merged(&self, overrides: &ContainerOverrides) -> Self {
        let mut config = self.clone();
        if let Some(hide) = overrides.hide_headers {
            config.hide_headers = hide;
        }
        if let Some(threshold) = overrides.threshold {
            config.threshold = threshold;
        }
        config
    }

    pub fn is_responsive(&self) -> bool {
        self.threshold > 0
    }
}

/// Settings a single container may override through its own attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerOverrides {
    pub hide_headers: Option<bool>,
    pub threshold: Option<u32>,
}

impl ContainerOverrides {
    pub const HIDE_HEADERS_ATTR: &'static str = "data-tab-hide-headers";
    pub const THRESHOLD_ATTR: &'static str = "data-tab-threshold";

    pub fn from_element(doc: &Document, container: NodeId) -> Result<Self> {
        // Only the literal "false" turns hiding off
        let hide_headers = doc
            .attr(container, Self::HIDE_HEADERS_ATTR)
            .map(|value| value.trim() != "false");

        let threshold = match doc.attr(container, Self::THRESHOLD_ATTR) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| TabError::InvalidThreshold(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            hide_headers,
            threshold,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.hide_headers.is_none() && self.threshold.is_none()
    }
}
