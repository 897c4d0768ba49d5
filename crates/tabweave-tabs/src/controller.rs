//! Interaction handling: activation, keyboard navigation, hash targets

use std::sync::Arc;

use tabweave_dom::{Document, NodeId};

use crate::assemble::{hide, show};
use crate::interface::TabInterface;
use crate::key::{Direction, Key, KeyCommand};
use crate::state::{edge, neighbor};
use crate::Result;

impl TabInterface {
    /// Select `tab` and show its panel.
    ///
    /// Returns false without touching the document when the interface is not
    /// built, `tab` is not one of its tabs, or `tab` was also the target of
    /// the previous activation.
    pub fn activate(&mut self, doc: &mut Document, tab: NodeId) -> Result<bool> {
        let config = Arc::clone(&self.config);
        let container = self.container;
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(false);
        };
        let Some(index) = mounted.position(tab) else {
            return Ok(false);
        };
        if !mounted.state.record_activation(tab) {
            tracing::trace!(tab = %tab, "Duplicate activation ignored");
            return Ok(false);
        }

        config.callbacks.before_change(doc, container);

        let from = mounted.state.selected();
        let previous = mounted.entries[from];
        hide(doc, previous.tab, previous.tabpanel, &config)?;

        let next = mounted.entries[index];
        show(doc, next.tab, next.tabpanel, &config)?;
        if let Some(panel_id) = doc.attr(next.tabpanel, "id").map(str::to_string) {
            doc.set_attr(container, "aria-activedescendant", &panel_id)?;
        }
        mounted.state.select(index);

        tracing::debug!(
            container = %mounted.container_id,
            from,
            to = index,
            "Tab activated"
        );

        config.callbacks.after_change(doc, container);
        Ok(true)
    }

    /// Pointer or touch activation on `target` or anything inside a tab
    pub fn tap(&mut self, doc: &mut Document, target: NodeId) -> Result<bool> {
        match self.tab_index_for(doc, target) {
            Some(index) => {
                let tab = self.entries()[index].tab;
                self.activate(doc, tab)
            }
            None => Ok(false),
        }
    }

    /// A tab received focus. Selects it when `select_on_focus` is set.
    pub fn focus(&mut self, doc: &mut Document, target: NodeId) -> Result<bool> {
        if !self.config.select_on_focus {
            return Ok(false);
        }
        self.tap(doc, target)
    }

    /// Key press on a tab. Returns true if the key was handled.
    pub fn key_down(&mut self, doc: &mut Document, target: NodeId, key: Key) -> Result<bool> {
        let Some(origin) = self.tab_index_for(doc, target) else {
            return Ok(false);
        };
        let Some(command) = key.command() else {
            return Ok(false);
        };
        tracing::debug!(key = ?key, origin, "Tab list key press");

        match command {
            KeyCommand::FocusPanel => {
                let tabpanel = self.entries()[origin].tabpanel;
                doc.focus(tabpanel)?;
            }
            KeyCommand::Blur => {
                if doc
                    .focused()
                    .is_some_and(|focused| doc.contains(self.entries()[origin].tab, focused))
                {
                    doc.blur();
                }
            }
            KeyCommand::Move {
                direction,
                complete,
            } => {
                self.move_from(doc, origin, direction, complete)?;
            }
        }
        Ok(true)
    }

    /// Move focus between tabs, starting from the focused tab or, failing
    /// that, the selected one. Plain moves wrap around at either end; a
    /// `complete` move jumps to the first or last tab.
    pub fn move_focus(
        &mut self,
        doc: &mut Document,
        direction: Direction,
        complete: bool,
    ) -> Result<Option<NodeId>> {
        let origin = doc
            .focused()
            .and_then(|focused| self.tab_index_for(doc, focused))
            .or_else(|| self.selected_index());
        match origin {
            Some(origin) => self.move_from(doc, origin, direction, complete).map(Some),
            None => Ok(None),
        }
    }

    fn move_from(
        &mut self,
        doc: &mut Document,
        origin: usize,
        direction: Direction,
        complete: bool,
    ) -> Result<NodeId> {
        let count = self.entries().len();
        let target = if complete {
            edge(count, direction)
        } else {
            neighbor(origin, count, direction)
        };
        let tab = self.entries()[target].tab;
        doc.focus(tab)?;
        // Focus is an activation trigger of its own
        self.focus(doc, tab)?;
        Ok(tab)
    }

    /// Select the tab whose heading carries the id named by `fragment`.
    /// Returns the tab list, which the host should scroll into view.
    pub fn hash_activate(&mut self, doc: &mut Document, fragment: &str) -> Result<Option<NodeId>> {
        let (Some(index), Some(tablist)) = (self.hash_target(doc, fragment), self.tablist())
        else {
            return Ok(None);
        };
        let tab = self.entries()[index].tab;

        tracing::debug!(fragment, tab = %tab, "Location hash targets tab");
        self.activate(doc, tab)?;
        Ok(Some(tablist))
    }

    /// Index of the tab whose heading carries the id named by `fragment`
    pub fn hash_target(&self, doc: &Document, fragment: &str) -> Option<usize> {
        let fragment = fragment.trim_start_matches('#');
        if fragment.is_empty() {
            return None;
        }
        self.entries()
            .iter()
            .position(|e| doc.attr(e.heading, "id") == Some(fragment))
    }
}
