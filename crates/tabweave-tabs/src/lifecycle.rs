//! Build, teardown and width-driven arbitration between the two

use std::sync::Arc;

use tabweave_dom::Document;

use crate::assemble::assemble;
use crate::config::TablistPosition;
use crate::interface::{Mounted, TabInterface};
use crate::partition::{heading_tag, partition};
use crate::state::ActiveTab;
use crate::{Result, FOCUS_ATTR};

impl TabInterface {
    /// Build the interface.
    ///
    /// `fragment` is the current location hash; a heading it names wins over
    /// both the first tab and a `data-tab-focus` heading. Returns false if the
    /// interface was already built or the container does not start with a
    /// heading.
    pub fn create(&mut self, doc: &mut Document, fragment: Option<&str>) -> Result<bool> {
        if self.mounted.is_some() {
            tracing::trace!(container = %self.container, "Already enabled");
            return Ok(false);
        }
        let config = Arc::clone(&self.config);
        let container = self.container;

        config.callbacks.init(doc, container);

        let Some(tag) = heading_tag(doc, container) else {
            tracing::debug!(container = %container, "First child is not a heading, skipping");
            return Ok(false);
        };

        let (container_id, generated_id) = match doc.attr(container, "id") {
            Some(id) if !id.is_empty() => (id.to_string(), false),
            _ => (self.ids.next_id(), true),
        };

        doc.add_class(container, &config.active_class)?;
        doc.set_attr(container, "id", &container_id)?;
        doc.set_attr(container, "role", "application")?;

        let sections = partition(doc, container, tag);
        let assembly = assemble(
            doc,
            container,
            &container_id,
            sections,
            &self.prototypes,
            &config,
        )?;

        // Inserted last so the partition above saw the original children
        match config.tablist_position {
            TablistPosition::Before => doc.prepend_child(container, assembly.tablist)?,
            TablistPosition::After => doc.append_child(container, assembly.tablist)?,
        }

        let autofocus = assembly
            .entries
            .iter()
            .find(|e| doc.has_attr(e.heading, FOCUS_ATTR))
            .map(|e| e.tab);
        let tab_count = assembly.entries.len();

        self.mounted = Some(Mounted {
            container_id,
            generated_id,
            tablist: assembly.tablist,
            entries: assembly.entries,
            state: ActiveTab::new(0),
        });

        if let Some(tab) = autofocus {
            self.activate(doc, tab)?;
        }
        if let Some(fragment) = fragment {
            self.hash_activate(doc, fragment)?;
        }

        tracing::info!(
            container = %self.container_id().unwrap_or_default(),
            tabs = tab_count,
            heading = tag,
            "Tab interface built"
        );

        config.callbacks.complete(doc, container);
        Ok(true)
    }

    /// Tear the interface down and put the original content back.
    /// Returns false if there was nothing to tear down.
    pub fn destroy(&mut self, doc: &mut Document) -> Result<bool> {
        let Some(mounted) = self.mounted.take() else {
            return Ok(false);
        };
        let container = self.container;

        doc.remove_class(container, &self.config.active_class)?;
        doc.remove_attr(container, "aria-activedescendant")?;
        doc.remove_attr(container, "role")?;
        if mounted.generated_id {
            doc.remove_attr(container, "id")?;
        }

        // Widget nodes are freed so repeated rebuilds reuse their slots
        doc.remove(mounted.tablist)?;
        for entry in &mounted.entries {
            doc.unwrap(entry.tabpanel)?;
            doc.remove(entry.tabpanel)?;
            if entry.heading_hidden {
                doc.remove_attr(entry.heading, "hidden")?;
                doc.remove_class(entry.heading, &self.config.heading_hidden_class)?;
            }
        }

        tracing::info!(
            container = %mounted.container_id,
            tabs = mounted.entries.len(),
            "Tab interface torn down"
        );
        Ok(true)
    }

    /// Build or tear down as the viewport crosses the threshold.
    /// Without a threshold the interface is left alone.
    pub fn apply_width(
        &mut self,
        doc: &mut Document,
        width: u32,
        fragment: Option<&str>,
    ) -> Result<bool> {
        let threshold = self.config.threshold;
        if threshold == 0 {
            return Ok(false);
        }
        if width >= threshold && !self.is_enabled() {
            tracing::debug!(width, threshold, "Viewport wide enough, building");
            self.create(doc, fragment)
        } else if width < threshold && self.is_enabled() {
            tracing::debug!(width, threshold, "Viewport too narrow, tearing down");
            self.destroy(doc)
        } else {
            tracing::trace!(width, threshold, "Viewport change needs no rebuild");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Callbacks, Config};
    use crate::ids::IdAllocator;
    use crate::prototype::Prototypes;
    use parking_lot::Mutex;

    const SOURCE: &str = r#"<div id="c"><h2>Intro</h2><p>hi</p><h2 data-tab-title="Alt">Long Title Here</h2><p>yo</p></div>"#;

    fn interface(doc: &Document, config: Config, ids: Arc<IdAllocator>) -> TabInterface {
        let container = doc.get_element_by_id("c").unwrap();
        let prototypes = Arc::new(Prototypes::build(&config));
        TabInterface::new(container, Arc::new(config), prototypes, ids)
    }

    fn labels(doc: &Document, ti: &TabInterface) -> Vec<String> {
        ti.tabs().iter().map(|t| doc.text_content(*t)).collect()
    }

    #[test]
    fn test_create_builds_tabs() {
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        assert!(ti.create(&mut doc, None).unwrap());

        let container = ti.container();
        assert_eq!(labels(&doc, &ti), vec!["Intro", "Alt"]);
        assert_eq!(doc.attr(container, "role"), Some("application"));
        assert!(doc.has_class(container, "TabInterface-enabled"));
        // Tab list comes first, then one panel per heading
        let children = doc.children(container).to_vec();
        assert_eq!(children[0], ti.tablist().unwrap());
        assert_eq!(&children[1..], ti.tabpanels().as_slice());
        assert_eq!(ti.selected_index(), Some(0));
    }

    #[test]
    fn test_create_twice_is_noop() {
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        assert!(ti.create(&mut doc, None).unwrap());
        let before = doc.outer_html(ti.container());
        assert!(!ti.create(&mut doc, None).unwrap());
        assert_eq!(doc.outer_html(ti.container()), before);
    }

    #[test]
    fn test_non_heading_container_untouched() {
        let html = r#"<div id="c"><p>lead</p><h2>A</h2><p>x</p></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        assert!(!ti.create(&mut doc, None).unwrap());
        assert!(!ti.is_enabled());
        assert_eq!(doc.inner_html(doc.root()), html);
    }

    #[test]
    fn test_tablist_after() {
        let config = Config {
            tablist_position: TablistPosition::After,
            ..Config::default()
        };
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, config, Arc::default());
        ti.create(&mut doc, None).unwrap();
        let children = doc.children(ti.container());
        assert_eq!(children.last().copied(), ti.tablist());
    }

    #[test]
    fn test_autofocus_marker_selects_tab() {
        let html = r#"<div id="c"><h2>A</h2><p>1</p><h2 data-tab-focus>B</h2><p>2</p></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        ti.create(&mut doc, None).unwrap();
        assert_eq!(ti.selected_index(), Some(1));
        let panels = ti.tabpanels();
        assert!(doc.has_attr(panels[0], "hidden"));
        assert!(!doc.has_attr(panels[1], "hidden"));
    }

    #[test]
    fn test_fragment_overrides_autofocus() {
        let html = r#"<div id="c"><h2 id="a">A</h2><h2 data-tab-focus>B</h2><h2 id="c3">C</h2></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        ti.create(&mut doc, Some("c3")).unwrap();
        assert_eq!(ti.selected_index(), Some(2));
    }

    #[test]
    fn test_callback_order() {
        let log: Arc<Mutex<Vec<String>>> = Arc::default();
        let (a, b, c, d) = (
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
        );
        let config = Config::default().with_callbacks(
            Callbacks::default()
                .on_init(move |doc, container| {
                    // Runs before any mutation
                    let role = doc.attr(container, "role").unwrap_or("none").to_string();
                    a.lock().push(format!("init:{}", role));
                })
                .on_complete(move |doc, container| {
                    let tabs = doc
                        .descendants(container)
                        .into_iter()
                        .filter(|n| doc.attr(*n, "role") == Some("tab"))
                        .count();
                    c.lock().push(format!("complete:{}", tabs));
                })
                .on_before_change(move |_, _| b.lock().push("before".to_string()))
                .on_after_change(move |_, _| d.lock().push("after".to_string())),
        );
        let html = r#"<div id="c"><h2>A</h2><h2 data-tab-focus>B</h2></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, config, Arc::default());
        ti.create(&mut doc, None).unwrap();
        assert_eq!(
            *log.lock(),
            vec!["init:none", "before", "after", "complete:2"]
        );
    }

    #[test]
    fn test_destroy_restores_source() {
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, Config::default(), Arc::default());

        // Never built
        assert!(!ti.destroy(&mut doc).unwrap());
        assert_eq!(doc.inner_html(doc.root()), SOURCE);

        ti.create(&mut doc, None).unwrap();
        let tab = ti.tabs()[1];
        ti.activate(&mut doc, tab).unwrap();
        assert!(ti.destroy(&mut doc).unwrap());
        assert_eq!(doc.inner_html(doc.root()), SOURCE);
        assert!(!ti.is_enabled());
        assert!(ti.entries().is_empty());

        // Already destroyed
        assert!(!ti.destroy(&mut doc).unwrap());
        assert_eq!(doc.inner_html(doc.root()), SOURCE);
    }

    #[test]
    fn test_destroy_keeps_supplied_id() {
        let html = r#"<div id="c"><h2>A</h2></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        ti.create(&mut doc, None).unwrap();
        assert_eq!(ti.container_id(), Some("c"));
        assert_eq!(doc.attr(ti.tabs()[0], "id"), Some("c-0-tab"));
        ti.destroy(&mut doc).unwrap();
        assert_eq!(doc.inner_html(doc.root()), html);
    }

    #[test]
    fn test_rebuild_gets_fresh_ids() {
        let mut doc =
            Document::parse_fragment(r#"<div class="tabs"><h2>A</h2><p>1</p><h2>B</h2></div>"#);
        let container = doc.first_element_child(doc.root()).unwrap();
        let config = Config::default();
        let mut ti = TabInterface::new(
            container,
            Arc::new(config.clone()),
            Arc::new(Prototypes::build(&config)),
            Arc::new(IdAllocator::new(7)),
        );
        let source = doc.inner_html(doc.root());

        ti.create(&mut doc, None).unwrap();
        let first_labels = labels(&doc, &ti);
        assert_eq!(ti.container_id(), Some("TabInterface-7"));
        assert_eq!(doc.attr(ti.tabs()[1], "id"), Some("TabInterface-7-1-tab"));

        ti.destroy(&mut doc).unwrap();
        assert_eq!(doc.inner_html(doc.root()), source);

        ti.create(&mut doc, None).unwrap();
        assert_eq!(ti.container_id(), Some("TabInterface-8"));
        assert_eq!(labels(&doc, &ti), first_labels);
        assert_eq!(ti.tabs().len(), 2);
        assert_eq!(ti.selected_index(), Some(0));
    }

    #[test]
    fn test_rebuild_cycles_reuse_arena_slots() {
        let html = r#"<div id="c"><h2>A <em>x</em></h2><p>1</p><h2 data-tab-thumbnail="t.png">B</h2></div>"#;
        let mut doc = Document::parse_fragment(html);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        ti.create(&mut doc, None).unwrap();
        let slots = doc.allocated();

        for _ in 0..200 {
            assert!(ti.destroy(&mut doc).unwrap());
            assert!(ti.create(&mut doc, None).unwrap());
        }
        assert_eq!(doc.allocated(), slots);
        assert_eq!(labels(&doc, &ti), vec!["A x", "B "]);

        ti.destroy(&mut doc).unwrap();
        assert_eq!(doc.inner_html(doc.root()), html);
    }

    #[test]
    fn test_apply_width_gates_on_threshold() {
        let config = Config {
            threshold: 600,
            ..Config::default()
        };
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, config, Arc::default());

        assert!(!ti.apply_width(&mut doc, 500, None).unwrap());
        assert!(!ti.is_enabled());
        assert!(ti.apply_width(&mut doc, 600, None).unwrap());
        assert!(ti.is_enabled());
        assert!(!ti.apply_width(&mut doc, 900, None).unwrap());
        assert!(ti.apply_width(&mut doc, 599, None).unwrap());
        assert!(!ti.is_enabled());
        assert!(!ti.apply_width(&mut doc, 300, None).unwrap());
        assert_eq!(doc.inner_html(doc.root()), SOURCE);
    }

    #[test]
    fn test_apply_width_without_threshold() {
        let mut doc = Document::parse_fragment(SOURCE);
        let mut ti = interface(&doc, Config::default(), Arc::default());
        assert!(!ti.apply_width(&mut doc, 100, None).unwrap());
        assert!(!ti.is_enabled());
    }
}
