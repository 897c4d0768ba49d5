//! Page host
//!
//! Everything the tab interfaces share lives in [`Page`]: the document, the
//! location, the identifier allocator and the viewport watcher. Events are
//! processed one at a time, in dispatch order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use percent_encoding::percent_decode_str;
use url::Url;

use tabweave_dom::{Document, DomError, NodeId};
use tabweave_tabs::{Config, ContainerOverrides, Direction, IdAllocator, Prototypes, TabInterface};
use tabweave_viewport::ViewportWatcher;

use crate::config::PageConfig;
use crate::error::CoreError;
use crate::event::Event;
use crate::Result;

pub struct Page {
    stage: Stage,
    /// Kept apart from the stage so subscribers can borrow the stage mutably
    viewport: ViewportWatcher<Stage>,
}

/// State the viewport subscribers operate on
struct Stage {
    document: Document,
    location: Url,
    ids: Arc<IdAllocator>,
    interfaces: Vec<TabInterface>,
    /// Element the host should scroll into view
    scroll_anchor: Option<NodeId>,
}

impl Stage {
    /// Decoded location fragment; heading ids are compared unescaped
    fn fragment(&self) -> Option<String> {
        self.location
            .fragment()
            .filter(|f| !f.is_empty())
            .map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned())
    }

    fn create(&mut self, container: NodeId) -> Result<bool> {
        self.build_with(container, |ti, doc, fragment| ti.create(doc, fragment))
    }

    fn arbitrate(&mut self, container: NodeId, width: u32) -> Result<bool> {
        self.build_with(container, |ti, doc, fragment| ti.apply_width(doc, width, fragment))
    }

    /// Run a build step for `container` with the current fragment. A build
    /// that lands on a hash target anchors the scroll position at its tab
    /// list; a teardown drops an anchor pointing at the removed tab list.
    fn build_with<F>(&mut self, container: NodeId, f: F) -> Result<bool>
    where
        F: FnOnce(&mut TabInterface, &mut Document, Option<&str>) -> tabweave_tabs::Result<bool>,
    {
        let fragment = self.fragment();
        let ti = self
            .interfaces
            .iter_mut()
            .find(|ti| ti.container() == container)
            .ok_or(CoreError::NotRegistered(container))?;
        let previous = ti.tablist();
        let changed = f(ti, &mut self.document, fragment.as_deref())?;

        if changed && ti.is_enabled() {
            let targeted = fragment
                .as_deref()
                .is_some_and(|target| ti.hash_target(&self.document, target).is_some());
            if targeted {
                self.scroll_anchor = ti.tablist();
            }
        } else if changed && previous.is_some() && self.scroll_anchor == previous {
            self.scroll_anchor = None;
        }
        Ok(changed)
    }

    /// Run `f` against the interface whose tab list holds `target`
    fn with_owner<F>(&mut self, target: NodeId, f: F) -> Result<bool>
    where
        F: FnOnce(&mut TabInterface, &mut Document) -> tabweave_tabs::Result<bool>,
    {
        let document = &self.document;
        let Some(ti) = self
            .interfaces
            .iter_mut()
            .find(|ti| ti.tab_index_for(document, target).is_some())
        else {
            return Ok(false);
        };
        Ok(f(ti, &mut self.document)?)
    }

    fn follow_hash(&mut self) -> Result<()> {
        let Some(fragment) = self.fragment() else {
            return Ok(());
        };
        for ti in self.interfaces.iter_mut() {
            if let Some(anchor) = ti.hash_activate(&mut self.document, &fragment)? {
                self.scroll_anchor = Some(anchor);
            }
        }
        Ok(())
    }
}

impl Page {
    pub fn new(document: Document, config: &PageConfig) -> Result<Self> {
        let location = Url::parse(&config.url)?;
        let viewport = ViewportWatcher::with_debounce(
            config.viewport_width,
            Duration::from_millis(config.resize_debounce_ms),
        );

        Ok(Self {
            stage: Stage {
                document,
                location,
                ids: Arc::new(IdAllocator::new(config.id_seed)),
                interfaces: Vec::new(),
                scroll_anchor: None,
            },
            viewport,
        })
    }

    pub fn from_html(html: &str, config: &PageConfig) -> Result<Self> {
        Self::new(Document::parse_fragment(html), config)
    }

    pub fn document(&self) -> &Document {
        &self.stage.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.stage.document
    }

    pub fn location(&self) -> &Url {
        &self.stage.location
    }

    /// Last settled viewport width
    pub fn viewport_width(&self) -> u32 {
        self.viewport.width()
    }

    /// When the host should next send [`Event::Tick`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.viewport.deadline()
    }

    pub fn scroll_anchor(&self) -> Option<NodeId> {
        self.stage.scroll_anchor
    }

    pub fn interface(&self, container: NodeId) -> Option<&TabInterface> {
        self.stage
            .interfaces
            .iter()
            .find(|ti| ti.container() == container)
    }

    pub fn interfaces(&self) -> &[TabInterface] {
        &self.stage.interfaces
    }

    /// Attach tab interfaces to `containers`, all sharing one configuration.
    /// Returns how many containers were newly registered.
    pub fn tab_interface(&mut self, containers: &[NodeId], config: Config) -> Result<usize> {
        let config = Arc::new(config);
        let prototypes = Arc::new(Prototypes::build(&config));
        let mut registered = 0;
        for &container in containers {
            if self.register(container, Arc::clone(&config), Arc::clone(&prototypes))? {
                registered += 1;
            }
        }
        Ok(registered)
    }

    /// Attach a tab interface to one container.
    ///
    /// With a threshold the interface follows the viewport width from now on;
    /// without one it is built right away. Returns false if the container
    /// already has an interface.
    pub fn register(
        &mut self,
        container: NodeId,
        config: Arc<Config>,
        prototypes: Arc<Prototypes>,
    ) -> Result<bool> {
        let document = &self.stage.document;
        match document.node(container) {
            None => return Err(DomError::NodeNotFound(container).into()),
            Some(node) if !node.is_element() => {
                return Err(DomError::NotAnElement(container).into())
            }
            Some(_) => {}
        }
        if self.interface(container).is_some() {
            tracing::debug!(container = %container, "Container already registered");
            return Ok(false);
        }

        let overrides = ContainerOverrides::from_element(document, container)?;
        let config = if overrides.is_empty() {
            config
        } else {
            Arc::new(config.merged(&overrides))
        };
        let responsive = config.is_responsive();
        let threshold = config.threshold;

        self.stage.interfaces.push(TabInterface::new(
            container,
            config,
            prototypes,
            Arc::clone(&self.stage.ids),
        ));

        if responsive {
            tracing::debug!(container = %container, threshold, "Watching viewport");
            self.viewport
                .subscribe(&mut self.stage, move |stage: &mut Stage, width| {
                    if let Err(e) = stage.arbitrate(container, width) {
                        tracing::error!(container = %container, width, "Failed to apply viewport width: {}", e);
                    }
                });
        } else {
            self.stage.create(container)?;
        }
        Ok(true)
    }

    pub fn create(&mut self, container: NodeId) -> Result<bool> {
        self.stage.create(container)
    }

    pub fn destroy(&mut self, container: NodeId) -> Result<bool> {
        self.stage.build_with(container, |ti, doc, _| ti.destroy(doc))
    }

    /// Move focus between the tabs of `container`
    pub fn move_focus(
        &mut self,
        container: NodeId,
        direction: Direction,
        complete: bool,
    ) -> Result<Option<NodeId>> {
        let Stage {
            document,
            interfaces,
            ..
        } = &mut self.stage;
        let ti = interfaces
            .iter_mut()
            .find(|ti| ti.container() == container)
            .ok_or(CoreError::NotRegistered(container))?;
        Ok(ti.move_focus(document, direction, complete)?)
    }

    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        tracing::trace!(event = ?event, "Dispatch");
        match event {
            Event::Tap(target) => {
                self.stage.with_owner(target, |ti, doc| ti.tap(doc, target))?;
            }
            Event::Focus(target) => {
                self.stage.document.focus(target)?;
                self.stage.with_owner(target, |ti, doc| ti.focus(doc, target))?;
            }
            Event::KeyDown { target, key } => {
                self.stage.with_owner(target, |ti, doc| ti.key_down(doc, target, key))?;
            }
            Event::Resize { width, at } => {
                self.viewport.resize(width, at);
            }
            Event::Tick(now) => {
                self.viewport.poll(&mut self.stage, now);
            }
            Event::HashChange { fragment } => {
                let fragment = fragment.trim_start_matches('#');
                let fragment = (!fragment.is_empty()).then_some(fragment);
                self.stage.location.set_fragment(fragment);
                self.stage.follow_hash()?;
            }
            Event::Load => {
                self.stage.follow_hash()?;
            }
        }
        Ok(())
    }
}
