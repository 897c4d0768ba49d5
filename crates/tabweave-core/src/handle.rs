//! Shared page handle
use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::PageConfig;
use crate::event::Event;
use crate::page::Page;
use crate::Result;

/// Thread-safe page wrapper.
///
/// Cloning shares the page. Events from any thread are applied one at a
/// time, so an activation always finishes before the next event is seen.
#[derive(Clone)]
pub struct PageHandle {
    page: Arc<Mutex<Page>>,
}

impl PageHandle {
    pub fn new(page: Page) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
        }
    }

    pub fn from_html(html: &str, config: &PageConfig) -> Result<Self> {
        Ok(Self::new(Page::from_html(html, config)?))
    }

    pub fn dispatch(&self, event: Event) -> Result<()> {
        self.page.lock().dispatch(event)
    }

    pub fn with_page<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Page) -> T,
    {
        let guard = self.page.lock();
        f(&guard)
    }

    pub fn with_page_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Page) -> T,
    {
        let mut guard = self.page.lock();
        f(&mut guard)
    }
}
