//! Tabweave Core
//!
//! Hosts one document together with the pieces a browser window would
//! supply: the current location, the viewport width and an event loop entry
//! point. Tab interfaces are registered against containers in the document
//! and driven by [`Event`]s passed to [`Page::dispatch`].

mod config;
mod error;
mod event;
mod handle;
mod page;

pub use config::PageConfig;
pub use error::CoreError;
pub use event::Event;
pub use handle::PageHandle;
pub use page::Page;

// Re-export the building blocks
pub use tabweave_dom::{Document, DomError, NodeId};
pub use tabweave_tabs::{
    Callbacks, Config, ContainerOverrides, Direction, IdAllocator, Key, Prototypes, TabError,
    TabInterface, TablistPosition,
};
pub use tabweave_viewport::ViewportWatcher;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
