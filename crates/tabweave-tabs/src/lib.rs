//! Tabweave Tab Interface
//!
//! Turns a container whose children alternate between headings and content
//! into an ARIA tabs widget:
//!
//! ```text
//! <div>                       <div role="application" aria-activedescendant="…">
//!   <h2>One</h2>                <ol role="tablist"> <li role="tab">One</li> … </ol>
//!   <p>…</p>          ──►       <section role="tabpanel"> <h2>One</h2> <p>…</p> </section>
//!   <h2>Two</h2>                <section role="tabpanel" hidden> … </section>
//!   <p>…</p>                  </div>
//! </div>
//! ```
//!
//! Exactly one tab is selected while the interface is mounted. Selection only
//! changes through [`TabInterface::activate`].

mod assemble;
mod config;
mod controller;
mod error;
mod ids;
mod interface;
mod key;
mod lifecycle;
mod partition;
mod prototype;
mod state;

pub use assemble::TabEntry;
pub use config::{Callback, Callbacks, Config, ContainerOverrides, TablistPosition};
pub use error::TabError;
pub use ids::IdAllocator;
pub use interface::TabInterface;
pub use key::{Direction, Key, KeyCommand};
pub use partition::{heading_tag, partition, Section, HEADING_TAGS};
pub use prototype::{ElementTemplate, Prototypes};
pub use state::ActiveTab;

pub type Result<T> = std::result::Result<T, TabError>;

/// Heading attribute supplying an alternate tab label
pub const TITLE_ATTR: &str = "data-tab-title";
/// Heading attribute supplying a thumbnail image URL
pub const THUMBNAIL_ATTR: &str = "data-tab-thumbnail";
/// Heading attribute marking the tab to select on build
pub const FOCUS_ATTR: &str = "data-tab-focus";
