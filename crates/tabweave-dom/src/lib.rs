//! Tabweave Document Model
//!
//! A small arena-backed DOM. Nodes live in a single `Vec` and are addressed
//! by copyable [`NodeId`] handles, so the tab widget can hold references to
//! tabs, panels and headings without borrowing the document.
//!
//! Detached nodes stay in the arena until they are removed with
//! [`Document::remove`], which frees their slots for reuse.

mod document;
mod error;
mod node;
mod parse;
mod serialize;

pub use document::Document;
pub use error::DomError;
pub use node::{Attribute, ElementData, Node, NodeData, NodeId};

pub type Result<T> = std::result::Result<T, DomError>;
