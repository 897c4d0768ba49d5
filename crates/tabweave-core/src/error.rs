//! Core error types

use thiserror::Error;

use tabweave_dom::NodeId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Dom(#[from] tabweave_dom::DomError),

    #[error("Tab interface error: {0}")]
    Tab(#[from] tabweave_tabs::TabError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No tab interface registered for {0}")]
    NotRegistered(NodeId),
}
