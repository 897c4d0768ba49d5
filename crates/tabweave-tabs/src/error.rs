//! Tab interface error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Document error: {0}")]
    Dom(#[from] tabweave_dom::DomError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
