//! Page configuration

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Initial location
    pub url: String,
    /// Viewport width at load, in CSS pixels
    pub viewport_width: u32,
    /// Quiet period before a resize is reported
    pub resize_debounce_ms: u64,
    /// First number handed out for generated container ids
    pub id_seed: u64,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            viewport_width: 1024,
            resize_debounce_ms: 50,
            id_seed: 0,
        }
    }
}
