use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-view settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject every mutating action.
    pub read_only: bool,
    /// Password entry: copy and cut never export text.
    pub masked: bool,
    /// Start in overtype mode.
    pub overtype: bool,
    /// Width of the left selection margin in view coordinates.
    pub margin_width: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            masked: false,
            overtype: false,
            margin_width: 0.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
