//! Editor configuration.

use crate::elements::ElementStyle;
use crate::storage::{DEFAULT_INACTIVITY_WINDOW_SECS, DEFAULT_MAX_NAME_LEN};
use crate::tools::DEFAULT_ERASER_RADIUS_FACTOR;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for an [`Editor`](crate::editor::Editor). Missing fields take
/// their defaults, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before an autosave, in seconds.
    pub inactivity_window_secs: u64,
    /// Undo depth; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Eraser reach as a multiple of the stroke width.
    pub eraser_radius_factor: f64,
    /// Style for new elements.
    pub default_stroke: ElementStyle,
    /// Longest accepted drawing name, in characters.
    pub max_name_len: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            inactivity_window_secs: DEFAULT_INACTIVITY_WINDOW_SECS,
            history_limit: None,
            eraser_radius_factor: DEFAULT_ERASER_RADIUS_FACTOR,
            default_stroke: ElementStyle::default(),
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl EditorConfig {
    pub fn inactivity_window(&self) -> Duration {
        Duration::from_secs(self.inactivity_window_secs)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
