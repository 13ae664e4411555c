//! Tool configuration, read from TOML.
//!
//! Every field has a default, so an empty file is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one color tool instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Path of the exported catalog feed (TSV or CSV).
    pub catalog: Option<PathBuf>,
    /// Side of the square wheel raster, in pixels.
    pub wheel_size: u32,
    /// Gap between the wheel rim and the raster edge, in pixels.
    pub wheel_margin: u32,
    /// Width of the value bar raster; its height follows `wheel_size`.
    pub bar_width: u32,
    /// Quiet period before a search is applied.
    pub search_debounce_ms: u64,
    /// Maximum number of suggestions listed under the search box.
    pub suggestion_limit: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            wheel_size: 280,
            wheel_margin: 10,
            bar_width: 24,
            search_debounce_ms: 120,
            suggestion_limit: 10,
        }
    }
}

impl ToolConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
