// In: src/config.rs

//! The single source of truth for colframe configuration.
//!
//! `ColframeConfig` is created once at the application boundary (typically from
//! a JSON document) and handed to column constructors by reference. Every field
//! has a serde default, so an empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ColframeError;

//==================================================================================
// I. Monitoring
//==================================================================================

/// Settings for the `log`/`env_logger` backend installed by
/// `observability::init_logging`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MonitoringConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

//==================================================================================
// II. The Unified ColframeConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ColframeConfig {
    /// **The maximum size in bytes of a single value buffer.**
    /// A column allocates a new buffer once the current one holds
    /// `max_buffer_bytes / size_of::<T>()` elements.
    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,

    /// Configuration for logging.
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

impl Default for ColframeConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: default_max_buffer_bytes(),
            monitoring: None,
        }
    }
}

impl ColframeConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ColframeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of `T` elements a single buffer may hold; never less than one.
    pub fn buffer_capacity_for<T>(&self) -> usize {
        let element_size = std::mem::size_of::<T>().max(1);
        (self.max_buffer_bytes / element_size).max(1)
    }
}

/// Buffers are capped at `i32::MAX` bytes by default.
fn default_max_buffer_bytes() -> usize {
    i32::MAX as usize
}

fn default_log_level() -> String {
    "info".to_string()
}
