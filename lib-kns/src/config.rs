//! Ledger configuration loader and defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::{limits, NameLimits, Node, ROOT_NODE};

/// Default config filename
pub const DEFAULT_CONFIG_FILENAME: &str = "kns.toml";

/// Default number of events retained in the ledger log
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Name service configuration
///
/// ```toml
/// root_node = "0x0000000000000000000000000000000000000000000000000000000000000000"
/// max_name_length = 253
/// max_label_length = 63
/// event_log_capacity = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KnsConfig {
    /// Well-known root node every name is folded from
    pub root_node: Node,
    /// Longest accepted dotted name, in bytes
    pub max_name_length: usize,
    /// Longest accepted single label, in bytes
    pub max_label_length: usize,
    /// Events retained for `events_since`; 0 keeps everything
    pub event_log_capacity: usize,
}

impl Default for KnsConfig {
    fn default() -> Self {
        Self {
            root_node: ROOT_NODE,
            max_name_length: limits::MAX_NAME_LENGTH,
            max_label_length: limits::MAX_LABEL_LENGTH,
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl KnsConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn name_limits(&self) -> NameLimits {
        NameLimits {
            max_name_length: self.max_name_length,
            max_label_length: self.max_label_length,
        }
    }
}

pub fn load_config(path: &Path) -> Result<KnsConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    KnsConfig::from_toml_str(&raw)
}
