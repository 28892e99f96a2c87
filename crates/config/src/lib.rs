//! Guest Marshaller Configuration Module
//!
//! This module provides the limits and constants shared by the value
//! marshaller and the contract host surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Maximum nesting depth of composites accepted by the encoder and decoder
pub const DEFAULT_MAX_DEPTH: usize = 128;
/// Initial capacity of the encoder output buffer, in bytes
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;
/// Upper bound on the encoder output buffer, in bytes
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// One-byte marker prepended to every persisted contract state key
pub const STATE_KEY_PREFIX: u8 = b'_';
/// Raw (un-namespaced) key under which the contract creator is recorded
pub const CREATOR_KEY: &str = "Creator";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resource limits applied to a single encode or decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonLimits {
    /// Deepest composite nesting accepted before failing
    pub max_depth: usize,
    /// Capacity the output buffer starts with
    pub initial_capacity: usize,
    /// Capacity the output buffer may never grow past
    pub max_output_size: usize,
}

impl Default for JsonLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
        }
    }
}

impl JsonLimits {
    /// Checks the limits for values that would make every call fail.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "json.max_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.initial_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "json.initial_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.initial_capacity > self.max_output_size {
            return Err(ConfigError::InvalidValue {
                field: "json.initial_capacity",
                reason: format!(
                    "{} exceeds max_output_size {}",
                    self.initial_capacity, self.max_output_size
                ),
            });
        }
        Ok(())
    }
}

/// Contract storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Marker byte prepended to contract state keys
    pub state_key_prefix: u8,
    /// Raw key holding the contract creator
    pub creator_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_key_prefix: STATE_KEY_PREFIX,
            creator_key: CREATOR_KEY.to_string(),
        }
    }
}

/// Complete marshaller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
    pub json: JsonLimits,
    pub storage: StorageConfig,
}

impl MarshalConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: MarshalConfig = toml::from_str(content)?;
        config.json.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl fmt::Display for JsonLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth<={} capacity={}..{}",
            self.max_depth, self.initial_capacity, self.max_output_size
        )
    }
}
