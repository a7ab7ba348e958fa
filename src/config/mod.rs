//! Configuration
//!
//! Layered configuration for reconstruction passes and logging, loaded with
//! the `config` crate.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::metadata::ScanConfig;
use crate::tree::BuildOptions;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemassConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub build: BuildOptions,
}

impl RemassConfig {
    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
