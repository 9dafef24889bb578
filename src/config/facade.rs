//! ConfigLoader facade over the layered sources.

use super::sources::{environment, file};
use super::FsvConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    /// Precedence: defaults (lowest) -> config file -> environment (highest).
    pub fn load(config_file: Option<&Path>) -> Result<FsvConfig, ConfigError> {
        let builder = Config::builder();
        let builder = match config_file {
            Some(path) => file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> FsvConfig {
        FsvConfig::default()
    }
}
