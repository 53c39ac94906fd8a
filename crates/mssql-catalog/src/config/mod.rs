//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::catalog::ViewCatalog;
use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// The built-in catalog narrowed by `catalog.include_views` and
    /// `catalog.exclude_views`.
    pub fn view_catalog(&self) -> Result<ViewCatalog> {
        ViewCatalog::builtin().filtered(&self.catalog)
    }
}
