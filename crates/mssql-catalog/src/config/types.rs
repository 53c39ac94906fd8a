//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
///
/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which catalog views tooling should see.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Reader behavior.
    #[serde(default)]
    pub reader: ReaderConfig,
}

/// View selection by glob pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Views to include (glob patterns such as `sys.dm_*`). Empty means all.
    #[serde(default)]
    pub include_views: Vec<String>,

    /// Views to exclude. Applied after `include_views`.
    #[serde(default)]
    pub exclude_views: Vec<String>,
}

/// Reader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Check cursor column names and count against the view before reading
    /// (default: false).
    #[serde(default = "default_validate_layout")]
    pub validate_layout: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            validate_layout: default_validate_layout(),
        }
    }
}

fn default_validate_layout() -> bool {
    false
}
