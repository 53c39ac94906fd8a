//! Configuration validation.

use super::Config;
use crate::catalog::compile_patterns;
use crate::error::{CatalogError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let catalog = &config.catalog;

    for (field, patterns) in [
        ("catalog.include_views", &catalog.include_views),
        ("catalog.exclude_views", &catalog.exclude_views),
    ] {
        if patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(CatalogError::Config(format!(
                "{} must not contain empty patterns",
                field
            )));
        }
        compile_patterns(patterns)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn valid_config() -> Config {
        Config {
            catalog: CatalogConfig {
                include_views: vec!["sys.*objects".to_string(), "dm_exec_*".to_string()],
                exclude_views: vec!["sys.system_objects".to_string()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_pattern() {
        let mut config = valid_config();
        config.catalog.exclude_views.push("  ".to_string());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("catalog.exclude_views"));
    }

    #[test]
    fn test_invalid_glob() {
        let mut config = valid_config();
        config.catalog.include_views = vec!["sys.[objects".to_string()];
        assert!(matches!(validate(&config), Err(CatalogError::Config(_))));
    }
}
