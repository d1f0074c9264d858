use crate::security::{validate_relative_path, SecurityError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use upmscan_core::{CatalogOptions, VersionStrategy, DEFAULT_CACHE_DIR, DEFAULT_MANIFEST_PATH};

/// Main configuration structure for upmscan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpmscanConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: String,

    /// Project-relative locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Version resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

impl Default for UpmscanConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            paths: PathsConfig::default(),
            resolution: ResolutionConfig::default(),
        }
    }
}

impl UpmscanConfig {
    /// Check that configured paths stay inside the project
    pub fn validate(&self) -> Result<(), SecurityError> {
        validate_relative_path(&self.paths.manifest)?;
        validate_relative_path(&self.paths.package_cache)?;
        Ok(())
    }

    /// Catalog options described by this config
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            manifest_path: self.paths.manifest.clone(),
            cache_dir: self.paths.package_cache.clone(),
            strategy: self.resolution.strategy,
        }
    }
}

/// File locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Package manifest
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Package cache directory
    #[serde(default = "default_package_cache")]
    pub package_cache: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            package_cache: default_package_cache(),
        }
    }
}

/// Version resolution settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolutionConfig {
    /// Which resolver backs reported versions
    #[serde(default)]
    pub strategy: VersionStrategy,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

fn default_package_cache() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: UpmscanConfig = toml::from_str("").unwrap();
        assert_eq!(config, UpmscanConfig::default());
        assert_eq!(config.catalog_options(), CatalogOptions::default());
    }

    #[test]
    fn test_partial_override() {
        let config: UpmscanConfig = toml::from_str(
            r#"
[paths]
package_cache = "Cache/Packages"

[resolution]
strategy = "cache"
"#,
        )
        .unwrap();

        assert_eq!(config.paths.manifest, PathBuf::from("Packages/manifest.json"));
        assert_eq!(config.paths.package_cache, PathBuf::from("Cache/Packages"));
        assert_eq!(config.resolution.strategy, VersionStrategy::Cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<UpmscanConfig, _> = toml::from_str("[resolution]\nstrategy = \"lockfile\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_escaping_path_fails_validation() {
        let mut config = UpmscanConfig::default();
        config.paths.manifest = PathBuf::from("../Other/Packages/manifest.json");
        assert!(matches!(
            config.validate(),
            Err(SecurityError::PathEscapesProject(_))
        ));
    }

    #[test]
    fn test_roundtrip_pretty() {
        let config = UpmscanConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("strategy = \"declared\""));
        let parsed: UpmscanConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
