use crate::security::{set_config_permissions, SecurityError};
use crate::types::UpmscanConfig;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use upmscan_fs::{FileSystem, NativeFileSystem};

/// Config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "upmscan.toml";

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error in {path}: {source}")]
    TomlDe {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Security error: {0}")]
    Security(#[from] SecurityError),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named on the command line
    Explicit(PathBuf),
    /// `upmscan.toml` in the project root
    Project(PathBuf),
    /// `~/.upmscan/config.toml`
    Global(PathBuf),
    /// No file found; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Project(p) | ConfigSource::Global(p) => {
                Some(p.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Manager for upmscan configuration
pub struct ConfigManager {
    source: ConfigSource,
    config: UpmscanConfig,
}

impl ConfigManager {
    /// Get the global config path (~/.upmscan/config.toml)
    #[cfg(feature = "native-fs")]
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".upmscan").join("config.toml"))
    }

    /// Load config from a specific file
    ///
    /// Relative paths resolve against the current directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let not_found = || ConfigError::ConfigNotFound(path.to_path_buf());
        let resolved = path.canonicalize().map_err(|_| not_found())?;
        let config_dir = resolved.parent().ok_or_else(not_found)?;
        let fs = NativeFileSystem::new(config_dir).map_err(|_| not_found())?;
        let config = Self::read_config(&fs, &resolved)?;

        Ok(Self {
            source: ConfigSource::Explicit(path.to_path_buf()),
            config,
        })
    }

    /// Load config through a custom FileSystem
    pub fn load_with_filesystem<F: FileSystem>(fs: &F, path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_config(fs, path)?;
        Ok(Self {
            source: ConfigSource::Explicit(path.to_path_buf()),
            config,
        })
    }

    /// Find the configuration for a project
    ///
    /// Looks at `explicit`, then `<project_root>/upmscan.toml`, then the
    /// global config; falls back to defaults when none exists.
    #[cfg(feature = "native-fs")]
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let global = Self::config_path().ok();
        Self::discover_with_global(project_root, explicit, global.as_deref())
    }

    /// [`ConfigManager::discover`] with an explicit global config location
    pub fn discover_with_global(
        project_root: &Path,
        explicit: Option<&Path>,
        global: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let project_config = project_root.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            let mut manager = Self::load_from(&project_config)?;
            manager.source = ConfigSource::Project(project_config);
            return Ok(manager);
        }

        if let Some(global) = global.filter(|g| g.is_file()) {
            let mut manager = Self::load_from(global)?;
            manager.source = ConfigSource::Global(global.to_path_buf());
            return Ok(manager);
        }

        tracing::debug!(root = %project_root.display(), "no config file found, using defaults");
        Ok(Self {
            source: ConfigSource::Defaults,
            config: UpmscanConfig::default(),
        })
    }

    fn read_config<F: FileSystem>(fs: &F, path: &Path) -> Result<UpmscanConfig, ConfigError> {
        if !fs.exists(path)? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs.read_to_string(path)?;
        let config: UpmscanConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::TomlDe {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Initialize the global config file
    #[cfg(feature = "native-fs")]
    pub fn init() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::init_at(&config_path)
    }

    /// Write a default config at `path`; refuses to overwrite
    pub fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = Self {
            source: ConfigSource::Explicit(path.to_path_buf()),
            config: UpmscanConfig::default(),
        };
        manager.save()?;
        Ok(manager)
    }

    /// Save config to its backing file atomically
    ///
    /// Uses a temporary file and rename. Does nothing for default configs.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = self.source.path() else {
            return Ok(());
        };

        self.config.validate()?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = path.with_extension("toml.tmp");
        std::fs::write(&temp_path, toml_str)?;
        set_config_permissions(&temp_path)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &UpmscanConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut UpmscanConfig {
        &mut self.config
    }

    /// Where the config came from
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use upmscan_core::VersionStrategy;

    #[test]
    fn test_init_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".upmscan").join("config.toml");

        let manager = ConfigManager::init_at(&config_path).unwrap();
        assert_eq!(manager.config().version, "1.0");
        assert!(config_path.exists());

        let loaded = ConfigManager::load_from(&config_path).unwrap();
        assert_eq!(loaded.config(), manager.config());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("upmscan.toml");
        std::fs::write(&config_path, "").unwrap();

        assert!(matches!(
            ConfigManager::init_at(&config_path),
            Err(ConfigError::ConfigExists(_))
        ));
    }

    #[test]
    fn test_save_changes() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("upmscan.toml");

        let mut manager = ConfigManager::init_at(&config_path).unwrap();
        manager.config_mut().resolution.strategy = VersionStrategy::Cache;
        manager.save().unwrap();

        let loaded = ConfigManager::load_from(&config_path).unwrap();
        assert_eq!(loaded.config().resolution.strategy, VersionStrategy::Cache);
        assert!(!temp_dir.path().join("upmscan.toml.tmp").exists());
    }

    #[test]
    fn test_load_with_memory_filesystem() {
        let fs = upmscan_fs::MemoryFileSystem::empty("/project").unwrap();
        fs.add_file("upmscan.toml", "[resolution]\nstrategy = \"cache\"\n")
            .unwrap();

        let manager =
            ConfigManager::load_with_filesystem(&fs, Path::new("/project/upmscan.toml")).unwrap();
        assert_eq!(manager.config().resolution.strategy, VersionStrategy::Cache);

        let missing = ConfigManager::load_with_filesystem(&fs, Path::new("other.toml"));
        assert!(matches!(missing, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigManager::load_from(&temp_dir.path().join("upmscan.toml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_rejects_escaping_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("upmscan.toml");
        std::fs::write(&config_path, "[paths]\nmanifest = \"/etc/manifest.json\"\n").unwrap();

        assert!(matches!(
            ConfigManager::load_from(&config_path),
            Err(ConfigError::Security(SecurityError::AbsolutePath(_)))
        ));
    }
}
