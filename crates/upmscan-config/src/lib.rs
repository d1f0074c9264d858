//! Configuration for upmscan.
//!
//! A project may carry an `upmscan.toml` next to its `Packages/` folder; a
//! global `~/.upmscan/config.toml` applies to every project that doesn't.

pub mod manager;
pub mod security;
pub mod types;

pub use manager::{ConfigError, ConfigManager, ConfigSource, PROJECT_CONFIG_FILE};
pub use security::{validate_project_path, validate_relative_path, SecurityError};
pub use types::{PathsConfig, ResolutionConfig, UpmscanConfig};
