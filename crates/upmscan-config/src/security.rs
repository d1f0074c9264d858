use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Security-related errors
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Path does not exist: {0}")]
    PathDoesNotExist(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Path is not readable: {0}")]
    NotReadable(PathBuf),

    #[error("Configured path must be relative to the project root: {0}")]
    AbsolutePath(PathBuf),

    #[error("Configured path escapes the project root: {0}")]
    PathEscapesProject(PathBuf),
}

/// Validate and canonicalize a project path
///
/// This function ensures:
/// 1. The path exists
/// 2. It's a directory
/// 3. It's readable
/// 4. Symlinks are resolved (canonicalized)
pub fn validate_project_path(path: &Path) -> Result<PathBuf, SecurityError> {
    let canonical = path
        .canonicalize()
        .map_err(|_| SecurityError::PathDoesNotExist(path.to_path_buf()))?;

    if !canonical.is_dir() {
        return Err(SecurityError::NotADirectory(canonical));
    }

    if fs::read_dir(&canonical).is_err() {
        return Err(SecurityError::NotReadable(canonical));
    }

    Ok(canonical)
}

/// Validate a path taken from a config file
///
/// Config paths must:
/// - Be relative (they are joined onto the project root)
/// - Not contain `..` components
pub fn validate_relative_path(path: &Path) -> Result<(), SecurityError> {
    if path.is_absolute() || path.has_root() {
        return Err(SecurityError::AbsolutePath(path.to_path_buf()));
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(SecurityError::PathEscapesProject(path.to_path_buf()));
    }

    Ok(())
}

/// Set restrictive permissions on config file (Unix only)
#[cfg(unix)]
pub fn set_config_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o644);
    fs::set_permissions(path, perms)?;
    Ok(())
}

/// Set config permissions (no-op on Windows for now)
#[cfg(not(unix))]
pub fn set_config_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
