//! FileSystem trait for project-scoped, read-only filesystem access.

use std::io;
use std::path::{Path, PathBuf};

/// File metadata compatible across backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Whether the path exists.
    pub exists: bool,
    /// Whether the path is a file (false if directory or doesn't exist).
    pub is_file: bool,
    /// Whether the path is a directory.
    pub is_dir: bool,
    /// Whether the path is a symbolic link.
    pub is_symlink: bool,
    /// File size in bytes (0 for directories or non-existent files).
    pub size: u64,
}

impl FileMetadata {
    /// Metadata for a path that does not exist.
    pub fn missing() -> Self {
        Self {
            exists: false,
            is_file: false,
            is_dir: false,
            is_symlink: false,
            size: 0,
        }
    }
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the child (last path component only).
    pub name: String,
    /// Full path of the child.
    pub path: PathBuf,
    /// Whether the child is a directory.
    pub is_dir: bool,
}

/// Project-scoped filesystem abstraction.
///
/// All operations are synchronous one-shot reads. Implementations confine
/// access to [`FileSystem::project_root`]; relative paths are resolved
/// against it.
///
/// # Error Handling
///
/// Uses `std::io::Result<T>` for compatibility:
/// - Native: Direct mapping from std::fs errors
/// - Memory: Construct io::Error with appropriate ErrorKind
pub trait FileSystem: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if file doesn't exist.
    /// Returns `io::ErrorKind::InvalidData` if file is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Get file/directory metadata.
    ///
    /// Returns metadata even if the file doesn't exist (exists=false).
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// List the immediate children of a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if the directory doesn't exist.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Get the project root this filesystem is scoped to.
    fn project_root(&self) -> &Path;
}
