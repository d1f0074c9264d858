//! In-memory filesystem implementation.

use crate::{DirEntry, FileMetadata, FileSystem};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// In-memory filesystem.
///
/// Files are handed over up front by the embedding environment (an editor
/// plugin, a test) so a project can be scanned without touching disk.
/// Directories exist implicitly for every ancestor of a stored file, or
/// explicitly via [`MemoryFileSystem::add_dir`].
#[derive(Clone)]
pub struct MemoryFileSystem {
    project_root: PathBuf,
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<BTreeSet<PathBuf>>>,
}

impl MemoryFileSystem {
    /// Create a new in-memory filesystem from pre-loaded files.
    ///
    /// Relative keys are placed under `project_root`.
    pub fn new(
        project_root: impl AsRef<Path>,
        files: HashMap<PathBuf, Vec<u8>>,
    ) -> io::Result<Self> {
        let project_root = normalize(project_root.as_ref())?;
        let fs = Self {
            project_root,
            files: Arc::new(RwLock::new(BTreeMap::new())),
            dirs: Arc::new(RwLock::new(BTreeSet::new())),
        };

        for (path, contents) in files {
            fs.add_file(path, contents)?;
        }

        Ok(fs)
    }

    /// Create an empty in-memory filesystem (useful for testing).
    pub fn empty(project_root: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(project_root, HashMap::new())
    }

    /// Add a file, implicitly creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> io::Result<()> {
        let resolved = self.resolve(path.as_ref())?;
        if let Some(parent) = resolved.parent() {
            self.insert_dir_chain(parent);
        }
        self.files.write().insert(resolved, contents.into());
        Ok(())
    }

    /// Add an (possibly empty) directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let resolved = self.resolve(path.as_ref())?;
        self.insert_dir_chain(&resolved);
        Ok(())
    }

    fn insert_dir_chain(&self, dir: &Path) {
        let mut dirs = self.dirs.write();
        for ancestor in dir.ancestors() {
            if !ancestor.starts_with(&self.project_root) {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        };
        let normalized = normalize(&absolute)?;

        if !normalized.starts_with(&self.project_root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Path outside project root: {}", path.display()),
            ));
        }

        Ok(normalized)
    }
}

/// Syntactic normalization; `..` may not climb above the filesystem root.
fn normalize(path: &Path) -> io::Result<PathBuf> {
    let mut components = Vec::new();
    let mut is_absolute = false;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                is_absolute = true;
                components.clear();
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if components.pop().is_none() {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "Path attempts to escape project root using ..",
                    ));
                }
            }
            Component::Normal(name) => components.push(name),
        }
    }

    let mut result = PathBuf::new();
    if is_absolute {
        result.push("/");
    }
    for component in components {
        result.push(component);
    }

    Ok(result)
}

fn entry_for(path: &Path, is_dir: bool) -> DirEntry {
    DirEntry {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_path_buf(),
        is_dir,
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        let resolved = self.resolve(path)?;
        Ok(self.files.read().contains_key(&resolved) || self.dirs.read().contains(&resolved))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let resolved = self.resolve(path)?;
        let files = self.files.read();
        let bytes = files.get(&resolved).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;

        String::from_utf8(bytes.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let resolved = self.resolve(path)?;

        if let Some(bytes) = self.files.read().get(&resolved) {
            return Ok(FileMetadata {
                exists: true,
                is_file: true,
                is_dir: false,
                is_symlink: false,
                size: bytes.len() as u64,
            });
        }

        if self.dirs.read().contains(&resolved) {
            return Ok(FileMetadata {
                exists: true,
                is_file: false,
                is_dir: true,
                is_symlink: false,
                size: 0,
            });
        }

        Ok(FileMetadata::missing())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let resolved = self.resolve(path)?;
        let dirs = self.dirs.read();

        if !dirs.contains(&resolved) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let is_child = |candidate: &Path| candidate.parent() == Some(resolved.as_path());
        let mut entries = Vec::new();

        for dir in dirs.iter().filter(|d| is_child(d.as_path())) {
            entries.push(entry_for(dir, true));
        }
        for file in self.files.read().keys().filter(|f| is_child(f.as_path())) {
            entries.push(entry_for(file, false));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }
}
