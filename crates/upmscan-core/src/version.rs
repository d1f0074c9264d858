//! Installed-version resolution
//!
//! Two independent strategies exist:
//! - [`CacheResolver`] scans `Library/PackageCache` for a `<name>@<version>`
//!   folder, preferring the `version` field of the folder's `package.json`.
//! - [`DeclaredValueResolver`] derives the version from the manifest value
//!   alone (git fragment, `@tag` suffix, or the plain version string).
//!
//! [`VersionStrategy`] selects which one backs [`crate::PackageRecord::version`].

use crate::{Diagnostic, DiagnosticKind, DiagnosticSink, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use upmscan_fs::FileSystem;

/// Sentinel for a declared value that carries no recognizable version.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Produces a best-effort version string for a dependency.
pub trait VersionResolver {
    /// Resolve the version of `name`, declared in the manifest as `declared_value`.
    ///
    /// Never fails: an unresolvable version is an empty string or
    /// [`UNKNOWN_VERSION`].
    fn resolve(&self, name: &str, declared_value: &str) -> String;
}

/// Which resolver backs package records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStrategy {
    /// Parse the manifest value
    #[default]
    Declared,
    /// Look the package up in the package cache
    Cache,
}

impl VersionStrategy {
    /// Lowercase name used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            VersionStrategy::Declared => "declared",
            VersionStrategy::Cache => "cache",
        }
    }
}

impl std::str::FromStr for VersionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "declared" => Ok(VersionStrategy::Declared),
            "cache" => Ok(VersionStrategy::Cache),
            other => Err(Error::other(format!(
                "unknown version strategy '{other}' (expected 'declared' or 'cache')"
            ))),
        }
    }
}

/// Derive a version from a declared manifest value.
///
/// - `...#ref` yields `ref` (pinned git revision)
/// - a value mentioning neither `http` nor `git` is itself the version
/// - `...@tag` yields `tag`
/// - anything else yields [`UNKNOWN_VERSION`]
pub fn declared_version(value: &str) -> String {
    if let Some((_, fragment)) = value.rsplit_once('#') {
        return fragment.to_string();
    }

    let lower = value.to_lowercase();
    if !lower.contains("http") && !lower.contains("git") {
        return value.to_string();
    }

    match value.rsplit_once('@') {
        Some((_, tag)) => tag.to_string(),
        None => UNKNOWN_VERSION.to_string(),
    }
}

/// Resolves versions from the declared manifest value.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredValueResolver;

impl VersionResolver for DeclaredValueResolver {
    fn resolve(&self, _name: &str, declared_value: &str) -> String {
        declared_version(declared_value)
    }
}

/// Resolves versions from the package cache directory.
pub struct CacheResolver<F: FileSystem + ?Sized> {
    fs: Rc<F>,
    cache_dir: PathBuf,
    sink: Rc<dyn DiagnosticSink>,
}

impl<F: FileSystem + ?Sized> CacheResolver<F> {
    /// Create a resolver over `cache_dir` (relative paths resolve against the
    /// filesystem's project root).
    pub fn new(fs: Rc<F>, cache_dir: impl Into<PathBuf>, sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            fs,
            cache_dir: cache_dir.into(),
            sink,
        }
    }

    /// Cache directory being scanned
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Version of the cached copy of `name`, or an empty string.
    ///
    /// A missing cache directory or a package absent from the cache produces
    /// one diagnostic. An unreadable `package.json` also produces one, and the
    /// version from the folder name is kept.
    pub fn lookup(&self, name: &str) -> String {
        match self.try_lookup(name) {
            Ok(Some(version)) => version,
            Ok(None) => {
                self.sink.report(
                    Diagnostic::new(
                        DiagnosticKind::LookupMiss,
                        format!("package {name} not found in package cache"),
                    )
                    .with_path(&self.cache_dir),
                );
                String::new()
            }
            Err(error) => {
                self.sink.report(Diagnostic::from_error(&error));
                String::new()
            }
        }
    }

    fn try_lookup(&self, name: &str) -> Result<Option<String>> {
        let entries = self.fs.read_dir(&self.cache_dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::CacheNotFound(self.cache_dir.clone()),
            _ => Error::Io(e),
        })?;

        let prefix = format!("{name}@");
        // Several cached versions may coexist; entries are name-sorted, first wins
        let Some(folder) = entries
            .into_iter()
            .find(|entry| entry.is_dir && entry.name.starts_with(&prefix))
        else {
            return Ok(None);
        };

        let mut version = folder.name.split('@').nth(1).unwrap_or_default().to_string();

        let package_json = folder.path.join("package.json");
        match self.package_json_version(&package_json) {
            Ok(Some(declared)) => version = declared,
            Ok(None) => {}
            Err(error) => self.sink.report(
                Diagnostic::new(
                    DiagnosticKind::MalformedInput,
                    format!("ignoring package.json of cached {name}: {error}"),
                )
                .with_path(&package_json),
            ),
        }

        tracing::debug!(package = name, folder = %folder.name, version = %version, "resolved from cache");
        Ok(Some(version))
    }

    /// `version` field of a cached package's `package.json`, if there is one.
    fn package_json_version(&self, package_json: &Path) -> Result<Option<String>> {
        if !self.fs.exists(package_json)? {
            return Ok(None);
        }

        let content = self.fs.read_to_string(package_json)?;
        let value: Value = serde_json::from_str(&content).map_err(|source| Error::Json {
            file: package_json.to_path_buf(),
            source,
        })?;
        Ok(value
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

impl<F: FileSystem + ?Sized> VersionResolver for CacheResolver<F> {
    fn resolve(&self, name: &str, _declared_value: &str) -> String {
        self.lookup(name)
    }
}
