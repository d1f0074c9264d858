//! `Packages/manifest.json` model and loader

use crate::{Diagnostic, DiagnosticKind, DiagnosticSink, Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use upmscan_fs::FileSystem;

/// A dependency exactly as declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    /// Package name (manifest key)
    pub name: String,
    /// Raw value: a version, a git URL or a registry range
    pub value: String,
}

/// An entry of the manifest's `scopedRegistries` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedRegistry {
    /// Display name of the registry
    pub name: Option<String>,
    /// Registry URL
    pub url: Option<String>,
    /// Package-name prefixes routed to this registry
    pub scopes: Vec<String>,
}

/// Parsed manifest contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    /// File the document was read from
    pub path: PathBuf,
    /// Dependencies in document order
    pub dependencies: Vec<DeclaredDependency>,
    /// Scoped registries in document order
    pub scoped_registries: Vec<ScopedRegistry>,
}

impl ManifestDocument {
    /// Parse manifest text.
    ///
    /// Fails only when the text is not JSON or not a JSON object. Fields of the
    /// wrong shape are dropped and reported to `sink`.
    pub fn parse(path: &Path, content: &str, sink: &dyn DiagnosticSink) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Json {
            file: path.to_path_buf(),
            source,
        })?;
        Self::from_value(path, value, sink)
    }

    /// Build a document from an already-parsed JSON value.
    pub fn from_value(path: &Path, value: Value, sink: &dyn DiagnosticSink) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(Error::InvalidFormat(
                path.to_path_buf(),
                "top-level value is not an object".to_string(),
            ));
        };

        Ok(Self {
            path: path.to_path_buf(),
            dependencies: parse_dependencies(path, &root, sink),
            scoped_registries: parse_scoped_registries(path, &root, sink),
        })
    }

    /// Find a dependency by name
    pub fn find_dependency(&self, name: &str) -> Option<&DeclaredDependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }
}

fn malformed(path: &Path, message: String) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::MalformedInput, message).with_path(path)
}

fn parse_dependencies(
    path: &Path,
    root: &Map<String, Value>,
    sink: &dyn DiagnosticSink,
) -> Vec<DeclaredDependency> {
    let deps = match root.get("dependencies") {
        None => return vec![],
        Some(Value::Object(deps)) => deps,
        Some(_) => {
            sink.report(malformed(path, "\"dependencies\" is not an object".to_string()));
            return vec![];
        }
    };

    deps.iter()
        .filter_map(|(name, value)| match value {
            Value::String(value) => Some(DeclaredDependency {
                name: name.clone(),
                value: value.clone(),
            }),
            other => {
                sink.report(malformed(
                    path,
                    format!("dependency {name} has non-string value {other}"),
                ));
                None
            }
        })
        .collect()
}

fn parse_scoped_registries(
    path: &Path,
    root: &Map<String, Value>,
    sink: &dyn DiagnosticSink,
) -> Vec<ScopedRegistry> {
    let registries = match root.get("scopedRegistries") {
        None => return vec![],
        Some(Value::Array(registries)) => registries,
        Some(_) => {
            sink.report(malformed(path, "\"scopedRegistries\" is not an array".to_string()));
            return vec![];
        }
    };

    registries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| ScopedRegistry {
            name: entry.get("name").and_then(Value::as_str).map(str::to_string),
            url: entry.get("url").and_then(Value::as_str).map(str::to_string),
            scopes: entry
                .get("scopes")
                .and_then(Value::as_array)
                .map(|scopes| {
                    scopes
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Read and parse the manifest at `path`.
///
/// Returns `None` (after reporting to `sink`) when the file is missing,
/// unreadable or not a JSON object.
pub fn load_manifest<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    sink: &dyn DiagnosticSink,
) -> Option<ManifestDocument> {
    match try_load_manifest(fs, path, sink) {
        Ok(manifest) => {
            tracing::debug!(
                path = %path.display(),
                dependencies = manifest.dependencies.len(),
                registries = manifest.scoped_registries.len(),
                "loaded manifest"
            );
            Some(manifest)
        }
        Err(error) => {
            sink.report(Diagnostic::from_error(&error));
            None
        }
    }
}

pub(crate) fn try_load_manifest<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    sink: &dyn DiagnosticSink,
) -> Result<ManifestDocument> {
    if !fs.metadata(path)?.is_file {
        return Err(Error::ManifestNotFound(path.to_path_buf()));
    }

    let content = fs.read_to_string(path)?;
    ManifestDocument::parse(path, &content, sink)
}
