//! Resolved package records

use crate::{Category, PackageSummary, VersionResolver, UNKNOWN_VERSION};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// One declared dependency, classified, with an on-demand version.
///
/// The version is computed by the attached resolver on first access and
/// memoized for the lifetime of this record. Clones share the resolver but
/// carry their own copy of the memoized value.
#[derive(Clone)]
pub struct PackageRecord {
    name: String,
    declared_value: String,
    category: Category,
    resolver: Rc<dyn VersionResolver>,
    version: OnceCell<String>,
}

impl PackageRecord {
    /// Create a record whose version will come from `resolver`.
    pub fn new(
        name: impl Into<String>,
        declared_value: impl Into<String>,
        category: Category,
        resolver: Rc<dyn VersionResolver>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_value: declared_value.into(),
            category,
            resolver,
            version: OnceCell::new(),
        }
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw manifest value
    pub fn declared_value(&self) -> &str {
        &self.declared_value
    }

    /// Origin category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Resolved version, computed once.
    pub fn version(&self) -> &str {
        self.version
            .get_or_init(|| self.resolver.resolve(&self.name, &self.declared_value))
    }

    /// Whether the version has been computed yet
    pub fn is_resolved(&self) -> bool {
        self.version.get().is_some()
    }

    /// Whether a usable version is available.
    pub fn has_version(&self) -> bool {
        let version = self.version();
        !version.is_empty() && version != UNKNOWN_VERSION
    }

    /// `name@version`, or `name (URL: declared value)` when no usable version
    /// is available.
    pub fn display_name(&self) -> String {
        if self.has_version() {
            format!("{}@{}", self.name, self.version())
        } else {
            format!("{} (URL: {})", self.name, self.declared_value)
        }
    }

    /// Serializable snapshot, resolving the version if needed.
    pub fn summary(&self) -> PackageSummary {
        PackageSummary {
            name: self.name.clone(),
            declared_value: self.declared_value.clone(),
            category: self.category,
            version: self.version().to_string(),
            display: self.display_name(),
        }
    }
}

impl fmt::Debug for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRecord")
            .field("name", &self.name)
            .field("declared_value", &self.declared_value)
            .field("category", &self.category)
            .field("version", &self.version.get())
            .finish()
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl PartialEq for PackageRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.declared_value == other.declared_value
            && self.category == other.category
    }
}

impl Eq for PackageRecord {}

impl std::hash::Hash for PackageRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.declared_value.hash(state);
        self.category.hash(state);
    }
}
