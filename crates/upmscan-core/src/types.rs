//! Core types for package classification

use serde::{Deserialize, Serialize};

/// Origin of a declared dependency.
///
/// Variants are listed in classification priority order; the derived `Ord`
/// follows it, so grouped output lists Unity packages first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// First-party package (`com.unity.*`)
    Unity,
    /// Package fetched from a version-control URL
    Git,
    /// Package routed to an OpenUPM scoped registry
    OpenUpm,
    /// Ordinary registry dependency
    Standard,
}

impl Category {
    /// Returns all categories in priority order
    pub fn all() -> &'static [Category] {
        &[
            Category::Unity,
            Category::Git,
            Category::OpenUpm,
            Category::Standard,
        ]
    }

    /// Returns the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Unity => "Unity",
            Category::Git => "Git",
            Category::OpenUpm => "OpenUPM",
            Category::Standard => "Standard",
        }
    }

    /// Returns the lowercase name for CLI parsing
    pub fn cli_name(&self) -> &'static str {
        match self {
            Category::Unity => "unity",
            Category::Git => "git",
            Category::OpenUpm => "openupm",
            Category::Standard => "standard",
        }
    }

    /// Returns the description for this category
    pub fn description(&self) -> &'static str {
        match self {
            Category::Unity => "First-party com.unity packages",
            Category::Git => "Packages installed from a git URL",
            Category::OpenUpm => "Packages served by an OpenUPM scoped registry",
            Category::Standard => "Other registry packages",
        }
    }

    /// Parse from CLI string (case-insensitive)
    pub fn from_cli_name(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|cat| cat.cli_name().eq_ignore_ascii_case(s))
            .copied()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Serializable snapshot of a [`crate::PackageRecord`] with its version resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Package name as declared in the manifest
    pub name: String,
    /// Raw manifest value (version, URL or range)
    pub declared_value: String,
    /// Origin category
    pub category: Category,
    /// Resolved version; empty or `"unknown"` when unavailable
    pub version: String,
    /// `name@version`, or `name (URL: value)` without a usable version
    pub display: String,
}
