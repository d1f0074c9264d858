//! # upmscan-core
//!
//! Audit of a Unity project's package manifest.
//!
//! This crate provides functionality to:
//! - Parse `Packages/manifest.json` (dependencies and scoped registries)
//! - Collect the scopes routed to OpenUPM registries
//! - Classify each dependency by origin (Unity, Git, OpenUPM, standard registry)
//! - Resolve installed versions from `Library/PackageCache` or from the
//!   declared value itself
//!
//! ## Architecture
//!
//! Every query is a fresh, synchronous read of the manifest and cache through
//! a [`FileSystem`](upmscan_fs::FileSystem). Soft failures (missing files,
//! malformed JSON, packages absent from the cache) never surface as errors:
//! they are reported to a [`DiagnosticSink`] and the query returns an empty
//! value instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use upmscan_core::{Category, PackageCatalog};
//! use upmscan_fs::NativeFileSystem;
//! use std::rc::Rc;
//!
//! # fn example() -> std::io::Result<()> {
//! let fs = Rc::new(NativeFileSystem::new(".")?);
//! let catalog = PackageCatalog::new(fs);
//!
//! for package in catalog.packages(Category::Git, None) {
//!     println!("{}", package.display_name());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod manifest;
pub mod record;
pub mod scopes;
pub mod types;
pub mod version;

// Re-export main types
pub use catalog::{CatalogOptions, PackageCatalog, DEFAULT_CACHE_DIR, DEFAULT_MANIFEST_PATH};
pub use classify::classify;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use manifest::{load_manifest, DeclaredDependency, ManifestDocument, ScopedRegistry};
pub use record::PackageRecord;
pub use scopes::{openupm_scopes, OpenUpmScopeSet};
pub use types::{Category, PackageSummary};

// Re-export version resolution
pub use version::{
    declared_version, CacheResolver, DeclaredValueResolver, VersionResolver, VersionStrategy,
    UNKNOWN_VERSION,
};
