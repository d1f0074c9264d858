//! Package catalog: manifest + classification + version resolution

use crate::manifest::try_load_manifest;
use crate::{
    classify, openupm_scopes, CacheResolver, Category, DeclaredValueResolver, Diagnostic,
    DiagnosticSink, ManifestDocument, PackageRecord, Result, TracingSink, VersionResolver,
    VersionStrategy,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use upmscan_fs::FileSystem;

/// Manifest location relative to the project root.
pub const DEFAULT_MANIFEST_PATH: &str = "Packages/manifest.json";

/// Package cache location relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = "Library/PackageCache";

/// Where to look and how to resolve versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Manifest used when a query doesn't name one
    pub manifest_path: PathBuf,
    /// Package cache directory
    pub cache_dir: PathBuf,
    /// Resolver backing [`PackageRecord::version`]
    pub strategy: VersionStrategy,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            strategy: VersionStrategy::default(),
        }
    }
}

/// Query surface over a project's manifest and package cache.
///
/// Holds no state between calls: every query re-reads the manifest (and,
/// lazily, the cache), so results reflect the disk at call time. Queries
/// never fail; problems go to the diagnostic sink and yield empty results.
///
/// Handles are `Rc`; a catalog stays on the thread that built it.
pub struct PackageCatalog<F: FileSystem + 'static> {
    fs: Rc<F>,
    options: CatalogOptions,
    sink: Rc<dyn DiagnosticSink>,
}

impl<F: FileSystem + 'static> PackageCatalog<F> {
    /// Catalog with default locations, reporting diagnostics to `tracing`.
    pub fn new(fs: Rc<F>) -> Self {
        Self::with_options(fs, CatalogOptions::default())
    }

    /// Catalog with explicit options.
    pub fn with_options(fs: Rc<F>, options: CatalogOptions) -> Self {
        Self {
            fs,
            options,
            sink: Rc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Options in effect
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Load the manifest (`None` after a diagnostic if it is missing or invalid).
    pub fn load_manifest(&self, manifest_path: Option<&Path>) -> Option<ManifestDocument> {
        crate::load_manifest(&*self.fs, self.manifest_path(manifest_path), &*self.sink)
    }

    /// Every declared dependency, classified, in manifest order.
    pub fn all_packages(&self, manifest_path: Option<&Path>) -> Vec<PackageRecord> {
        match self.build(self.manifest_path(manifest_path)) {
            Ok(records) => records,
            Err(error) => {
                self.sink.report(Diagnostic::from_error(&error));
                vec![]
            }
        }
    }

    /// Packages of one category, in manifest order.
    pub fn packages(&self, category: Category, manifest_path: Option<&Path>) -> Vec<PackageRecord> {
        self.all_packages(manifest_path)
            .into_iter()
            .filter(|record| record.category() == category)
            .collect()
    }

    /// Packages grouped by category, in priority order. Only categories with
    /// at least one package appear.
    pub fn packages_by_type(
        &self,
        manifest_path: Option<&Path>,
    ) -> BTreeMap<Category, Vec<PackageRecord>> {
        let mut groups: BTreeMap<Category, Vec<PackageRecord>> = BTreeMap::new();
        for record in self.all_packages(manifest_path) {
            groups.entry(record.category()).or_default().push(record);
        }
        groups
    }

    /// Plain-text listing grouped by category with per-group counts.
    pub fn render_text(&self, manifest_path: Option<&Path>) -> String {
        let groups = self.packages_by_type(manifest_path);
        let total: usize = groups.values().map(Vec::len).sum();

        let mut out = String::new();
        let _ = writeln!(out, "Packages ({total})");
        for (category, records) in &groups {
            let _ = writeln!(out, "\n{} ({}):", category.display_name(), records.len());
            for record in records {
                let _ = writeln!(out, "  {}", record.display_name());
            }
        }
        out
    }

    /// Version of `name` in the package cache, or an empty string.
    pub fn cache_version(&self, name: &str) -> String {
        self.cache_resolver().lookup(name)
    }

    fn manifest_path<'a>(&'a self, manifest_path: Option<&'a Path>) -> &'a Path {
        manifest_path.unwrap_or(self.options.manifest_path.as_path())
    }

    fn cache_resolver(&self) -> CacheResolver<F> {
        CacheResolver::new(
            Rc::clone(&self.fs),
            self.options.cache_dir.clone(),
            Rc::clone(&self.sink),
        )
    }

    fn resolver(&self) -> Rc<dyn VersionResolver> {
        match self.options.strategy {
            VersionStrategy::Declared => Rc::new(DeclaredValueResolver),
            VersionStrategy::Cache => Rc::new(self.cache_resolver()),
        }
    }

    fn build(&self, manifest_path: &Path) -> Result<Vec<PackageRecord>> {
        let manifest = try_load_manifest(&*self.fs, manifest_path, &*self.sink)?;
        let scopes = openupm_scopes(&manifest);
        let resolver = self.resolver();

        tracing::debug!(
            dependencies = manifest.dependencies.len(),
            scopes = scopes.len(),
            strategy = self.options.strategy.name(),
            "building package catalog"
        );

        Ok(manifest
            .dependencies
            .into_iter()
            .map(|dep| {
                let category = classify(&dep.name, &dep.value, &scopes);
                PackageRecord::new(dep.name, dep.value, category, Rc::clone(&resolver))
            })
            .collect())
    }
}
