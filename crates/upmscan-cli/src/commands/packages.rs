//! Package queries: list, groups, print and cache lookups.

use crate::formatters::{formatter, OutputFormat};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use upmscan_config::{validate_project_path, ConfigManager};
use upmscan_core::{Category, PackageCatalog, VersionStrategy};
use upmscan_fs::NativeFileSystem;

/// A query against the project's packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagesCommand {
    /// Every package, or one category
    List(Option<Category>),
    /// Packages grouped by category
    Groups,
    /// Plain-text grouped report
    Print,
    /// Version of one package in the package cache
    Version(String),
}

/// Options shared by every package query
#[derive(Debug, Clone)]
pub struct PackageRunOptions {
    pub project: PathBuf,
    /// Manifest override, relative to the project root
    pub manifest: Option<PathBuf>,
    /// Package cache override, relative to the project root
    pub cache: Option<PathBuf>,
    pub strategy: Option<VersionStrategy>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Parse a `--category` value
pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_cli_name(s).ok_or_else(|| {
        let names: Vec<_> = Category::all().iter().map(Category::cli_name).collect();
        format!("unknown category '{s}' (expected one of: {})", names.join(", "))
    })
}

/// Build a catalog for the project, layering config file and flag overrides.
pub fn build_catalog(opts: &PackageRunOptions) -> Result<PackageCatalog<NativeFileSystem>> {
    let root = validate_project_path(&opts.project)
        .with_context(|| format!("Invalid project directory {}", opts.project.display()))?;

    let manager = ConfigManager::discover(&root, opts.config.as_deref())
        .context("Failed to load configuration")?;
    tracing::debug!(source = ?manager.source(), "using configuration");

    let mut options = manager.config().catalog_options();
    if let Some(manifest) = &opts.manifest {
        options.manifest_path = manifest.clone();
    }
    if let Some(cache) = &opts.cache {
        options.cache_dir = cache.clone();
    }
    if let Some(strategy) = opts.strategy {
        options.strategy = strategy;
    }

    let fs = NativeFileSystem::new(&root)
        .with_context(|| format!("Failed to open project {}", root.display()))?;
    Ok(PackageCatalog::with_options(Rc::new(fs), options))
}

pub fn handle_packages_command(cmd: PackagesCommand, opts: &PackageRunOptions) -> Result<()> {
    let catalog = build_catalog(opts)?;
    let formatter = formatter(opts.format);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cmd {
        PackagesCommand::List(category) => {
            let packages = match category {
                Some(category) => catalog.packages(category, None),
                None => catalog.all_packages(None),
            };
            formatter.packages(&mut out, &packages)?;
        }
        PackagesCommand::Groups => {
            formatter.groups(&mut out, &catalog.packages_by_type(None))?;
        }
        PackagesCommand::Print => match opts.format {
            OutputFormat::Human => write!(out, "{}", catalog.render_text(None))?,
            OutputFormat::Json => formatter.groups(&mut out, &catalog.packages_by_type(None))?,
        },
        PackagesCommand::Version(name) => {
            let version = catalog.cache_version(&name);
            formatter.cache_version(&mut out, &name, &version)?;
        }
    }

    out.flush()?;
    Ok(())
}
