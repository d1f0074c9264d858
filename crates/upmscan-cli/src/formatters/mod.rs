//! Output formatters for package queries.
//!
//! Formatters write to any `io::Write` so they can be exercised against a
//! buffer; the commands hand them a locked stdout.

pub mod human;
pub mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use std::collections::BTreeMap;
use std::io::{self, Write};
use upmscan_core::{Category, PackageRecord};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for rendering query results
pub trait Formatter {
    /// A flat list of packages, in manifest order
    fn packages(&self, out: &mut dyn Write, packages: &[PackageRecord]) -> io::Result<()>;

    /// Packages grouped by category
    fn groups(
        &self,
        out: &mut dyn Write,
        groups: &BTreeMap<Category, Vec<PackageRecord>>,
    ) -> io::Result<()>;

    /// Result of a package cache lookup; `version` is empty on a miss
    fn cache_version(&self, out: &mut dyn Write, name: &str, version: &str) -> io::Result<()>;
}

/// Formatter for `format`
pub fn formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
