//! Human-readable formatter.

use super::Formatter;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use upmscan_core::{Category, PackageRecord};

pub struct HumanFormatter;

impl Formatter for HumanFormatter {
    fn packages(&self, out: &mut dyn Write, packages: &[PackageRecord]) -> io::Result<()> {
        if packages.is_empty() {
            return writeln!(out, "No packages found.");
        }

        writeln!(out, "{}", format!("📦 Packages ({}):", packages.len()).bold())?;
        let width = packages
            .iter()
            .map(|p| p.display_name().chars().count())
            .max()
            .unwrap_or(0);
        for package in packages {
            writeln!(
                out,
                "  {:<width$}  {}",
                package.display_name(),
                package.category().display_name().dimmed(),
            )?;
        }
        Ok(())
    }

    fn groups(
        &self,
        out: &mut dyn Write,
        groups: &BTreeMap<Category, Vec<PackageRecord>>,
    ) -> io::Result<()> {
        let total: usize = groups.values().map(Vec::len).sum();
        writeln!(out, "{}", format!("📦 Packages ({total})").bold())?;

        for (category, packages) in groups {
            writeln!(out)?;
            writeln!(
                out,
                "{} {}",
                format!("{} ({}):", category.display_name(), packages.len())
                    .cyan()
                    .bold(),
                category.description().dimmed(),
            )?;
            for package in packages {
                if package.has_version() {
                    writeln!(out, "  {}", package.display_name())?;
                } else {
                    writeln!(out, "  {}", package.display_name().yellow())?;
                }
            }
        }
        Ok(())
    }

    fn cache_version(&self, out: &mut dyn Write, name: &str, version: &str) -> io::Result<()> {
        if version.is_empty() {
            writeln!(
                out,
                "{} {}",
                "✗".red(),
                format!("{name}: not found in package cache").yellow()
            )
        } else {
            writeln!(out, "{} {}@{}", "✓".green(), name, version.green())
        }
    }
}
