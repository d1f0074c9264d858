//! upmscan - Unity Package Manager dependency auditor.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use upmscan_cli::commands::{self, PackageRunOptions, PackagesCommand};
use upmscan_cli::{logging, OutputFormat};
use upmscan_core::{Category, VersionStrategy};

#[derive(Parser, Debug)]
#[command(name = "upmscan")]
#[command(version)]
#[command(about = "Audit the packages a Unity project depends on", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Unity project root (the folder containing Packages/)
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    project: PathBuf,

    /// Manifest path, relative to the project root
    ///
    /// Defaults to Packages/manifest.json, or the value in upmscan.toml.
    #[arg(long, value_name = "PATH", global = true)]
    manifest: Option<PathBuf>,

    /// Package cache directory, relative to the project root
    ///
    /// Defaults to Library/PackageCache, or the value in upmscan.toml.
    #[arg(long, value_name = "DIR", global = true)]
    cache: Option<PathBuf>,

    /// Where reported versions come from
    ///
    /// - declared: parse the manifest value (tag, fragment or bare version)
    /// - cache: read Library/PackageCache
    #[arg(long, value_enum, global = true)]
    strategy: Option<StrategyArg>,

    /// Configuration file path
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Output JSON format (alias for --output json)
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List declared packages in manifest order
    List {
        /// Only packages of this category (unity, git, openupm, standard)
        #[arg(short, long, value_name = "CATEGORY", value_parser = commands::parse_category)]
        category: Option<Category>,
    },

    /// Show packages grouped by category
    Groups,

    /// Print the grouped plain-text report (default)
    Print,

    /// Look up a package's version in the package cache
    Version {
        /// Package name, e.g. com.unity.ugui
        name: String,
    },

    /// Manage upmscan configuration
    Config {
        #[command(subcommand)]
        command: commands::ConfigCommand,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    Declared,
    Cache,
}

impl From<StrategyArg> for VersionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Declared => VersionStrategy::Declared,
            StrategyArg::Cache => VersionStrategy::Cache,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let query = match cli.command {
        Some(Command::Config { command }) => {
            return commands::handle_config_command(command, &cli.project, cli.config.as_deref());
        }
        Some(Command::List { category }) => PackagesCommand::List(category),
        Some(Command::Groups) => PackagesCommand::Groups,
        Some(Command::Print) | None => PackagesCommand::Print,
        Some(Command::Version { name }) => PackagesCommand::Version(name),
    };

    let options = PackageRunOptions {
        project: cli.project,
        manifest: cli.manifest,
        cache: cli.cache,
        strategy: cli.strategy.map(Into::into),
        config: cli.config,
        format: if cli.json {
            OutputFormat::Json
        } else {
            cli.format
        },
    };
    commands::handle_packages_command(query, &options)
}
