use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;
use upmscan_config::{ConfigError, ConfigManager, ConfigSource, PROJECT_CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Initialize config file at ~/.upmscan/config.toml
    Init {
        /// Write upmscan.toml in the project root instead
        #[arg(long)]
        local: bool,
    },

    /// Show the path of the config in effect
    Path,

    /// Print the effective configuration as TOML
    Show,
}

pub fn handle_config_command(
    cmd: ConfigCommand,
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<()> {
    match cmd {
        ConfigCommand::Init { local } => {
            let result = if local {
                ConfigManager::init_at(&project_root.join(PROJECT_CONFIG_FILE))
            } else {
                ConfigManager::init()
            };
            report_init(result)
        }
        ConfigCommand::Path => show_config_path(project_root, explicit),
        ConfigCommand::Show => show_config(project_root, explicit),
    }
}

fn report_init(result: Result<ConfigManager, ConfigError>) -> Result<()> {
    match result {
        Ok(manager) => {
            if let Some(path) = manager.source().path() {
                println!("{} Initialized config at: {}", "✓".green(), path.display());
            }
            Ok(())
        }
        Err(ConfigError::ConfigExists(path)) => {
            println!("Config already exists at: {}", path.display());
            println!("To reinitialize, please delete the existing config first.");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to initialize config"),
    }
}

fn describe(source: &ConfigSource) -> &'static str {
    match source {
        ConfigSource::Explicit(_) => "explicit",
        ConfigSource::Project(_) => "project",
        ConfigSource::Global(_) => "global",
        ConfigSource::Defaults => "defaults",
    }
}

fn show_config_path(project_root: &Path, explicit: Option<&Path>) -> Result<()> {
    let manager = ConfigManager::discover(project_root, explicit)?;
    match manager.source().path() {
        Some(path) => println!("{}", path.display()),
        None => {
            let global = ConfigManager::config_path()?;
            println!("No config file found; using built-in defaults.");
            println!(
                "Create one with `upmscan config init` ({}) or `upmscan config init --local` ({}).",
                global.display(),
                project_root.join(PROJECT_CONFIG_FILE).display()
            );
        }
    }
    Ok(())
}

fn show_config(project_root: &Path, explicit: Option<&Path>) -> Result<()> {
    let manager = ConfigManager::discover(project_root, explicit)?;
    let source = manager.source();
    let origin = source
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    println!("# source: {} ({})", describe(source), origin);
    let rendered = toml::to_string_pretty(manager.config()).context("Failed to render config")?;
    print!("{rendered}");
    Ok(())
}
