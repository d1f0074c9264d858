pub mod config;
pub mod packages;

pub use config::{handle_config_command, ConfigCommand};
pub use packages::{
    build_catalog, handle_packages_command, parse_category, PackageRunOptions, PackagesCommand,
};
