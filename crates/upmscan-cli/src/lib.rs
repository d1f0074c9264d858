//! upmscan CLI library components.
//!
//! This crate provides the command-line interface over `upmscan-core`.
//! The main binary is in `main.rs`.

pub mod commands;
pub mod formatters;
pub mod logging;

pub use formatters::OutputFormat;
