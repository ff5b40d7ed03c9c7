//! Subcommand handlers. Each returns the process exit code.

pub mod completions;
pub mod config;
pub mod info;
pub mod play;

use std::path::Path;

use anyhow::{Context, Result};
use shellcast::Config;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}
