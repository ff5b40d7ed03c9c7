//! Config subcommands handler

use std::path::Path;

use anyhow::Result;

use shellcast::theme::current_theme;
use shellcast::Config;

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<i32> {
    let toml_str = toml::to_string_pretty(config)?;
    print!("{}", toml_str);
    Ok(0)
}

/// Show where the config file is read from, and whether it exists.
pub fn handle_path(override_path: Option<&Path>) -> Result<i32> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    println!("{}", path.display());
    if !path.exists() {
        let theme = current_theme();
        eprintln!("{}", theme.secondary_text("(file does not exist, defaults in use)"));
    }
    Ok(0)
}
