//! Shell completions subcommand handler

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use shellcast::cli::Cli;

/// Print the completion script for `shell` to stdout.
pub fn handle(shell: Shell) -> Result<i32> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(0)
}
