//! Shellcast CLI entry point

mod commands;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;

use shellcast::cli::{Cli, Commands, ConfigCommands};
use shellcast::logging::{self, LogTarget};
use shellcast::widget::Mount;
use shellcast::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    let code = match cli.command {
        Commands::Play(args) => {
            let mount = if args.headless || !std::io::stdout().is_terminal() {
                Mount::Headless
            } else {
                Mount::Terminal
            };
            init_logging(&cli.log_file, &config, cli.verbose, mount == Mount::Terminal)?;
            commands::play::handle(&args, &config, mount)?
        }
        Commands::Info { source } => {
            init_logging(&cli.log_file, &config, cli.verbose, false)?;
            commands::info::handle(&source)?
        }
        Commands::Config { command } => {
            init_logging(&cli.log_file, &config, cli.verbose, false)?;
            match command {
                ConfigCommands::Show => commands::config::handle_show(&config)?,
                ConfigCommands::Path => commands::config::handle_path(cli.config.as_deref())?,
            }
        }
        Commands::Completions { shell } => commands::completions::handle(shell)?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// The full-screen player logs to a file; everything else to stderr unless
/// `--log-file` says otherwise.
fn init_logging(
    log_file: &Option<std::path::PathBuf>,
    config: &Config,
    verbose: u8,
    owns_terminal: bool,
) -> Result<()> {
    let target = match log_file {
        Some(path) => LogTarget::File(path.clone()),
        None if owns_terminal => config
            .log_file()
            .map(LogTarget::File)
            .unwrap_or(LogTarget::Stderr),
        None => LogTarget::Stderr,
    };
    logging::init(&target, &config.logging.level, verbose)
}
