//! Play subcommand handler

use anyhow::Result;
use tracing::debug;

use shellcast::cli::PlayArgs;
use shellcast::widget::{Mount, Shellcast};
use shellcast::Config;

/// Replay a session on the given mount.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config, mount: Mount) -> Result<i32> {
    let app = Shellcast::new(args.options(config, mount))?;
    debug!(source = %app.source(), ?mount, "starting player");
    let result = app.run()?;
    debug!(?result, "player finished");
    Ok(result.exit_code())
}
