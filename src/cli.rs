//! Command-line interface definitions.
//!
//! Lives in the library so the `xtask` crate can render the man page from
//! the same definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::Config;
use crate::player::TimingMode;
use crate::session::MalformedPolicy;
use crate::widget::{Mount, ShellcastOptions};

#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("SHELLCAST_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SHELLCAST_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "shellcast")]
#[command(version = VERSION)]
#[command(about = "Replay recorded terminal sessions with a live log of typed keys")]
#[command(long_about = "Shellcast replays a recorded terminal session: output is \
rendered into an emulated terminal at the recorded pace while typed keys show up \
in a fading strip underneath.\n\n\
Sessions are JSON documents ({\"term_cols\", \"term_rows\", \"frames\"}) or \
asciicast v3 recordings, read from a file or fetched over HTTP(S).")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a session
    #[command(long_about = "Replay a session in a full-screen player.\n\n\
Controls: Space play/pause, r replay, +/- speed, ? help, q quit.\n\
Clicking the terminal also toggles play/pause.\n\n\
With --headless (or when stdout is not a terminal) the session plays \
without a UI and the final screen is printed.")]
    Play(PlayArgs),

    /// Show dimensions, frame counts and duration of a session
    Info {
        /// Session file path or http(s) URL
        source: String,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Session file path or http(s) URL
    pub source: String,

    /// Play without a UI and print the final screen
    #[arg(long)]
    pub headless: bool,

    /// Load the session but wait for Space before playing
    #[arg(long)]
    pub no_autoplay: bool,

    /// How stored frame timestamps become waits
    #[arg(long, value_enum)]
    pub timing: Option<TimingMode>,

    /// Speed multiplier (0.1 to 16)
    #[arg(long, value_name = "N")]
    pub speed: Option<f64>,

    /// Pixels per terminal column
    #[arg(long, value_name = "PX")]
    pub char_width: Option<u16>,

    /// Drop malformed frames instead of stopping at them
    #[arg(long)]
    pub skip_malformed: bool,
}

impl PlayArgs {
    /// Options from the config file, overridden by these flags.
    pub fn options(&self, config: &Config, mount: Mount) -> ShellcastOptions {
        let mut options = ShellcastOptions::from_config(config)
            .url(self.source.clone())
            .element(mount);
        if self.no_autoplay {
            options = options.autoplay(false);
        }
        if let Some(timing) = self.timing {
            options = options.timing(timing);
        }
        if let Some(speed) = self.speed {
            options = options.speed(speed);
        }
        if let Some(width) = self.char_width {
            options = options.terminal_character_width(width);
        }
        if self.skip_malformed {
            options = options.malformed_frames(MalformedPolicy::Skip);
        }
        options
    }
}
