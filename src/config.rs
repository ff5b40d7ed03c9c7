//! Configuration management
//!
//! Settings live in `<config dir>/shellcast/config.toml`. Every section and
//! field is optional; anything missing falls back to its default, and a
//! missing file means all defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::keylog::{KeyLog, DEFAULT_FADE, DEFAULT_MAX_KEYS, DEFAULT_VISIBLE};
use crate::player::timing::TimingMode;
use crate::session::MalformedPolicy;

/// Default pixels per terminal column.
pub const DEFAULT_CHARACTER_WIDTH: u16 = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub input_display: InputDisplayConfig,
    pub logging: LoggingConfig,
}

/// `[player]`: playback defaults, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start playing as soon as the session is loaded
    pub autoplay: bool,
    /// Pixels per column, used to report the surface width
    pub terminal_character_width: u16,
    pub timing: TimingMode,
    /// Speed multiplier (clamped to 0.1-16)
    pub speed: f64,
    /// `stall` keeps malformed frames (playback stops there), `skip` drops them
    pub malformed_frames: MalformedPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            terminal_character_width: DEFAULT_CHARACTER_WIDTH,
            timing: TimingMode::default(),
            speed: 1.0,
            malformed_frames: MalformedPolicy::default(),
        }
    }
}

/// `[input_display]`: the typed-keys strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDisplayConfig {
    pub visible_ms: u64,
    pub fade_ms: u64,
    pub max_keys: usize,
}

impl Default for InputDisplayConfig {
    fn default() -> Self {
        Self {
            visible_ms: DEFAULT_VISIBLE.as_millis() as u64,
            fade_ms: DEFAULT_FADE.as_millis() as u64,
            max_keys: DEFAULT_MAX_KEYS,
        }
    }
}

impl InputDisplayConfig {
    pub fn key_log(&self) -> KeyLog {
        KeyLog::new(
            Duration::from_millis(self.visible_ms),
            Duration::from_millis(self.fade_ms),
            self.max_keys,
        )
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `SHELLCAST_LOG` is unset (e.g. "info", "shellcast=debug")
    pub level: String,
    /// Log file for the interactive player
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("shellcast").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location. Without a config dir this is the
    /// defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoConfigDir) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Log file for the interactive player, falling back to the cache dir.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("shellcast").join("shellcast.log")))
    }
}
