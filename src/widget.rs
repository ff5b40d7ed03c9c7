//! Player construction.
//!
//! [`ShellcastOptions`] collects the construction-time settings, and
//! [`Shellcast::new`] validates them up front: a player without a session
//! URL or a place to mount it is rejected before anything is loaded.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::config::{Config, InputDisplayConfig, DEFAULT_CHARACTER_WIDTH};
use crate::player::{self, PlaybackResult, Scheduler, TimingMode};
use crate::session::{LoadError, MalformedPolicy, Session, SessionLoader, SessionSource};
use crate::terminal::TerminalBuffer;

/// Where the render surface is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// Full-screen UI in the controlling terminal
    Terminal,
    /// No UI; the final screen is printed when playback ends
    Headless,
}

/// Missing required options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("a session url is required")]
    MissingUrl,
    #[error("a mount element is required")]
    MissingElement,
}

/// Size of the mounted surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGeometry {
    pub cols: u16,
    pub rows: u16,
    /// `cols` times the configured character width
    pub pixel_width: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ShellcastOptions {
    pub url: Option<String>,
    pub element: Option<Mount>,
    pub terminal_character_width: Option<u16>,
    pub autoplay: Option<bool>,
    pub timing: Option<TimingMode>,
    pub speed: Option<f64>,
    pub malformed_frames: Option<MalformedPolicy>,
    pub input_display: Option<InputDisplayConfig>,
}

impl ShellcastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options pre-filled from the `[player]` and `[input_display]` sections.
    pub fn from_config(config: &Config) -> Self {
        Self {
            terminal_character_width: Some(config.player.terminal_character_width),
            autoplay: Some(config.player.autoplay),
            timing: Some(config.player.timing),
            speed: Some(config.player.speed),
            malformed_frames: Some(config.player.malformed_frames),
            input_display: Some(config.input_display.clone()),
            ..Self::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element(mut self, mount: Mount) -> Self {
        self.element = Some(mount);
        self
    }

    pub fn terminal_character_width(mut self, width: u16) -> Self {
        self.terminal_character_width = Some(width);
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    pub fn timing(mut self, timing: TimingMode) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn malformed_frames(mut self, policy: MalformedPolicy) -> Self {
        self.malformed_frames = Some(policy);
        self
    }
}

/// A validated player, ready to load and mount a session.
#[derive(Debug, Clone)]
pub struct Shellcast {
    source: SessionSource,
    mount: Mount,
    character_width: u16,
    autoplay: bool,
    timing: TimingMode,
    speed: f64,
    malformed: MalformedPolicy,
    input_display: InputDisplayConfig,
}

impl Shellcast {
    pub fn new(options: ShellcastOptions) -> Result<Self, OptionsError> {
        let url = options.url.ok_or(OptionsError::MissingUrl)?;
        let mount = options.element.ok_or(OptionsError::MissingElement)?;
        Ok(Self {
            source: SessionSource::parse(&url),
            mount,
            character_width: options
                .terminal_character_width
                .unwrap_or(DEFAULT_CHARACTER_WIDTH),
            autoplay: options.autoplay.unwrap_or(true),
            timing: options.timing.unwrap_or_default(),
            speed: options.speed.unwrap_or(1.0),
            malformed: options.malformed_frames.unwrap_or_default(),
            input_display: options.input_display.unwrap_or_default(),
        })
    }

    pub fn source(&self) -> &SessionSource {
        &self.source
    }

    pub fn mount_point(&self) -> Mount {
        self.mount
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn malformed_policy(&self) -> MalformedPolicy {
        self.malformed
    }

    /// Start loading the session on a background thread.
    pub fn spawn_loader(&self) -> SessionLoader {
        SessionLoader::spawn(self.source.clone(), self.malformed)
    }

    /// Load the session, blocking until the loader answers.
    pub fn load(&self) -> Result<Session, LoadError> {
        self.spawn_loader().wait()
    }

    pub fn geometry(&self, session: &Session) -> SurfaceGeometry {
        SurfaceGeometry {
            cols: session.term_cols,
            rows: session.term_rows,
            pixel_width: u32::from(self.character_width) * u32::from(session.term_cols),
        }
    }

    /// Build the render surface and scheduler for `session`.
    pub fn mount(&self, session: Session) -> Scheduler<TerminalBuffer> {
        self.mount_at(session, Instant::now())
    }

    /// [`mount`](Shellcast::mount) with an explicit clock.
    pub fn mount_at(&self, session: Session, now: Instant) -> Scheduler<TerminalBuffer> {
        let geometry = self.geometry(&session);
        info!(
            cols = geometry.cols,
            rows = geometry.rows,
            pixel_width = geometry.pixel_width,
            mount = ?self.mount,
            "mounting terminal surface"
        );

        let terminal = TerminalBuffer::new(geometry.cols as usize, geometry.rows as usize);
        let mut player = Scheduler::new(session, terminal)
            .with_timing(self.timing)
            .with_speed(self.speed)
            .with_key_log(self.input_display.key_log());

        if self.autoplay {
            player.play(now);
        } else {
            info!("session loaded and ready to play");
        }
        player
    }

    /// Load and play on the selected mount.
    pub fn run(&self) -> Result<PlaybackResult> {
        match self.mount {
            Mount::Terminal => player::native::run(self),
            Mount::Headless => player::headless::run(self),
        }
    }
}
