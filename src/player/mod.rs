//! Session player
//!
//! The [`Scheduler`] is the heart of playback: a small state machine that
//! walks the frame list and dispatches each frame to a [`Terminal`] at the
//! recorded pace. It is mounted either in a full-screen terminal UI
//! (`native`) or run without one (`headless`).
//!
//! # Architecture
//!
//! - `state`: `PlaybackState` lifecycle and shared UI types
//! - `scheduler`: frame dispatch, pause/resume/replay, deadlines
//! - `timing`: how stored timestamps become waits, speed scaling
//! - `keylog`: the fading log of typed keys
//! - `listener`: state-change subscriptions
//! - `input/`: keyboard and mouse handling for the native UI
//! - `render/`: ratatui widgets for the native UI
//!
//! [`Terminal`]: crate::terminal::Terminal

pub mod headless;
pub(crate) mod input;
pub mod keylog;
pub mod listener;
pub(crate) mod native;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod timing;

pub use keylog::{key_label, KeyLog, VisibleKey};
pub use listener::{ListenerId, StateChange, StateListener};
pub use scheduler::{PendingAdvance, Scheduler};
pub use state::{InputResult, PlaybackState, ViewState};
pub use timing::{TimingMode, MAX_SPEED, MIN_SPEED};

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Every frame was played
    Finished,
    /// Playback stopped on the malformed frame at `cursor`
    Stalled { cursor: usize },
    /// The user quit before the end
    Quit { cursor: Option<usize> },
    /// Loaded without autoplay and never started
    NotStarted,
    /// Ctrl-C
    Interrupted,
    /// The session could not be loaded
    LoadFailed,
}

impl PlaybackResult {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            PlaybackResult::Finished
            | PlaybackResult::Stalled { .. }
            | PlaybackResult::Quit { .. }
            | PlaybackResult::NotStarted => 0,
            PlaybackResult::LoadFailed => 1,
            PlaybackResult::Interrupted => 130,
        }
    }

    /// Outcome of a scheduler that is no longer being driven.
    pub fn from_scheduler<T: crate::terminal::Terminal>(player: &Scheduler<T>) -> Self {
        match player.state() {
            PlaybackState::Stopped => PlaybackResult::Finished,
            PlaybackState::Idle => PlaybackResult::NotStarted,
            PlaybackState::Playing if player.is_stalled() => PlaybackResult::Stalled {
                cursor: player.cursor().unwrap_or(0),
            },
            PlaybackState::Playing | PlaybackState::Paused => PlaybackResult::Quit {
                cursor: player.cursor(),
            },
        }
    }
}
