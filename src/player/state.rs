//! Player state management
//!
//! Contains the `PlaybackState` lifecycle enum with its transition table,
//! as well as shared types used across player modules (`InputResult`,
//! `ViewState`).

use std::fmt;

use ratatui::layout::Rect;

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
    /// Exit because the user hit Ctrl-C
    Interrupt,
}

/// UI-only state of the native player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Whether the help overlay is showing
    pub show_help: bool,
    /// Where the replayed terminal was last drawn (click target)
    pub terminal_area: Rect,
}

impl ViewState {
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

/// Lifecycle of a playback scheduler.
///
/// ```text
/// Idle ──play──▶ Playing ──pause──▶ Paused
///                  │  ▲               │
///        end of    │  └───unpause─────┘
///        frames    ▼  │
///               Stopped ──play (rewinds)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Created, nothing played yet
    #[default]
    Idle,
    Playing,
    Paused,
    /// Reached the end of the frame list
    Stopped,
}

impl PlaybackState {
    /// Whether `self → next` is an edge of the transition table.
    pub fn can_transition_to(self, next: PlaybackState) -> bool {
        use PlaybackState::*;
        matches!(
            (self, next),
            (Idle, Playing) | (Playing, Paused) | (Playing, Stopped) | (Paused, Playing) | (Stopped, Playing)
        )
    }

    /// Human-readable label for display (includes both icon and text).
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Idle => "⏹ Ready",
            PlaybackState::Playing => "▶ Playing",
            PlaybackState::Paused => "⏸ Paused",
            PlaybackState::Stopped => "⏹ Finished",
        }
    }

    /// What a play/pause toggle would do from this state.
    pub fn toggle_hint(self) -> &'static str {
        match self {
            PlaybackState::Playing => "pause",
            PlaybackState::Paused => "resume",
            PlaybackState::Idle => "play",
            PlaybackState::Stopped => "replay",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
