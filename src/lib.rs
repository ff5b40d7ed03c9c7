//! Shellcast - replay recorded terminal sessions
//!
//! A session (terminal size plus timestamped input/output frames) is loaded
//! from a file or URL, output frames are written into an emulated terminal
//! at the recorded pace, and typed keys show up in a fading key strip.

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod session;
pub mod terminal;
pub mod theme;
pub mod widget;

pub use config::Config;
pub use player::{PlaybackResult, PlaybackState, Scheduler};
pub use session::{Frame, FrameEntry, FrameKind, Session, SessionSource};
pub use terminal::{Terminal, TerminalBuffer};
pub use widget::{Mount, OptionsError, Shellcast, ShellcastOptions, SurfaceGeometry};
