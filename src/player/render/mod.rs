//! Rendering components for the native player.
//!
//! The replayed terminal, the key strip, the status line and the help
//! overlay, all drawn with ratatui.

mod colors;
mod help;
mod keys;
mod status;
mod view;

pub use colors::{to_ratatui_color, to_ratatui_style};
pub use help::{help_area, render_help, HELP_BOX_WIDTH, HELP_ENTRIES};
pub use keys::{fade_color, KeyStrip};
pub use status::{build_status_spans, format_progress, render_message, render_status_bar, StatusInfo};
pub use view::TerminalView;
