//! Virtual terminal emulator module.
//!
//! Provides a VTE-based terminal buffer that recorded output is replayed
//! into. The player only talks to it through the [`Terminal`] trait, so any
//! emulator able to write, reset and blink can stand in for it.

mod buffer;
mod handlers;
mod performer;
mod types;

#[cfg(test)]
mod tests;

pub use buffer::{TerminalBuffer, BLINK_INTERVAL};
pub use types::{Cell, CellStyle, Color, StyledLine};

/// The operations the playback scheduler needs from a terminal emulator.
pub trait Terminal {
    /// Write a raw output chunk; escape code interpretation is the emulator's job.
    fn write(&mut self, text: &str);

    /// Clear the screen and return to the initial state.
    fn reset(&mut self);

    /// Start blinking the cursor (playback running).
    fn start_blink(&mut self);

    /// Stop blinking the cursor (playback paused or finished).
    fn stop_blink(&mut self);
}
