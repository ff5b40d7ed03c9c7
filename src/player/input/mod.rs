//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::{handle_mouse_event, hits};

use std::time::Instant;

use crossterm::event::Event;

use crate::player::scheduler::Scheduler;
use crate::player::state::{InputResult, ViewState};
use crate::terminal::Terminal;

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event<T: Terminal>(
    event: Event,
    player: &mut Scheduler<T>,
    view: &mut ViewState,
    now: Instant,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, player, view, now),
        Event::Mouse(mouse) => handle_mouse_event(mouse, player, view, now),
        // Resize is picked up by the next draw
        _ => InputResult::Continue,
    }
}
