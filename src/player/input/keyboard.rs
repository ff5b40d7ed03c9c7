//! Keyboard input handling for the native player.
//!
//! Handles the playback shortcuts: toggle, replay, speed, help and quit.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::scheduler::Scheduler;
use crate::player::state::{InputResult, ViewState};
use crate::player::timing::{speed_down, speed_up};
use crate::terminal::Terminal;

/// Handle a keyboard event.
pub fn handle_key_event<T: Terminal>(
    key: KeyEvent,
    player: &mut Scheduler<T>,
    view: &mut ViewState,
    now: Instant,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c {
        return InputResult::Interrupt;
    }

    // If help is showing, any key closes it
    if view.show_help {
        view.show_help = false;
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('?') => view.toggle_help(),
        KeyCode::Char(' ') => player.toggle(now),
        KeyCode::Char('r') => player.replay(now),
        KeyCode::Char('+') | KeyCode::Char('=') => player.set_speed(speed_up(player.speed())),
        KeyCode::Char('-') | KeyCode::Char('_') => player.set_speed(speed_down(player.speed())),
        _ => {}
    }
    InputResult::Continue
}
