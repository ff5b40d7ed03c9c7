//! Mouse input handling for the native player.
//!
//! A left click on the replayed terminal toggles play/pause.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::player::scheduler::Scheduler;
use crate::player::state::{InputResult, ViewState};
use crate::terminal::Terminal;

/// Whether a click at `column`/`row` lands inside `area`.
pub fn hits(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

/// Handle a mouse event.
pub fn handle_mouse_event<T: Terminal>(
    mouse: MouseEvent,
    player: &mut Scheduler<T>,
    view: &mut ViewState,
    now: Instant,
) -> InputResult {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if view.show_help {
            view.show_help = false;
        } else if hits(view.terminal_area, mouse.column, mouse.row) {
            player.toggle(now);
        }
    }
    InputResult::Continue
}
