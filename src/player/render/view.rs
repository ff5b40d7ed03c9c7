//! Terminal view widget.
//!
//! Draws a [`TerminalBuffer`] cell by cell into a ratatui buffer, with the
//! cursor cell reversed while it is shown.

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use super::colors::to_ratatui_style;
use crate::terminal::TerminalBuffer;

pub struct TerminalView<'a> {
    terminal: &'a TerminalBuffer,
    show_cursor: bool,
}

impl<'a> TerminalView<'a> {
    /// View of `terminal` as it should look at `now` (blink phase included).
    pub fn new(terminal: &'a TerminalBuffer, now: Instant) -> Self {
        Self {
            terminal,
            show_cursor: terminal.cursor_shown(now),
        }
    }

    pub fn show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }
}

impl Widget for TerminalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = (area.height as usize).min(self.terminal.height());
        let cols = area.width as usize;
        let cursor = (self.terminal.cursor_row(), self.terminal.cursor_col());

        for row in 0..rows {
            let Some(cells) = self.terminal.row(row) else {
                break;
            };
            for (col, cell) in cells.iter().enumerate().take(cols) {
                if cell.is_spacer() {
                    continue;
                }
                let mut style = to_ratatui_style(&cell.style);
                if self.show_cursor && (row, col) == cursor {
                    style = if style.add_modifier.contains(Modifier::REVERSED) {
                        style.remove_modifier(Modifier::REVERSED)
                    } else {
                        style.add_modifier(Modifier::REVERSED)
                    };
                }
                let position = (area.x + col as u16, area.y + row as u16);
                if let Some(target) = buf.cell_mut(position) {
                    target.set_char(cell.char).set_style(style);
                }
            }
        }
    }
}
