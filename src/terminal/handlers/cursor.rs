//! Cursor movement handlers.
//!
//! Handles CSI sequences:
//! - A: Cursor up
//! - B: Cursor down
//! - C: Cursor forward
//! - D: Cursor back
//! - H/f: Cursor position
//! - G: Cursor horizontal absolute
//! - d: Cursor vertical absolute
//! - s/u: Save/restore cursor
//!
//! And ESC sequences:
//! - ESC 7: DEC save cursor
//! - ESC 8: DEC restore cursor

use crate::terminal::buffer::{SavedCursor, Screen};
use crate::terminal::types::Cell;

const TAB_WIDTH: usize = 8;

impl Screen {
    /// Print a character of display width `width` at the cursor.
    pub(crate) fn put_char(&mut self, c: char, width: usize) {
        if self.wrap_pending {
            self.wrap_pending = false;
            self.carriage_return();
            self.linefeed();
        }

        // A wide glyph that does not fit wraps early
        if width > 1 && self.cursor_col + width > self.width {
            self.carriage_return();
            self.linefeed();
        }

        let (row, col) = (self.cursor_row, self.cursor_col);
        self.grid[row][col] = Cell::new(c, self.style);
        if width > 1 && col + 1 < self.width {
            self.grid[row][col + 1] = Cell::new(Cell::SPACER, self.style);
        }

        let next = col + width;
        if next >= self.width {
            self.cursor_col = self.width - 1;
            self.wrap_pending = true;
        } else {
            self.cursor_col = next;
        }
    }

    pub(crate) fn carriage_return(&mut self) {
        self.cursor_col = 0;
        self.wrap_pending = false;
    }

    pub(crate) fn backspace(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
        self.wrap_pending = false;
    }

    pub(crate) fn tab(&mut self) {
        let next = (self.cursor_col / TAB_WIDTH + 1) * TAB_WIDTH;
        self.cursor_col = next.min(self.width - 1);
    }

    pub(crate) fn cursor_up(&mut self, n: usize) {
        // Movement stops at the scroll margin when starting inside the region
        let top = if self.cursor_row >= self.scroll_top {
            self.scroll_top
        } else {
            0
        };
        self.cursor_row = self.cursor_row.saturating_sub(n).max(top);
        self.wrap_pending = false;
    }

    pub(crate) fn cursor_down(&mut self, n: usize) {
        let bottom = if self.cursor_row <= self.scroll_bottom {
            self.scroll_bottom
        } else {
            self.height - 1
        };
        self.cursor_row = (self.cursor_row + n).min(bottom);
        self.wrap_pending = false;
    }

    pub(crate) fn cursor_forward(&mut self, n: usize) {
        self.cursor_col = (self.cursor_col + n).min(self.width - 1);
        self.wrap_pending = false;
    }

    pub(crate) fn cursor_back(&mut self, n: usize) {
        self.cursor_col = self.cursor_col.saturating_sub(n);
        self.wrap_pending = false;
    }

    pub(crate) fn cursor_to_col(&mut self, col: usize) {
        self.cursor_col = col.min(self.width - 1);
        self.wrap_pending = false;
    }

    pub(crate) fn cursor_to_row(&mut self, row: usize) {
        self.cursor_row = row.min(self.height - 1);
        self.wrap_pending = false;
    }

    /// Absolute positioning, 0-based.
    pub(crate) fn cursor_to(&mut self, row: usize, col: usize) {
        self.cursor_to_row(row);
        self.cursor_to_col(col);
    }

    pub(crate) fn save_cursor(&mut self) {
        self.saved_cursor = Some(SavedCursor {
            row: self.cursor_row,
            col: self.cursor_col,
            style: self.style,
        });
    }

    pub(crate) fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved_cursor {
            self.cursor_row = saved.row.min(self.height - 1);
            self.cursor_col = saved.col.min(self.width - 1);
            self.style = saved.style;
        } else {
            self.cursor_row = 0;
            self.cursor_col = 0;
        }
        self.wrap_pending = false;
    }

    /// DEC private modes (`CSI ? n h` / `CSI ? n l`).
    pub(crate) fn set_private_mode(&mut self, mode: u16, enable: bool) {
        match mode {
            25 => self.cursor_visible = enable,
            // Alternate screen: there is a single grid, so switching clears it
            47 | 1047 | 1049 => {
                if mode == 1049 && enable {
                    self.save_cursor();
                }
                self.erase_display(2);
                if mode == 1049 && !enable {
                    self.restore_cursor();
                }
            }
            _ => {}
        }
    }
}
