//! Erase, insert and delete handlers.
//!
//! Handles CSI sequences:
//! - J: Erase in display
//! - K: Erase in line
//! - X: Erase characters
//! - L/M: Insert/delete lines
//! - @/P: Insert/delete characters

use crate::terminal::buffer::Screen;

impl Screen {
    /// ED: 0 = cursor to end, 1 = start to cursor, 2/3 = whole screen.
    pub(crate) fn erase_display(&mut self, mode: u16) {
        let blank = self.blank_cell();
        let (row, col) = (self.cursor_row, self.cursor_col);
        match mode {
            0 => {
                self.erase_line(0);
                for r in self.grid.iter_mut().skip(row + 1) {
                    r.fill(blank);
                }
            }
            1 => {
                self.erase_line(1);
                for r in self.grid.iter_mut().take(row) {
                    r.fill(blank);
                }
            }
            2 | 3 => {
                for r in &mut self.grid {
                    r.fill(blank);
                }
            }
            _ => {}
        }
        self.cursor_col = col;
    }

    /// EL: 0 = cursor to end, 1 = start to cursor, 2 = whole line.
    pub(crate) fn erase_line(&mut self, mode: u16) {
        let blank = self.blank_cell();
        let col = self.cursor_col;
        let line = &mut self.grid[self.cursor_row];
        match mode {
            0 => line[col..].fill(blank),
            1 => line[..=col].fill(blank),
            2 => line.fill(blank),
            _ => {}
        }
        self.wrap_pending = false;
    }

    pub(crate) fn erase_chars(&mut self, n: usize) {
        let blank = self.blank_cell();
        let col = self.cursor_col;
        let end = (col + n).min(self.width);
        self.grid[self.cursor_row][col..end].fill(blank);
    }

    /// IL: only acts when the cursor is inside the scroll region.
    pub(crate) fn insert_lines(&mut self, n: usize) {
        if self.cursor_row < self.scroll_top || self.cursor_row > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_row + 1);
        for _ in 0..n {
            self.grid.remove(self.scroll_bottom);
            let blank = self.blank_row();
            self.grid.insert(self.cursor_row, blank);
        }
        self.cursor_col = 0;
    }

    /// DL: only acts when the cursor is inside the scroll region.
    pub(crate) fn delete_lines(&mut self, n: usize) {
        if self.cursor_row < self.scroll_top || self.cursor_row > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_row + 1);
        for _ in 0..n {
            self.grid.remove(self.cursor_row);
            let blank = self.blank_row();
            self.grid.insert(self.scroll_bottom, blank);
        }
        self.cursor_col = 0;
    }

    pub(crate) fn insert_chars(&mut self, n: usize) {
        let blank = self.blank_cell();
        let col = self.cursor_col;
        let width = self.width;
        let line = &mut self.grid[self.cursor_row];
        let n = n.min(width - col);
        line.truncate(width - n);
        for _ in 0..n {
            line.insert(col, blank);
        }
    }

    pub(crate) fn delete_chars(&mut self, n: usize) {
        let blank = self.blank_cell();
        let col = self.cursor_col;
        let width = self.width;
        let line = &mut self.grid[self.cursor_row];
        let n = n.min(width - col);
        line.drain(col..col + n);
        line.resize(width, blank);
    }
}
