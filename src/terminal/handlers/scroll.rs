//! Scroll region handlers.
//!
//! Handles CSI sequences:
//! - r: DECSTBM (Set Top and Bottom Margins)
//! - S: Scroll up
//! - T: Scroll down
//!
//! And ESC sequences:
//! - ESC D: Index
//! - ESC M: Reverse index

use crate::terminal::buffer::Screen;

impl Screen {
    /// Move down one row, scrolling the region when at its bottom margin.
    pub(crate) fn linefeed(&mut self) {
        self.wrap_pending = false;
        if self.cursor_row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor_row + 1 < self.height {
            self.cursor_row += 1;
        }
    }

    /// Move up one row, scrolling the region down when at its top margin.
    pub(crate) fn reverse_index(&mut self) {
        self.wrap_pending = false;
        if self.cursor_row == self.scroll_top {
            self.scroll_down(1);
        } else {
            self.cursor_row = self.cursor_row.saturating_sub(1);
        }
    }

    /// Shift the scroll region up by `n` rows, blanking the bottom.
    pub(crate) fn scroll_up(&mut self, n: usize) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let n = n.min(bottom - top + 1);
        for _ in 0..n {
            self.grid.remove(top);
            let blank = self.blank_row();
            self.grid.insert(bottom, blank);
        }
    }

    /// Shift the scroll region down by `n` rows, blanking the top.
    pub(crate) fn scroll_down(&mut self, n: usize) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let n = n.min(bottom - top + 1);
        for _ in 0..n {
            self.grid.remove(bottom);
            let blank = self.blank_row();
            self.grid.insert(top, blank);
        }
    }

    /// DECSTBM with 1-based inclusive margins. Invalid regions are ignored.
    pub(crate) fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.saturating_sub(1);
        let bottom = bottom.min(self.height).saturating_sub(1);
        if top >= bottom {
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.cursor_to(0, 0);
    }
}
