//! VTE performer: routes parsed actions to the screen handlers.

use tracing::trace;
use unicode_width::UnicodeWidthChar;
use vte::{Params, Perform};

use super::buffer::Screen;

/// Short-lived adapter handed to `vte::Parser::advance`.
pub(crate) struct Performer<'a> {
    screen: &'a mut Screen,
}

impl<'a> Performer<'a> {
    pub fn new(screen: &'a mut Screen) -> Self {
        Self { screen }
    }
}

/// Flatten CSI params to their first sub-parameter each.
pub(crate) fn param_list(params: &Params) -> Vec<u16> {
    params
        .iter()
        .map(|p| p.first().copied().unwrap_or(0))
        .collect()
}

/// Parameter `idx`, treating a missing or zero value as `default`.
pub(crate) fn param_or(params: &[u16], idx: usize, default: u16) -> u16 {
    match params.get(idx) {
        Some(&0) | None => default,
        Some(&v) => v,
    }
}

impl Perform for Performer<'_> {
    fn print(&mut self, c: char) {
        match c.width() {
            Some(0) | None => {}
            Some(w) => self.screen.put_char(c, w),
        }
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' | 0x0b | 0x0c => self.screen.linefeed(),
            b'\r' => self.screen.carriage_return(),
            0x08 => self.screen.backspace(),
            b'\t' => self.screen.tab(),
            0x07 => {}
            other => trace!(byte = other, "unhandled control byte"),
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let p = param_list(params);
        let private = intermediates.first() == Some(&b'?');

        match action {
            'A' => self.screen.cursor_up(param_or(&p, 0, 1) as usize),
            'B' | 'e' => self.screen.cursor_down(param_or(&p, 0, 1) as usize),
            'C' | 'a' => self.screen.cursor_forward(param_or(&p, 0, 1) as usize),
            'D' => self.screen.cursor_back(param_or(&p, 0, 1) as usize),
            'E' => {
                self.screen.cursor_down(param_or(&p, 0, 1) as usize);
                self.screen.carriage_return();
            }
            'F' => {
                self.screen.cursor_up(param_or(&p, 0, 1) as usize);
                self.screen.carriage_return();
            }
            'G' | '`' => self.screen.cursor_to_col(param_or(&p, 0, 1) as usize - 1),
            'd' => self.screen.cursor_to_row(param_or(&p, 0, 1) as usize - 1),
            'H' | 'f' => self.screen.cursor_to(
                param_or(&p, 0, 1) as usize - 1,
                param_or(&p, 1, 1) as usize - 1,
            ),
            'J' => self.screen.erase_display(p.first().copied().unwrap_or(0)),
            'K' => self.screen.erase_line(p.first().copied().unwrap_or(0)),
            'X' => self.screen.erase_chars(param_or(&p, 0, 1) as usize),
            'L' => self.screen.insert_lines(param_or(&p, 0, 1) as usize),
            'M' => self.screen.delete_lines(param_or(&p, 0, 1) as usize),
            '@' => self.screen.insert_chars(param_or(&p, 0, 1) as usize),
            'P' => self.screen.delete_chars(param_or(&p, 0, 1) as usize),
            'S' => self.screen.scroll_up(param_or(&p, 0, 1) as usize),
            'T' => self.screen.scroll_down(param_or(&p, 0, 1) as usize),
            'r' => {
                let bottom = param_or(&p, 1, self.screen.height as u16) as usize;
                self.screen
                    .set_scroll_region(param_or(&p, 0, 1) as usize, bottom);
            }
            'm' => self.screen.apply_sgr(params),
            's' if !private => self.screen.save_cursor(),
            'u' if !private => self.screen.restore_cursor(),
            'h' | 'l' if private => {
                let enable = action == 'h';
                for mode in p {
                    self.screen.set_private_mode(mode, enable);
                }
            }
            _ => trace!(%action, ?p, "unhandled CSI sequence"),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        if !intermediates.is_empty() {
            // Charset designations and the like
            return;
        }
        match byte {
            b'7' => self.screen.save_cursor(),
            b'8' => self.screen.restore_cursor(),
            b'D' => self.screen.linefeed(),
            b'E' => {
                self.screen.linefeed();
                self.screen.carriage_return();
            }
            b'M' => self.screen.reverse_index(),
            b'c' => {
                let (w, h) = (self.screen.width, self.screen.height);
                *self.screen = Screen::new(w, h);
            }
            other => trace!(byte = other, "unhandled ESC sequence"),
        }
    }

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {
        // Window titles and hyperlinks have no place on the replay surface
    }
}
