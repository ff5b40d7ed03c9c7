//! SGR (Select Graphic Rendition) handler.
//!
//! Handles CSI m sequence for text styling:
//! - Reset (0)
//! - Bold, dim, italic, underline, reverse (1-7)
//! - Standard foreground/background colors (30-47)
//! - Extended colors - 256-color mode (38;5;n, 48;5;n)
//! - Extended colors - RGB mode (38;2;r;g;b, 48;2;r;g;b)
//! - Bright foreground/background colors (90-107)

use vte::Params;

use crate::terminal::buffer::Screen;
use crate::terminal::types::{CellStyle, Color};

impl Screen {
    pub(crate) fn apply_sgr(&mut self, params: &Params) {
        let groups: Vec<&[u16]> = params.iter().collect();
        if groups.is_empty() {
            self.style = CellStyle::default();
            return;
        }

        let mut i = 0;
        while i < groups.len() {
            let group = groups[i];
            let code = group.first().copied().unwrap_or(0);
            match code {
                0 => self.style = CellStyle::default(),
                1 => self.style.bold = true,
                2 => self.style.dim = true,
                3 => self.style.italic = true,
                4 => self.style.underline = true,
                7 => self.style.reverse = true,
                22 => {
                    self.style.bold = false;
                    self.style.dim = false;
                }
                23 => self.style.italic = false,
                24 => self.style.underline = false,
                27 => self.style.reverse = false,
                30..=37 => self.style.fg = Color::standard(code - 30),
                39 => self.style.fg = Color::Default,
                40..=47 => self.style.bg = Color::standard(code - 40),
                49 => self.style.bg = Color::Default,
                90..=97 => self.style.fg = Color::bright(code - 90),
                100..=107 => self.style.bg = Color::bright(code - 100),
                38 | 48 => {
                    let (color, consumed) = if group.len() > 1 {
                        // Colon form: 38:5:n or 38:2:r:g:b
                        (extended_color(&group[1..]), 0)
                    } else {
                        let rest: Vec<u16> = groups[i + 1..]
                            .iter()
                            .map(|g| g.first().copied().unwrap_or(0))
                            .collect();
                        let consumed = match rest.first() {
                            Some(5) => 2,
                            Some(2) => 4,
                            _ => 0,
                        };
                        (extended_color(&rest), consumed)
                    };
                    if let Some(color) = color {
                        if code == 38 {
                            self.style.fg = color;
                        } else {
                            self.style.bg = color;
                        }
                    }
                    i += consumed;
                }
                _ => {}
            }
            i += 1;
        }
    }
}

/// Decode `5;n` or `2;r;g;b` following a 38/48 introducer.
fn extended_color(args: &[u16]) -> Option<Color> {
    match args {
        [5, n, ..] => Some(Color::Indexed(*n as u8)),
        [2, r, g, b, ..] => Some(Color::Rgb(*r as u8, *g as u8, *b as u8)),
        _ => None,
    }
}
