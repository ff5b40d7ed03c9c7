//! Conversion from emulator cell styles to ratatui styles.

use ratatui::style::{Color, Modifier, Style};

use crate::terminal::{CellStyle, Color as TermColor};

/// Map an emulator color onto the ratatui palette.
///
/// `Default` maps to `Reset` so the host terminal's own colors show through.
pub fn to_ratatui_color(color: TermColor) -> Color {
    match color {
        TermColor::Default => Color::Reset,
        TermColor::Black => Color::Black,
        TermColor::Red => Color::Red,
        TermColor::Green => Color::Green,
        TermColor::Yellow => Color::Yellow,
        TermColor::Blue => Color::Blue,
        TermColor::Magenta => Color::Magenta,
        TermColor::Cyan => Color::Cyan,
        TermColor::White => Color::Gray,
        TermColor::BrightBlack => Color::DarkGray,
        TermColor::BrightRed => Color::LightRed,
        TermColor::BrightGreen => Color::LightGreen,
        TermColor::BrightYellow => Color::LightYellow,
        TermColor::BrightBlue => Color::LightBlue,
        TermColor::BrightMagenta => Color::LightMagenta,
        TermColor::BrightCyan => Color::LightCyan,
        TermColor::BrightWhite => Color::White,
        TermColor::Indexed(n) => Color::Indexed(n),
        TermColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

/// Full ratatui style for a cell, attributes included.
pub fn to_ratatui_style(style: &CellStyle) -> Style {
    let mut modifiers = Modifier::empty();
    if style.bold {
        modifiers |= Modifier::BOLD;
    }
    if style.dim {
        modifiers |= Modifier::DIM;
    }
    if style.italic {
        modifiers |= Modifier::ITALIC;
    }
    if style.underline {
        modifiers |= Modifier::UNDERLINED;
    }
    if style.reverse {
        modifiers |= Modifier::REVERSED;
    }

    Style::default()
        .fg(to_ratatui_color(style.fg))
        .bg(to_ratatui_color(style.bg))
        .add_modifier(modifiers)
}
