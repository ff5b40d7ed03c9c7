//! Terminal data types.
//!
//! Contains the core data structures for representing terminal state:
//! - Color: ANSI color codes (16 colors, 256-color palette, RGB)
//! - CellStyle: Text attributes (bold, italic, underline, etc.)
//! - Cell: A single character with its style
//! - StyledLine: A line of styled cells for rendering

/// A terminal color as set by SGR sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 256-color palette entry
    Indexed(u8),
    /// 24-bit color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Map a standard color index (0-7) to its color.
    pub fn standard(n: u16) -> Self {
        match n {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            _ => Color::White,
        }
    }

    /// Map a bright color index (0-7) to its color.
    pub fn bright(n: u16) -> Self {
        match n {
            0 => Color::BrightBlack,
            1 => Color::BrightRed,
            2 => Color::BrightGreen,
            3 => Color::BrightYellow,
            4 => Color::BrightBlue,
            5 => Color::BrightMagenta,
            6 => Color::BrightCyan,
            _ => Color::BrightWhite,
        }
    }
}

/// Text attributes for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub style: CellStyle,
}

impl Cell {
    /// Character stored in the trailing half of a double-width glyph.
    pub const SPACER: char = '\0';

    pub fn new(char: char, style: CellStyle) -> Self {
        Self { char, style }
    }

    /// A blank cell carrying the given style (used by erase operations).
    pub fn blank(style: CellStyle) -> Self {
        Self { char: ' ', style }
    }

    /// Whether this cell is the right half of a wide character.
    pub fn is_spacer(&self) -> bool {
        self.char == Self::SPACER
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

/// A line of styled cells, trimmed of trailing blanks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub cells: Vec<Cell>,
}

impl StyledLine {
    /// Plain text of the line, skipping wide-character spacers.
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .filter(|c| !c.is_spacer())
            .map(|c| c.char)
            .collect()
    }
}
