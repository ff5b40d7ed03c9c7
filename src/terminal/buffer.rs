//! Terminal buffer: the emulated screen and its VTE parser.

use std::fmt;
use std::time::{Duration, Instant};

use super::performer::Performer;
use super::types::{Cell, CellStyle, StyledLine};
use super::Terminal;

/// Half-period of the blinking cursor.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Cursor position and pen saved by `ESC 7` / `CSI s`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SavedCursor {
    pub row: usize,
    pub col: usize,
    pub style: CellStyle,
}

/// Grid state mutated by the escape sequence handlers.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<Cell>>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub saved_cursor: Option<SavedCursor>,
    /// Current pen used for newly printed characters
    pub style: CellStyle,
    /// Scroll region, inclusive on both ends
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// Set after printing into the last column; the next print wraps first
    pub wrap_pending: bool,
    pub cursor_visible: bool,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            grid: vec![vec![Cell::default(); width]; height],
            cursor_row: 0,
            cursor_col: 0,
            saved_cursor: None,
            style: CellStyle::default(),
            scroll_top: 0,
            scroll_bottom: height - 1,
            wrap_pending: false,
            cursor_visible: true,
        }
    }

    /// A blank row filled with the current background.
    pub fn blank_row(&self) -> Vec<Cell> {
        vec![self.blank_cell(); self.width]
    }

    /// Erased cells keep the background color of the pen.
    pub fn blank_cell(&self) -> Cell {
        Cell::blank(CellStyle {
            bg: self.style.bg,
            ..CellStyle::default()
        })
    }
}

/// A virtual terminal that interprets output chunks written to it.
///
/// The parser state survives between [`TerminalBuffer::process`] calls, so
/// an escape sequence split across two recorded frames is still applied.
pub struct TerminalBuffer {
    screen: Screen,
    parser: vte::Parser,
    /// Set while the cursor blinks; the instant the blink phase started
    blink_since: Option<Instant>,
}

impl TerminalBuffer {
    /// Create a blank terminal of `width` columns by `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            screen: Screen::new(width, height),
            parser: vte::Parser::new(),
            blink_since: None,
        }
    }

    /// Feed raw output (text and escape sequences) to the emulator.
    pub fn process(&mut self, data: &str) {
        let mut performer = Performer::new(&mut self.screen);
        self.parser.advance(&mut performer, data.as_bytes());
    }

    pub fn width(&self) -> usize {
        self.screen.width
    }

    pub fn height(&self) -> usize {
        self.screen.height
    }

    pub fn cursor_row(&self) -> usize {
        self.screen.cursor_row
    }

    pub fn cursor_col(&self) -> usize {
        self.screen.cursor_col
    }

    /// Whether the application has the cursor enabled (DECTCEM).
    pub fn cursor_visible(&self) -> bool {
        self.screen.cursor_visible
    }

    /// Cells of a row, or `None` past the bottom of the screen.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.screen.grid.get(row).map(|r| r.as_slice())
    }

    /// Every row with trailing default blanks removed.
    pub fn styled_lines(&self) -> Vec<StyledLine> {
        self.screen
            .grid
            .iter()
            .map(|row| {
                let end = row
                    .iter()
                    .rposition(|c| *c != Cell::default())
                    .map_or(0, |i| i + 1);
                StyledLine {
                    cells: row[..end].to_vec(),
                }
            })
            .collect()
    }

    pub fn is_blinking(&self) -> bool {
        self.blink_since.is_some()
    }

    /// Whether the cursor should be drawn at `now`.
    ///
    /// A steady cursor is always drawn; a blinking one alternates every
    /// [`BLINK_INTERVAL`].
    pub fn cursor_shown(&self, now: Instant) -> bool {
        if !self.screen.cursor_visible {
            return false;
        }
        match self.blink_since {
            None => true,
            Some(since) => {
                let phase = now.saturating_duration_since(since).as_millis()
                    / BLINK_INTERVAL.as_millis();
                phase % 2 == 0
            }
        }
    }

    /// Resize the screen, keeping the top-left content.
    pub fn resize(&mut self, width: usize, height: usize) {
        let mut next = Screen::new(width, height);
        for (dst, src) in next.grid.iter_mut().zip(self.screen.grid.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = *s;
            }
        }
        next.cursor_row = self.screen.cursor_row.min(next.height - 1);
        next.cursor_col = self.screen.cursor_col.min(next.width - 1);
        next.style = self.screen.style;
        next.cursor_visible = self.screen.cursor_visible;
        self.screen = next;
    }
}

impl Terminal for TerminalBuffer {
    fn write(&mut self, text: &str) {
        self.process(text);
    }

    fn reset(&mut self) {
        let (width, height) = (self.screen.width, self.screen.height);
        self.screen = Screen::new(width, height);
        self.parser = vte::Parser::new();
    }

    fn start_blink(&mut self) {
        if self.blink_since.is_none() {
            self.blink_since = Some(Instant::now());
        }
    }

    fn stop_blink(&mut self) {
        self.blink_since = None;
    }
}

impl fmt::Display for TerminalBuffer {
    /// Screen text with trailing blanks and trailing empty rows removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .styled_lines()
            .iter()
            .map(|line| line.text().trim_end().to_string())
            .collect();
        let last = lines.iter().rposition(|l| !l.is_empty());
        if let Some(last) = last {
            write!(f, "{}", lines[..=last].join("\n"))?;
        }
        Ok(())
    }
}
