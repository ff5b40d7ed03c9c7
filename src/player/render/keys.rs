//! Key strip: the recently typed keys, fading out.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::player::keylog::VisibleKey;

/// First and last entries of the 256-color grayscale ramp.
const GRAY_DARKEST: u8 = 232;
const GRAY_LIGHTEST: u8 = 255;

/// Grayscale color for a key at `opacity` (1.0 brightest).
pub fn fade_color(opacity: f32) -> Color {
    let span = (GRAY_LIGHTEST - GRAY_DARKEST) as f32;
    let step = (opacity.clamp(0.0, 1.0) * span).round() as u8;
    Color::Indexed(GRAY_DARKEST + step)
}

/// Newest keys on the right; older ones drop off the left edge when the
/// strip is too narrow.
pub struct KeyStrip<'a> {
    keys: Vec<VisibleKey<'a>>,
}

impl<'a> KeyStrip<'a> {
    pub fn new(keys: Vec<VisibleKey<'a>>) -> Self {
        Self { keys }
    }

    fn spans(&self, width: usize) -> Vec<Span<'a>> {
        let mut used = 0;
        let mut spans = Vec::new();
        for key in self.keys.iter().rev() {
            let needed = key.label.width() + usize::from(!spans.is_empty());
            if used + needed > width {
                break;
            }
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(key.label, Style::default().fg(fade_color(key.opacity))));
            used += needed;
        }
        spans.reverse();
        spans
    }
}

impl Widget for KeyStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(self.spans(area.width as usize)).right_aligned();
        line.render(area, buf);
    }
}
