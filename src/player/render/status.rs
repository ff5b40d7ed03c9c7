//! Status line rendering for the native player.
//!
//! Displays the playback state label, speed, progress and key hints.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::player::state::PlaybackState;
use crate::theme::Theme;

/// Everything the status line shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub state: PlaybackState,
    pub speed: f64,
    /// Last dispatched entry, `None` before the first
    pub cursor: Option<usize>,
    pub total: usize,
    pub stalled: bool,
}

/// Progress as "played/total" frames.
pub fn format_progress(cursor: Option<usize>, total: usize) -> String {
    let played = cursor.map_or(0, |c| c + 1);
    format!("{}/{}", played, total)
}

/// Build the styled spans for the status line.
pub fn build_status_spans(info: &StatusInfo, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(format!(" {}", info.state.label()), theme.text_style()),
        Span::styled("  spd:", theme.text_secondary_style()),
        Span::styled(format!("{:.1}x", info.speed), theme.text_style()),
        Span::styled(
            format!("  {}", format_progress(info.cursor, info.total)),
            theme.text_secondary_style(),
        ),
    ];

    if info.stalled {
        spans.push(Span::styled("  stalled: malformed frame", theme.error_style()));
    }

    spans.push(Span::styled("  │ ", theme.text_secondary_style()));
    let hints = [
        ("space", info.state.toggle_hint()),
        ("r", "replay"),
        ("+/-", "speed"),
        ("?", "help"),
        ("q", "quit"),
    ];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(":{}", action),
            theme.text_secondary_style(),
        ));
    }
    spans
}

/// Render the status line into `area`.
pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo, theme: &Theme) {
    let line = Line::from(build_status_spans(info, theme));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render a single line of secondary text (loading message).
pub fn render_message(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let message = Paragraph::new(text.to_string()).style(theme.text_secondary_style());
    frame.render_widget(message, area);
}
