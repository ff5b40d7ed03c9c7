//! Help overlay rendering for the native player.
//!
//! Displays a centered modal with all available keyboard shortcuts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Shortcut rows shown in the overlay.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("Space", "Play / pause / replay"),
    ("Click", "Play / pause"),
    ("r", "Replay from the start"),
    ("+ / -", "Speed up / down"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub const HELP_BOX_WIDTH: u16 = 40;

/// Rows needed by the box: title, blank, entries, blank, footer, borders.
pub fn help_box_height() -> u16 {
    HELP_ENTRIES.len() as u16 + 6
}

/// Centered area for the help box, shrunk to fit small terminals.
pub fn help_area(area: Rect) -> Rect {
    let width = HELP_BOX_WIDTH.min(area.width);
    let height = help_box_height().min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.accent_bold_style())),
        Line::from(""),
    ];
    for (key, action) in HELP_ENTRIES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<9}", key), theme.accent_style()),
            Span::styled(action.to_string(), theme.text_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.text_secondary_style(),
    )));
    lines
}

/// Render the help overlay on top of whatever is in `area`.
pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal_area = help_area(area);
    frame.render_widget(Clear, modal_area);

    let help = Paragraph::new(build_help_text(theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style())
            .title(" Help "),
    );
    frame.render_widget(help, modal_area);
}
