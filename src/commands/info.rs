//! Info subcommand handler

use std::time::Duration;

use anyhow::{Context, Result};

use shellcast::session::SessionFormat;
use shellcast::theme::current_theme;
use shellcast::{Session, SessionSource};

/// Format a duration as "1h 1m 1s", "1m 5s" or "30s".
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64().round() as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Print a summary of a session document.
pub fn handle(source: &str) -> Result<i32> {
    let source = SessionSource::parse(source);
    let content = source
        .fetch()
        .with_context(|| format!("Failed to load {}", source))?;
    let format = SessionFormat::detect(&content);
    let session = Session::parse(&content).with_context(|| format!("Failed to parse {}", source))?;
    let stats = session.stats();
    let theme = current_theme();

    let rows = [
        ("Source", source.to_string()),
        ("Format", format!("{:?}", format).to_lowercase()),
        (
            "Size",
            humansize::format_size(content.len() as u64, humansize::BINARY),
        ),
        (
            "Terminal",
            format!("{}x{}", session.term_cols, session.term_rows),
        ),
        ("Frames", session.len().to_string()),
        ("Output frames", stats.output_frames.to_string()),
        ("Input frames", stats.input_frames.to_string()),
        ("Malformed", stats.malformed_frames.to_string()),
        (
            "Duration (relative)",
            format_duration(stats.relative_duration),
        ),
        (
            "Duration (absolute)",
            format_duration(stats.absolute_duration),
        ),
    ];

    for (label, value) in rows {
        let value = if label == "Malformed" && stats.malformed_frames > 0 {
            theme.error_text(&value)
        } else {
            value
        };
        println!("{} {}", theme.secondary_text(&format!("{:<20}", label)), value);
    }
    Ok(0)
}
