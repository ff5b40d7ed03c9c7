//! asciicast v3 import
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v3/
//!
//! Converts an asciicast v3 recording into a [`Session`]. Output (`"o"`)
//! and input (`"i"`) events become frames; markers, resizes and exit
//! events are dropped and their interval is carried into the next kept
//! frame. asciicast intervals are already relative to the previous event,
//! so each frame's `elapsed_ms` holds that delta.

use std::io::{BufRead, BufReader};

use serde::Deserialize;

use super::{Frame, FrameKind, Session, SessionError};

/// Terminal size used when the header does not carry one.
const DEFAULT_COLS: u16 = 80;
const DEFAULT_ROWS: u16 = 24;

/// asciicast v3 header (only the fields the player needs)
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub version: u8,
    #[serde(default)]
    pub term: Option<TermInfo>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Terminal information
#[derive(Debug, Clone, Deserialize)]
pub struct TermInfo {
    #[serde(default)]
    pub cols: Option<u32>,
    #[serde(default)]
    pub rows: Option<u32>,
}

impl Header {
    /// Columns and rows, preferring the v3 `term` object.
    pub fn size(&self) -> (u16, u16) {
        let cols = self
            .term
            .as_ref()
            .and_then(|t| t.cols)
            .or(self.width)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(DEFAULT_COLS);
        let rows = self
            .term
            .as_ref()
            .and_then(|t| t.rows)
            .or(self.height)
            .and_then(|r| u16::try_from(r).ok())
            .unwrap_or(DEFAULT_ROWS);
        (cols, rows)
    }
}

/// One `[interval, code, data]` event line.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Seconds since the previous event
    pub interval: f64,
    pub code: String,
    pub data: String,
}

impl Event {
    /// Parse an event from a JSON line
    pub fn from_json(line: &str) -> Result<Self, SessionError> {
        let value: serde_json::Value = serde_json::from_str(line)?;

        let arr = value
            .as_array()
            .ok_or_else(|| invalid("Event must be a JSON array"))?;

        if arr.len() < 3 {
            return Err(invalid("Event array must have at least 3 elements"));
        }

        let interval = arr[0]
            .as_f64()
            .ok_or_else(|| invalid("Event time must be a number"))?;
        let code = arr[1]
            .as_str()
            .ok_or_else(|| invalid("Event type must be a string"))?;
        let data = arr[2]
            .as_str()
            .ok_or_else(|| invalid("Event data must be a string"))?;

        Ok(Event {
            interval,
            code: code.to_string(),
            data: data.to_string(),
        })
    }

    /// The frame kind this event maps to, if it is replayed at all.
    pub fn frame_kind(&self) -> Option<FrameKind> {
        match self.code.as_str() {
            "o" => Some(FrameKind::Output),
            "i" => Some(FrameKind::Input),
            _ => None,
        }
    }
}

fn invalid(message: impl Into<String>) -> SessionError {
    SessionError::InvalidAsciicast(message.into())
}

/// Parse an asciicast v3 recording from a reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Session, SessionError> {
    let mut lines = reader.lines();

    // First line is the header
    let header_line = lines
        .next()
        .ok_or(SessionError::Empty)?
        .map_err(|e| invalid(format!("Failed to read header line: {}", e)))?;
    let header: Header = serde_json::from_str(&header_line)?;

    if header.version != 3 {
        return Err(invalid(format!(
            "Only asciicast v3 format is supported (got version {})",
            header.version
        )));
    }

    let (cols, rows) = header.size();
    let mut frames = Vec::new();
    // Intervals of dropped events, in seconds
    let mut carried = 0.0f64;

    for (line_num, line_result) in lines.enumerate() {
        let line = line_result
            .map_err(|e| invalid(format!("Failed to read line {}: {}", line_num + 2, e)))?;

        if line.trim().is_empty() {
            continue;
        }

        let event = Event::from_json(&line)
            .map_err(|e| invalid(format!("Line {}: {}", line_num + 2, e)))?;
        let interval = carried + event.interval.max(0.0);

        match event.frame_kind() {
            Some(kind) => {
                let elapsed_ms = (interval * 1000.0).round() as u64;
                frames.push(Frame::new(kind, elapsed_ms, event.data));
                carried = 0.0;
            }
            None => carried = interval,
        }
    }

    Ok(Session::from_frames(cols, rows, frames))
}

/// Parse from a string
pub fn parse_str(content: &str) -> Result<Session, SessionError> {
    parse_reader(BufReader::new(content.trim_start().as_bytes()))
}
