//! Recorded terminal sessions.
//!
//! A session is the terminal size plus an ordered list of frames, loaded
//! from the shellcast JSON document:
//!
//! ```text
//! { "term_cols": 80, "term_rows": 24,
//!   "frames": [ ["out", 0, "$ "], ["in", 500, "l"], ... ] }
//! ```
//!
//! Frames that do not have the `[kind, ms, payload]` shape are kept as
//! [`FrameEntry::Malformed`] so playback can stop at them, rather than
//! failing the whole load.

pub mod asciicast;
mod loader;

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub use loader::{load_session, LoadError, MalformedPolicy, SessionLoader, SessionSource};

/// Errors that make a session document unusable as a whole.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid asciicast recording: {0}")]
    InvalidAsciicast(String),

    #[error("Session document is empty")]
    Empty,
}

/// Why a single frame entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("frame is not an array")]
    NotAnArray,

    #[error("frame has {0} items, expected 3")]
    WrongArity(usize),

    #[error("frame has unsupported type {0:?}")]
    UnknownKind(String),

    #[error("frame timestamp is not a non-negative number")]
    BadTimestamp,

    #[error("frame payload is not a string")]
    BadPayload,
}

/// Direction of a recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// A key typed by the user
    Input,
    /// Text written to the terminal
    Output,
}

impl FrameKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in" => Some(FrameKind::Input),
            "out" => Some(FrameKind::Output),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            FrameKind::Input => "in",
            FrameKind::Output => "out",
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    /// Stored timestamp in milliseconds
    pub elapsed_ms: u64,
    /// A keystroke (input) or a raw output chunk
    pub payload: String,
}

impl Frame {
    pub fn new(kind: FrameKind, elapsed_ms: u64, payload: impl Into<String>) -> Self {
        Self {
            kind,
            elapsed_ms,
            payload: payload.into(),
        }
    }

    pub fn input(elapsed_ms: u64, key: impl Into<String>) -> Self {
        Self::new(FrameKind::Input, elapsed_ms, key)
    }

    pub fn output(elapsed_ms: u64, text: impl Into<String>) -> Self {
        Self::new(FrameKind::Output, elapsed_ms, text)
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Validate a JSON value as a `[kind, ms, payload]` triple.
    pub fn from_value(value: &Value) -> Result<Self, MalformedReason> {
        let arr = value.as_array().ok_or(MalformedReason::NotAnArray)?;
        if arr.len() != 3 {
            return Err(MalformedReason::WrongArity(arr.len()));
        }

        let code = arr[0].as_str().unwrap_or_default();
        let kind = FrameKind::from_code(code)
            .ok_or_else(|| MalformedReason::UnknownKind(arr[0].to_string()))?;
        let elapsed_ms = timestamp_ms(&arr[1]).ok_or(MalformedReason::BadTimestamp)?;
        let payload = arr[2].as_str().ok_or(MalformedReason::BadPayload)?;

        Ok(Frame::new(kind, elapsed_ms, payload))
    }
}

/// Whole or fractional milliseconds, rounded.
fn timestamp_ms(value: &Value) -> Option<u64> {
    if let Some(ms) = value.as_u64() {
        return Some(ms);
    }
    value
        .as_f64()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| ms.round() as u64)
}

/// A frame entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedFrame {
    /// Position in the frame list
    pub index: usize,
    pub reason: MalformedReason,
    /// Timestamp, when the entry had a readable one in the usual slot
    pub elapsed_ms: Option<u64>,
    /// The raw JSON, for diagnostics
    pub raw: String,
}

impl fmt::Display for MalformedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {} {}: {}", self.index, self.reason, self.raw)
    }
}

/// A slot in the session's frame list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEntry {
    Frame(Frame),
    Malformed(MalformedFrame),
}

impl FrameEntry {
    /// Validate the JSON at position `index` of the frame list.
    pub fn from_value(index: usize, value: &Value) -> Self {
        match Frame::from_value(value) {
            Ok(frame) => FrameEntry::Frame(frame),
            Err(reason) => FrameEntry::Malformed(MalformedFrame {
                index,
                reason,
                elapsed_ms: value
                    .as_array()
                    .and_then(|arr| arr.get(1))
                    .and_then(timestamp_ms),
                raw: value.to_string(),
            }),
        }
    }

    /// Stored timestamp; `None` only for malformed entries without one.
    pub fn elapsed_ms(&self) -> Option<u64> {
        match self {
            FrameEntry::Frame(frame) => Some(frame.elapsed_ms),
            FrameEntry::Malformed(bad) => bad.elapsed_ms,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            FrameEntry::Frame(frame) => Some(frame),
            FrameEntry::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FrameEntry::Malformed(_))
    }
}

impl From<Frame> for FrameEntry {
    fn from(frame: Frame) -> Self {
        FrameEntry::Frame(frame)
    }
}

/// Raw shape of the JSON document.
#[derive(Debug, Deserialize)]
struct SessionDocument {
    term_cols: u16,
    term_rows: u16,
    frames: Vec<Value>,
}

/// Input formats understood by [`Session::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    /// Single JSON document with `term_cols`, `term_rows` and `frames`
    Shellcast,
    /// asciicast v3: header line followed by one event per line
    Asciicast,
}

impl SessionFormat {
    /// Guess the format from the document text.
    pub fn detect(content: &str) -> Self {
        let first_line = content.trim_start().lines().next().unwrap_or_default();
        match serde_json::from_str::<Value>(first_line) {
            Ok(Value::Object(header)) if header.contains_key("version") => {
                SessionFormat::Asciicast
            }
            _ => SessionFormat::Shellcast,
        }
    }
}

/// Per-session counts, for `shellcast info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub input_frames: usize,
    pub output_frames: usize,
    pub malformed_frames: usize,
    /// Sum of the stored timestamps after the first frame (relative pacing)
    pub relative_duration: Duration,
    /// Last timestamp minus first (absolute pacing)
    pub absolute_duration: Duration,
}

/// A loaded recording. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub term_cols: u16,
    pub term_rows: u16,
    entries: Vec<FrameEntry>,
}

impl Session {
    pub fn new(term_cols: u16, term_rows: u16, entries: Vec<FrameEntry>) -> Self {
        Self {
            term_cols,
            term_rows,
            entries,
        }
    }

    /// Build a session from well-formed frames.
    pub fn from_frames(term_cols: u16, term_rows: u16, frames: Vec<Frame>) -> Self {
        Self::new(
            term_cols,
            term_rows,
            frames.into_iter().map(FrameEntry::Frame).collect(),
        )
    }

    /// Parse the shellcast JSON document.
    ///
    /// Malformed frames are reported and kept in place.
    pub fn from_json(content: &str) -> Result<Self, SessionError> {
        let doc: SessionDocument = serde_json::from_str(content)?;
        let entries: Vec<FrameEntry> = doc
            .frames
            .iter()
            .enumerate()
            .map(|(i, value)| FrameEntry::from_value(i, value))
            .collect();

        for entry in &entries {
            if let FrameEntry::Malformed(bad) = entry {
                warn!("{}", bad);
            }
        }

        Ok(Self::new(doc.term_cols, doc.term_rows, entries))
    }

    /// Parse either supported format.
    pub fn parse(content: &str) -> Result<Self, SessionError> {
        if content.trim().is_empty() {
            return Err(SessionError::Empty);
        }
        match SessionFormat::detect(content) {
            SessionFormat::Shellcast => Self::from_json(content),
            SessionFormat::Asciicast => asciicast::parse_str(content),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FrameEntry> {
        self.entries.get(index)
    }

    /// Well-formed frames only.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.entries.iter().filter_map(FrameEntry::as_frame)
    }

    pub fn malformed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_malformed()).count()
    }

    /// Drop malformed entries, returning how many were removed.
    pub fn drop_malformed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_malformed());
        before - self.entries.len()
    }

    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats::default();
        for frame in self.frames() {
            match frame.kind {
                FrameKind::Input => stats.input_frames += 1,
                FrameKind::Output => stats.output_frames += 1,
            }
        }
        stats.malformed_frames = self.malformed_count();

        let stamps: Vec<u64> = self.entries.iter().filter_map(|e| e.elapsed_ms()).collect();
        let relative_ms = stamps
            .iter()
            .skip(1)
            .fold(0u64, |acc, ms| acc.saturating_add(*ms));
        stats.relative_duration = Duration::from_millis(relative_ms);
        if let (Some(first), Some(last)) = (stamps.first(), stamps.last()) {
            stats.absolute_duration = Duration::from_millis(last.saturating_sub(*first));
        }
        stats
    }
}
