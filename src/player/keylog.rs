//! Log of recently typed keys.
//!
//! Each key stays fully visible for a while, then fades out and is dropped.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a key stays fully visible.
pub const DEFAULT_VISIBLE: Duration = Duration::from_millis(1000);
/// Default duration of the fade-out after the visible period.
pub const DEFAULT_FADE: Duration = Duration::from_millis(2000);
/// Default cap on keys kept at once.
pub const DEFAULT_MAX_KEYS: usize = 32;

/// A key as shown in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleKey<'a> {
    pub label: &'a str,
    /// 1.0 while fully visible, falling to 0.0 at the end of the fade
    pub opacity: f32,
}

#[derive(Debug, Clone)]
struct LoggedKey {
    label: String,
    at: Instant,
}

/// Input log view fed by input frames.
#[derive(Debug, Clone)]
pub struct KeyLog {
    keys: VecDeque<LoggedKey>,
    visible_for: Duration,
    fade: Duration,
    max_keys: usize,
}

impl Default for KeyLog {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE, DEFAULT_FADE, DEFAULT_MAX_KEYS)
    }
}

impl KeyLog {
    pub fn new(visible_for: Duration, fade: Duration, max_keys: usize) -> Self {
        Self {
            keys: VecDeque::new(),
            visible_for,
            fade,
            max_keys: max_keys.max(1),
        }
    }

    /// Record a keystroke typed at `now`.
    pub fn push(&mut self, key: &str, now: Instant) {
        self.keys.push_back(LoggedKey {
            label: key_label(key),
            at: now,
        });
        while self.keys.len() > self.max_keys {
            self.keys.pop_front();
        }
    }

    /// Drop keys whose fade has finished.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.visible_for + self.fade;
        self.keys
            .retain(|k| now.saturating_duration_since(k.at) < lifetime);
    }

    /// Keys still on screen at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<VisibleKey<'_>> {
        self.keys
            .iter()
            .filter_map(|k| {
                let opacity = self.opacity(now.saturating_duration_since(k.at));
                (opacity > 0.0).then_some(VisibleKey {
                    label: &k.label,
                    opacity,
                })
            })
            .collect()
    }

    fn opacity(&self, age: Duration) -> f32 {
        if age < self.visible_for {
            return 1.0;
        }
        let fading = age - self.visible_for;
        if fading >= self.fade {
            return 0.0;
        }
        1.0 - fading.as_secs_f32() / self.fade.as_secs_f32()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Labels of every key still held, oldest first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.label.as_str())
    }
}

/// Readable label for a recorded keystroke.
pub fn key_label(key: &str) -> String {
    match key {
        "\r" | "\n" | "\r\n" => "⏎".to_string(),
        "\x7f" | "\x08" => "⌫".to_string(),
        "\x1b" => "Esc".to_string(),
        "\t" => "Tab".to_string(),
        " " => "␣".to_string(),
        "\x1b[A" | "\x1bOA" => "↑".to_string(),
        "\x1b[B" | "\x1bOB" => "↓".to_string(),
        "\x1b[C" | "\x1bOC" => "→".to_string(),
        "\x1b[D" | "\x1bOD" => "←".to_string(),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                // Ctrl+letter arrives as 0x01..=0x1a
                (Some(c), None) if ('\x01'..='\x1a').contains(&c) => {
                    format!("^{}", ((c as u8) + b'@') as char)
                }
                _ => key.escape_default().to_string(),
            }
        }
    }
}
