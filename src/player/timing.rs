//! Frame pacing.
//!
//! Recordings store one timestamp per frame. How that number turns into a
//! wait depends on how the recorder wrote it, so the interpretation is a
//! setting rather than a guess.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::{Frame, FrameEntry};

/// Slowest and fastest playback speed multipliers.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 16.0;
/// Factor applied by one speed up/down step.
pub const SPEED_STEP: f64 = 1.5;

/// How a frame's stored `elapsed_ms` becomes the wait before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    /// Wait the next frame's stored value verbatim (timestamps are deltas)
    #[default]
    Relative,
    /// Wait the difference between the next and current timestamps
    Absolute,
}

impl TimingMode {
    /// Wait between dispatching `current` and dispatching `next`, at 1x speed.
    ///
    /// A malformed `next` without a readable timestamp is reached immediately.
    pub fn delay(self, current: &Frame, next: &FrameEntry) -> Duration {
        let next_ms = next.elapsed_ms().unwrap_or(0);
        let ms = match self {
            TimingMode::Relative => next_ms,
            TimingMode::Absolute => next_ms.saturating_sub(current.elapsed_ms),
        };
        Duration::from_millis(ms)
    }
}

/// Scale a delay by a playback speed multiplier.
pub fn scale_delay(delay: Duration, speed: f64) -> Duration {
    if speed == 1.0 {
        return delay;
    }
    delay.div_f64(clamp_speed(speed))
}

pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        1.0
    }
}

/// One step faster, capped at [`MAX_SPEED`].
pub fn speed_up(speed: f64) -> f64 {
    clamp_speed(speed * SPEED_STEP)
}

/// One step slower, floored at [`MIN_SPEED`].
pub fn speed_down(speed: f64) -> f64 {
    clamp_speed(speed / SPEED_STEP)
}
