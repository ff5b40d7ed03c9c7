//! Playback scheduler.
//!
//! Walks a session's frame list one entry at a time. Each advance applies a
//! single frame (output goes to the terminal, input goes to the key log) and
//! arms one deadline for the next advance. Time is passed in explicitly, so
//! the same scheduler drives the interactive UI, headless runs and tests.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use super::keylog::KeyLog;
use super::listener::{ListenerId, Listeners, StateChange, StateListener};
use super::state::PlaybackState;
use super::timing::{clamp_speed, scale_delay, TimingMode};
use crate::session::{FrameEntry, FrameKind, Session};
use crate::terminal::Terminal;

/// The single outstanding advance. Dropping it cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub due: Instant,
}

pub struct Scheduler<T: Terminal> {
    session: Session,
    terminal: T,
    keys: KeyLog,
    state: PlaybackState,
    /// Last dispatched entry, `None` before the first
    cursor: Option<usize>,
    pending: Option<PendingAdvance>,
    timing: TimingMode,
    speed: f64,
    listeners: Listeners,
}

impl<T: Terminal> Scheduler<T> {
    pub fn new(session: Session, terminal: T) -> Self {
        Self {
            session,
            terminal,
            keys: KeyLog::default(),
            state: PlaybackState::Idle,
            cursor: None,
            pending: None,
            timing: TimingMode::default(),
            speed: 1.0,
            listeners: Listeners::default(),
        }
    }

    pub fn with_timing(mut self, timing: TimingMode) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = clamp_speed(speed);
        self
    }

    pub fn with_key_log(mut self, keys: KeyLog) -> Self {
        self.keys = keys;
        self
    }

    /// Start playback.
    ///
    /// No-op while playing. From Paused this resumes like [`unpause`].
    /// From Stopped the cursor, terminal and key log are rewound first.
    ///
    /// [`unpause`]: Scheduler::unpause
    pub fn play(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => return,
            PlaybackState::Stopped => self.rewind(),
            PlaybackState::Idle | PlaybackState::Paused => {}
        }
        self.transition(PlaybackState::Playing);
        self.advance(now);
    }

    /// Cancel the pending advance and hold the cursor. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.pending = None;
        self.transition(PlaybackState::Paused);
    }

    /// Resume from the current cursor. No-op unless paused.
    ///
    /// The next frame is dispatched immediately; time spent paused is not
    /// replayed.
    pub fn unpause(&mut self, now: Instant) {
        if self.state != PlaybackState::Paused {
            return;
        }
        self.transition(PlaybackState::Playing);
        self.advance(now);
    }

    /// Restart from frame zero whatever the current state.
    pub fn replay(&mut self, now: Instant) {
        info!(from = %self.state, "replaying session");
        self.pending = None;
        self.rewind();
        if self.state != PlaybackState::Playing {
            self.transition(PlaybackState::Playing);
        }
        self.advance(now);
    }

    /// Alias of [`replay`](Scheduler::replay).
    pub fn reset(&mut self, now: Instant) {
        self.replay(now);
    }

    /// Play/pause toggle used by the UI controls.
    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.unpause(now),
            PlaybackState::Idle | PlaybackState::Stopped => self.play(now),
        }
    }

    /// Fire every advance due at or before `now`.
    ///
    /// Each follow-up deadline is measured from the previous deadline rather
    /// than from `now`, so late ticks do not stretch the recording. Returns
    /// the number of frames dispatched.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut dispatched = 0;
        while self.state == PlaybackState::Playing {
            let Some(pending) = self.pending else {
                break;
            };
            if pending.due > now {
                break;
            }
            self.pending = None;
            if self.advance(pending.due) {
                dispatched += 1;
            }
        }
        dispatched
    }

    /// When the next advance is due, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Time left until the next advance, zero if overdue.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Playing with nothing scheduled: stuck on a malformed frame.
    pub fn is_stalled(&self) -> bool {
        self.state == PlaybackState::Playing && self.pending.is_none()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Change the speed multiplier. Applies from the next scheduled frame.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = clamp_speed(speed);
        debug!(speed = self.speed, "playback speed changed");
    }

    pub fn timing(&self) -> TimingMode {
        self.timing
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn keys(&self) -> &KeyLog {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut KeyLog {
        &mut self.keys
    }

    /// Register a listener for state transitions.
    pub fn subscribe(&mut self, listener: impl StateListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    fn rewind(&mut self) {
        self.cursor = None;
        self.terminal.reset();
        self.keys.clear();
    }

    /// Apply the next entry and arm the following advance.
    ///
    /// Returns whether a frame was dispatched.
    fn advance(&mut self, now: Instant) -> bool {
        let index = self.cursor.map_or(0, |c| c + 1);
        if index >= self.session.len() {
            self.finish();
            return false;
        }
        self.cursor = Some(index);

        let frame = match &self.session.entries()[index] {
            FrameEntry::Frame(frame) => frame,
            FrameEntry::Malformed(bad) => {
                warn!(index, reason = %bad.reason, "malformed frame, playback stalled");
                return false;
            }
        };

        trace!(index, kind = frame.kind.to_code(), "dispatching frame");
        match frame.kind {
            FrameKind::Input => self.keys.push(&frame.payload, now),
            FrameKind::Output => self.terminal.write(&frame.payload),
        }

        let delay = self
            .session
            .get(index + 1)
            .map_or(Duration::ZERO, |next| self.timing.delay(frame, next));
        self.pending = Some(PendingAdvance {
            due: now + scale_delay(delay, self.speed),
        });
        true
    }

    fn finish(&mut self) {
        self.pending = None;
        info!(frames = self.session.len(), "playback finished");
        self.transition(PlaybackState::Stopped);
    }

    fn transition(&mut self, to: PlaybackState) {
        let from = self.state;
        if !from.can_transition_to(to) {
            debug!(%from, %to, "ignoring transition outside the table");
            return;
        }
        self.state = to;
        match to {
            PlaybackState::Playing => self.terminal.start_blink(),
            PlaybackState::Paused | PlaybackState::Stopped => self.terminal.stop_blink(),
            PlaybackState::Idle => {}
        }
        debug!(%from, %to, cursor = ?self.cursor, "playback state changed");
        self.listeners.notify(&StateChange {
            from,
            to,
            cursor: self.cursor,
        });
    }
}
