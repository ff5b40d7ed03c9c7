//! Headless mount.
//!
//! Runs the scheduler on wall-clock time without drawing anything, then
//! prints the final screen. Useful for scripts, CI logs and piping a
//! recording's end state into other tools.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{error, info, warn};

use super::{PlaybackResult, PlaybackState, Scheduler};
use crate::terminal::{Terminal, TerminalBuffer};
use crate::widget::Shellcast;

/// Longest sleep between interrupt checks.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Drive `player` until it stops, stalls, never started, or `interrupted`
/// is set.
pub fn drive<T: Terminal>(player: &mut Scheduler<T>, interrupted: &AtomicBool) -> PlaybackResult {
    loop {
        if interrupted.load(Ordering::SeqCst) {
            info!(cursor = ?player.cursor(), "playback interrupted");
            return PlaybackResult::Interrupted;
        }

        let now = Instant::now();
        player.tick(now);

        match player.state() {
            PlaybackState::Stopped | PlaybackState::Idle | PlaybackState::Paused => {
                return PlaybackResult::from_scheduler(player)
            }
            PlaybackState::Playing if player.is_stalled() => {
                warn!(cursor = ?player.cursor(), "playback stalled on a malformed frame");
                return PlaybackResult::from_scheduler(player);
            }
            PlaybackState::Playing => {}
        }

        let wait = player
            .time_until_next(Instant::now())
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

/// Load, play and print the final screen to stdout.
pub fn run(app: &Shellcast) -> Result<PlaybackResult> {
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    let session = match app.load() {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, source = %app.source(), "failed to load session");
            return Ok(PlaybackResult::LoadFailed);
        }
    };

    let mut player = app.mount(session);
    let result = drive(&mut player, &interrupted);
    print_screen(player.terminal())?;
    Ok(result)
}

fn print_screen(terminal: &TerminalBuffer) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let screen = terminal.to_string();
    if !screen.is_empty() {
        writeln!(stdout, "{}", screen)?;
    }
    stdout.flush()?;
    Ok(())
}
