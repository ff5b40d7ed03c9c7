//! Full-screen terminal mount.
//!
//! Takes over the controlling terminal (raw mode, alternate screen, mouse
//! capture) and draws the replayed session with a key strip and a status
//! line underneath. The loop sleeps until the next frame is due or the
//! next animation refresh, whichever comes first.

use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders},
    Frame, Terminal as Tui,
};
use tracing::{error, info};

use super::input::handle_event;
use super::render::{render_help, render_message, render_status_bar, KeyStrip, StatusInfo, TerminalView};
use super::{InputResult, PlaybackResult, PlaybackState, Scheduler, StateChange, ViewState};
use crate::session::{LoadError, Session, SessionLoader};
use crate::terminal::TerminalBuffer;
use crate::theme::{current_theme, Theme};
use crate::widget::Shellcast;

/// Redraw cadence for cursor blink and key fade.
const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the ratatui terminal; restores the host terminal on drop.
struct TuiGuard {
    tui: Tui<CrosstermBackend<Stdout>>,
}

impl TuiGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let tui = Tui::new(CrosstermBackend::new(stdout))?;
        Ok(Self { tui })
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.tui.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.tui.show_cursor();
    }
}

enum Loading {
    Loaded(Session),
    Failed(LoadError),
    Cancelled(PlaybackResult),
}

/// Load, mount and play interactively.
#[cfg(not(tarpaulin_include))]
pub fn run(app: &Shellcast) -> Result<PlaybackResult> {
    let loader = app.spawn_loader();
    let theme = current_theme();
    let mut guard = TuiGuard::enter()?;

    let session = match wait_for_session(&mut guard, &loader, &theme)? {
        Loading::Loaded(session) => session,
        Loading::Failed(e) => {
            drop(guard);
            error!(error = %e, source = %app.source(), "failed to load session");
            return Ok(PlaybackResult::LoadFailed);
        }
        Loading::Cancelled(result) => return Ok(result),
    };

    let mut player = app.mount(session);
    let label = Rc::new(Cell::new(player.state()));
    {
        let label = Rc::clone(&label);
        player.subscribe(move |change: &StateChange| label.set(change.to));
    }
    let mut view = ViewState::default();

    let outcome = loop {
        let now = Instant::now();
        player.tick(now);
        player.keys_mut().prune(now);
        guard
            .tui
            .draw(|frame| draw_player(frame, &player, &mut view, label.get(), &theme, now))?;

        let timeout = player
            .time_until_next(Instant::now())
            .map_or(REFRESH_INTERVAL, |d| d.min(REFRESH_INTERVAL));
        if event::poll(timeout)? {
            match handle_event(event::read()?, &mut player, &mut view, Instant::now()) {
                InputResult::Continue => {}
                InputResult::Quit => break PlaybackResult::from_scheduler(&player),
                InputResult::Interrupt => break PlaybackResult::Interrupted,
            }
        }
    };

    info!(?outcome, cursor = ?player.cursor(), "player closed");
    Ok(outcome)
}

/// Show a loading line until the background loader answers.
#[cfg(not(tarpaulin_include))]
fn wait_for_session(guard: &mut TuiGuard, loader: &SessionLoader, theme: &Theme) -> Result<Loading> {
    let message = format!(" Loading {}…", loader.source());
    loop {
        if let Some(result) = loader.try_recv() {
            return Ok(match result {
                Ok(session) => Loading::Loaded(session),
                Err(e) => Loading::Failed(e),
            });
        }

        guard.tui.draw(|frame| {
            let area = frame.area();
            render_message(frame, area, &message, theme);
        })?;

        if event::poll(REFRESH_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Loading::Cancelled(PlaybackResult::Interrupted))
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        return Ok(Loading::Cancelled(PlaybackResult::Quit { cursor: None }))
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Split the frame into terminal, key strip and status rows.
fn player_layout(area: Rect, cols: u16, rows: u16) -> (Rect, Rect, Rect) {
    let [screen, keys, status] = Layout::vertical([
        Constraint::Length(rows.saturating_add(2)),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    let width = cols.saturating_add(2).min(area.width);
    (
        Rect { width, ..screen },
        Rect { width, ..keys },
        status,
    )
}

fn draw_player(
    frame: &mut Frame,
    player: &Scheduler<TerminalBuffer>,
    view: &mut ViewState,
    state: PlaybackState,
    theme: &Theme,
    now: Instant,
) {
    let area = frame.area();
    let terminal = player.terminal();
    let (screen_area, keys_area, status_area) =
        player_layout(area, terminal.width() as u16, terminal.height() as u16);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" {}x{} ", terminal.width(), terminal.height()));
    let inner = block.inner(screen_area);
    frame.render_widget(block, screen_area);
    frame.render_widget(TerminalView::new(terminal, now), inner);
    view.terminal_area = inner;

    frame.render_widget(KeyStrip::new(player.keys().visible(now)), keys_area);

    let status = StatusInfo {
        state,
        speed: player.speed(),
        cursor: player.cursor(),
        total: player.session().len(),
        stalled: player.is_stalled(),
    };
    render_status_bar(frame, status_area, &status, theme);

    if view.show_help {
        render_help(frame, area, theme);
    }
}
