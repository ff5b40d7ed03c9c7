//! End-to-end playback through the public API: configure, mount, drive the
//! scheduler with an explicit clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use insta::assert_snapshot;

use shellcast::player::{StateChange, TimingMode};
use shellcast::{
    Frame, Mount, PlaybackResult, PlaybackState, Session, Shellcast, ShellcastOptions,
};

use crate::helpers::load_fixture;

fn app(options: ShellcastOptions) -> Shellcast {
    Shellcast::new(options.url("unused.json").element(Mount::Headless)).unwrap()
}

fn listing_session() -> Session {
    Session::from_frames(
        80,
        24,
        vec![
            Frame::output(0, "$ "),
            Frame::input(500, "l"),
            Frame::output(1000, "ls\n"),
        ],
    )
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn absolute_timestamps_are_waited_as_differences() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new().timing(TimingMode::Absolute));
    let mut player = app.mount_at(listing_session(), t0);

    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.terminal().to_string(), "$");
    assert_eq!(player.next_deadline(), Some(t0 + ms(500)));

    assert_eq!(player.tick(t0 + ms(499)), 0);
    assert_eq!(player.tick(t0 + ms(500)), 1);
    assert_eq!(player.keys().labels().collect::<Vec<_>>(), vec!["l"]);
    assert_eq!(player.next_deadline(), Some(t0 + ms(1000)));

    assert_eq!(player.tick(t0 + ms(1000)), 1);
    assert_eq!(player.terminal().to_string(), "$ ls");
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(player.next_deadline(), None);
}

#[test]
fn relative_timestamps_are_waited_verbatim() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new());
    let mut player = app.mount_at(listing_session(), t0);

    assert_eq!(player.timing(), TimingMode::Relative);
    player.tick(t0 + ms(500));
    assert_eq!(player.next_deadline(), Some(t0 + ms(1500)));
    assert_eq!(player.tick(t0 + ms(1499)), 0);
    assert_eq!(player.tick(t0 + ms(1500)), 1);
    assert_eq!(player.state(), PlaybackState::Stopped);
}

#[test]
fn speed_option_scales_waits() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new().speed(2.0));
    let player = app.mount_at(listing_session(), t0);

    assert_eq!(player.next_deadline(), Some(t0 + ms(250)));
}

#[test]
fn pause_holds_until_unpause() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new().timing(TimingMode::Absolute));
    let mut player = app.mount_at(listing_session(), t0);
    player.tick(t0 + ms(500));

    player.pause();
    assert_eq!(player.tick(t0 + ms(10_000)), 0);
    assert_eq!(player.terminal().to_string(), "$");

    player.unpause(t0 + ms(10_000));
    assert_eq!(player.terminal().to_string(), "$ ls");
    assert_eq!(player.state(), PlaybackState::Stopped);
}

#[test]
fn replay_after_finish_starts_from_scratch() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new());
    let mut player = app.mount_at(listing_session(), t0);
    player.tick(t0 + ms(60_000));
    assert_eq!(player.state(), PlaybackState::Stopped);

    let t1 = t0 + ms(60_000);
    player.replay(t1);
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.cursor(), Some(0));
    assert_eq!(player.terminal().to_string(), "$");
    assert!(player.keys().is_empty());
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn without_autoplay_nothing_happens_until_play() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new().autoplay(false));
    let mut player = app.mount_at(listing_session(), t0);

    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.tick(t0 + ms(60_000)), 0);
    assert_eq!(player.terminal().to_string(), "");
    assert_eq!(PlaybackResult::from_scheduler(&player), PlaybackResult::NotStarted);

    player.play(t0 + ms(60_000));
    assert_eq!(player.terminal().to_string(), "$");
}

#[test]
fn geometry_follows_session_and_character_width() {
    let app = app(ShellcastOptions::new().terminal_character_width(9));
    let session = listing_session();
    let geometry = app.geometry(&session);

    assert_eq!((geometry.cols, geometry.rows), (80, 24));
    assert_eq!(geometry.pixel_width, 720);

    let player = app.mount_at(session, Instant::now());
    assert_eq!(player.terminal().width(), 80);
    assert_eq!(player.terminal().height(), 24);
}

#[test]
fn listeners_see_each_transition() {
    let t0 = Instant::now();
    let app = app(ShellcastOptions::new().autoplay(false));
    let mut player = app.mount_at(listing_session(), t0);

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        player.subscribe(move |change: &StateChange| {
            seen.borrow_mut().push((change.from, change.to))
        });
    }

    player.play(t0);
    player.pause();
    player.unpause(t0 + ms(1));
    player.tick(t0 + ms(60_000));

    assert_eq!(
        *seen.borrow(),
        vec![
            (PlaybackState::Idle, PlaybackState::Playing),
            (PlaybackState::Playing, PlaybackState::Paused),
            (PlaybackState::Paused, PlaybackState::Playing),
            (PlaybackState::Playing, PlaybackState::Stopped),
        ]
    );
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn demo_fixture_plays_to_the_prompt() {
    let t0 = Instant::now();
    let session = Session::parse(&load_fixture("demo.json")).unwrap();
    let app = app(ShellcastOptions::new());
    let mut player = app.mount_at(session, t0);

    assert_eq!(player.tick(t0 + ms(60_000)), 7);
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(
        player.keys().labels().collect::<Vec<_>>(),
        vec!["l", "s", "⏎"]
    );
    assert_snapshot!(player.terminal().to_string(), @r"
    $ ls
    notes.txt  todo.md
    $
    ");
}

#[test]
fn malformed_fixture_stalls_on_bad_frame() {
    let t0 = Instant::now();
    let session = Session::parse(&load_fixture("malformed.json")).unwrap();
    let app = app(ShellcastOptions::new());
    let mut player = app.mount_at(session, t0);
    player.tick(t0 + ms(60_000));

    assert!(player.is_stalled());
    assert_eq!(player.cursor(), Some(1));
    assert_eq!(player.terminal().to_string(), "before");
    assert_eq!(
        PlaybackResult::from_scheduler(&player),
        PlaybackResult::Stalled { cursor: 1 }
    );
}

#[test]
fn asciicast_fixture_keeps_only_input_and_output() {
    let session = Session::parse(&load_fixture("demo.cast")).unwrap();
    assert_eq!((session.term_cols, session.term_rows), (30, 4));
    assert_eq!(session.len(), 5);

    let app = app(ShellcastOptions::new());
    let t0 = Instant::now();
    let mut player = app.mount_at(session, t0);
    player.tick(t0 + ms(60_000));
    assert_eq!(player.terminal().to_string(), "$ e\nhello\n$");
}
