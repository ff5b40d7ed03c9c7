//! Integration tests for the shellcast command line

use assert_cmd::Command;
use insta::assert_snapshot;
use predicates::prelude::*;

use crate::helpers::{fixture_path, run_shellcast, run_with_config, strip_ansi, temp_file};

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("shellcast")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_reports_package_version() {
    Command::cargo_bin("shellcast")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn play_requires_a_source() {
    Command::cargo_bin("shellcast")
        .unwrap()
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<SOURCE>"));
}

// ============================================================================
// Headless playback
// ============================================================================

#[test]
fn headless_play_prints_final_screen() {
    let source = fixture_path("demo.json");
    let (stdout, stderr, code) = run_shellcast(&["play", &source, "--headless", "--speed", "16"]);

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_snapshot!(stdout.trim_end(), @r"
    $ ls
    notes.txt  todo.md
    $
    ");
}

#[test]
fn headless_play_of_asciicast_recording() {
    let source = fixture_path("demo.cast");
    let (stdout, stderr, code) = run_shellcast(&["play", &source, "--headless", "--speed", "16"]);

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "$ e\nhello\n$\n");
}

#[test]
fn headless_play_stops_at_malformed_frame() {
    let source = fixture_path("malformed.json");
    let (stdout, stderr, code) = run_shellcast(&["play", &source, "--headless"]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "before\n");
    assert!(stderr.contains("stalled"), "stderr: {}", stderr);
}

#[test]
fn skip_malformed_plays_past_bad_frames() {
    let source = fixture_path("malformed.json");
    let (stdout, stderr, code) =
        run_shellcast(&["play", &source, "--headless", "--skip-malformed"]);

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "before\nafter\n");
}

#[test]
fn no_autoplay_leaves_screen_empty() {
    let source = fixture_path("demo.json");
    let (stdout, _, code) = run_shellcast(&["play", &source, "--headless", "--no-autoplay"]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty(), "stdout: {:?}", stdout);
}

#[test]
fn missing_session_fails_without_output() {
    let (stdout, stderr, code) =
        run_shellcast(&["play", "/nonexistent/session.json", "--headless"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to load session"), "stderr: {}", stderr);
}

#[test]
fn invalid_json_fails_without_output() {
    let (_dir, path) = temp_file("broken.json", "{\"term_cols\": 10,");
    let (stdout, _, code) = run_shellcast(&["play", path.to_str().unwrap(), "--headless"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

// ============================================================================
// Info
// ============================================================================

#[test]
fn info_summarizes_json_session() {
    let source = fixture_path("demo.json");
    let (stdout, stderr, code) = run_shellcast(&["info", &source]);
    let stdout = strip_ansi(&stdout);

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("shellcast"));
    assert!(stdout.contains("40x5"));
    let frames = stdout.lines().find(|l| l.contains("Frames")).unwrap();
    assert!(frames.ends_with(" 8"), "line: {:?}", frames);
    let input = stdout.lines().find(|l| l.contains("Input frames")).unwrap();
    assert!(input.ends_with(" 3"), "line: {:?}", input);
}

#[test]
fn info_detects_asciicast() {
    let source = fixture_path("demo.cast");
    let (stdout, _, code) = run_shellcast(&["info", &source]);
    let stdout = strip_ansi(&stdout);

    assert_eq!(code, 0);
    assert!(stdout.contains("asciicast"));
    assert!(stdout.contains("30x4"));
}

#[test]
fn info_counts_malformed_frames() {
    let source = fixture_path("malformed.json");
    let (stdout, _, code) = run_shellcast(&["info", &source]);
    let stdout = strip_ansi(&stdout);

    assert_eq!(code, 0);
    let malformed = stdout.lines().find(|l| l.contains("Malformed")).unwrap();
    assert!(malformed.ends_with(" 1"), "line: {:?}", malformed);
    let frames = stdout.lines().find(|l| l.contains("Frames")).unwrap();
    assert!(frames.ends_with(" 3"), "line: {:?}", frames);
}

#[test]
fn info_on_missing_file_fails() {
    let (_, stderr, code) = run_shellcast(&["info", "/nonexistent/session.json"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load"), "stderr: {}", stderr);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let (stdout, _, code) = run_shellcast(&["config", "show"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("[player]"));
    assert!(stdout.contains("autoplay = true"));
    assert!(stdout.contains("timing = \"relative\""));
    assert!(stdout.contains("[input_display]"));
}

#[test]
fn config_show_reflects_file() {
    let (_dir, path) = temp_file("config.toml", "[player]\nspeed = 2.0\ntiming = \"absolute\"\n");
    let (stdout, _, code) = run_with_config(&path, &["config", "show"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("speed = 2.0"));
    assert!(stdout.contains("timing = \"absolute\""));
}

#[test]
fn config_path_notes_missing_file() {
    let (_dir, path) = temp_file("other.toml", "");
    let absent = path.with_file_name("absent.toml");
    let (stdout, stderr, code) = run_with_config(&absent, &["config", "path"]);

    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), absent.display().to_string());
    assert!(stderr.contains("does not exist"));
}

#[test]
fn invalid_config_is_reported() {
    let (_dir, path) = temp_file("config.toml", "[player\n");
    let (_, stderr, code) = run_with_config(&path, &["config", "show"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid config"), "stderr: {}", stderr);
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_generate_for_bash() {
    let (stdout, _, code) = run_shellcast(&["completions", "bash"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("_shellcast"));
}
