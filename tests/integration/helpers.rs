//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Absolute path of a fixture, as a string for command arguments.
pub fn fixture_path(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

/// Read a fixture file.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", name, e))
}

/// Write `content` into a fresh temp dir and return both.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// Config path that is guaranteed not to exist, so runs use the defaults.
pub fn no_config(dir: &Path) -> String {
    dir.join("absent-config.toml").display().to_string()
}

/// Run the shellcast binary with an isolated config and return
/// (stdout, stderr, exit code).
pub fn run_shellcast(args: &[&str]) -> (String, String, i32) {
    let dir = TempDir::new().unwrap();
    run_with_config(Path::new(&no_config(dir.path())), args)
}

/// Run the shellcast binary against a specific config file.
pub fn run_with_config(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_shellcast"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("SHELLCAST_LOG", "warn")
        .output()
        .expect("Failed to execute shellcast");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Remove SGR color sequences from CLI output.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
