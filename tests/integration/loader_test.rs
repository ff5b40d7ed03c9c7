//! Session loading from files and a local HTTP server

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use shellcast::session::{load_session, LoadError, MalformedPolicy, SessionLoader};
use shellcast::{Mount, SessionSource, Shellcast, ShellcastOptions};

use crate::helpers::{fixtures_dir, load_fixture};

/// Serve a single HTTP response on a random local port and return its URL.
fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        // Read the request head before answering
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}/session.json", addr)
}

/// Poll a background loader until it answers.
fn poll(loader: &SessionLoader) -> Result<shellcast::Session, LoadError> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(result) = loader.try_recv() {
            return result;
        }
        assert!(Instant::now() < deadline, "loader did not answer");
        thread::sleep(Duration::from_millis(10));
    }
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn loads_fixture_from_path() {
    let source = SessionSource::File(fixtures_dir().join("demo.json"));
    let session = load_session(&source, MalformedPolicy::Stall).unwrap();
    assert_eq!((session.term_cols, session.term_rows), (40, 5));
    assert_eq!(session.len(), 8);
}

#[test]
fn skip_policy_drops_malformed_frames() {
    let source = SessionSource::File(fixtures_dir().join("malformed.json"));

    let kept = load_session(&source, MalformedPolicy::Stall).unwrap();
    assert_eq!(kept.len(), 3);
    assert_eq!(kept.malformed_count(), 1);

    let skipped = load_session(&source, MalformedPolicy::Skip).unwrap();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped.malformed_count(), 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let source = SessionSource::File(fixtures_dir().join("does-not-exist.json"));
    let err = load_session(&source, MalformedPolicy::Stall).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.json"));
}

// ============================================================================
// HTTP
// ============================================================================

#[test]
fn fetches_session_over_http() {
    let url = serve_once("200 OK", load_fixture("demo.json"));
    let session = load_session(&SessionSource::parse(&url), MalformedPolicy::Stall).unwrap();
    assert_eq!(session.term_cols, 40);
    assert_eq!(session.frames().count(), 8);
}

#[test]
fn http_error_status_fails_the_load() {
    let url = serve_once("404 Not Found", "{}".to_string());
    let err = load_session(&SessionSource::parse(&url), MalformedPolicy::Stall).unwrap_err();
    assert!(matches!(err, LoadError::Http { .. }), "got {:?}", err);
    assert!(err.to_string().contains(&url));
}

#[test]
fn invalid_document_is_a_parse_error() {
    let url = serve_once("200 OK", "{\"term_cols\": 3}".to_string());
    let err = load_session(&SessionSource::parse(&url), MalformedPolicy::Stall).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "got {:?}", err);
}

#[test]
fn background_loader_delivers_result() {
    let url = serve_once("200 OK", load_fixture("demo.cast"));
    let loader = SessionLoader::spawn(SessionSource::parse(&url), MalformedPolicy::Stall);
    assert_eq!(loader.source(), &SessionSource::Url(url.clone()));

    let session = poll(&loader).unwrap();
    assert_eq!((session.term_cols, session.term_rows), (30, 4));
}

#[test]
fn shellcast_load_uses_configured_source() {
    let url = serve_once("200 OK", load_fixture("malformed.json"));
    let app = Shellcast::new(
        ShellcastOptions::new()
            .url(url)
            .element(Mount::Headless)
            .malformed_frames(MalformedPolicy::Skip),
    )
    .unwrap();

    let session = app.load().unwrap();
    assert_eq!(session.len(), 2);
}
