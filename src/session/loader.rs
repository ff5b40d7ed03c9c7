//! Session loading from URLs and files.
//!
//! [`SessionLoader`] runs the fetch on a background thread and hands the
//! result back over a channel, so the UI can keep drawing while a remote
//! recording downloads.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Session, SessionError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while loading a session.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] SessionError),

    #[error("Session loader thread exited without a result")]
    Disconnected,
}

/// What to do with frames that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Keep them; playback stops when it reaches one
    #[default]
    Stall,
    /// Drop them at load time
    Skip,
}

/// Where a session document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    Url(String),
    File(PathBuf),
}

impl SessionSource {
    /// `http(s)://` is fetched over the network, everything else is a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            SessionSource::Url(source.to_string())
        } else if let Some(path) = source.strip_prefix("file://") {
            SessionSource::File(PathBuf::from(path))
        } else {
            SessionSource::File(PathBuf::from(source))
        }
    }

    /// Retrieve the raw document text.
    pub fn fetch(&self) -> Result<String, LoadError> {
        match self {
            SessionSource::Url(url) => fetch_url(url),
            SessionSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSource::Url(url) => write!(f, "{}", url),
            SessionSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str) -> Result<String, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(http_err)?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(http_err)
}

/// Fetch and parse a session, applying the malformed-frame policy.
pub fn load_session(source: &SessionSource, policy: MalformedPolicy) -> Result<Session, LoadError> {
    debug!(%source, "fetching session");
    let content = source.fetch()?;
    let mut session = Session::parse(&content)?;

    if policy == MalformedPolicy::Skip {
        let dropped = session.drop_malformed();
        if dropped > 0 {
            warn!(dropped, "skipped malformed frames");
        }
    }

    info!(
        %source,
        cols = session.term_cols,
        rows = session.term_rows,
        frames = session.len(),
        "session loaded"
    );
    Ok(session)
}

/// A session load running on a background thread.
pub struct SessionLoader {
    source: SessionSource,
    result_rx: Receiver<Result<Session, LoadError>>,
}

impl SessionLoader {
    /// Start loading `source` in the background.
    pub fn spawn(source: SessionSource, policy: MalformedPolicy) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let thread_source = source.clone();
        thread::spawn(move || {
            // Ignore send errors (the player may have quit already)
            let _ = result_tx.send(load_session(&thread_source, policy));
        });
        Self { source, result_rx }
    }

    pub fn source(&self) -> &SessionSource {
        &self.source
    }

    /// The load result, once available.
    pub fn try_recv(&self) -> Option<Result<Session, LoadError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Disconnected)),
        }
    }

    /// Block until the load finishes.
    pub fn wait(self) -> Result<Session, LoadError> {
        self.result_rx.recv().unwrap_or(Err(LoadError::Disconnected))
    }
}
