//! Error types.
//!
//! `FetchError` is what callers see. `AttemptError` is the failure of a single
//! endpoint attempt; the resolver and retriever absorb it and move on to the
//! next endpoint, so it never leaves this crate through `resolve`/`retrieve`.

use std::fmt;
use std::time::Duration;

/// Shown when every metadata endpoint failed.
pub const RESOLUTION_FAILED_MESSAGE: &str =
    "Could not fetch track details. Make sure the link is valid and public, or try again in a moment.";

/// Shown when every download endpoint failed.
pub const RETRIEVAL_FAILED_MESSAGE: &str =
    "Download failed. The server may be busy or connections may be restricted. Please try again.";

/// User-facing error surfaced by the library.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Input did not look like a supported link. No network call was made.
    #[error("Please enter a valid {service} track, album or playlist link.")]
    InvalidLink { service: String },

    /// Every metadata endpoint failed.
    #[error("{}", RESOLUTION_FAILED_MESSAGE)]
    ResolutionFailed { last_failure: Option<String> },

    /// Every download endpoint failed.
    #[error("{}", RETRIEVAL_FAILED_MESSAGE)]
    RetrievalFailed { last_failure: Option<String> },

    /// The payload was fine but could not be written locally.
    #[error("Could not save the downloaded file")]
    SaveFailed(#[source] std::io::Error),

    /// Configuration was rejected before any request was made.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Short message suitable for the end user. Never contains HTTP codes or
    /// transport details.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// The most recent underlying strategy failure, for the diagnostic log.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            FetchError::ResolutionFailed { last_failure }
            | FetchError::RetrievalFailed { last_failure } => last_failure.as_deref(),
            _ => None,
        }
    }
}

/// Failure of one endpoint attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// The attempt's deadline passed and the transfer was cancelled.
    Timeout(Duration),
    /// The transfer was aborted through its cancel token.
    Cancelled,
    /// Curl reported an error (DNS, connect, TLS, read).
    Transport(curl::Error),
    /// Response status outside 2xx.
    Http(u32),
    /// Response body was not the expected metadata envelope.
    Parse(serde_json::Error),
    /// Envelope parsed but carried no songs.
    NoResults,
    /// First song lacked a title, artist or url.
    IncompleteEntry,
    /// Body passed the status check but is too small to be real audio.
    Undersized { len: usize, min: usize },
    /// The blocking worker running the transfer panicked or was torn down.
    Worker(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Timeout(d) => write!(f, "timed out after {}s", d.as_secs_f64()),
            AttemptError::Cancelled => write!(f, "request cancelled"),
            AttemptError::Transport(e) => write!(f, "{}", e),
            AttemptError::Http(code) => write!(f, "HTTP {}", code),
            AttemptError::Parse(e) => write!(f, "unexpected response body: {}", e),
            AttemptError::NoResults => write!(f, "no songs in response"),
            AttemptError::IncompleteEntry => write!(f, "first song is missing title, artist or url"),
            AttemptError::Undersized { len, min } => {
                write!(f, "payload too small ({} bytes, need at least {}), likely an error page", len, min)
            }
            AttemptError::Worker(msg) => write!(f, "transfer worker failed: {}", msg),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Transport(e) => Some(e),
            AttemptError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<curl::Error> for AttemptError {
    fn from(e: curl::Error) -> Self {
        if e.is_aborted_by_callback() {
            AttemptError::Cancelled
        } else {
            AttemptError::Transport(e)
        }
    }
}
