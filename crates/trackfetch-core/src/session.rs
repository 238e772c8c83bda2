//! Front-end state: what the user sees while a lookup or download runs.
//!
//! Every lookup or download gets a [`Ticket`] carrying a sequence number.
//! Finishing with a ticket older than the latest one issued is a no-op, so a
//! slow response to an earlier submission can never overwrite a newer one.

use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::save::SavedFile;
use crate::track::TrackMetadata;

/// Lifecycle of the current user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    ResolvingMetadata,
    RetrievingPayload,
    Succeeded,
    Failed(String),
}

/// Issued when an operation starts; hand it back when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Short-lived message that does not affect `state` (e.g. paste failures).
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Session {
    state: OperationState,
    metadata: Option<TrackMetadata>,
    latest: u64,
    notice: Option<Notice>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: OperationState::Idle,
            metadata: None,
            latest: 0,
            notice: None,
        }
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    pub fn metadata(&self) -> Option<&TrackMetadata> {
        self.metadata.as_ref()
    }

    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// A link was rejected before any I/O. Supersedes anything in flight.
    pub fn reject(&mut self, err: &FetchError) {
        self.issue();
        self.metadata = None;
        self.state = OperationState::Failed(err.user_message());
    }

    /// Starts a new lookup; clears the previous track.
    pub fn begin_lookup(&mut self) -> Ticket {
        let ticket = self.issue();
        self.metadata = None;
        self.state = OperationState::ResolvingMetadata;
        ticket
    }

    /// Applies a lookup result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn finish_lookup(&mut self, ticket: Ticket, result: Result<TrackMetadata, FetchError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "discarding stale lookup result");
            return false;
        }
        match result {
            Ok(meta) => {
                self.metadata = Some(meta);
                self.state = OperationState::Idle;
            }
            Err(e) => {
                self.state = OperationState::Failed(e.user_message());
            }
        }
        true
    }

    /// Starts a download of the current track. `None` when nothing is resolved.
    pub fn begin_download(&mut self) -> Option<Ticket> {
        self.metadata.as_ref()?;
        let ticket = self.issue();
        self.state = OperationState::RetrievingPayload;
        Some(ticket)
    }

    /// Applies a download result; `false` when stale.
    pub fn finish_download(&mut self, ticket: Ticket, result: Result<SavedFile, FetchError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "discarding stale download result");
            return false;
        }
        self.state = match result {
            Ok(_) => OperationState::Succeeded,
            Err(e) => OperationState::Failed(e.user_message()),
        };
        true
    }

    /// Shows `text` until `ttl` has passed.
    pub fn post_notice(&mut self, text: impl Into<String>, ttl: Duration) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// The active notice at `now`, if it has not expired.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.text.as_str())
    }
}
