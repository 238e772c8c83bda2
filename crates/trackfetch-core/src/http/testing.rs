//! Scripted in-memory transport for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{CancelToken, HttpRequest, HttpResponse, Transport};
use crate::error::AttemptError;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Respond { status: u32, body: Vec<u8> },
    /// Fails immediately as if the deadline had passed.
    Timeout,
    /// Blocks until the cancel token is set, then reports cancellation.
    Hang,
}

/// Reply for every request whose URL starts with `prefix`.
#[derive(Debug, Clone)]
pub(crate) struct Scripted {
    prefix: String,
    reply: Reply,
}

impl Scripted {
    pub(crate) fn new(prefix: &str, reply: Reply) -> Self {
        Self {
            prefix: prefix.to_string(),
            reply,
        }
    }

    pub(crate) fn ok(prefix: &str, body: Vec<u8>) -> Self {
        Self::status(prefix, 200, body)
    }

    pub(crate) fn status(prefix: &str, status: u32, body: Vec<u8>) -> Self {
        Self::new(prefix, Reply::Respond { status, body })
    }

    pub(crate) fn timeout(prefix: &str) -> Self {
        Self::new(prefix, Reply::Timeout)
    }

    pub(crate) fn hang(prefix: &str) -> Self {
        Self::new(prefix, Reply::Hang)
    }
}

/// Answers from a script and records every request it sees.
/// Unscripted URLs get a 404.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    script: Vec<Scripted>,
    requests: Mutex<Vec<HttpRequest>>,
    saw_cancel: AtomicBool,
}

impl FakeTransport {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// URLs requested so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn saw_cancel(&self) -> bool {
        self.saw_cancel.load(Ordering::Relaxed)
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest, cancel: &CancelToken) -> Result<HttpResponse, AttemptError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .script
            .iter()
            .find(|s| request.url.starts_with(&s.prefix))
            .map(|s| s.reply.clone());
        match reply {
            Some(Reply::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(Reply::Timeout) => Err(AttemptError::Timeout(request.timeout)),
            Some(Reply::Hang) => {
                while !cancel.is_cancelled() {
                    std::thread::sleep(Duration::from_millis(5));
                }
                self.saw_cancel.store(true, Ordering::Relaxed);
                Err(AttemptError::Cancelled)
            }
            None => Ok(HttpResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}
