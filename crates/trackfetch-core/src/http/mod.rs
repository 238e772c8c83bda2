//! HTTP plumbing shared by the resolver and retriever.
//!
//! Requests go through the blocking [`Transport`] trait (libcurl in
//! production). [`run_attempt`] moves a transfer onto a blocking thread and
//! enforces the per-attempt deadline by cancelling the transfer when it
//! passes.

mod attempt;
mod cancel;
mod curl_transport;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use crate::error::AttemptError;

pub use attempt::run_attempt;
pub use cancel::CancelToken;
pub use curl_transport::CurlTransport;

/// Request method and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    /// POST with `Content-Type: application/json` and the given body.
    PostJson(Vec<u8>),
}

/// One request to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Deadline for the whole attempt (connect + transfer).
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: String, timeout: Duration) -> Self {
        Self {
            method: Method::Get,
            url,
            timeout,
        }
    }

    pub fn post_json(url: String, body: Vec<u8>, timeout: Duration) -> Self {
        Self {
            method: Method::PostJson(body),
            url,
            timeout,
        }
    }
}

/// Status and full body of a completed transfer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First `max` bytes of the body as lossy UTF-8, for log lines.
    pub fn body_snippet(&self, max: usize) -> String {
        let end = self.body.len().min(max);
        String::from_utf8_lossy(&self.body[..end]).into_owned()
    }
}

/// Performs one HTTP request on the current thread.
///
/// Implementations must check `cancel` while transferring and abort with
/// [`AttemptError::Cancelled`] once it is set.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: &HttpRequest, cancel: &CancelToken) -> Result<HttpResponse, AttemptError>;
}
