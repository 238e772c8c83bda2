//! libcurl-backed transport.
//!
//! One `Easy` handle per request. The response body is collected in memory;
//! payloads are a few megabytes at most and are handed to the save sink whole.

use std::time::Duration;

use super::{CancelToken, HttpRequest, HttpResponse, Method, Transport};
use crate::error::AttemptError;

/// Connect phase never gets more than this, even when the attempt deadline is longer.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Production transport using the curl crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    user_agent: Option<String>,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
        }
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &HttpRequest, cancel: &CancelToken) -> Result<HttpResponse, AttemptError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(request.timeout.min(MAX_CONNECT_TIMEOUT))?;
        easy.timeout(request.timeout)?;
        easy.progress(true)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        let mut list = curl::easy::List::new();
        match &request.method {
            Method::Get => {
                easy.get(true)?;
            }
            Method::PostJson(payload) => {
                easy.post(true)?;
                easy.post_fields_copy(payload)?;
                list.append("Content-Type: application/json")?;
                easy.http_headers(list)?;
            }
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            // Returning false aborts the transfer with CURLE_ABORTED_BY_CALLBACK.
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform().map_err(|e| {
                if e.is_operation_timedout() {
                    AttemptError::Timeout(request.timeout)
                } else {
                    AttemptError::from(e)
                }
            })?;
        }

        let status = easy.response_code()?;
        tracing::trace!(url = %request.url, status, bytes = body.len(), "transfer finished");
        Ok(HttpResponse { status, body })
    }
}
