//! Payload retrieval with endpoint failover.
//!
//! Each download endpoint gets one POST of `{"url": <source url>}`. A 2xx body
//! is only accepted when it reaches the minimum payload size; smaller bodies
//! are error pages served with a success status and count as a failed
//! attempt. The first accepted payload is handed to the save sink and no
//! further endpoints are tried.

mod filename;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::error::{AttemptError, FetchError};
use crate::http::{run_attempt, HttpRequest, Transport};
use crate::save::{SaveSink, SavedFile};

pub use filename::{output_file_name, sanitize_file_name, AUDIO_EXTENSION};

/// How much of a rejected body ends up in the log.
const ERROR_BODY_LOG_BYTES: usize = 512;

/// A payload that passed the size check.
#[derive(Debug)]
pub struct RetrievalResult {
    bytes: Vec<u8>,
}

impl RetrievalResult {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Serialize)]
struct DownloadRequest<'a> {
    url: &'a str,
}

/// Downloads the audio for a resolved track.
#[derive(Debug)]
pub struct PayloadRetriever<T> {
    transport: Arc<T>,
    endpoints: Vec<Endpoint>,
    timeout: Duration,
    min_payload_bytes: usize,
}

impl<T: Transport> PayloadRetriever<T> {
    pub fn new(transport: Arc<T>, endpoints: Vec<Endpoint>, timeout: Duration, min_payload_bytes: usize) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
            min_payload_bytes,
        }
    }

    /// Fetches `source_url` through the first endpoint that returns a
    /// plausible payload and saves it as `<sanitized desired_name>.mp3`.
    pub async fn retrieve<S: SaveSink>(
        &self,
        source_url: &str,
        desired_name: &str,
        sink: &S,
    ) -> Result<SavedFile, FetchError> {
        let body = serde_json::to_vec(&DownloadRequest { url: source_url })
            .map_err(|e| FetchError::Config(format!("cannot encode download request: {}", e)))?;
        let mut last_failure: Option<AttemptError> = None;

        for endpoint in &self.endpoints {
            tracing::debug!(endpoint = %endpoint.name, "trying download endpoint");

            match self.try_endpoint(endpoint.download_url(), body.clone()).await {
                Ok(payload) => {
                    let file_name = output_file_name(desired_name);
                    tracing::info!(endpoint = %endpoint.name, bytes = payload.bytes().len(), "payload accepted");
                    return sink.save(&file_name, payload).map_err(FetchError::SaveFailed);
                }
                Err(e) => {
                    tracing::debug!(endpoint = %endpoint.name, "download endpoint failed: {}", e);
                    last_failure = Some(e);
                }
            }
        }

        Err(FetchError::RetrievalFailed {
            last_failure: last_failure.map(|e| e.to_string()),
        })
    }

    async fn try_endpoint(&self, url: String, body: Vec<u8>) -> Result<RetrievalResult, AttemptError> {
        let request = HttpRequest::post_json(url, body, self.timeout);
        let response = run_attempt(Arc::clone(&self.transport), request).await?;
        if !response.is_success() {
            tracing::debug!(
                status = response.status,
                body = %response.body_snippet(ERROR_BODY_LOG_BYTES),
                "download endpoint returned error body"
            );
            return Err(AttemptError::Http(response.status));
        }
        if response.body.len() < self.min_payload_bytes {
            return Err(AttemptError::Undersized {
                len: response.body.len(),
                min: self.min_payload_bytes,
            });
        }
        Ok(RetrievalResult::new(response.body))
    }
}
