//! Metadata resolution with endpoint failover.
//!
//! Endpoints are tried strictly in order, one at a time. The first one that
//! answers 2xx with a parseable, non-empty song list wins; its first song is
//! the result and later endpoints are never contacted. Any other outcome
//! (timeout, transport error, non-2xx, bad JSON, empty list) is logged and
//! the next endpoint is tried.

mod envelope;

use std::sync::Arc;
use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::{AttemptError, FetchError};
use crate::http::{run_attempt, HttpRequest, Transport};
use crate::link::LinkReference;
use crate::track::TrackMetadata;

/// Resolves a validated link to track metadata.
#[derive(Debug)]
pub struct MetadataResolver<T> {
    transport: Arc<T>,
    endpoints: Vec<Endpoint>,
    timeout: Duration,
}

impl<T: Transport> MetadataResolver<T> {
    pub fn new(transport: Arc<T>, endpoints: Vec<Endpoint>, timeout: Duration) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
        }
    }

    /// Tries each endpoint until one yields a song.
    ///
    /// Fails with [`FetchError::ResolutionFailed`] only after every endpoint
    /// failed; the last failure is kept for the diagnostic log.
    pub async fn resolve(&self, link: &LinkReference) -> Result<TrackMetadata, FetchError> {
        let mut last_failure: Option<AttemptError> = None;

        for endpoint in &self.endpoints {
            let url = endpoint.metadata_url(link.as_str());
            tracing::debug!(endpoint = %endpoint.name, kind = %link.kind(), "trying metadata endpoint");

            match self.try_endpoint(url).await {
                Ok(meta) => {
                    tracing::info!(endpoint = %endpoint.name, title = meta.title(), "resolved track details");
                    return Ok(meta);
                }
                Err(e) => {
                    tracing::debug!(endpoint = %endpoint.name, "metadata endpoint failed: {}", e);
                    last_failure = Some(e);
                }
            }
        }

        Err(FetchError::ResolutionFailed {
            last_failure: last_failure.map(|e| e.to_string()),
        })
    }

    async fn try_endpoint(&self, url: String) -> Result<TrackMetadata, AttemptError> {
        let request = HttpRequest::get(url, self.timeout);
        let response = run_attempt(Arc::clone(&self.transport), request).await?;
        if !response.is_success() {
            return Err(AttemptError::Http(response.status));
        }
        envelope::first_song(&response.body)
    }
}
