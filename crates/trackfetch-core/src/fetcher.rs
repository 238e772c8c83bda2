//! Validator, resolver and retriever wired together from one config.

use std::sync::Arc;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::{CurlTransport, Transport};
use crate::link::{LinkPattern, LinkReference};
use crate::resolver::MetadataResolver;
use crate::retriever::PayloadRetriever;
use crate::save::{SaveSink, SavedFile};
use crate::track::TrackMetadata;

/// Entry point for front ends: validate, look up, download.
#[derive(Debug)]
pub struct TrackFetcher<T> {
    pattern: LinkPattern,
    resolver: MetadataResolver<T>,
    retriever: PayloadRetriever<T>,
}

impl TrackFetcher<CurlTransport> {
    /// Builds a fetcher over libcurl. Fails if the config is invalid.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let transport = match &cfg.user_agent {
            Some(ua) => CurlTransport::with_user_agent(ua.clone()),
            None => CurlTransport::new(),
        };
        Self::with_transport(cfg, Arc::new(transport))
    }
}

impl<T: Transport> TrackFetcher<T> {
    /// Builds a fetcher over any transport (tests use a scripted one).
    pub fn with_transport(cfg: &FetchConfig, transport: Arc<T>) -> Result<Self, FetchError> {
        cfg.validate()?;
        Ok(Self {
            pattern: LinkPattern::with_service_name(&cfg.link_host, &cfg.service_name),
            resolver: MetadataResolver::new(
                Arc::clone(&transport),
                cfg.metadata_endpoints.clone(),
                cfg.timeouts.metadata(),
            ),
            retriever: PayloadRetriever::new(
                transport,
                cfg.download_endpoints.clone(),
                cfg.timeouts.download(),
                cfg.min_payload_bytes,
            ),
        })
    }

    /// Checks the link shape only. No I/O.
    pub fn validate(&self, input: &str) -> Result<LinkReference, FetchError> {
        self.pattern.validate(input)
    }

    /// Validates `input`, then resolves it. Invalid input never reaches the network.
    pub async fn lookup(&self, input: &str) -> Result<TrackMetadata, FetchError> {
        let link = self.validate(input)?;
        self.resolve(&link).await
    }

    /// Resolves a link that already passed [`validate`](Self::validate).
    pub async fn resolve(&self, link: &LinkReference) -> Result<TrackMetadata, FetchError> {
        tracing::debug!(kind = %link.kind(), id = link.id(), "link accepted");
        self.resolver.resolve(link).await
    }

    /// Downloads `track` and saves it as `<artist> - <title>.mp3`.
    pub async fn download<S: SaveSink>(&self, track: &TrackMetadata, sink: &S) -> Result<SavedFile, FetchError> {
        self.retriever
            .retrieve(track.source_url(), &track.display_name(), sink)
            .await
    }
}
