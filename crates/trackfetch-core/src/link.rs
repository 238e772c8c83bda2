//! Link validation.
//!
//! Checks a pasted string against the shape of a streaming-service link
//! (`<host>/[locale/](track|album|playlist)/<id>`) before anything touches the
//! network.

use regex::Regex;
use std::fmt;

use crate::error::FetchError;

/// Host used when the config does not name one.
pub const DEFAULT_LINK_HOST: &str = "open.spotify.com";

/// What a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Track,
    Album,
    Playlist,
}

impl ResourceKind {
    fn from_segment(s: &str) -> Option<Self> {
        match s {
            "track" => Some(ResourceKind::Track),
            "album" => Some(ResourceKind::Album),
            "playlist" => Some(ResourceKind::Playlist),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Track => "track",
            ResourceKind::Album => "album",
            ResourceKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated link. Only `LinkPattern::validate` constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    url: String,
    kind: ResourceKind,
    id: String,
}

impl LinkReference {
    /// The link as submitted (trimmed). This is what metadata endpoints receive.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Compiled link pattern for one streaming-service host.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    regex: Regex,
    service: String,
}

impl LinkPattern {
    /// Pattern for `host`, e.g. `open.spotify.com`. The service name in
    /// user messages defaults to the host.
    pub fn for_host(host: &str) -> Self {
        Self::with_service_name(host, host)
    }

    /// Like `for_host` but with a friendlier name for messages ("Spotify").
    pub fn with_service_name(host: &str, service: &str) -> Self {
        let pattern = format!(
            r"{}/(?:[a-zA-Z-]+/)?(track|album|playlist)/([a-zA-Z0-9]+)",
            regex::escape(host)
        );
        // An escaped host followed by a fixed pattern always compiles.
        let regex = Regex::new(&pattern).expect("link pattern must compile");
        Self {
            regex,
            service: service.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Validates `input` and extracts the resource kind and id.
    pub fn validate(&self, input: &str) -> Result<LinkReference, FetchError> {
        let trimmed = input.trim();
        let invalid = || FetchError::InvalidLink {
            service: self.service.clone(),
        };
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let caps = self.regex.captures(trimmed).ok_or_else(invalid)?;
        let kind = caps
            .get(1)
            .and_then(|m| ResourceKind::from_segment(m.as_str()))
            .ok_or_else(invalid)?;
        let id = caps.get(2).map(|m| m.as_str().to_string()).ok_or_else(invalid)?;
        Ok(LinkReference {
            url: trimmed.to_string(),
            kind,
            id,
        })
    }
}

impl Default for LinkPattern {
    fn default() -> Self {
        Self::with_service_name(DEFAULT_LINK_HOST, "Spotify")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_track_link() {
        let pattern = LinkPattern::for_host("service.example");
        let link = pattern.validate("https://service.example/track/abc123").unwrap();
        assert_eq!(link.kind(), ResourceKind::Track);
        assert_eq!(link.id(), "abc123");
        assert_eq!(link.as_str(), "https://service.example/track/abc123");
    }

    #[test]
    fn accepts_locale_segment_and_query() {
        let pattern = LinkPattern::default();
        let link = pattern
            .validate("  https://open.spotify.com/intl-id/album/4aawyAB9vmqN3uQ7FjRGTy?si=xyz \n")
            .unwrap();
        assert_eq!(link.kind(), ResourceKind::Album);
        assert_eq!(link.id(), "4aawyAB9vmqN3uQ7FjRGTy");
        assert!(link.as_str().starts_with("https://"));
    }

    #[test]
    fn accepts_playlist() {
        let link = LinkPattern::default()
            .validate("open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
            .unwrap();
        assert_eq!(link.kind(), ResourceKind::Playlist);
    }

    #[test]
    fn rejects_free_text() {
        let pattern = LinkPattern::for_host("service.example");
        match pattern.validate("not a link") {
            Err(FetchError::InvalidLink { service }) => assert_eq!(service, "service.example"),
            other => panic!("expected InvalidLink, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        let pattern = LinkPattern::default();
        assert!(pattern.validate("").is_err());
        assert!(pattern.validate("   \t\n").is_err());
    }

    #[test]
    fn rejects_other_hosts_and_kinds() {
        let pattern = LinkPattern::default();
        assert!(pattern.validate("https://example.com/track/abc").is_err());
        assert!(pattern.validate("https://open.spotify.com/artist/abc").is_err());
        assert!(pattern.validate("https://open.spotify.com/track/").is_err());
        // Dots in the host are literal, not wildcards.
        assert!(pattern.validate("https://openXspotifyXcom/track/abc").is_err());
    }

    #[test]
    fn service_name_in_message() {
        let err = LinkPattern::default().validate("nope").unwrap_err();
        assert!(err.to_string().contains("Spotify"));
    }
}
