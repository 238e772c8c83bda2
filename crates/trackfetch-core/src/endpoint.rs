//! Endpoint strategies.
//!
//! An endpoint is an upstream API base plus an optional relay prefix. Turning a
//! request into a concrete URL is a pure function of the two; the resolver and
//! retriever just walk their endpoint lists in order.

use serde::{Deserialize, Serialize};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Path under `api_base` that returns the song-details envelope.
const METADATA_PATH: &str = "/song-details";
/// Path under `api_base` that accepts `{ "url": ... }` and returns audio bytes.
const DOWNLOAD_PATH: &str = "/download";

/// One fallback strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Short label used in logs.
    pub name: String,
    /// Base of the upstream API, without trailing slash (e.g. `https://spotdown.org/api`).
    pub api_base: String,
    /// Passthrough prefix; the URL-encoded target is appended to it
    /// (e.g. `https://corsproxy.io/?`). `None` calls the API directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<String>,
}

impl Endpoint {
    pub fn direct(name: &str, api_base: &str) -> Self {
        Self {
            name: name.to_string(),
            api_base: api_base.to_string(),
            relay: None,
        }
    }

    pub fn relayed(name: &str, relay: &str, api_base: &str) -> Self {
        Self {
            name: name.to_string(),
            api_base: api_base.to_string(),
            relay: Some(relay.to_string()),
        }
    }

    /// GET target for resolving `link`.
    pub fn metadata_url(&self, link: &str) -> String {
        let target = format!(
            "{}{}?url={}",
            self.base(),
            METADATA_PATH,
            encode_component(link)
        );
        self.wrap(target)
    }

    /// POST target for the binary download.
    pub fn download_url(&self) -> String {
        self.wrap(format!("{}{}", self.base(), DOWNLOAD_PATH))
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    fn wrap(&self, target: String) -> String {
        match &self.relay {
            Some(prefix) => format!("{}{}", prefix, encode_component(&target)),
            None => target,
        }
    }
}

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, and a space
/// becomes `%20`, never `+`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use as a single query component.
pub(crate) fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

const UPSTREAM_API: &str = "https://spotdown.org/api";
const CORSPROXY: &str = "https://corsproxy.io/?";
const ALLORIGINS: &str = "https://api.allorigins.win/raw?url=";

/// Metadata endpoints in priority order: direct, then two relays.
pub fn default_metadata_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::direct("direct", UPSTREAM_API),
        Endpoint::relayed("corsproxy", CORSPROXY, UPSTREAM_API),
        Endpoint::relayed("allorigins", ALLORIGINS, UPSTREAM_API),
    ]
}

/// Download endpoints in priority order: direct, then one relay.
pub fn default_download_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::direct("direct", UPSTREAM_API),
        Endpoint::relayed("corsproxy", CORSPROXY, UPSTREAM_API),
    ]
}
