use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::endpoint::{default_download_endpoints, default_metadata_endpoints, Endpoint};
use crate::error::FetchError;
use crate::link::DEFAULT_LINK_HOST;

/// Per-attempt deadlines (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Deadline for one metadata GET, in seconds.
    pub metadata_secs: u64,
    /// Deadline for one payload POST, in seconds. Transfers are larger and slower.
    pub download_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            metadata_secs: 12,
            download_secs: 60,
        }
    }
}

impl TimeoutConfig {
    pub fn metadata(&self) -> Duration {
        Duration::from_secs(self.metadata_secs)
    }

    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }
}

/// Global configuration loaded from `~/.config/trackfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Host links must point at (e.g. "open.spotify.com").
    pub link_host: String,
    /// Name of the service in user-facing messages.
    pub service_name: String,
    /// Smallest body accepted as real audio. Anything shorter is treated as an
    /// error page. Very short legitimate clips fall under this and get rejected.
    pub min_payload_bytes: usize,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Metadata endpoints, tried in order.
    #[serde(default = "default_metadata_endpoints")]
    pub metadata_endpoints: Vec<Endpoint>,
    /// Download endpoints, tried in order.
    #[serde(default = "default_download_endpoints")]
    pub download_endpoints: Vec<Endpoint>,
    /// Optional User-Agent header for all requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            link_host: DEFAULT_LINK_HOST.to_string(),
            service_name: "Spotify".to_string(),
            min_payload_bytes: 10_000,
            timeouts: TimeoutConfig::default(),
            metadata_endpoints: default_metadata_endpoints(),
            download_endpoints: default_download_endpoints(),
            user_agent: None,
        }
    }
}

impl FetchConfig {
    /// Rejects configs that could never succeed.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.link_host.trim().is_empty() {
            return Err(FetchError::Config("link_host must not be empty".to_string()));
        }
        if self.timeouts.metadata_secs == 0 || self.timeouts.download_secs == 0 {
            return Err(FetchError::Config("timeouts must be at least one second".to_string()));
        }
        check_endpoints("metadata_endpoints", &self.metadata_endpoints)?;
        check_endpoints("download_endpoints", &self.download_endpoints)?;
        Ok(())
    }
}

fn check_endpoints(field: &str, endpoints: &[Endpoint]) -> Result<(), FetchError> {
    if endpoints.is_empty() {
        return Err(FetchError::Config(format!("{} must list at least one endpoint", field)));
    }
    for ep in endpoints {
        url::Url::parse(&ep.api_base).map_err(|e| {
            FetchError::Config(format!("{}: endpoint {:?} has bad api_base: {}", field, ep.name, e))
        })?;
        if let Some(relay) = &ep.relay {
            url::Url::parse(relay).map_err(|e| {
                FetchError::Config(format!("{}: endpoint {:?} has bad relay: {}", field, ep.name, e))
            })?;
        }
    }
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("trackfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but for an explicit path (e.g. `--config`).
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.link_host, "open.spotify.com");
        assert_eq!(cfg.min_payload_bytes, 10_000);
        assert_eq!(cfg.timeouts.metadata(), Duration::from_secs(12));
        assert_eq!(cfg.timeouts.download(), Duration::from_secs(60));
        assert_eq!(cfg.metadata_endpoints.len(), 3);
        assert_eq!(cfg.download_endpoints.len(), 2);
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.link_host, cfg.link_host);
        assert_eq!(parsed.min_payload_bytes, cfg.min_payload_bytes);
        assert_eq!(parsed.metadata_endpoints, cfg.metadata_endpoints);
        assert_eq!(parsed.download_endpoints, cfg.download_endpoints);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            link_host = "service.example"
            service_name = "Example"
            min_payload_bytes = 2048

            [timeouts]
            metadata_secs = 5
            download_secs = 30

            [[metadata_endpoints]]
            name = "local"
            api_base = "http://127.0.0.1:3000/api/spotdown"

            [[download_endpoints]]
            name = "relay"
            api_base = "https://upstream.example/api"
            relay = "https://relay.example/?"
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.min_payload_bytes, 2048);
        assert_eq!(cfg.timeouts.metadata_secs, 5);
        assert_eq!(cfg.metadata_endpoints, vec![Endpoint::direct("local", "http://127.0.0.1:3000/api/spotdown")]);
        assert_eq!(cfg.download_endpoints[0].relay.as_deref(), Some("https://relay.example/?"));
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let toml = r#"
            link_host = "open.spotify.com"
            service_name = "Spotify"
            min_payload_bytes = 10000
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeouts.download_secs, 60);
        assert_eq!(cfg.metadata_endpoints, default_metadata_endpoints());
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let mut cfg = FetchConfig::default();
        cfg.download_endpoints.clear();
        assert!(matches!(cfg.validate(), Err(FetchError::Config(_))));

        let mut cfg = FetchConfig::default();
        cfg.timeouts.metadata_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = FetchConfig::default();
        cfg.metadata_endpoints[0].api_base = "not a url".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("direct"));
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.metadata_endpoints, created.metadata_endpoints);
    }
}
