use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::external_catalog::TmdbConfig;
use crate::overrides::OverrideRule;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata provider. Without it only caller-supplied descriptors can be resolved.
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    /// Sonarr/Radarr instances and their override rules.
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Kind of media-library manager behind a destination.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    /// Series manager; rules match against TV metadata.
    Sonarr,
    /// Movie manager; rules match against movie metadata.
    Radarr,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Sonarr => "sonarr",
            DestinationKind::Radarr => "radarr",
        }
    }
}

impl std::fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One Sonarr or Radarr instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationConfig {
    /// Unique name used to address the destination.
    pub name: String,
    pub kind: DestinationKind,
    /// Ordered override rules. Absent means overrides are not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<OverrideRule>>,
}

impl DestinationConfig {
    pub fn rule_count(&self) -> usize {
        self.overrides.as_ref().map_or(0, Vec::len)
    }
}

/// Destination listing entry, without the rules themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DestinationSummary {
    pub name: String,
    pub kind: DestinationKind,
    pub rule_count: usize,
}

impl From<&DestinationConfig> for DestinationSummary {
    fn from(destination: &DestinationConfig) -> Self {
        Self {
            name: destination.name.clone(),
            kind: destination.kind,
            rule_count: destination.rule_count(),
        }
    }
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<SanitizedTmdbConfig>,
    pub destinations: Vec<DestinationSummary>,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tmdb: config.tmdb.as_ref().map(|t| SanitizedTmdbConfig {
                base_url: t.base_url.clone(),
                api_key_configured: !t.api_key.is_empty(),
                timeout_secs: t.timeout_secs,
            }),
            destinations: config
                .destinations
                .iter()
                .map(DestinationSummary::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.tmdb.is_none());
        assert!(config.destinations.is_empty());
    }

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_destinations_with_overrides() {
        let toml = r#"
[tmdb]
api_key = "tmdb-key"

[[destinations]]
name = "sonarr-main"
kind = "sonarr"

[[destinations.overrides]]
rule = { genres = [16], languages = ["ja"] }
override = { root_folder = "/tv/anime", tags = [3], profile_id = 4 }

[[destinations.overrides]]
rule = { keywords = [210024] }
override = { tags = [] }

[[destinations]]
name = "radarr-main"
kind = "radarr"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tmdb.as_ref().unwrap().timeout_secs, 30); // default
        assert_eq!(config.destinations.len(), 2);

        let sonarr = &config.destinations[0];
        assert_eq!(sonarr.kind, DestinationKind::Sonarr);
        assert_eq!(sonarr.rule_count(), 2);
        let rules = sonarr.overrides.as_ref().unwrap();
        assert_eq!(rules[0].payload.root_folder.as_deref(), Some("/tv/anime"));
        assert_eq!(rules[1].payload.tags, Some(vec![]));

        let radarr = &config.destinations[1];
        assert_eq!(radarr.kind, DestinationKind::Radarr);
        assert!(radarr.overrides.is_none());
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let toml = r#"
[[destinations]]
name = "lidarr"
kind = "lidarr"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config = Config {
            server: ServerConfig::default(),
            tmdb: Some(TmdbConfig {
                api_key: "secret-key".to_string(),
                base_url: None,
                timeout_secs: 10,
            }),
            destinations: vec![DestinationConfig {
                name: "sonarr-main".to_string(),
                kind: DestinationKind::Sonarr,
                overrides: Some(vec![OverrideRule::default()]),
            }],
        };

        let sanitized = SanitizedConfig::from(&config);
        let tmdb = sanitized.tmdb.as_ref().unwrap();
        assert!(tmdb.api_key_configured);
        assert_eq!(tmdb.timeout_secs, 10);
        assert_eq!(sanitized.destinations[0].rule_count, 1);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
