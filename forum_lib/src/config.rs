//! Server configuration: defaults, an optional YAML file, then environment overrides.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:37001";
pub const DEFAULT_DATABASE: &str = "forum.db";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub database: PathBuf,
    pub session_ttl_secs: u64,
    pub bcrypt_cost: u32,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 37001)),
            database: PathBuf::from(DEFAULT_DATABASE),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Defaults, overlaid with `path` when given, then with `FORUM_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(content)?)
    }

    /// Applies `FORUM_*` overrides read through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("FORUM_BIND") {
            self.bind = value.parse().map_err(|_| ConfigError::Invalid {
                key: "FORUM_BIND",
                value,
            })?;
        }
        if let Some(value) = lookup("FORUM_DATABASE") {
            self.database = PathBuf::from(value);
        }
        if let Some(value) = lookup("FORUM_SESSION_TTL") {
            self.session_ttl_secs = value.parse().map_err(|_| ConfigError::Invalid {
                key: "FORUM_SESSION_TTL",
                value,
            })?;
        }
        if let Some(value) = lookup("FORUM_BCRYPT_COST") {
            self.bcrypt_cost = value.parse().map_err(|_| ConfigError::Invalid {
                key: "FORUM_BCRYPT_COST",
                value,
            })?;
        }
        if let Some(value) = lookup("FORUM_CORS_ORIGINS") {
            self.cors_origins = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "bcrypt_cost",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "session_ttl_secs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.database, PathBuf::from("forum.db"));
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
        assert!(config.cors_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn yaml_overlays_defaults() {
        let config = ServerConfig::from_yaml("bind: 0.0.0.0:8080\nbcrypt_cost: 12\n").unwrap();
        assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
    }

    #[test]
    fn yaml_unknown_shape_rejected() {
        assert!(ServerConfig::from_yaml("bind: [1, 2]").is_err());
    }

    #[test]
    fn env_overrides_win() {
        let vars: HashMap<&str, &str> = [
            ("FORUM_BIND", "127.0.0.1:9000"),
            ("FORUM_DATABASE", "/tmp/other.db"),
            ("FORUM_SESSION_TTL", "60"),
            ("FORUM_CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]
        .into_iter()
        .collect();
        let mut config = ServerConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.database, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.session_ttl_secs, 60);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn bad_env_value_names_key() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(|key| (key == "FORUM_BCRYPT_COST").then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("FORUM_BCRYPT_COST"));
    }

    #[test]
    fn bcrypt_cost_bounds() {
        let config = ServerConfig {
            bcrypt_cost: 3,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
