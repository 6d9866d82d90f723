//! Configuration loading and management
//!
//! Configuration is read from an optional YAML file, then selected values
//! are overridden from the environment.

use crate::core::validation::ReservedNameCheck;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "YAMDB_CONFIG";

/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "YAMDB_BIND";

/// Complete configuration of the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub users: UsersConfig,

    /// Admin account created at startup if it does not exist yet
    pub bootstrap_admin: Option<BootstrapAdmin>,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
            users: UsersConfig::default(),
            bootstrap_admin: None,
            log_filter: "info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Reserved-username rule applied by the profile endpoints
    pub reserved_name_check: ReservedNameCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("failed to parse '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise, then apply the environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup(BIND_ENV).filter(|b| !b.trim().is_empty()) {
            self.server.bind = bind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.users.reserved_name_check, ReservedNameCheck::Exact);
        assert!(config.bootstrap_admin.is_none());
        assert_eq!(config.log_filter, "info,tower_http=debug");
    }

    #[test]
    fn test_yaml_values() {
        let yaml = r#"
server:
  bind: "0.0.0.0:9000"
pagination:
  default_limit: 5
users:
  reserved_name_check: legacy_substring
bootstrap_admin:
  username: root
  email: root@example.com
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.pagination.default_limit, 5);
        assert_eq!(config.pagination.max_limit, 100);
        assert_eq!(
            config.users.reserved_name_check,
            ReservedNameCheck::LegacySubstring
        );
        assert_eq!(config.bootstrap_admin.unwrap().username, "root");
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == BIND_ENV).then(|| "10.0.0.1:80".to_string()));
        assert_eq!(config.server.bind, "10.0.0.1:80");

        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.server.bind, "10.0.0.1:80");
    }

    #[test]
    fn test_unknown_reserved_check_is_rejected() {
        assert!(AppConfig::from_yaml_str("users:\n  reserved_name_check: fuzzy\n").is_err());
    }
}
