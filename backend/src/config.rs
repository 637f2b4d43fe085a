//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults, plus loading of the secrets the gateway needs.

use crate::gateway::client::DEFAULT_BASE_URL;
use crate::gateway::ConfigError;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override secrets file entries
pub const SECRET_ENV_PREFIX: &str = "ASSISTANT_";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion endpoint configuration
    pub gateway: GatewayEndpointConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
    /// Idle time (in seconds) after which a browser session is dropped
    pub session_ttl_secs: u64,
}

/// Where the completion endpoint lives and where secrets come from
#[derive(Debug, Clone)]
pub struct GatewayEndpointConfig {
    /// Base URL of the Responses API
    pub base_url: String,
    /// TOML file holding `api`, `folder` and `promt`
    pub secrets_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                session_ttl_secs: env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(3600),
            },
            gateway: GatewayEndpointConfig {
                base_url: env::var("ASSISTANT_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                secrets_path: env::var_os("SECRETS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".streamlit/secrets.toml")),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Secret values keyed by logical name
///
/// Read once at startup; nothing here is ever written back.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    values: HashMap<String, String>,
}

impl Secrets {
    /// Build secrets from explicit key/value pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Load secrets from a TOML file of top-level keys
    ///
    /// A missing file yields empty secrets; tables and arrays are skipped.
    ///
    /// # Errors
    /// * `ConfigError::InvalidSecretsFile` if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidSecretsFile {
            path: path.display().to_string(),
            message,
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No secrets file found");
                return Ok(Self::default());
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| invalid(e.to_string()))?;

        let values = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                toml::Value::Integer(_) | toml::Value::Float(_) | toml::Value::Boolean(_) => {
                    Some((key, value.to_string()))
                }
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }

    /// Override entries with `ASSISTANT_<NAME>` environment variables
    pub fn with_env_overrides<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            let var = format!("{}{}", SECRET_ENV_PREFIX, name.to_uppercase());
            if let Ok(value) = env::var(&var) {
                self.values.insert(name.to_string(), value);
            }
        }
        self
    }

    /// Look up a secret by logical name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
