//! Gateway configuration
//!
//! Credentials and identifiers required before any completion request may
//! be attempted. Built once at startup from [`Secrets`] and never mutated.

use crate::config::Secrets;
use thiserror::Error;

/// Logical secret name of the endpoint credential
pub const SECRET_API: &str = "api";
/// Logical secret name of the tenant / folder identifier
pub const SECRET_FOLDER: &str = "folder";
/// Logical secret name of the prompt template identifier
pub const SECRET_PROMPT: &str = "promt";

/// Required secrets, in the order they are reported when missing
pub const REQUIRED_SECRETS: [&str; 3] = [SECRET_API, SECRET_FOLDER, SECRET_PROMPT];

/// Fatal configuration problems
///
/// Any of these stops the chat flow entirely; the page shows the message
/// as a top-level notice instead of accepting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required secrets are absent or blank
    #[error(
        "Не настроены секреты (отсутствуют: {}). Добавьте api, folder и promt в секреты.",
        .0.join(", ")
    )]
    MissingSecrets(Vec<&'static str>),

    /// The secrets file exists but could not be read or parsed
    #[error("Не удалось прочитать файл секретов {path}: {message}")]
    InvalidSecretsFile {
        /// Path of the offending file
        path: String,
        /// Underlying read/parse error
        message: String,
    },
}

/// Immutable configuration of the completion gateway
#[derive(Clone)]
pub struct GatewayConfig {
    /// Endpoint credential (sent as a bearer token)
    pub api_key: String,
    /// Tenant / folder identifier
    pub folder_id: String,
    /// Prompt template identifier
    pub prompt_id: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("folder_id", &self.folder_id)
            .field("prompt_id", &self.prompt_id)
            .finish()
    }
}

impl GatewayConfig {
    /// Build the configuration from loaded secrets
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    /// * `ConfigError::MissingSecrets` listing every missing name
    pub fn from_secrets(secrets: &Secrets) -> Result<Self, ConfigError> {
        let lookup = |name: &str| {
            secrets
                .get(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let missing: Vec<&'static str> = REQUIRED_SECRETS
            .iter()
            .copied()
            .filter(|name| lookup(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingSecrets(missing));
        }

        Ok(Self {
            api_key: lookup(SECRET_API).unwrap_or_default(),
            folder_id: lookup(SECRET_FOLDER).unwrap_or_default(),
            prompt_id: lookup(SECRET_PROMPT).unwrap_or_default(),
        })
    }

    /// Model route embedding the folder identifier
    pub fn model_route(&self) -> String {
        format!("gpt://{}/yandexgpt/rc", self.folder_id)
    }
}
