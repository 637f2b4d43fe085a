//! Completion gateway
//!
//! Request/response wrapper around the remote LLM endpoint. One call in,
//! one generated text (or one typed failure) out; no retries, no streaming.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ResponsesClient;
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use types::CompletionOutput;

use async_trait::async_trait;

/// Anything that can turn one user input into one assistant output
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Issue exactly one completion request for `input`
    async fn complete(&self, input: &str) -> Result<CompletionOutput, GatewayError>;
}
