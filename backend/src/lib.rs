//! Admissions Assistant Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
/// Application state management
///
/// Holds gateway availability and the per-session transcripts.
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use crate::config::{Config, Secrets};
use crate::gateway::config::REQUIRED_SECRETS;
use crate::gateway::{GatewayConfig, ResponsesClient};
use crate::state::{AppState, SharedState};
use std::sync::Arc;
use std::time::Duration;

/// Build application state from configuration
///
/// Configuration problems do not abort startup: the returned state is
/// marked misconfigured so the page can explain what is missing, and no
/// completion request is ever attempted.
pub fn build_state(config: &Config) -> AppState {
    let session_ttl = Duration::from_secs(config.server.session_ttl_secs);

    let gateway_config = Secrets::from_file(&config.gateway.secrets_path)
        .map(|secrets| secrets.with_env_overrides(REQUIRED_SECRETS))
        .and_then(|secrets| GatewayConfig::from_secrets(&secrets));

    match gateway_config {
        Ok(gateway_config) => {
            let model = gateway_config.model_route();
            tracing::info!(model = %model, "Completion gateway configured");
            let client = ResponsesClient::new(
                reqwest::Client::new(),
                gateway_config,
                &config.gateway.base_url,
            );
            AppState::new(Arc::new(client), model).with_session_ttl(session_ttl)
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway configuration invalid, chat disabled");
            AppState::misconfigured(e).with_session_ttl(session_ttl)
        }
    }
}

/// Routes of the chat page and its JSON API
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(api::page::index))
        .route("/api/status", get(api::chat::get_status))
        .route("/api/chat", post(api::chat::submit_message))
        .route("/api/chat/:session_id", get(api::chat::get_transcript))
        .with_state(state)
}
