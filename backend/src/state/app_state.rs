// Application state management
// Contains the completion gateway (or startup config error) and the sessions

use crate::gateway::{CompletionGateway, ConfigError};
use crate::state::sessions::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;

/// State shared by all request handlers
pub type SharedState = Arc<AppState>;

/// Whether the gateway can be used
///
/// Decided once at startup; a misconfigured process never issues requests.
#[derive(Clone)]
pub enum GatewayState {
    /// Gateway configured and ready
    Ready {
        /// The gateway used for every submission
        gateway: Arc<dyn CompletionGateway>,
        /// Model route, for display only
        model: String,
    },
    /// Required configuration is missing or invalid
    Misconfigured(ConfigError),
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayState::Ready { model, .. } => {
                f.debug_struct("Ready").field("model", model).finish()
            }
            GatewayState::Misconfigured(e) => f.debug_tuple("Misconfigured").field(e).finish(),
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Gateway availability, fixed at startup
    pub gateway: GatewayState,
    /// Per-session transcripts
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Create state around a ready gateway
    pub fn new(gateway: Arc<dyn CompletionGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway: GatewayState::Ready {
                gateway,
                model: model.into(),
            },
            sessions: SessionRegistry::new(),
        }
    }

    /// Create state for a process that failed configuration
    pub fn misconfigured(error: ConfigError) -> Self {
        Self {
            gateway: GatewayState::Misconfigured(error),
            sessions: SessionRegistry::new(),
        }
    }

    /// Replace the session registry with one ending sessions after `ttl` idle
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = SessionRegistry::with_ttl(ttl);
        self
    }

    /// The configuration error, if the gateway is unavailable
    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.gateway {
            GatewayState::Ready { .. } => None,
            GatewayState::Misconfigured(e) => Some(e),
        }
    }
}
