//! Per-turn submission flow
//!
//! IDLE -> SUBMITTED (user turn appended) -> AWAITING_RESPONSE (gateway call)
//! -> RESOLVED | FAILED (assistant turn appended) -> IDLE.
//!
//! Gateway failures never escape this function: they are rendered into the
//! transcript so the conversation can continue.

use crate::chat::models::Turn;
use crate::chat::transcript::Transcript;
use crate::gateway::{CompletionGateway, GatewayError};
use serde::Serialize;
use tracing::{debug, warn};

/// Prefix shown in front of a gateway failure message
pub const ERROR_PREFIX: &str = "Ошибка: ";

/// What happened to one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TurnOutcome {
    /// Blank input: nothing appended, gateway not called
    Ignored,
    /// The gateway answered; carries the appended assistant turn
    Resolved {
        /// Appended assistant turn
        turn: Turn,
    },
    /// The gateway failed; carries the appended error turn
    Failed {
        /// Appended assistant turn holding the rendered error
        turn: Turn,
    },
}

impl TurnOutcome {
    /// Short label for logs and API responses
    pub fn label(&self) -> &'static str {
        match self {
            TurnOutcome::Ignored => "ignored",
            TurnOutcome::Resolved { .. } => "resolved",
            TurnOutcome::Failed { .. } => "failed",
        }
    }
}

/// Render a gateway failure as assistant-turn content
pub fn render_failure(error: &GatewayError) -> String {
    format!("{}{}", ERROR_PREFIX, error)
}

/// Process one user submission against `transcript`
///
/// Blank (empty or whitespace-only) input is a no-op. Otherwise the text is
/// appended verbatim as a user turn, the gateway is called exactly once, and
/// its answer or rendered error is appended as an assistant turn.
pub async fn submit_turn(
    transcript: &mut Transcript,
    gateway: &dyn CompletionGateway,
    input: &str,
) -> TurnOutcome {
    if input.trim().is_empty() {
        debug!("Ignoring blank submission");
        return TurnOutcome::Ignored;
    }

    transcript.append(Turn::user(input));

    match gateway.complete(input).await {
        Ok(output) => {
            let turn = Turn::assistant(output.into_text());
            transcript.append(turn.clone());
            TurnOutcome::Resolved { turn }
        }
        Err(e) => {
            warn!(error = %e, "Completion failed, rendering error into transcript");
            let turn = Turn::assistant(render_failure(&e));
            transcript.append(turn.clone());
            TurnOutcome::Failed { turn }
        }
    }
}
