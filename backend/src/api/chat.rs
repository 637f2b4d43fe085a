//! Chat API endpoints
//!
//! Handles submissions and transcript reads for browser sessions.

use crate::api::utils::validate_session_id;
use crate::chat::{submit_turn, Turn, TurnOutcome};
use crate::error::AppError;
use crate::state::{GatewayState, SessionRegistry, SharedState};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request to submit a message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message content, exactly as typed
    pub message: String,
    /// Session to append to; a new one is created if absent
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Result of a submission
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The session ID (same as input or newly generated)
    pub session_id: String,
    /// Full transcript after the submission
    pub turns: Vec<Turn>,
    /// `ignored`, `resolved` or `failed`
    pub outcome: &'static str,
}

/// Transcript of one session
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// Session identifier
    pub session_id: String,
    /// Turns, oldest first
    pub turns: Vec<Turn>,
}

/// Gateway readiness
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether submissions will reach the completion endpoint
    pub ready: bool,
    /// Configuration error shown to the user, if any
    pub error: Option<String>,
    /// Target model route, when ready
    pub model: Option<String>,
}

/// POST /api/chat - Submit a message and get the updated transcript
///
/// Gateway failures still return 200: the error is part of the transcript.
pub async fn submit_message(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let gateway = match &state.gateway {
        GatewayState::Ready { gateway, .. } => gateway.clone(),
        GatewayState::Misconfigured(e) => return Err(AppError::Configuration(e.clone())),
    };

    let session_id = match request.session_id {
        Some(id) => {
            validate_session_id(&id)?;
            id
        }
        None => SessionRegistry::generate_id(),
    };

    // Blank input never registers a session
    if request.message.trim().is_empty() {
        let turns = state.sessions.snapshot(&session_id).await;
        info!(session_id = %session_id, "Blank submission ignored");
        return Ok(Json(ChatResponse {
            session_id,
            turns,
            outcome: TurnOutcome::Ignored.label(),
        }));
    }

    let handle = state.sessions.get_or_create(&session_id).await;
    let mut transcript = handle.lock().await;

    let outcome = submit_turn(&mut transcript, gateway.as_ref(), &request.message).await;

    info!(
        session_id = %session_id,
        outcome = outcome.label(),
        turns = transcript.len(),
        "Chat submission processed"
    );

    Ok(Json(ChatResponse {
        session_id,
        turns: transcript.all().to_vec(),
        outcome: outcome.label(),
    }))
}

/// GET /api/chat/:session_id - Get a session's transcript
pub async fn get_transcript(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    validate_session_id(&session_id)?;
    let turns = state.sessions.snapshot(&session_id).await;
    Ok(Json(TranscriptResponse { session_id, turns }))
}

/// GET /api/status - Report whether the gateway is configured
pub async fn get_status(State(state): State<SharedState>) -> Json<StatusResponse> {
    let response = match &state.gateway {
        GatewayState::Ready { model, .. } => StatusResponse {
            ready: true,
            error: None,
            model: Some(model.clone()),
        },
        GatewayState::Misconfigured(e) => StatusResponse {
            ready: false,
            error: Some(e.to_string()),
            model: None,
        },
    };
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use crate::gateway::{CompletionGateway, CompletionOutput, ConfigError, GatewayError};
    use crate::state::AppState;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Gateway echoing the input back, counting calls
    #[derive(Default)]
    struct EchoGateway {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionGateway for EchoGateway {
        async fn complete(&self, input: &str) -> Result<CompletionOutput, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if input == "fail" {
                return Err(GatewayError::Transport("timeout".to_string()));
            }
            Ok(CompletionOutput::Text(format!("echo: {}", input)))
        }
    }

    fn create_test_state() -> (SharedState, Arc<EchoGateway>) {
        let gateway = Arc::new(EchoGateway::default());
        let state = Arc::new(AppState::new(gateway.clone(), "gpt://f1/yandexgpt/rc"));
        (state, gateway)
    }

    fn request(message: &str, session_id: Option<&str>) -> Json<ChatRequest> {
        Json(ChatRequest {
            message: message.to_string(),
            session_id: session_id.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_submit_creates_session() {
        let (state, _) = create_test_state();
        let response = submit_message(State(state.clone()), request("hi", None))
            .await
            .unwrap()
            .0;

        assert!(!response.session_id.is_empty());
        assert_eq!(response.outcome, "resolved");
        assert_eq!(response.turns.len(), 2);
        assert_eq!(response.turns[1].content(), "echo: hi");
        assert_eq!(state.sessions.count().await, 1);
    }

    #[tokio::test]
    async fn test_submit_appends_to_existing_session() {
        let (state, _) = create_test_state();
        let first = submit_message(State(state.clone()), request("one", None))
            .await
            .unwrap()
            .0;
        let second = submit_message(
            State(state.clone()),
            request("two", Some(&first.session_id)),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(second.session_id, first.session_id);
        let roles: Vec<Role> = second.turns.iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[tokio::test]
    async fn test_concurrent_submissions_stay_alternating() {
        let (state, gateway) = create_test_state();
        let (a, b) = tokio::join!(
            submit_message(State(state.clone()), request("a", Some("s1"))),
            submit_message(State(state.clone()), request("b", Some("s1"))),
        );
        assert!(a.is_ok() && b.is_ok());

        let turns = state.sessions.snapshot("s1").await;
        assert_eq!(turns.len(), 4);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[1].content(), format!("echo: {}", pair[0].content()));
        }
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_submit_failure_is_transcript_content() {
        let (state, _) = create_test_state();
        let response = submit_message(State(state), request("fail", None))
            .await
            .unwrap()
            .0;

        assert_eq!(response.outcome, "failed");
        assert_eq!(response.turns[1].content(), "Ошибка: timeout");
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let (state, gateway) = create_test_state();
        let response = submit_message(State(state), request("   ", Some("s1")))
            .await
            .unwrap()
            .0;

        assert_eq!(response.outcome, "ignored");
        assert!(response.turns.is_empty());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_submissions_register_no_session() {
        let (state, gateway) = create_test_state();
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let response = submit_message(State(state.clone()), request("  ", None))
                .await
                .unwrap()
                .0;
            assert_eq!(response.outcome, "ignored");
            assert!(response.turns.is_empty());
            ids.insert(response.session_id);
        }

        assert_eq!(state.sessions.count().await, 0);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn test_blank_submission_returns_existing_transcript() {
        let (state, _) = create_test_state();
        let first = submit_message(State(state.clone()), request("hi", Some("s1")))
            .await
            .unwrap()
            .0;
        assert_eq!(first.turns.len(), 2);
        let response = submit_message(State(state.clone()), request("\n", Some("s1")))
            .await
            .unwrap()
            .0;

        assert_eq!(response.outcome, "ignored");
        assert_eq!(response.turns.len(), 2);
        assert_eq!(state.sessions.count().await, 1);
    }

    #[tokio::test]
    async fn test_submit_rejected_when_misconfigured() {
        let state = Arc::new(AppState::misconfigured(ConfigError::MissingSecrets(vec![
            "promt",
        ])));
        let result = submit_message(State(state.clone()), request("hi", None)).await;

        match result.unwrap_err() {
            AppError::Configuration(ConfigError::MissingSecrets(missing)) => {
                assert_eq!(missing, vec!["promt"]);
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
        assert_eq!(state.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn test_submit_invalid_session_id() {
        let (state, gateway) = create_test_state();
        let result = submit_message(State(state), request("hi", Some("bad id!"))).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_transcript_unknown_session() {
        let (state, _) = create_test_state();
        let response = get_transcript(State(state), Path("nonexistent".to_string()))
            .await
            .unwrap()
            .0;
        assert!(response.turns.is_empty());
    }

    #[tokio::test]
    async fn test_get_transcript_after_submit() {
        let (state, _) = create_test_state();
        let submitted = submit_message(State(state.clone()), request("hi", Some("s1")))
            .await
            .unwrap()
            .0;
        assert_eq!(submitted.outcome, "resolved");

        let response = get_transcript(State(state), Path("s1".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(response.turns.len(), 2);
        assert_eq!(response.turns[0].content(), "hi");
    }

    #[tokio::test]
    async fn test_status_ready_and_misconfigured() {
        let (state, _) = create_test_state();
        let ready = get_status(State(state)).await.0;
        assert!(ready.ready);
        assert_eq!(ready.model.as_deref(), Some("gpt://f1/yandexgpt/rc"));

        let state = Arc::new(AppState::misconfigured(ConfigError::MissingSecrets(vec![
            "api",
        ])));
        let broken = get_status(State(state)).await.0;
        assert!(!broken.ready);
        assert!(broken.error.unwrap().contains("api"));
        assert!(broken.model.is_none());
    }
}
