//! Integration tests for startup configuration and the HTTP handlers
//!
//! A mockito server stands in for the remote Responses API.

use admissions_assistant::api::chat::{submit_message, ChatRequest};
use admissions_assistant::api::page::render_page;
use admissions_assistant::build_state;
use admissions_assistant::config::{Config, GatewayEndpointConfig, ServerConfig};
use admissions_assistant::error::AppError;
use axum::extract::State;
use axum::Json;
use mockito::Server;
use serial_test::serial;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn clear_secret_env() {
    for var in ["ASSISTANT_API", "ASSISTANT_FOLDER", "ASSISTANT_PROMT"] {
        std::env::remove_var(var);
    }
}

fn config_with_secrets(base_url: &str, secrets: &str) -> (Config, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", secrets).unwrap();
    let config = Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            session_ttl_secs: 3600,
        },
        gateway: GatewayEndpointConfig {
            base_url: base_url.to_string(),
            secrets_path: file.path().to_path_buf(),
        },
    };
    (config, file)
}

fn request(message: &str) -> Json<ChatRequest> {
    Json(ChatRequest {
        message: message.to_string(),
        session_id: None,
    })
}

#[tokio::test]
#[serial]
async fn test_configured_service_answers_through_gateway() {
    clear_secret_env();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .match_header("authorization", "Bearer k")
        .with_status(200)
        .with_body(r#"{"output_text": "Добро пожаловать!"}"#)
        .expect(1)
        .create_async()
        .await;

    let (config, _file) = config_with_secrets(
        &server.url(),
        "api = \"k\"\nfolder = \"f1\"\npromt = \"p1\"\n",
    );
    let state = Arc::new(build_state(&config));
    assert!(state.config_error().is_none());

    let response = submit_message(State(state), request("Привет")).await.unwrap().0;

    mock.assert_async().await;
    assert_eq!(response.outcome, "resolved");
    assert_eq!(response.turns[0].content(), "Привет");
    assert_eq!(response.turns[1].content(), "Добро пожаловать!");
}

#[tokio::test]
#[serial]
async fn test_remote_error_becomes_assistant_turn() {
    clear_secret_env();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .with_status(401)
        .with_body("unauthorized")
        .create_async()
        .await;

    let (config, _file) = config_with_secrets(
        &server.url(),
        "api = \"bad\"\nfolder = \"f1\"\npromt = \"p1\"\n",
    );
    let state = Arc::new(build_state(&config));

    let response = submit_message(State(state), request("Привет")).await.unwrap().0;

    mock.assert_async().await;
    assert_eq!(response.outcome, "failed");
    assert_eq!(
        response.turns[1].content(),
        "Ошибка: Error code: 401 - unauthorized"
    );
}

#[tokio::test]
#[serial]
async fn test_missing_secret_prevents_any_request() {
    clear_secret_env();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .expect(0)
        .create_async()
        .await;

    let (config, _file) = config_with_secrets(&server.url(), "api = \"k\"\nfolder = \"f1\"\n");
    let state = Arc::new(build_state(&config));

    let error = state.config_error().cloned().expect("config should be invalid");
    assert!(error.to_string().contains("promt"));

    let result = submit_message(State(state.clone()), request("Привет")).await;
    assert!(matches!(result, Err(AppError::Configuration(_))));

    let page = render_page(state.config_error());
    assert!(page.contains(r#"data-ready="false""#));

    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn test_env_supplies_missing_secret() {
    clear_secret_env();
    std::env::set_var("ASSISTANT_PROMT", "p-env");

    let (config, _file) = config_with_secrets(
        "http://127.0.0.1:1",
        "api = \"k\"\nfolder = \"f1\"\n",
    );
    let state = build_state(&config);

    clear_secret_env();
    assert!(state.config_error().is_none());
}
