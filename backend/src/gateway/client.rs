//! Responses API client
//!
//! Direct HTTP client for the rest-assistant `/responses` endpoint.

use crate::gateway::types::{PromptReference, ResponsesApiRequest, ResponsesApiResponse};
use crate::gateway::{CompletionGateway, CompletionOutput, GatewayConfig, GatewayError};
use async_trait::async_trait;

/// Default base URL of the rest-assistant API
pub const DEFAULT_BASE_URL: &str = "https://rest-assistant.api.cloud.yandex.net/v1";

/// Header carrying the tenant / folder identifier
const PROJECT_HEADER: &str = "OpenAI-Project";

/// Completion gateway backed by the Responses API
///
/// Holds a shared `reqwest::Client` (connection pooling) and the immutable
/// gateway configuration. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    client: reqwest::Client,
    config: GatewayConfig,
    base_url: String,
}

impl ResponsesClient {
    /// Create a client against `base_url` (no trailing slash required)
    pub fn new(client: reqwest::Client, config: GatewayConfig, base_url: &str) -> Self {
        Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CompletionGateway for ResponsesClient {
    /// Call the Responses API once with the fixed prompt template
    ///
    /// # Errors
    /// * `GatewayError::Transport` if the HTTP request fails
    /// * `GatewayError::Status` on a non-success status (auth rejection included)
    /// * `GatewayError::Api` if the body reports an error
    /// * `GatewayError::MalformedResponse` if the body is not usable JSON
    async fn complete(&self, input: &str) -> Result<CompletionOutput, GatewayError> {
        let url = format!("{}/responses", self.base_url);
        let model = self.config.model_route();

        let request_body = ResponsesApiRequest {
            model: model.clone(),
            prompt: PromptReference {
                id: self.config.prompt_id.clone(),
            },
            input: input.to_string(),
        };

        tracing::debug!(
            url = %url,
            model = %model,
            input_len = input.len(),
            "Calling Responses API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(PROJECT_HEADER, &self.config.folder_id)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Responses API returned error status"
            );

            return Err(GatewayError::Status {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await?;

        let parsed: ResponsesApiResponse = serde_json::from_str(&response_body).map_err(|e| {
            GatewayError::MalformedResponse(format!(
                "Failed to parse JSON response: {} - Response body: {}",
                e, response_body
            ))
        })?;

        let output = parsed.into_output()?;
        if output.is_fallback() {
            tracing::warn!("Response had no text field, using raw output representation");
        }

        tracing::debug!(
            response_len = output_len(&output),
            "Successfully received response from Responses API"
        );

        Ok(output)
    }
}

fn output_len(output: &CompletionOutput) -> usize {
    match output {
        CompletionOutput::Text(text) | CompletionOutput::Fallback(text) => text.len(),
    }
}
