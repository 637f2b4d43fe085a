//! Responses API wire types
//!
//! Structs that mirror the JSON exchanged with the rest-assistant
//! `/responses` endpoint, plus the tagged [`CompletionOutput`] the gateway
//! hands back to callers.

use crate::gateway::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content item type that carries generated text inside `output[*].content`
const OUTPUT_TEXT_TYPE: &str = "output_text";

/// Request body for `POST /responses`
#[derive(Serialize, Debug)]
pub struct ResponsesApiRequest {
    /// Target model route (`gpt://<folder>/yandexgpt/rc`)
    pub model: String,
    /// Server-side prompt template reference
    pub prompt: PromptReference,
    /// Raw user input
    pub input: String,
}

/// Reference to a pre-configured prompt template
#[derive(Serialize, Debug)]
pub struct PromptReference {
    /// Prompt template identifier
    pub id: String,
}

/// Top-level response body
///
/// Every field is optional: the service's output shape is not fully pinned
/// down, so decoding is lenient and [`ResponsesApiResponse::into_output`]
/// decides what is usable.
#[derive(Deserialize, Debug, Default)]
pub struct ResponsesApiResponse {
    /// Convenience aggregate of all generated text, when the service sends it
    #[serde(default)]
    pub output_text: Option<String>,
    /// Structured output items (messages with content parts)
    #[serde(default)]
    pub output: Option<Value>,
    /// Error object reported inside a successful HTTP exchange
    #[serde(default)]
    pub error: Option<Value>,
}

/// Result of a successful completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutput {
    /// Generated text found where it is expected
    Text(String),
    /// No text field was present; this is the string coercion of the raw
    /// `output` value. Kept as a compatibility shim for an underspecified
    /// response schema.
    Fallback(String),
}

impl CompletionOutput {
    /// Content to show as the assistant turn, regardless of branch
    pub fn into_text(self) -> String {
        match self {
            CompletionOutput::Text(text) | CompletionOutput::Fallback(text) => text,
        }
    }

    /// Whether the fallback branch was taken
    pub fn is_fallback(&self) -> bool {
        matches!(self, CompletionOutput::Fallback(_))
    }
}

impl ResponsesApiResponse {
    /// Extract the generated text from a decoded response
    ///
    /// Order of preference:
    /// 1. top-level `output_text`
    /// 2. concatenated `output[*].content[*].text` of `output_text` items
    /// 3. string coercion of `output` (fallback branch)
    ///
    /// # Errors
    /// * `GatewayError::Api` if the body carries an error object
    /// * `GatewayError::MalformedResponse` if there is no output at all
    pub fn into_output(self) -> Result<CompletionOutput, GatewayError> {
        if let Some(error) = self.error {
            return Err(GatewayError::Api(error_message(&error)));
        }

        if let Some(text) = self.output_text {
            return Ok(CompletionOutput::Text(text));
        }

        let output = self.output.ok_or_else(|| {
            GatewayError::MalformedResponse("Response contains no output".to_string())
        })?;

        match collect_output_text(&output) {
            Some(text) => Ok(CompletionOutput::Text(text)),
            None => Ok(CompletionOutput::Fallback(coerce_to_string(&output))),
        }
    }
}

/// Concatenate every `output_text` content part, in order
///
/// Returns `None` when no such part exists.
fn collect_output_text(output: &Value) -> Option<String> {
    let parts: Vec<&str> = output
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some(OUTPUT_TEXT_TYPE))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

/// String coercion of an arbitrary JSON value
///
/// Strings are taken verbatim, anything else is rendered as compact JSON.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| coerce_to_string(error))
}
