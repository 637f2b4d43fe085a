//! Gateway-specific error types
//!
//! Errors that can occur while talking to the remote completion endpoint
//! (transport failures, rejected requests, unusable response bodies).

use thiserror::Error;

/// Errors returned by a [`CompletionGateway`](super::CompletionGateway)
///
/// The `Display` output of every variant is the bare underlying message; the
/// chat flow adds the user-facing prefix when it turns a failure into a turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced an HTTP response (DNS, connect, timeout)
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-success status (includes 401/403)
    #[error("Error code: {status} - {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, as returned by the endpoint
        body: String,
    },

    /// The endpoint answered 2xx but reported an error object in the body
    #[error("{0}")]
    Api(String),

    /// The body could not be decoded or carried no usable output
    #[error("{0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
