//! API utility functions
//!
//! Validation and escaping helpers shared by the handlers.

use crate::error::AppError;

/// Maximum session id length in characters
pub const MAX_SESSION_ID_LENGTH: usize = 64;

/// Validate a client-supplied session id
///
/// # Returns
/// * `Ok(())` - Id is non-empty, bounded, and limited to `[A-Za-z0-9_-]`
/// * `Err(AppError)` - Id is invalid
pub fn validate_session_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::InvalidRequest(
            "Session id cannot be empty".to_string(),
        ));
    }
    if id.len() > MAX_SESSION_ID_LENGTH {
        return Err(AppError::InvalidRequest(format!(
            "Session id exceeds maximum length of {} characters",
            MAX_SESSION_ID_LENGTH
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidRequest(
            "Session id contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
