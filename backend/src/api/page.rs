//! Chat page
//!
//! Serves the single HTML page. When configuration failed at startup the
//! page carries a top-level notice and its input is disabled.

use crate::api::utils::escape_html;
use crate::gateway::ConfigError;
use crate::state::SharedState;
use axum::{extract::State, response::Html};

const PAGE_TEMPLATE: &str = include_str!("../../static/index.html");
const NOTICE_MARKER: &str = "<!--CONFIG_NOTICE-->";
const READY_MARKER: &str = "__READY__";

/// GET / - The chat page
pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(render_page(state.config_error()))
}

/// Render the page, embedding the configuration notice if there is one
pub fn render_page(config_error: Option<&ConfigError>) -> String {
    match config_error {
        None => PAGE_TEMPLATE
            .replace(NOTICE_MARKER, "")
            .replace(READY_MARKER, "true"),
        Some(e) => {
            let notice = format!(
                r#"<div class="config-error" role="alert">{}</div>"#,
                escape_html(&e.to_string())
            );
            PAGE_TEMPLATE
                .replace(NOTICE_MARKER, &notice)
                .replace(READY_MARKER, "false")
        }
    }
}
