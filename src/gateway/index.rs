//! `GET /`: the chat page.

use std::io::ErrorKind;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::GatewayState;

pub async fn index<H, C>(State(state): State<GatewayState<H, C>>) -> Response
where
    H: Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    let path = state.index_file();
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Chat page not found: {}", path.display());
            (
                StatusCode::NOT_FOUND,
                format!("{} was not found. Place it next to the server.", path.display()),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read chat page {}: {e}", path.display());
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
