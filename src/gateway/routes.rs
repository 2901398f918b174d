//! Router assembly.

use std::any::Any;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::time::Clock;
use crate::webhook::HttpClient;

use super::error::{ErrorBody, GatewayError};
use super::{GatewayState, chat, index, status, upload};

/// Builds the gateway router.
///
/// Every request passes through tracing, permissive CORS and panic
/// recovery. Request bodies are capped at the policy's body limit.
pub fn router<H, C>(state: GatewayState<H, C>) -> Router
where
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    let body_limit = state.policy().body_limit();

    Router::new()
        .route("/", get(index::index::<H, C>))
        .route("/api/chat", post(chat::send_message::<H, C>))
        .route("/api/upload", post(upload::upload_file::<H, C>))
        .route("/api/status", get(status::status::<H, C>))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

#[allow(clippy::needless_pass_by_value)] // signature required by `CatchPanicLayer`
pub(super) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {detail}");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::internal(None))).into_response()
}
