//! `GET /api/status`: configuration summary without secrets.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::time::Clock;
use crate::webhook::HttpClient;

use super::GatewayState;
use super::files::ALLOWED_EXTENSIONS;

/// Reported service version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration summary. Webhook URLs are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub n8n_configured: bool,
    pub file_upload_configured: bool,
    pub version: &'static str,
    pub max_file_size: usize,
    pub allowed_extensions: &'static [&'static str],
}

pub async fn status<H, C>(State(state): State<GatewayState<H, C>>) -> Json<StatusReport>
where
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    let endpoints = state.relay().endpoints();
    Json(StatusReport {
        n8n_configured: endpoints.message_configured(),
        file_upload_configured: endpoints.file_configured(),
        version: VERSION,
        max_file_size: state.policy().max_file_size(),
        allowed_extensions: &ALLOWED_EXTENSIONS,
    })
}
