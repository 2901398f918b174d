//! `POST /api/chat`: relay a plain message.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::{ChatRequest, RelayOutcome, SessionId};
use crate::time::Clock;
use crate::webhook::HttpClient;

use super::GatewayState;
use super::error::{CHAT_APOLOGY, GatewayError};

/// Inbound chat body. Both fields are optional so that their absence can be
/// reported with a field-specific 400 instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

impl ChatBody {
    /// Parses a raw request body.
    ///
    /// Only a JSON object is a chat body; arrays and scalars are rejected
    /// even when their values would line up with the fields.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] with the chat apology when the
    /// body is not a JSON object or a field has the wrong type.
    pub fn parse(body: &[u8]) -> Result<Self, GatewayError> {
        let invalid = |detail: String| GatewayError::internal(CHAT_APOLOGY, detail);

        let value: Value =
            serde_json::from_slice(body).map_err(|e| invalid(format!("Invalid chat body: {e}")))?;
        if !value.is_object() {
            return Err(invalid("Chat body is not a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| invalid(format!("Invalid chat body: {e}")))
    }

    /// Validates the body into a relayable request.
    ///
    /// `message` is checked before `sessionId`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingMessage`] or
    /// [`GatewayError::MissingSession`] for absent or empty fields.
    pub fn into_request(self) -> Result<ChatRequest, GatewayError> {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .ok_or(GatewayError::MissingMessage)?;
        let session = self
            .session_id
            .and_then(SessionId::new)
            .ok_or(GatewayError::MissingSession)?;

        ChatRequest::new(message, session).ok_or(GatewayError::MissingMessage)
    }
}

/// Reply sent back to the chat page.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub timestamp: String,
}

impl From<RelayOutcome> for ChatResponse {
    fn from(outcome: RelayOutcome) -> Self {
        Self {
            message: outcome.message,
            session_id: outcome.session_id,
            timestamp: outcome.timestamp,
        }
    }
}

pub async fn send_message<H, C>(
    State(state): State<GatewayState<H, C>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, GatewayError>
where
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge {
                max: state.policy().max_file_size(),
            }
        } else {
            GatewayError::internal(CHAT_APOLOGY, rejection.body_text())
        }
    })?;

    let request = ChatBody::parse(&body)?.into_request()?;

    let outcome = state.relay().relay_message(&request).await;
    if !outcome.is_success() {
        tracing::warn!(session = %outcome.session_id, "Chat relay did not succeed: {:?}", outcome.kind);
    }

    Ok(Json(ChatResponse::from(outcome)))
}
