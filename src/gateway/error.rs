//! Gateway error types and their JSON responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::files::{ALLOWED_EXTENSIONS, megabytes};

/// Shown when the chat endpoint fails unexpectedly.
pub const CHAT_APOLOGY: &str = "Sorry, an error occurred while processing your message.";

/// Shown when the upload endpoint fails unexpectedly.
pub const UPLOAD_APOLOGY: &str = "Sorry, an error occurred while processing your file.";

/// Errors that end a gateway request before or instead of a relay call.
///
/// Every variant maps to a fixed status code and a JSON body with an
/// `error` field. Webhook failures are not represented here: they are
/// answered with 200 and a conversational message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Chat request without a usable `message`
    #[error("Message not provided")]
    MissingMessage,

    /// Request without a usable `sessionId`
    #[error("sessionId is required")]
    MissingSession,

    /// Upload request without a `file` part
    #[error("No file was sent")]
    MissingFile,

    /// Upload request whose `file` part has an empty filename
    #[error("No file was selected")]
    EmptyFilename,

    /// Upload whose extension is not in the allow-list
    #[error("File type not allowed. Allowed types: {}", ALLOWED_EXTENSIONS.join(", "))]
    ExtensionNotAllowed,

    /// Upload whose file bytes exceed the ceiling
    #[error("File is too large. Maximum size: {}", size_label(.max))]
    FileTooLarge { max: usize },

    /// Request body rejected by the transport limit
    #[error("File is too large. Maximum size: {}", size_label(.max))]
    PayloadTooLarge { max: usize },

    /// No route matched the path
    #[error("Endpoint not found")]
    NotFound,

    /// The path exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Unexpected failure while handling a request
    #[error("Internal server error: {detail}")]
    Internal {
        /// User-facing apology for the endpoint that failed
        apology: &'static str,
        /// What went wrong, for the logs
        detail: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)] // called from the derived `Display`
fn size_label(max: &usize) -> String {
    megabytes(*max)
}

impl GatewayError {
    /// Wraps an unexpected failure with the endpoint's apology.
    pub fn internal(apology: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            apology,
            detail: detail.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingMessage
            | Self::MissingSession
            | Self::MissingFile
            | Self::EmptyFilename
            | Self::ExtensionNotAllowed
            | Self::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON envelope for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ErrorBody {
    /// Body used for any unexpected 500.
    #[must_use]
    pub fn internal(message: Option<&'static str>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            message,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Internal { apology, .. } => {
                tracing::error!("{self}");
                ErrorBody::internal(Some(*apology))
            }
            Self::NotFound | Self::MethodNotAllowed => {
                tracing::debug!("{self}");
                ErrorBody {
                    error: self.to_string(),
                    message: None,
                }
            }
            _ => {
                tracing::warn!("Rejected request: {self}");
                ErrorBody {
                    error: self.to_string(),
                    message: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
