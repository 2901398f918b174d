//! Error types for webhook calls.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without dictating
/// how the failure is presented to the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for a single webhook call.
///
/// Never escapes [`JsonWebhook::call`](super::JsonWebhook::call); it is
/// classified there into a [`WebhookReply`](super::WebhookReply).
#[derive(Debug, Error)]
pub enum CallError {
    /// The payload could not be serialized to JSON.
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// Transport-level failure, including the deadline expiring.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The webhook answered with a non-2xx status.
    #[error("{status} for url: {url}")]
    Status {
        /// Status returned by the webhook
        status: http::StatusCode,
        /// Endpoint that was called
        url: url::Url,
    },

    /// The webhook answered with a body that is not valid JSON.
    #[error("Invalid JSON in webhook response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl CallError {
    /// Returns true if the call failed because the deadline expired.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(HttpError::Timeout))
    }
}
