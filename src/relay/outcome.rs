//! Uniform result of a relay call.

use crate::webhook::{ReplyKind, WebhookReply};

use super::SessionId;

/// The result of relaying one request, stamped with its session.
///
/// Failed outcomes still carry a message that can be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// Session supplied on the inbound request
    pub session_id: SessionId,
    /// How the webhook call ended
    pub kind: ReplyKind,
    /// Reply text, or failure text for failed calls
    pub message: String,
    /// When the outcome was produced (RFC 3339)
    pub timestamp: String,
}

impl RelayOutcome {
    /// Stamps a webhook reply with its session and timestamp.
    #[must_use]
    pub fn new(session_id: SessionId, reply: WebhookReply, timestamp: String) -> Self {
        Self {
            session_id,
            kind: reply.kind,
            message: reply.message,
            timestamp,
        }
    }

    /// Returns true if the webhook answered.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, ReplyKind::Answered)
    }
}
