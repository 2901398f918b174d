//! Classified result of a webhook call.

/// How a webhook call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The webhook answered with a 2xx JSON body.
    Answered,
    /// The deadline expired before the full response arrived.
    TimedOut,
    /// Any other transport or protocol failure.
    Failed,
}

/// A webhook call result that always carries renderable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    /// How the call ended
    pub kind: ReplyKind,
    /// Text to show the user, whether the call succeeded or not
    pub message: String,
}

impl WebhookReply {
    /// Creates a reply for an answered call.
    #[must_use]
    pub fn answered(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Answered,
            message: message.into(),
        }
    }

    /// Creates a reply for a call that exceeded its deadline.
    #[must_use]
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::TimedOut,
            message: message.into(),
        }
    }

    /// Creates a reply for a call that failed for any other reason.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Failed,
            message: message.into(),
        }
    }

    /// Returns true if the webhook answered.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, ReplyKind::Answered)
    }
}

/// Per-flow texts used when the webhook cannot supply its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTexts {
    /// Shown when the deadline expires
    pub timeout: String,
    /// Shown when the webhook answers without a `message` field
    pub fallback: String,
}

impl ReplyTexts {
    /// Texts for the plain chat flow.
    #[must_use]
    pub fn chat() -> Self {
        Self {
            timeout: "Sorry, the service is taking too long to respond. Please try again."
                .to_string(),
            fallback: "Sorry, I could not obtain a reply from the assistant.".to_string(),
        }
    }

    /// Texts for the file upload flow.
    #[must_use]
    pub fn file_upload(filename: &str) -> Self {
        Self {
            timeout: "Sorry, the upload service is taking too long to respond.".to_string(),
            fallback: format!("File {filename} and message received successfully."),
        }
    }

    /// Message shown for a non-timeout failure.
    #[must_use]
    pub fn connection_error(cause: &impl std::fmt::Display) -> String {
        format!("Sorry, a connection error occurred: {cause}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_answered_is_success() {
        assert!(WebhookReply::answered("hi").is_success());
        assert!(!WebhookReply::timed_out("slow").is_success());
        assert!(!WebhookReply::failed("down").is_success());
    }

    #[test]
    fn chat_and_upload_timeouts_differ() {
        assert_ne!(
            ReplyTexts::chat().timeout,
            ReplyTexts::file_upload("a.txt").timeout
        );
    }

    #[test]
    fn upload_fallback_names_the_file() {
        let texts = ReplyTexts::file_upload("report.pdf");
        assert!(texts.fallback.contains("report.pdf"));
    }

    #[test]
    fn connection_error_embeds_cause() {
        let message = ReplyTexts::connection_error(&"connection refused");
        assert!(message.ends_with("connection refused"));
    }
}
