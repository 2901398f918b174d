//! Relay service for the chat and file flows.

use url::Url;

use crate::time::{Clock, SystemClock};
use crate::webhook::{HttpClient, JsonWebhook, ReplyTexts};

use super::{ChatPayload, ChatRequest, FileAttachment, FilePayload, RelayOutcome, SessionId};

/// Message URL shipped in sample configurations; treated as "not configured".
pub const PLACEHOLDER_MESSAGE_URL: &str = "https://tu-instancia-n8n.com/webhook/webhook-chatbot";

/// Number of message characters included in log lines.
const LOG_PREVIEW_CHARS: usize = 50;

/// Target URLs for the two relay flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoints {
    /// Receives plain chat messages
    pub message: Url,
    /// Receives file uploads
    pub file: Url,
}

impl WebhookEndpoints {
    /// Returns true if the message endpoint points somewhere real.
    #[must_use]
    pub fn message_configured(&self) -> bool {
        self.message.has_host() && self.message.as_str() != PLACEHOLDER_MESSAGE_URL
    }

    /// Returns true if the file endpoint points somewhere real.
    #[must_use]
    pub fn file_configured(&self) -> bool {
        self.file.has_host()
    }
}

/// Relays chat messages and files to their webhooks.
///
/// Both operations return a [`RelayOutcome`] carrying the caller's session,
/// whatever happened on the wire.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The clock used for timestamps (defaults to [`SystemClock`])
#[derive(Debug)]
pub struct RelayService<H, C = SystemClock> {
    webhook: JsonWebhook<H>,
    endpoints: WebhookEndpoints,
    clock: C,
}

impl<H> RelayService<H, SystemClock> {
    /// Creates a relay service using the system clock.
    #[must_use]
    pub const fn new(webhook: JsonWebhook<H>, endpoints: WebhookEndpoints) -> Self {
        Self {
            webhook,
            endpoints,
            clock: SystemClock,
        }
    }
}

impl<H, C> RelayService<H, C> {
    /// Replaces the clock used for timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> RelayService<H, C2> {
        RelayService {
            webhook: self.webhook,
            endpoints: self.endpoints,
            clock,
        }
    }

    /// Returns the configured endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &WebhookEndpoints {
        &self.endpoints
    }
}

impl<H: HttpClient, C: Clock> RelayService<H, C> {
    /// Relays a chat message to the message webhook.
    pub async fn relay_message(&self, request: &ChatRequest) -> RelayOutcome {
        tracing::info!(
            session = %request.session(),
            "Relaying message: {}",
            preview(request.message())
        );

        let payload = ChatPayload::from(request);
        let reply = self
            .webhook
            .call(&self.endpoints.message, &payload, &ReplyTexts::chat())
            .await;

        RelayOutcome::new(request.session().clone(), reply, self.clock.timestamp())
    }

    /// Relays a file and its accompanying message to the file webhook.
    pub async fn relay_file(
        &self,
        attachment: &FileAttachment,
        session: &SessionId,
        message: &str,
    ) -> RelayOutcome {
        tracing::info!(
            session = %session,
            filename = attachment.filename(),
            filesize = attachment.size(),
            "Relaying file"
        );

        let payload = FilePayload::new(attachment, session, message, self.clock.timestamp());
        let texts = ReplyTexts::file_upload(attachment.filename());
        let reply = self
            .webhook
            .call(&self.endpoints.file, &payload, &texts)
            .await;

        RelayOutcome::new(session.clone(), reply, self.clock.timestamp())
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
