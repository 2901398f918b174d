//! Bounded JSON webhook calls.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{CallError, HttpClient, HttpError, HttpRequest, ReplyTexts, WebhookReply};

/// Default deadline for a webhook call.
pub const DEFAULT_TIMEOUT: Duration = crate::config::defaults::timeout();

/// Posts JSON payloads to webhooks and classifies the outcome.
///
/// [`call`](Self::call) never returns an error: every failure becomes a
/// [`WebhookReply`] whose text can be shown to the user as-is.
///
/// The deadline covers the whole exchange, from sending the request
/// to receiving the last byte of the response body.
///
/// # Example
///
/// ```
/// use chat_relay::webhook::{JsonWebhook, ReqwestClient};
/// use std::time::Duration;
///
/// let webhook = JsonWebhook::new(ReqwestClient::new()).with_timeout(Duration::from_secs(30));
/// assert_eq!(webhook.timeout(), Duration::from_secs(30));
/// ```
#[derive(Debug)]
pub struct JsonWebhook<H> {
    client: H,
    timeout: Duration,
}

impl<H> JsonWebhook<H> {
    /// Creates a webhook caller with the default 60 second deadline.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the deadline for each call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient> JsonWebhook<H> {
    /// Posts `payload` to `endpoint` and returns the classified reply.
    ///
    /// - 2xx with a `message` field: that text.
    /// - 2xx without one: `texts.fallback`.
    /// - Deadline exceeded: `texts.timeout`.
    /// - Anything else: a connection error message embedding the cause.
    pub async fn call<P>(&self, endpoint: &url::Url, payload: &P, texts: &ReplyTexts) -> WebhookReply
    where
        P: Serialize + ?Sized + Sync,
    {
        match self.try_call(endpoint, payload).await {
            Ok(body) => {
                tracing::info!(%endpoint, "Webhook replied: {body}");
                let message = reply_message(&body).unwrap_or_else(|| texts.fallback.clone());
                WebhookReply::answered(message)
            }
            Err(e) if e.is_timeout() => {
                tracing::error!(
                    %endpoint,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Webhook call timed out"
                );
                WebhookReply::timed_out(texts.timeout.clone())
            }
            Err(e) => {
                tracing::error!(%endpoint, "Webhook call failed: {e}");
                WebhookReply::failed(ReplyTexts::connection_error(&e))
            }
        }
    }

    async fn try_call<P>(&self, endpoint: &url::Url, payload: &P) -> Result<Value, CallError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let body = serde_json::to_vec(payload).map_err(CallError::Encode)?;
        let request = HttpRequest::post_json(endpoint.clone(), body);

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| HttpError::Timeout)??;

        if !response.is_success() {
            return Err(CallError::Status {
                status: response.status,
                url: endpoint.clone(),
            });
        }

        serde_json::from_slice(&response.body).map_err(CallError::Decode)
    }
}

/// Extracts the `message` field from a webhook reply body.
///
/// Bodies that are not objects, and `null` messages, count as missing.
fn reply_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
