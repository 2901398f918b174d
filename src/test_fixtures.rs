//! Shared test fixtures for relay and gateway tests.
//!
//! Provides mock [`HttpClient`] implementations that record what would have
//! been sent to the automation engine.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use axum_test::TestServer;

use crate::gateway::{GatewayState, UploadPolicy, router};
use crate::relay::{RelayService, WebhookEndpoints};
use crate::time::FixedClock;
use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse, JsonWebhook};

/// Timestamp produced by [`fixed_clock`].
pub const FIXED_TIMESTAMP: &str = "2023-11-14T22:13:20.000Z";

pub const MESSAGE_URL: &str = "http://localhost:5678/webhook-test/webhook-chatbot";
pub const FILE_URL: &str = "http://localhost:5678/webhook/upload-file2";

/// Mock client that replays queued responses and records every request.
///
/// Once the queue is empty, further requests fail with a connection error.
#[derive(Debug, Default)]
pub struct RecordingClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Client that answers once with the given JSON body.
    pub fn replying(body: &serde_json::Value) -> Self {
        Self::new(vec![Ok(HttpResponse::json(body))])
    }

    /// Client that fails once with the given error.
    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Decodes the JSON body of the `index`-th request.
    pub fn sent_json(&self, index: usize) -> serde_json::Value {
        let requests = self.requests.lock().unwrap();
        serde_json::from_slice(requests[index].body.as_ref().unwrap()).unwrap()
    }
}

impl HttpClient for RecordingClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(HttpError::Connection(Box::new(std::io::Error::other(
                "no response queued",
            ))))
        })
    }
}

impl HttpClient for Arc<RecordingClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Client whose requests never complete.
#[derive(Debug, Clone, Copy)]
pub struct StalledClient;

impl HttpClient for StalledClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

pub fn endpoints() -> WebhookEndpoints {
    WebhookEndpoints {
        message: url::Url::parse(MESSAGE_URL).unwrap(),
        file: url::Url::parse(FILE_URL).unwrap(),
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
}

/// Gateway in front of `client`, with fixed endpoints and clock.
pub fn test_server<H: HttpClient + 'static>(client: H, policy: UploadPolicy) -> TestServer {
    test_server_with(JsonWebhook::new(client), policy)
}

/// Gateway in front of a preconfigured webhook.
pub fn test_server_with<H: HttpClient + 'static>(
    webhook: JsonWebhook<H>,
    policy: UploadPolicy,
) -> TestServer {
    let relay = RelayService::new(webhook, endpoints()).with_clock(fixed_clock());
    TestServer::new(router(GatewayState::new(relay, policy))).unwrap()
}
