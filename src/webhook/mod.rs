//! Webhook layer for relaying payloads to the automation engine.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Bounded JSON webhook calls that never fail outward ([`JsonWebhook`], [`WebhookReply`])

mod client;
mod error;
mod http;
mod reply;
mod sender;


pub use client::ReqwestClient;
pub use error::{CallError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use reply::{ReplyKind, ReplyTexts, WebhookReply};
pub use sender::JsonWebhook;
