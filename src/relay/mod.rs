//! Relay core: payload encoding and session-correlated webhook calls.
//!
//! This module provides:
//! - Session and request types ([`SessionId`], [`ChatRequest`])
//! - Payload encoding ([`ChatPayload`], [`FileAttachment`], [`FilePayload`])
//! - The uniform call result ([`RelayOutcome`])
//! - The relay service for both flows ([`RelayService`], [`WebhookEndpoints`])

mod outcome;
mod payload;
mod service;
mod session;


pub use outcome::RelayOutcome;
pub use payload::{ChatPayload, FILE_UPLOAD_ACTION, FileAttachment, FilePayload};
pub use service::{PLACEHOLDER_MESSAGE_URL, RelayService, WebhookEndpoints};
pub use session::{ChatRequest, SessionId};
