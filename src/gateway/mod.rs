//! HTTP gateway in front of the relay service.
//!
//! Routes:
//! - `GET /` serves the chat page
//! - `POST /api/chat` relays a plain message
//! - `POST /api/upload` relays a file with an optional message
//! - `GET /api/status` reports configuration without secrets
//!
//! Validation failures are answered with 4xx before any webhook call.
//! Webhook failures are answered with 200 and a conversational message.

mod chat;
mod error;
mod files;
mod index;
mod routes;
mod state;
mod status;
mod upload;

#[cfg(test)]
mod files_tests;
#[cfg(test)]
mod upload_tests;

pub use chat::{ChatBody, ChatResponse};
pub use error::GatewayError;
pub use files::{ALLOWED_EXTENSIONS, UploadPolicy, is_allowed_file, sanitize_filename};
pub use routes::router;
pub use state::GatewayState;
pub use status::StatusReport;
pub use upload::UploadResponse;
