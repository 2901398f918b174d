//! chat-relay: web chat gateway for automation webhooks
//!
//! A library for relaying browser chat messages and file uploads to
//! external automation webhooks and returning their replies.
//!
//! - [`webhook`]: outbound JSON calls with a deadline and reply classification
//! - [`relay`]: session-aware chat and file relay on top of the webhook client
//! - [`gateway`]: the HTTP surface (axum router, validation, error responses)
//! - [`config`]: CLI, TOML and defaults merged into a validated configuration

pub mod config;
pub mod gateway;
pub mod relay;
pub mod time;
pub mod webhook;

#[cfg(test)]
mod test_fixtures;
