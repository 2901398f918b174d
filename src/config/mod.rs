//! Configuration layer for chat-relay.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line, or through the
//!    environment variables bound to them (`CHAT_RELAY_HOST`, `PORT`,
//!    `N8N_WEBHOOK_URL`, `N8N_FILE_WEBHOOK_URL`)
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Every setting has a default, so the server starts with no configuration at all.
//!
//! # Webhook URLs
//!
//! The placeholder message URL shipped in sample configurations is accepted but
//! reported as "not configured" by `/api/status`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{ServerSection, TomlConfig, UploadSection, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
