//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use chat_relay::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, bad config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - bind failure, server I/O error, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a hint for common configuration errors, if one applies.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'chat-relay init' to generate a configuration template.")
        }
        ConfigError::InvalidUrl { field: f, .. } if *f == field::MESSAGE_URL => {
            Some("Set --message-url, N8N_WEBHOOK_URL, or webhook.message_url in the config file.")
        }
        ConfigError::InvalidUrl { field: f, .. } if *f == field::FILE_URL => Some(
            "Set --file-url, N8N_FILE_WEBHOOK_URL, or webhook.file_url in the config file.",
        ),
        ConfigError::InvalidHost { .. } => {
            Some("The host must be an IP address such as 127.0.0.1 or 0.0.0.0.")
        }
        _ => None,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
