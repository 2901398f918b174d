//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid webhook URL.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the field
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Bind host is not an IP address.
    #[error("Invalid host '{value}': {reason}")]
    InvalidHost {
        /// The invalid value provided
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid size limit.
    #[error("Invalid size for {field}: {reason}")]
    InvalidSize {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in error values.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The message webhook URL field.
    pub const MESSAGE_URL: &str = "message_url";
    /// The file webhook URL field.
    pub const FILE_URL: &str = "file_url";
    /// The webhook timeout field.
    pub const TIMEOUT: &str = "timeout";
    /// The upload size limit field.
    pub const MAX_FILE_SIZE: &str = "max_file_size";
}
