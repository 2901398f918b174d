//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// HTTP server section
    #[serde(default)]
    pub server: ServerSection,

    /// Webhook section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Upload limits section
    #[serde(default)]
    pub upload: UploadSection,
}

/// HTTP server configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Bind address
    pub host: Option<String>,

    /// Listening port
    pub port: Option<u16>,

    /// HTML page served at `/`
    pub index_file: Option<String>,

    /// Directory for temporary upload data
    pub upload_dir: Option<String>,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook receiving chat messages
    pub message_url: Option<String>,

    /// Webhook receiving file uploads
    pub file_url: Option<String>,

    /// Timeout in seconds for each webhook call
    pub timeout: Option<u64>,
}

/// Upload limits section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadSection {
    /// Maximum upload size in bytes
    pub max_file_size: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# chat-relay configuration file
# Values here are overridden by command-line flags and their environment
# variables (CHAT_RELAY_HOST, PORT, N8N_WEBHOOK_URL, N8N_FILE_WEBHOOK_URL).

[server]
# Address to bind (default: 127.0.0.1)
# host = "127.0.0.1"

# Port to listen on (default: 5000)
# port = 5000

# HTML page served at / (default: index.html)
# index_file = "index.html"

# Directory for temporary upload data, created at start-up (default: temp_uploads)
# upload_dir = "temp_uploads"

[webhook]
# Webhook receiving chat messages
message_url = "http://localhost:5678/webhook-test/webhook-chatbot"

# Webhook receiving file uploads
file_url = "http://localhost:5678/webhook/upload-file2"

# Timeout in seconds for each webhook call (default: 60)
# timeout = 60

[upload]
# Maximum upload size in bytes (default: 16777216, i.e. 16 MiB)
# max_file_size = 16777216
"#
    .to_string()
}
