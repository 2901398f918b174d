//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default bind address.
pub const HOST: &str = "127.0.0.1";

/// Default listening port.
pub const PORT: u16 = 5000;

/// Default chat page served at `/`.
pub const INDEX_FILE: &str = "index.html";

/// Default directory for temporary upload data.
pub const UPLOAD_DIR: &str = "temp_uploads";

/// Default webhook for plain chat messages.
pub const MESSAGE_URL: &str = "http://localhost:5678/webhook-test/webhook-chatbot";

/// Default webhook for file uploads.
pub const FILE_URL: &str = "http://localhost:5678/webhook/upload-file2";

/// Default webhook timeout in seconds.
pub const TIMEOUT_SECS: u64 = 60;

/// Default maximum upload size in bytes (16 MiB).
pub const MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Default webhook timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
