//! Upload limits, extension allow-list and filename sanitization.

/// File extensions accepted by `POST /api/upload`.
pub const ALLOWED_EXTENSIONS: [&str; 16] = [
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "csv",
    "json", "xml", "zip",
];

/// Name used when sanitization leaves nothing.
const FALLBACK_FILENAME: &str = "upload";

/// Returns true if the filename's last extension is in [`ALLOWED_EXTENSIONS`].
///
/// The comparison is case-insensitive. A name without a dot is rejected.
///
/// ```
/// use chat_relay::gateway::is_allowed_file;
///
/// assert!(is_allowed_file("Report.PDF"));
/// assert!(!is_allowed_file("setup.exe"));
/// assert!(!is_allowed_file("README"));
/// ```
#[must_use]
pub fn is_allowed_file(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        let ext = ext.to_ascii_lowercase();
        ALLOWED_EXTENSIONS.contains(&ext.as_str())
    })
}

/// Reduces a client-supplied filename to a safe, flat name.
///
/// Path separators split the name into words joined by `_`, every character
/// outside `[A-Za-z0-9._-]` is dropped, and leading or trailing `.`/`_` are
/// stripped so the result can never climb out of a directory.
///
/// ```
/// use chat_relay::gateway::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
/// assert_eq!(sanitize_filename("my report.pdf"), "my_report.pdf");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let flattened = name.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Size limits applied to uploads.
///
/// `max_file_size` is checked against the file bytes after the allow-list;
/// `body_limit` caps the whole request body at the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_file_size: usize,
    body_limit: usize,
}

impl UploadPolicy {
    /// Creates a policy where the transport limit equals the file ceiling.
    #[must_use]
    pub const fn new(max_file_size: usize) -> Self {
        Self {
            max_file_size,
            body_limit: max_file_size,
        }
    }

    /// Sets a separate limit for the whole request body.
    #[must_use]
    pub const fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Returns the maximum accepted file size in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Returns the maximum accepted request body size in bytes.
    #[must_use]
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Returns true if a file of `size` bytes exceeds the ceiling.
    #[must_use]
    pub const fn exceeds(&self, size: usize) -> bool {
        size > self.max_file_size
    }
}

/// Formats a byte count as megabytes with one decimal, e.g. `16.0MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // display only
pub fn megabytes(bytes: usize) -> String {
    format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
}
