//! JSON payloads posted to the automation engine.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use super::{ChatRequest, SessionId};

/// Value of the `action` field on file payloads.
pub const FILE_UPLOAD_ACTION: &str = "file_upload";

/// Body posted to the message webhook.
#[derive(Debug, Serialize)]
pub struct ChatPayload<'a> {
    /// User message
    pub message: &'a str,
    /// Caller session
    #[serde(rename = "sessionId")]
    pub session_id: &'a SessionId,
}

impl<'a> From<&'a ChatRequest> for ChatPayload<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            message: request.message(),
            session_id: request.session(),
        }
    }
}

/// An uploaded file, already base64-encoded.
///
/// `size` is the length of the original bytes, not of the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    filename: String,
    size: usize,
    content_type: String,
    encoded_content: String,
}

impl FileAttachment {
    /// Encodes raw file bytes into an attachment.
    ///
    /// ```
    /// use chat_relay::relay::FileAttachment;
    ///
    /// let file = FileAttachment::encode("a.txt", "text/plain", b"hello");
    /// assert_eq!(file.size(), 5);
    /// assert_eq!(file.encoded_content(), "aGVsbG8=");
    /// ```
    #[must_use]
    pub fn encode(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            filename: filename.into(),
            size: bytes.len(),
            content_type: content_type.into(),
            encoded_content: STANDARD.encode(bytes),
        }
    }

    /// Returns the (sanitized) file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the original size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the standard, padded base64 encoding of the content.
    #[must_use]
    pub fn encoded_content(&self) -> &str {
        &self.encoded_content
    }
}

/// Body posted to the file webhook.
#[derive(Debug, Serialize)]
pub struct FilePayload<'a> {
    filename: &'a str,
    filesize: usize,
    filetype: &'a str,
    file_base64: &'a str,
    message: &'a str,
    #[serde(rename = "sessionId")]
    session_id: &'a SessionId,
    timestamp: String,
    action: &'static str,
}

impl<'a> FilePayload<'a> {
    /// Builds the payload for an attachment and its accompanying message.
    #[must_use]
    pub fn new(
        attachment: &'a FileAttachment,
        session_id: &'a SessionId,
        message: &'a str,
        timestamp: String,
    ) -> Self {
        Self {
            filename: attachment.filename(),
            filesize: attachment.size(),
            filetype: attachment.content_type(),
            file_base64: attachment.encoded_content(),
            message,
            session_id,
            timestamp,
            action: FILE_UPLOAD_ACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionId {
        SessionId::new("s1").unwrap()
    }

    #[test]
    fn chat_payload_has_message_and_session_id() {
        let request = ChatRequest::new("hola", session()).unwrap();

        let json = serde_json::to_value(ChatPayload::from(&request)).unwrap();

        assert_eq!(json, serde_json::json!({"message": "hola", "sessionId": "s1"}));
    }

    #[test]
    fn encoded_content_decodes_to_original_bytes() {
        let bytes: Vec<u8> = (0..=255).cycle().take(1_000).collect();

        let file = FileAttachment::encode("blob.zip", "application/zip", &bytes);

        assert_eq!(file.size(), 1_000);
        assert_eq!(STANDARD.decode(file.encoded_content()).unwrap(), bytes);
        assert_ne!(file.encoded_content().len(), file.size());
    }

    #[test]
    fn empty_file_encodes_to_empty_string() {
        let file = FileAttachment::encode("empty.txt", "text/plain", &[]);

        assert_eq!(file.size(), 0);
        assert_eq!(file.encoded_content(), "");
    }

    #[test]
    fn file_payload_carries_every_field() {
        let file = FileAttachment::encode("notes.txt", "text/plain", b"hello world");
        let session = session();

        let payload = FilePayload::new(&file, &session, "summarize", "2024-01-01T00:00:00.000Z".into());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "filename": "notes.txt",
                "filesize": 11,
                "filetype": "text/plain",
                "file_base64": "aGVsbG8gd29ybGQ=",
                "message": "summarize",
                "sessionId": "s1",
                "timestamp": "2024-01-01T00:00:00.000Z",
                "action": "file_upload",
            })
        );
    }

    #[test]
    fn file_payload_allows_empty_message() {
        let file = FileAttachment::encode("a.csv", "text/csv", b"a,b\n1,2\n");
        let session = session();

        let json = serde_json::to_value(FilePayload::new(&file, &session, "", String::new())).unwrap();

        assert_eq!(json["message"], "");
        assert_eq!(json["filesize"], 8);
    }
}
