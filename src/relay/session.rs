//! Session identifiers and chat requests.

use std::fmt;

use serde::Serialize;

/// Opaque, caller-supplied session identifier.
///
/// Only presence is validated: any non-empty string is accepted as-is
/// and echoed back unchanged in payloads and responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a raw identifier, returning `None` if it is empty.
    ///
    /// ```
    /// use chat_relay::relay::SessionId;
    ///
    /// assert!(SessionId::new("s1").is_some());
    /// assert!(SessionId::new("").is_none());
    /// ```
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A plain chat message bound to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    message: String,
    session: SessionId,
}

impl ChatRequest {
    /// Creates a request, returning `None` if the message is empty.
    #[must_use]
    pub fn new(message: impl Into<String>, session: SessionId) -> Option<Self> {
        let message = message.into();
        if message.is_empty() {
            return None;
        }
        Some(Self { message, session })
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the session this message belongs to.
    #[must_use]
    pub const fn session(&self) -> &SessionId {
        &self.session
    }
}
