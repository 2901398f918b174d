//! `POST /api/upload`: relay a file with an optional message.

use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::relay::{FileAttachment, RelayOutcome, SessionId};
use crate::time::Clock;
use crate::webhook::HttpClient;

use super::GatewayState;
use super::error::{GatewayError, UPLOAD_APOLOGY};
use super::files::{UploadPolicy, is_allowed_file, sanitize_filename};

/// Content type assumed when the file part declares none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reply sent back after an upload.
///
/// `filename` and `filesize` are only present when the webhook answered.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<usize>,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub timestamp: String,
}

impl UploadResponse {
    fn new(outcome: RelayOutcome, attachment: &FileAttachment) -> Self {
        let answered = outcome.is_success();
        Self {
            message: outcome.message,
            filename: answered.then(|| attachment.filename().to_string()),
            filesize: answered.then(|| attachment.size()),
            session_id: outcome.session_id,
            timestamp: outcome.timestamp,
        }
    }
}

pub async fn upload_file<H, C>(
    State(state): State<GatewayState<H, C>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, GatewayError>
where
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    let Ok(multipart) = multipart else {
        return Err(GatewayError::MissingFile);
    };

    let form = UploadForm::read(multipart, state.policy()).await?;
    let upload = form.validate(state.policy())?;

    let outcome = state
        .relay()
        .relay_file(&upload.attachment, &upload.session, &upload.message)
        .await;
    if !outcome.is_success() {
        tracing::warn!(session = %outcome.session_id, "File relay did not succeed: {:?}", outcome.kind);
    }

    Ok(Json(UploadResponse::new(outcome, &upload.attachment)))
}

/// What happened to the bytes of the file part.
#[derive(Debug)]
enum FileContent {
    /// Read in full, within the ceiling
    Buffered(Vec<u8>),
    /// Not read because the name was empty or not allowed
    Skipped,
    /// Reading stopped once the ceiling was passed
    TooLarge,
}

#[derive(Debug)]
struct FilePart {
    filename: String,
    content_type: Option<String>,
    content: FileContent,
}

impl FilePart {
    async fn read(
        mut field: Field<'_>,
        filename: String,
        policy: &UploadPolicy,
    ) -> Result<Self, GatewayError> {
        let content_type = field.content_type().map(ToString::to_string);
        if filename.is_empty() || !is_allowed_file(&filename) {
            return Ok(Self {
                filename,
                content_type,
                content: FileContent::Skipped,
            });
        }

        let mut buffer = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(&e, policy))?
        {
            if policy.exceeds(buffer.len() + chunk.len()) {
                return Ok(Self {
                    filename,
                    content_type,
                    content: FileContent::TooLarge,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        Ok(Self {
            filename,
            content_type,
            content: FileContent::Buffered(buffer),
        })
    }
}

/// The parts of an upload form the relay cares about.
///
/// Only the first occurrence of each field is kept; unknown fields are
/// skipped without being buffered.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<FilePart>,
    session_id: Option<String>,
    message: Option<String>,
}

/// An upload that passed every check.
#[derive(Debug)]
struct ValidUpload {
    attachment: FileAttachment,
    session: SessionId,
    message: String,
}

impl UploadForm {
    async fn read(mut multipart: Multipart, policy: &UploadPolicy) -> Result<Self, GatewayError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, policy))?
        {
            let name = field.name().map(ToString::to_string);
            match name.as_deref() {
                Some("file") if form.file.is_none() => {
                    // A part named `file` without a filename is a plain text field.
                    if let Some(filename) = field.file_name().map(ToString::to_string) {
                        form.file = Some(FilePart::read(field, filename, policy).await?);
                    }
                }
                Some("sessionId") if form.session_id.is_none() => {
                    form.session_id = Some(text(field, policy).await?);
                }
                Some("message") if form.message.is_none() => {
                    form.message = Some(text(field, policy).await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Applies the upload checks in order: file present, filename present,
    /// session present, extension allowed, size within the ceiling.
    fn validate(self, policy: &UploadPolicy) -> Result<ValidUpload, GatewayError> {
        let file = self.file.ok_or(GatewayError::MissingFile)?;
        if file.filename.is_empty() {
            return Err(GatewayError::EmptyFilename);
        }
        let session = self
            .session_id
            .and_then(SessionId::new)
            .ok_or(GatewayError::MissingSession)?;
        if !is_allowed_file(&file.filename) {
            return Err(GatewayError::ExtensionNotAllowed);
        }

        let bytes = match file.content {
            FileContent::Buffered(bytes) => bytes,
            FileContent::TooLarge => {
                return Err(GatewayError::FileTooLarge {
                    max: policy.max_file_size(),
                });
            }
            FileContent::Skipped => return Err(GatewayError::ExtensionNotAllowed),
        };

        let content_type = file
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let attachment =
            FileAttachment::encode(sanitize_filename(&file.filename), content_type, &bytes);

        Ok(ValidUpload {
            attachment,
            session,
            message: self.message.unwrap_or_default(),
        })
    }
}

async fn text(field: Field<'_>, policy: &UploadPolicy) -> Result<String, GatewayError> {
    field.text().await.map_err(|e| multipart_error(&e, policy))
}

fn multipart_error(error: &MultipartError, policy: &UploadPolicy) -> GatewayError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge {
            max: policy.max_file_size(),
        }
    } else {
        GatewayError::internal(UPLOAD_APOLOGY, error.body_text())
    }
}
