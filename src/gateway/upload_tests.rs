//! Tests for `POST /api/upload`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use super::UploadPolicy;
use super::error::UPLOAD_APOLOGY;
use crate::test_fixtures::{
    FILE_URL, FIXED_TIMESTAMP, RecordingClient, StalledClient, test_server, test_server_with,
};
use crate::webhook::{JsonWebhook, ReplyTexts};

const MAX: usize = 16 * 1024 * 1024;

fn file(name: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec()).file_name(name)
}

#[tokio::test]
async fn relays_file_and_returns_reply() {
    let client = Arc::new(RecordingClient::replying(&json!({"message": "got your csv"})));
    let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));
    let content = b"a,b\n1,2\n";

    let response = server
        .post("/api/upload")
        .multipart(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_text("message", "summarize please")
                .add_part("file", file("data.csv", content).mime_type("text/csv")),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "message": "got your csv",
            "filename": "data.csv",
            "filesize": content.len(),
            "sessionId": "s1",
            "timestamp": FIXED_TIMESTAMP,
        })
    );

    assert_eq!(client.requests()[0].url.as_str(), FILE_URL);
    let sent = client.sent_json(0);
    assert_eq!(sent["filename"], "data.csv");
    assert_eq!(sent["filesize"], content.len());
    assert_eq!(sent["filetype"], "text/csv");
    assert_eq!(sent["message"], "summarize please");
    assert_eq!(sent["sessionId"], "s1");
    assert_eq!(sent["action"], "file_upload");
    let decoded = STANDARD.decode(sent["file_base64"].as_str().unwrap()).unwrap();
    assert_eq!(decoded, content);
}

#[tokio::test]
async fn filename_is_sanitized_and_message_defaults_to_empty() {
    let client = Arc::new(RecordingClient::replying(&json!({"message": "ok"})));
    let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));

    let response = server
        .post("/api/upload")
        .multipart(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_part("file", file("../../secret notes.txt", b"hi")),
        )
        .await;

    response.assert_status_ok();
    let sent = client.sent_json(0);
    assert_eq!(sent["filename"], "secret_notes.txt");
    assert_eq!(sent["message"], "");
    assert_eq!(sent["filetype"], "application/octet-stream");
}

#[tokio::test]
async fn failed_relay_omits_file_details() {
    let client = Arc::new(RecordingClient::default());
    let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));

    let response = server
        .post("/api/upload")
        .multipart(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_part("file", file("a.txt", b"hi")),
        )
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["sessionId"], "s1");
    assert!(body.get("filename").is_none());
    assert!(body.get("filesize").is_none());
    assert!(body["message"].as_str().unwrap().starts_with("Sorry, a connection error"));
}

#[tokio::test]
async fn stalled_webhook_answers_with_upload_timeout_text() {
    let webhook = JsonWebhook::new(StalledClient).with_timeout(Duration::from_millis(50));
    let server = test_server_with(webhook, UploadPolicy::new(MAX));

    let response = server
        .post("/api/upload")
        .multipart(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_part("file", file("a.txt", b"hi")),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        ReplyTexts::file_upload("a.txt").timeout
    );
}

mod validation {
    use super::*;

    async fn rejected(form: MultipartForm, status: StatusCode, expected: &str) {
        let client = Arc::new(RecordingClient::default());
        let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));

        let response = server.post("/api/upload").multipart(form).await;

        response.assert_status(status);
        assert_eq!(response.json::<Value>()["error"], expected);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn missing_file_part() {
        rejected(
            MultipartForm::new().add_text("sessionId", "s1"),
            StatusCode::BAD_REQUEST,
            "No file was sent",
        )
        .await;
    }

    #[tokio::test]
    async fn file_field_without_filename_is_not_a_file() {
        rejected(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_text("file", "just text"),
            StatusCode::BAD_REQUEST,
            "No file was sent",
        )
        .await;
    }

    #[tokio::test]
    async fn empty_filename() {
        rejected(
            MultipartForm::new()
                .add_text("sessionId", "s1")
                .add_part("file", file("", b"")),
            StatusCode::BAD_REQUEST,
            "No file was selected",
        )
        .await;
    }

    #[tokio::test]
    async fn missing_session() {
        rejected(
            MultipartForm::new().add_part("file", file("a.txt", b"hi")),
            StatusCode::BAD_REQUEST,
            "sessionId is required",
        )
        .await;
    }

    #[tokio::test]
    async fn session_is_checked_before_extension() {
        rejected(
            MultipartForm::new().add_part("file", file("setup.exe", b"MZ")),
            StatusCode::BAD_REQUEST,
            "sessionId is required",
        )
        .await;
    }

    #[tokio::test]
    async fn disallowed_extension() {
        let client = Arc::new(RecordingClient::default());
        let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));

        let response = server
            .post("/api/upload")
            .multipart(
                MultipartForm::new()
                    .add_text("sessionId", "s1")
                    .add_part("file", file("setup.exe", b"MZ")),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("File type not allowed. Allowed types: "));
        assert!(error.contains("pdf"));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn truncated_multipart_is_internal_error() {
        let client = Arc::new(RecordingClient::default());
        let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));
        let body = concat!(
            "--X\r\n",
            "Content-Disposition: form-data; name=\"sessionId\"\r\n\r\n",
            "s1\r\n",
            "--X\r\n",
            "Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\r\n",
            "abc",
        );

        let response = server
            .post("/api/upload")
            .bytes(Bytes::from_static(body.as_bytes()))
            .content_type("multipart/form-data; boundary=X")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Internal server error", "message": UPLOAD_APOLOGY})
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn not_multipart() {
        let client = Arc::new(RecordingClient::default());
        let server = test_server(Arc::clone(&client), UploadPolicy::new(MAX));

        let response = server
            .post("/api/upload")
            .json(&json!({"sessionId": "s1"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "No file was sent"}));
        assert_eq!(client.calls(), 0);
    }
}

mod size {
    use super::*;

    #[tokio::test]
    async fn file_over_ceiling_is_400() {
        let client = Arc::new(RecordingClient::default());
        let policy = UploadPolicy::new(16).with_body_limit(64 * 1024);
        let server = test_server(Arc::clone(&client), policy);

        let response = server
            .post("/api/upload")
            .multipart(
                MultipartForm::new()
                    .add_text("sessionId", "s1")
                    .add_part("file", file("big.txt", &[b'x'; 32])),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "File is too large. Maximum size: 0.0MB"
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn file_at_ceiling_is_accepted() {
        let client = Arc::new(RecordingClient::replying(&json!({"message": "ok"})));
        let policy = UploadPolicy::new(16).with_body_limit(64 * 1024);
        let server = test_server(Arc::clone(&client), policy);

        let response = server
            .post("/api/upload")
            .multipart(
                MultipartForm::new()
                    .add_text("sessionId", "s1")
                    .add_part("file", file("fits.txt", &[b'x'; 16])),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn body_over_transport_limit_is_413() {
        let client = Arc::new(RecordingClient::default());
        let server = test_server(Arc::clone(&client), UploadPolicy::new(1024));

        let response = server
            .post("/api/upload")
            .multipart(
                MultipartForm::new()
                    .add_text("sessionId", "s1")
                    .add_part("file", file("huge.txt", &vec![b'x'; 64 * 1024])),
            )
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.json::<Value>()["error"],
            "File is too large. Maximum size: 0.0MB"
        );
        assert_eq!(client.calls(), 0);
    }
}
