//! E2E tests for the upload API using upload-client
//!
//! These tests start the real router on an ephemeral port and talk to it
//! over HTTP, so the client and the API stay in sync.

use reqwest::multipart::{Form, Part};
use upload_api::{create_router, AppState, ServerConfig};
use upload_client::testing::TestServer;
use upload_client::{SelectedFile, UploadClientError};

async fn start(max_upload_bytes: usize) -> TestServer {
    let state = AppState::new(ServerConfig {
        max_upload_bytes,
        ..ServerConfig::default()
    });
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server")
}

#[tokio::test]
async fn test_health() {
    let server = start(1024).await;
    assert_eq!(server.client.health().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_index_page_has_form() {
    let server = start(1024).await;

    let body = reqwest::get(format!("{}/", server.base_url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains(r#"id="uploadForm""#));
    assert!(body.contains(r#"id="message""#));
    assert!(body.contains(r#"type="file""#));
    assert!(body.contains("/pkg/upload_web.js"));
}

#[tokio::test]
async fn test_serves_browser_module() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("upload_web.js"), "export default function init() {}").unwrap();
    let state = AppState::new(ServerConfig {
        assets_dir: dir.path().display().to_string(),
        ..ServerConfig::default()
    });
    let server = TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server");

    let response = reqwest::get(format!("{}/pkg/upload_web.js", server.base_url()))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("export default"));

    let missing = reqwest::get(format!("{}/pkg/nope.wasm", server.base_url()))
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn test_upload_returns_receipt() {
    let server = start(1024).await;
    let file = SelectedFile::new("hello.txt", "hello world").with_content_type("text/plain");

    let receipt = server.client.upload(&file).await.unwrap();

    assert_eq!(receipt.file, "hello.txt");
    assert_eq!(receipt.size, 11);
}

#[tokio::test]
async fn test_upload_too_large() {
    let server = start(8).await;
    let file = SelectedFile::new("big.bin", vec![0u8; 64]);

    let err = server.client.upload(&file).await.unwrap_err();

    match err {
        UploadClientError::ServerError { status, message } => {
            assert_eq!(status, 413);
            assert_eq!(message, "File too large");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_file_field() {
    let server = start(1024).await;
    let form = Form::new().part("document", Part::bytes(b"abc".to_vec()).file_name("a.txt"));

    let response = server
        .client
        .http_client()
        .post(format!("{}/upload", server.base_url()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Field required: file");
}

#[tokio::test]
async fn test_other_parts_are_skipped() {
    let server = start(1024).await;
    let form = Form::new()
        .text("note", "ignored")
        .part("file", Part::bytes(b"abcd".to_vec()).file_name("d.bin"));

    let response = server
        .client
        .http_client()
        .post(format!("{}/upload", server.base_url()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["file"], "d.bin");
    assert_eq!(body["size"], 4);
}

#[tokio::test]
async fn test_non_multipart_body_has_detail() {
    let server = start(1024).await;

    let response = server
        .client
        .http_client()
        .post(format!("{}/upload", server.base_url()))
        .body("plain text")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_file_type_gate() {
    let state = AppState::new(ServerConfig {
        accepted_types: vec!["pdf".to_string()],
        ..ServerConfig::default()
    });
    let server = TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server");

    let receipt = server
        .client
        .upload(&SelectedFile::new("scan.PDF", "%PDF-1.4"))
        .await
        .unwrap();
    assert_eq!(receipt.file, "scan.PDF");

    for (name, expected) in [
        ("notes.txt", "TXT file support is currently disabled"),
        (
            "photo.jpeg",
            "Unsupported file type: JPEG. Currently supported types: PDF",
        ),
    ] {
        match server.client.upload(&SelectedFile::new(name, "x")).await {
            Err(UploadClientError::ServerError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, expected);
            }
            other => panic!("unexpected result for {name}: {other:?}"),
        }
    }
}
