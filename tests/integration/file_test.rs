//! File endpoint integration tests.

use http::StatusCode;
use uuid::Uuid;

use filedrive_core::config::UploadConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/files").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_list_rename_download_delete_flow() {
    let app = TestApp::new().await;

    // Upload
    let response = app
        .upload("report.pdf", "application/pdf", b"pdf bytes")
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let file = &response.body["file"];
    assert_eq!(file["name"], "report.pdf");
    assert_eq!(file["size"], 9);
    assert_eq!(file["content_type"], "application/pdf");
    assert_eq!(file["extension"], "pdf");
    let file_id = file["file_id"].as_str().unwrap().to_string();

    // List
    let response = app.request("GET", "/files").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    // Rename; extension keeps the upload-time value.
    let response = app
        .request("PUT", &format!("/files/{file_id}?name=renamed.txt"))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app.request("GET", "/files").await;
    let listed = &response.body.as_array().unwrap()[0];
    assert_eq!(listed["name"], "renamed.txt");
    assert_eq!(listed["extension"], "pdf");

    // Download serves the renamed filename with the original content type.
    let (status, headers, body) = app.download(&format!("/files/download/{file_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pdf bytes");
    assert_eq!(headers["content-type"], "application/pdf");
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"renamed.txt\""
    );

    // Delete
    let response = app.request("DELETE", &format!("/files/{file_id}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/files").await;
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_sanitizes_filename() {
    let app = TestApp::new().await;

    let response = app
        .upload("../../etc/passwd", "text/plain", b"data")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["file"]["name"], "passwd");
}

#[tokio::test]
async fn test_upload_disallowed_content_type_is_400() {
    let app = TestApp::with_upload_config(UploadConfig {
        allowed_content_types: vec!["image/*".to_string()],
        ..UploadConfig::default()
    })
    .await;

    let response = app
        .upload("a.bin", "application/octet-stream", b"data")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");

    let response = app.upload("a.png", "image/png", b"data").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_oversized_is_400() {
    let app = TestApp::with_upload_config(UploadConfig {
        max_file_size_bytes: 4,
        ..UploadConfig::default()
    })
    .await;

    let response = app.upload("big.txt", "text/plain", b"12345").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_missing_file_field_is_400() {
    let app = TestApp::new().await;

    let req = http::Request::builder()
        .method("POST")
        .uri("/files/upload")
        .header("Content-Type", "multipart/form-data; boundary=x")
        .body(axum::body::Body::from("--x--\r\n"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_file_id_is_404() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    let response = app
        .request("GET", &format!("/files/download/{missing}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app
        .request("PUT", &format!("/files/{missing}?name=x.txt"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", &format!("/files/{missing}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_empty_name_is_400() {
    let app = TestApp::new().await;

    let response = app.upload("a.txt", "text/plain", b"x").await;
    let file_id = response.body["file"]["file_id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/files/{file_id}?name=%20%20"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
