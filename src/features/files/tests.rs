use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};

use crate::shared::test_helpers::create_test_server;

async fn upload(server: &TestServer, name: &str, content: &[u8]) -> TestResponse {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(content.to_vec())
            .file_name(name.to_string())
            .mime_type("application/octet-stream"),
    );
    server.post("/upload").multipart(form).await
}

async fn listed_names(server: &TestServer) -> Vec<String> {
    let response = server.get("/files").await;
    response.assert_status_ok();
    let mut names = response.json::<Vec<String>>();
    names.sort();
    names
}

fn assert_redirects_home(response: &TestResponse) {
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_upload_then_download_returns_same_bytes() {
    let (_temp_dir, server) = create_test_server(None).await;
    let content = b"quarterly numbers\n\x00\x01\x02 binary tail";

    let response = upload(&server, "report.txt", content).await;
    response.assert_status_ok();
    response.assert_text("File uploaded successfully");

    let response = server.get("/download/report.txt").await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), content);

    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename=\"report.txt\""));
    assert_eq!(
        response.header("content-length").to_str().unwrap(),
        content.len().to_string()
    );
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_upload_same_name_replaces_content() {
    let (_temp_dir, server) = create_test_server(None).await;

    upload(&server, "notes.md", b"first version").await.assert_status_ok();
    upload(&server, "notes.md", b"second").await.assert_status_ok();

    let response = server.get("/download/notes.md").await;
    assert_eq!(response.as_bytes().as_ref(), b"second");
    assert_eq!(listed_names(&server).await, vec!["notes.md"]);
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let (_temp_dir, server) = create_test_server(None).await;

    let form = MultipartForm::new().add_text("comment", "no file here");
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_upload_ignores_extra_fields() {
    let (_temp_dir, server) = create_test_server(None).await;

    let form = MultipartForm::new()
        .add_text("comment", "hello")
        .add_part("file", Part::bytes(b"data".to_vec()).file_name("a.txt"));
    server.post("/upload").multipart(form).await.assert_status_ok();

    assert_eq!(listed_names(&server).await, vec!["a.txt"]);
}

#[tokio::test]
async fn test_upload_rejects_traversal_filename() {
    let (temp_dir, server) = create_test_server(None).await;

    let response = upload(&server, "../escape.txt", b"data").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(!temp_dir.path().join("..").join("escape.txt").exists());
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let (_temp_dir, server) = create_test_server(Some(1024)).await;

    let response = upload(&server, "big.bin", &vec![7u8; 256 * 1024]).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected_by_file_size() {
    let (_temp_dir, server) = create_test_server(Some(1024)).await;

    // Small enough to pass the request body bound, still over the file limit
    let response = upload(&server, "over.bin", &vec![7u8; 4 * 1024]).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_upload_exactly_at_limit_succeeds() {
    let (_temp_dir, server) = create_test_server(Some(1024)).await;

    upload(&server, "exact.bin", &[3u8; 1024]).await.assert_status_ok();

    let response = server.get("/download/exact.bin").await;
    assert_eq!(response.as_bytes().len(), 1024);
}

#[tokio::test]
async fn test_upload_within_limit_succeeds() {
    let (_temp_dir, server) = create_test_server(Some(1024)).await;

    upload(&server, "small.bin", &[1u8; 512]).await.assert_status_ok();

    assert_eq!(listed_names(&server).await, vec!["small.bin"]);
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let (_temp_dir, server) = create_test_server(None).await;

    server
        .get("/download/missing.txt")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_rejects_encoded_traversal() {
    let (_temp_dir, server) = create_test_server(None).await;

    server
        .get("/download/..%2F..%2Fetc%2Fpasswd")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_name_with_spaces() {
    let (_temp_dir, server) = create_test_server(None).await;
    upload(&server, "my file.txt", b"spaced").await.assert_status_ok();

    let response = server.get("/download/my%20file.txt").await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"spaced");
}

#[tokio::test]
async fn test_rename_moves_file() {
    let (_temp_dir, server) = create_test_server(None).await;
    upload(&server, "a.txt", b"original").await.assert_status_ok();

    let response = server
        .post("/rename")
        .form(&[("oldName", "a.txt"), ("newName", "b.txt")])
        .await;
    assert_redirects_home(&response);

    assert_eq!(listed_names(&server).await, vec!["b.txt"]);
    server
        .get("/download/a.txt")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/download/b.txt").await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"original");
}

#[tokio::test]
async fn test_rename_missing_source_is_not_found() {
    let (_temp_dir, server) = create_test_server(None).await;

    let response = server
        .post("/rename")
        .form(&[("oldName", "ghost.txt"), ("newName", "b.txt")])
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_rename_rejects_traversal_target() {
    let (_temp_dir, server) = create_test_server(None).await;
    upload(&server, "a.txt", b"data").await.assert_status_ok();

    let response = server
        .post("/rename")
        .form(&[("oldName", "a.txt"), ("newName", "../b.txt")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(listed_names(&server).await, vec!["a.txt"]);
}

#[tokio::test]
async fn test_rename_missing_field_is_bad_request() {
    let (_temp_dir, server) = create_test_server(None).await;

    let response = server
        .post("/rename")
        .form(&[("oldName", "a.txt")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_requires_exact_confirmation() {
    let (_temp_dir, server) = create_test_server(None).await;
    upload(&server, "a.txt", b"data").await.assert_status_ok();

    let response = server
        .post("/delete")
        .form(&[("filename", "a.txt"), ("confirmation", "delete")])
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("Confirmation text is incorrect");
    assert_eq!(listed_names(&server).await, vec!["a.txt"]);

    let response = server
        .post("/delete")
        .form(&[("filename", "a.txt"), ("confirmation", "DELETE")])
        .await;
    assert_redirects_home(&response);
    assert!(listed_names(&server).await.is_empty());
}

#[tokio::test]
async fn test_delete_missing_file_is_not_found() {
    let (_temp_dir, server) = create_test_server(None).await;

    server
        .post("/delete")
        .form(&[("filename", "ghost.txt"), ("confirmation", "DELETE")])
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_directory_entry_is_not_found() {
    let (temp_dir, server) = create_test_server(None).await;
    std::fs::create_dir(temp_dir.path().join("sub")).unwrap();

    server
        .post("/delete")
        .form(&[("filename", "sub"), ("confirmation", "DELETE")])
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/download/sub")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert!(temp_dir.path().join("sub").is_dir());
}

#[tokio::test]
async fn test_files_lists_exactly_present_names() {
    let (temp_dir, server) = create_test_server(None).await;
    upload(&server, "a.txt", b"1").await.assert_status_ok();
    upload(&server, "b.txt", b"2").await.assert_status_ok();
    std::fs::write(temp_dir.path().join("c.txt"), b"3").unwrap();

    assert_eq!(listed_names(&server).await, vec!["a.txt", "b.txt", "c.txt"]);
}

#[tokio::test]
async fn test_empty_storage_lists_nothing() {
    let (_temp_dir, server) = create_test_server(None).await;

    let response = server.get("/files").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "[]");

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text().matches("class=\"file-row\"").count(), 0);
}

#[tokio::test]
async fn test_unreadable_storage_is_server_error() {
    let (temp_dir, server) = create_test_server(None).await;
    let root = temp_dir.path().to_path_buf();

    // A regular file in place of the storage directory makes enumeration fail
    std::fs::remove_dir(&root).unwrap();
    std::fs::write(&root, b"not a directory").unwrap();

    for path in ["/files", "/"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        response.assert_text("Storage error occurred");
    }

    std::fs::remove_file(&root).unwrap();
    std::fs::create_dir(&root).unwrap();
}

#[tokio::test]
async fn test_index_page_shows_uploaded_files() {
    let (_temp_dir, server) = create_test_server(None).await;
    upload(&server, "a.txt", b"1").await.assert_status_ok();
    upload(&server, "b c.txt", b"2").await.assert_status_ok();

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = response.text();
    assert_eq!(html.matches("class=\"file-row\"").count(), 2);
    assert!(html.contains("href=\"/download/a.txt\""));
    assert!(html.contains("href=\"/delete/b%20c.txt\""));
}

#[tokio::test]
async fn test_confirmation_pages() {
    let (_temp_dir, server) = create_test_server(None).await;

    let response = server.get("/rename/a.txt").await;
    response.assert_status_ok();
    assert!(response.text().contains("name=\"oldName\" value=\"a.txt\""));

    let response = server.get("/delete/a.txt").await;
    response.assert_status_ok();
    assert!(response.text().contains("Type \"DELETE\" to confirm"));

    server
        .get("/delete/..%2Fsecret.txt")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
