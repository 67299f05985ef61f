#[cfg(test)]
use crate::features::files::{routes as files_routes, FileService};
#[cfg(test)]
use crate::modules::storage::LocalStorage;

#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tempfile::TempDir;

/// Build the files router over a fresh temporary storage directory.
///
/// Keep the returned `TempDir` alive for as long as the server is used.
#[cfg(test)]
pub async fn create_test_server(max_upload_size: Option<u64>) -> (TempDir, TestServer) {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path()).await.unwrap();
    let service = Arc::new(FileService::new(Arc::new(storage), max_upload_size));
    let router = files_routes::routes(service);

    let server = TestServer::new(router).unwrap();
    (temp_dir, server)
}
