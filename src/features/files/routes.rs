use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{
    delete_file, delete_page, download_file, index_page, list_files, rename_file, rename_page,
    upload_file,
};
use crate::features::files::services::FileService;
use crate::shared::constants::MULTIPART_OVERHEAD;

/// Create routes for the files feature
///
/// The request body limit on `/upload` is only an outer bound sized from the
/// service's upload limit; the file bytes themselves are counted while they
/// are written. Without a limit the body limit is lifted entirely.
pub fn routes(file_service: Arc<FileService>) -> Router {
    let upload_limit = match file_service.max_upload_size() {
        Some(limit) => DefaultBodyLimit::max(
            usize::try_from(limit)
                .unwrap_or(usize::MAX)
                .saturating_add(MULTIPART_OVERHEAD),
        ),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(index_page))
        .route("/upload", post(upload_file).layer(upload_limit))
        .route("/download/{filename}", get(download_file))
        .route("/rename/{filename}", get(rename_page))
        .route("/rename", post(rename_file))
        .route("/delete/{filename}", get(delete_page))
        .route("/delete", post(delete_file))
        .route("/files", get(list_files))
        .with_state(file_service)
}
