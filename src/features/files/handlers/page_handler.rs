use axum::{
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::files::services::FileService;
use crate::shared::pages::{render_delete_page, render_index_page, render_rename_page};

/// File listing page with the upload form
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "HTML listing page", body = String, content_type = "text/html"),
        (status = 500, description = "Storage directory could not be read")
    )
)]
pub async fn index_page(
    State(service): State<Arc<FileService>>,
) -> Result<Html<String>, AppError> {
    let files = service.list_files().await?;
    Ok(Html(render_index_page(&files)?))
}

/// Rename confirmation page
#[utoipa::path(
    get,
    path = "/rename/{filename}",
    tag = "pages",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "HTML rename form", body = String, content_type = "text/html"),
        (status = 400, description = "Invalid file name")
    )
)]
pub async fn rename_page(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Html<String>, AppError> {
    service.ensure_valid_name(&filename)?;
    Ok(Html(render_rename_page(&filename)?))
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/delete/{filename}",
    tag = "pages",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "HTML delete form", body = String, content_type = "text/html"),
        (status = 400, description = "Invalid file name")
    )
)]
pub async fn delete_page(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Html<String>, AppError> {
    service.ensure_valid_name(&filename)?;
    Ok(Html(render_delete_page(&filename)?))
}
