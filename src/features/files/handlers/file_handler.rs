use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppForm;
use crate::features::files::dtos::{DeleteFileDto, RenameFileDto, UploadFileDto};
use crate::features::files::services::FileService;
use crate::shared::constants::UPLOAD_FIELD_NAME;

/// Upload a file
///
/// Accepts multipart/form-data with a single `file` field. The file is
/// streamed to disk under its original filename, replacing any stored file
/// with the same name. Other fields are ignored.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing file field or invalid filename"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<&'static str, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;

        let mut writer = service.begin_upload(&file_name).await?;
        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    writer.abort().await;
                    return Err(multipart_error(e));
                }
            };

            if let Err(e) = writer.write_chunk(&chunk).await {
                writer.abort().await;
                return Err(e.into());
            }
        }

        let size = writer.finish().await?;
        info!("File uploaded: name={}, size={}", file_name, size);

        return Ok("File uploaded successfully");
    }

    Err(AppError::BadRequest("File is required".to_string()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text());
    }

    debug!("Failed to read multipart data: {}", err);
    AppError::BadRequest(format!("Failed to read multipart data: {}", err))
}

/// Download a stored file as an attachment
#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File content as attachment"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let (file, size) = service.open_file(&filename).await?;
    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();

    debug!("Streaming {} ({} bytes, {})", filename, size, content_type);

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        (header::CONTENT_LENGTH, size.to_string()),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

/// `attachment` disposition with an ASCII fallback plus the RFC 5987 UTF-8 form
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

/// Rename a stored file
///
/// Redirects to the listing page on success.
#[utoipa::path(
    post,
    path = "/rename",
    tag = "files",
    request_body(
        content = RenameFileDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 303, description = "Renamed, redirect to listing"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn rename_file(
    State(service): State<Arc<FileService>>,
    AppForm(dto): AppForm<RenameFileDto>,
) -> Result<Redirect, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.rename_file(&dto.old_name, &dto.new_name).await?;

    Ok(Redirect::to("/"))
}

/// Delete a stored file
///
/// The `confirmation` field must be exactly `DELETE`; otherwise nothing is
/// removed. Redirects to the listing page on success.
#[utoipa::path(
    post,
    path = "/delete",
    tag = "files",
    request_body(
        content = DeleteFileDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 303, description = "Deleted, redirect to listing"),
        (status = 400, description = "Invalid file name or confirmation text is incorrect"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    AppForm(dto): AppForm<DeleteFileDto>,
) -> Result<Redirect, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete_file(&dto.filename, &dto.confirmation).await?;

    Ok(Redirect::to("/"))
}

/// List stored file names
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "Stored file names in directory order", body = Vec<String>),
        (status = 500, description = "Storage directory could not be read")
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = service.list_file_names().await?;
    Ok(Json(names))
}
