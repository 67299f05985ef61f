use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::validate_file_name;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload; stored under its original filename
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Rename form submitted from the rename page
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameFileDto {
    /// Current name of the stored file
    #[validate(custom(function = "validate_file_name"))]
    #[schema(example = "a.txt")]
    pub old_name: String,
    /// Name the file should have afterwards
    #[validate(custom(function = "validate_file_name"))]
    #[schema(example = "b.txt")]
    pub new_name: String,
}

/// Delete form submitted from the delete page
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteFileDto {
    /// Name of the stored file to delete
    #[validate(custom(function = "validate_file_name"))]
    #[schema(example = "a.txt")]
    pub filename: String,
    /// Must be exactly "DELETE"
    #[schema(example = "DELETE")]
    pub confirmation: String,
}
