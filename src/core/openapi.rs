use utoipa::{Modify, OpenApi};

use crate::features::files::{dtos as files_dtos, handlers as files_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Pages
        files_handlers::index_page,
        files_handlers::rename_page,
        files_handlers::delete_page,
        // Files
        files_handlers::upload_file,
        files_handlers::download_file,
        files_handlers::rename_file,
        files_handlers::delete_file,
        files_handlers::list_files,
    ),
    components(
        schemas(
            files_dtos::UploadFileDto,
            files_dtos::RenameFileDto,
            files_dtos::DeleteFileDto,
        )
    ),
    tags(
        (name = "pages", description = "Browser UI pages"),
        (name = "files", description = "File upload and management"),
    ),
    info(
        title = "File Store API",
        version = "0.1.0",
        description = "API documentation for File Store",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
