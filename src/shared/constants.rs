/// Literal the user must type to authorize a delete
pub const DELETE_CONFIRMATION_TOKEN: &str = "DELETE";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Extra room on top of the upload limit for multipart boundaries and headers
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;
