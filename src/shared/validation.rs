use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Characters that may never appear in a stored file name:
    /// path separators of either flavour and NUL
    pub static ref FILE_NAME_FORBIDDEN_REGEX: Regex = Regex::new(r"[/\\\x00]").unwrap();
}

/// A stored file name is a single, non-empty path segment inside the storage directory
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !FILE_NAME_FORBIDDEN_REGEX.is_match(name)
}

/// `validator` hook for DTO fields holding a stored file name
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_file_name(name) {
        Ok(())
    } else {
        Err(ValidationError::new("file_name").with_message(Cow::Borrowed(
            "File name must be a single non-empty path segment",
        )))
    }
}
