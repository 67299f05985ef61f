mod file_dto;

pub use file_dto::{DeleteFileDto, RenameFileDto, UploadFileDto};
