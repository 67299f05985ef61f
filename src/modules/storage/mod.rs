//! Storage module for file management
//!
//! Provides the flat local-directory backend that holds every stored file.

mod local_storage;

pub use local_storage::{LocalStorage, StorageError, StoredFile, UploadWriter};
