use std::sync::Arc;
use tokio::fs::File;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::modules::storage::{LocalStorage, StoredFile, UploadWriter};
use crate::shared::constants::DELETE_CONFIRMATION_TOKEN;
use crate::shared::validation::is_valid_file_name;

/// Service for stored file operations
pub struct FileService {
    storage: Arc<LocalStorage>,
    max_upload_size: Option<u64>,
}

impl FileService {
    /// `max_upload_size` of `None` accepts uploads of any size
    pub fn new(storage: Arc<LocalStorage>, max_upload_size: Option<u64>) -> Self {
        Self {
            storage,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> Option<u64> {
        self.max_upload_size
    }

    /// List every stored file with its metadata, in directory order
    pub async fn list_files(&self) -> Result<Vec<StoredFile>> {
        Ok(self.storage.list().await?)
    }

    /// List stored file names only, in directory order
    pub async fn list_file_names(&self) -> Result<Vec<String>> {
        let files = self.storage.list().await?;
        Ok(files.into_iter().map(|f| f.name).collect())
    }

    /// Begin writing an upload under its client-supplied name.
    ///
    /// An existing file of the same name is overwritten. The writer enforces
    /// the configured upload size limit.
    pub async fn begin_upload(&self, file_name: &str) -> Result<UploadWriter> {
        debug!("Starting upload: {}", file_name);
        Ok(self.storage.create(file_name, self.max_upload_size).await?)
    }

    /// Open a stored file for streaming, returning it with its size
    pub async fn open_file(&self, file_name: &str) -> Result<(File, u64)> {
        Ok(self.storage.open(file_name).await?)
    }

    /// Rename a stored file in place
    pub async fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
        self.storage.rename(old_name, new_name).await?;
        Ok(())
    }

    /// Delete a stored file once the user typed the confirmation token.
    ///
    /// The token is compared exactly; anything else leaves the file untouched.
    pub async fn delete_file(&self, file_name: &str, confirmation: &str) -> Result<()> {
        if confirmation != DELETE_CONFIRMATION_TOKEN {
            info!("Delete of {} rejected: confirmation mismatch", file_name);
            return Err(AppError::Validation(
                "Confirmation text is incorrect".to_string(),
            ));
        }

        self.storage.remove(file_name).await?;
        Ok(())
    }

    /// Reject names that could never address a stored file
    pub fn ensure_valid_name(&self, file_name: &str) -> Result<()> {
        if is_valid_file_name(file_name) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Invalid file name: {:?}",
                file_name
            )))
        }
    }
}
