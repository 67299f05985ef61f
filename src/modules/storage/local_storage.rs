use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::shared::validation::is_valid_file_name;

/// Errors raised by the local storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Upload exceeds the limit of {0} bytes")]
    TooLarge(u64),

    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A directory entry of the storage root.
///
/// Metadata is read on a best-effort basis: an entry whose `stat` fails is
/// still listed, just without size or modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    /// Byte size, only for regular files
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

/// Flat file storage rooted at a single directory.
///
/// Every operation takes a bare file name, validated before any path is
/// built, so nothing outside `root` can be reached.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create the storage, making sure the root directory exists.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a file name to its path under the root.
    pub fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        if !is_valid_file_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// List every entry of the root in directory order.
    ///
    /// A missing root is reported as an empty listing.
    pub async fn list(&self) -> StorageResult<Vec<StoredFile>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping entry with non UTF-8 name: {:?}", raw);
                    continue;
                }
            };
            let metadata = match entry.metadata().await {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    warn!("Failed to read metadata for {}: {}", name, e);
                    None
                }
            };

            let size = metadata
                .as_ref()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            let modified = metadata
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from);

            files.push(StoredFile {
                name,
                size,
                modified,
            });
        }

        debug!("Listed {} entries in {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Start writing `name`, truncating any existing file of that name.
    ///
    /// The root is created first if it has disappeared since startup. With a
    /// `limit`, the writer refuses any chunk that would take the file past it.
    pub async fn create(&self, name: &str, limit: Option<u64>) -> StorageResult<UploadWriter> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.root).await?;
        let file = File::create(&path).await?;

        Ok(UploadWriter {
            path,
            file,
            written: 0,
            limit,
        })
    }

    /// Open a regular file for reading, returning it with its byte size.
    pub async fn open(&self, name: &str) -> StorageResult<(File, u64)> {
        let path = self.resolve(name)?;
        let file = File::open(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        let metadata = file.metadata().await?;

        if !metadata.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        Ok((file, metadata.len()))
    }

    /// Rename `old_name` to `new_name`, replacing an existing destination.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> StorageResult<()> {
        let old_path = self.resolve(old_name)?;
        let new_path = self.resolve(new_name)?;

        fs::rename(&old_path, &new_path)
            .await
            .map_err(|e| not_found_or_io(e, old_name))?;

        info!("Renamed {} -> {}", old_name, new_name);
        Ok(())
    }

    /// Permanently remove `name`. Directories are reported as not found.
    pub async fn remove(&self, name: &str) -> StorageResult<()> {
        let path = self.resolve(name)?;

        let metadata = fs::symlink_metadata(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        if metadata.is_dir() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;

        info!("Removed {}", name);
        Ok(())
    }
}

fn not_found_or_io(err: io::Error, name: &str) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(name.to_string())
    } else {
        StorageError::Io(err)
    }
}

/// Streaming writer for a single upload.
///
/// Callers must end with either [`UploadWriter::finish`] or
/// [`UploadWriter::abort`]; aborting removes the partial file.
#[derive(Debug)]
pub struct UploadWriter {
    path: PathBuf,
    file: File,
    written: u64,
    limit: Option<u64>,
}

impl UploadWriter {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        let written = self.written + chunk.len() as u64;
        if let Some(limit) = self.limit.filter(|&limit| written > limit) {
            return Err(StorageError::TooLarge(limit));
        }

        self.file.write_all(chunk).await?;
        self.written = written;
        Ok(())
    }

    /// Flush to disk and return the number of bytes written.
    ///
    /// A failed flush removes the partial file like [`UploadWriter::abort`].
    pub async fn finish(mut self) -> StorageResult<u64> {
        if let Err(e) = self.sync().await {
            self.abort().await;
            return Err(e.into());
        }
        Ok(self.written)
    }

    async fn sync(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }

    /// Drop the partial file.
    pub async fn abort(self) {
        let UploadWriter { path, file, .. } = self;
        drop(file);

        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove partial upload {}: {}", path.display(), e);
            }
        }
    }
}
