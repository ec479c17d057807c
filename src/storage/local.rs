//! Local filesystem storage implementation.
//!
//! PDFs land at `{root}/{year}/{identifier}.pdf`. Writes go to a `.part`
//! sibling first and are renamed into place, so an interrupted download never
//! leaves a file that a later run would mistake for a finished one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ArticleRecord;
use crate::storage::PdfStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Full path of the PDF for a record.
    pub fn path(&self, record: &ArticleRecord) -> PathBuf {
        record.destination(&self.root_dir)
    }

    /// Ensure the year directory exists.
    ///
    /// A directory that is already there is fine; anything else that stops
    /// creation is an error.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        match tokio::fs::create_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent).await?;
        }

        let tmp = path.with_extension("pdf.part");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl PdfStorage for LocalStorage {
    async fn contains(&self, record: &ArticleRecord) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path(record)).await?)
    }

    async fn store(&self, record: &ArticleRecord, bytes: &[u8]) -> Result<String> {
        let path = self.path(record);
        self.write_bytes(&path, bytes).await?;
        Ok(path.display().to_string())
    }
}
