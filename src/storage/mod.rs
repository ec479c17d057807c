//! Storage abstractions for the downloaded PDF archive.
//!
//! ## Directory Structure
//!
//! ```text
//! NTvG/
//! ├── 1968/
//! │   ├── 112-630.pdf
//! │   └── 112-1204.pdf
//! └── 1969/
//!     └── 113-17.pdf
//! ```
//!
//! Files are only ever added. A file that exists is treated as fetched.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ArticleRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for PDF archive backends.
#[async_trait]
pub trait PdfStorage: Send + Sync {
    /// Whether the PDF for this record has already been stored.
    async fn contains(&self, record: &ArticleRecord) -> Result<bool>;

    /// Store the PDF bytes for this record, returning where they went.
    async fn store(&self, record: &ArticleRecord, bytes: &[u8]) -> Result<String>;
}
