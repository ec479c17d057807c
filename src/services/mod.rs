//! Service layer.
//!
//! - Article listing, citation lookup and PDF download (`ArticleScraper`)
//! - Nested file merging by topic or year (`FileMerger`)

mod articles;
mod merger;

pub use articles::ArticleScraper;
pub use merger::FileMerger;
