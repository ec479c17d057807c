//! Pipeline entry points.
//!
//! - `run_scraper`: Download article PDFs page by page
//! - `run_merge`: Merge nested files by topic or year

pub mod merge;
pub mod scrape;

pub use merge::run_merge;
pub use scrape::run_scraper;
