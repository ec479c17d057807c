// src/models/mod.rs

//! Domain models for the scraper and the merger.

mod article;
mod config;
mod merge;
mod summary;

pub use article::{ArticleRecord, ArticleRef, sanitize_filename};
pub use config::{
    Config, HttpConfig, PAGE_PLACEHOLDER, RetryConfig, RunConfig, SiteConfig, parse_selector,
};
pub use merge::{MergeOption, MergeOutcome};
pub use summary::{DownloadOutcome, ScrapeSummary};
