//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Selector;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Placeholder substituted with the page index in [`SiteConfig::search_url`].
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Backoff policy for transport failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Site URLs and selectors
    #[serde(default)]
    pub site: SiteConfig,

    /// Page range and output location
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.retry.max_attempts == 0 {
            return Err(AppError::validation("retry.max_attempts must be >= 1"));
        }
        if self.retry.backoff_multiplier.is_nan() || self.retry.backoff_multiplier < 1.0 {
            return Err(AppError::validation(
                "retry.backoff_multiplier must be >= 1.0",
            ));
        }
        if self.retry.initial_delay_ms > self.retry.max_delay_ms {
            return Err(AppError::validation(
                "retry.initial_delay_ms must not exceed retry.max_delay_ms",
            ));
        }
        if !self.site.search_url.contains(PAGE_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "site.search_url must contain {PAGE_PLACEHOLDER}"
            )));
        }
        url::Url::parse(&self.site.article_url)?;
        self.site.listing_selector()?;
        self.site.citation_selector()?;
        self.site.download_selector()?;
        if self.run.begin_page > self.run.end_page {
            return Err(AppError::validation(format!(
                "run.begin_page ({}) is past run.end_page ({})",
                self.run.begin_page, self.run.end_page
            )));
        }
        if self.run.progress_every == 0 {
            return Err(AppError::validation("run.progress_every must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause between article requests in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: 0,
        }
    }
}

/// Bounded exponential backoff for transport failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds
    #[serde(default = "defaults::initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds
    #[serde(default = "defaults::max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor applied after each retry
    #[serde(default = "defaults::backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Delay to wait after the `retry`-th failed attempt (0-indexed).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.initial_delay_ms as f64;
        let factor = self.backoff_multiplier.powi(retry.min(i32::MAX as u32) as i32);
        let millis = (base * factor).min(self.max_delay_ms as f64);
        Duration::from_millis(millis as u64)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            initial_delay_ms: defaults::initial_delay(),
            max_delay_ms: defaults::max_delay(),
            backoff_multiplier: defaults::backoff_multiplier(),
        }
    }
}

/// Where the journal lives and how its pages are laid out.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Listing page URL; `{page}` is replaced by the zero-based page index
    #[serde(default = "defaults::search_url")]
    pub search_url: String,

    /// Base URL that article slugs are appended to
    #[serde(default = "defaults::article_url")]
    pub article_url: String,

    /// Anchors on a listing page that point at articles
    #[serde(default = "defaults::listing_selector")]
    pub listing_selector: String,

    /// Element on the article info page holding the citation text
    #[serde(default = "defaults::citation_selector")]
    pub citation_selector: String,

    /// Anchor on the article page linking to the PDF
    #[serde(default = "defaults::download_selector")]
    pub download_selector: String,
}

impl SiteConfig {
    /// URL of the zero-based listing page.
    pub fn search_page_url(&self, page: u32) -> String {
        self.search_url.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// URL of an article's landing page.
    pub fn article_page_url(&self, slug: &str) -> String {
        format!("{}/{}", self.article_url.trim_end_matches('/'), slug)
    }

    /// URL of an article's info page, which carries the citation.
    pub fn article_info_url(&self, slug: &str) -> String {
        format!("{}/artikelinfo", self.article_page_url(slug))
    }

    pub fn listing_selector(&self) -> Result<Selector> {
        parse_selector(&self.listing_selector)
    }

    pub fn citation_selector(&self) -> Result<Selector> {
        parse_selector(&self.citation_selector)
    }

    pub fn download_selector(&self) -> Result<Selector> {
        parse_selector(&self.download_selector)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url: defaults::search_url(),
            article_url: defaults::article_url(),
            listing_selector: defaults::listing_selector(),
            citation_selector: defaults::citation_selector(),
            download_selector: defaults::download_selector(),
        }
    }
}

/// Page range and output location of a scrape run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// First listing page to visit
    #[serde(default = "defaults::begin_page")]
    pub begin_page: u32,

    /// Listing page to stop at (exclusive)
    #[serde(default = "defaults::end_page")]
    pub end_page: u32,

    /// Root of the `<year>/<identifier>.pdf` archive
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Log progress every this many pages
    #[serde(default = "defaults::progress_every")]
    pub progress_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            begin_page: defaults::begin_page(),
            end_page: defaults::end_page(),
            output_dir: defaults::output_dir(),
            progress_every: defaults::progress_every(),
        }
    }
}

/// Parse a CSS selector, mapping the parser's error into [`AppError`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    use std::path::PathBuf;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ntvg-scraper/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_attempts() -> u32 {
        5
    }
    pub fn initial_delay() -> u64 {
        5_000
    }
    pub fn max_delay() -> u64 {
        60_000
    }
    pub fn backoff_multiplier() -> f64 {
        2.0
    }
    pub fn search_url() -> String {
        "https://www.ntvg.nl/search/advanced?search=&page={page}&in=full&author_options=0".into()
    }
    pub fn article_url() -> String {
        "https://www.ntvg.nl/artikelen".into()
    }
    pub fn listing_selector() -> String {
        "ul.content-list a".into()
    }
    pub fn citation_selector() -> String {
        "#block-system-main > div > div > div > \
         div.field.field-name-field-year.field-type-number-integer.field-label-hidden > div > div"
            .into()
    }
    pub fn download_selector() -> String {
        "a.download".into()
    }
    pub fn begin_page() -> u32 {
        830
    }
    pub fn end_page() -> u32 {
        31049
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("NTvG")
    }
    pub fn progress_every() -> u32 {
        10
    }
}
