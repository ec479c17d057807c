// src/services/articles.rs

//! Article scraper service.
//!
//! Lists article slugs from search pages, resolves their citation and
//! downloads the PDF into a [`PdfStorage`].

use std::sync::Arc;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{ArticleRecord, ArticleRef, Config, DownloadOutcome};
use crate::storage::PdfStorage;
use crate::utils::http::{create_client, fetch_bytes, fetch_page};
use crate::utils::resolve;

/// Service for scraping articles from the journal site.
pub struct ArticleScraper {
    config: Arc<Config>,
    client: Client,
    listing: Selector,
    citation: Selector,
    download: Selector,
}

impl ArticleScraper {
    /// Create a new scraper with its own HTTP client.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_client(&config.http)?;
        Self::with_client(config, client)
    }

    /// Create a new scraper around an existing HTTP client.
    pub fn with_client(config: Arc<Config>, client: Client) -> Result<Self> {
        let listing = config.site.listing_selector()?;
        let citation = config.site.citation_selector()?;
        let download = config.site.download_selector()?;
        Ok(Self {
            config,
            client,
            listing,
            citation,
            download,
        })
    }

    /// Find the article slugs listed on a zero-based search page.
    pub async fn find_article_names(&self, page: u32) -> Result<Vec<ArticleRef>> {
        let url = self.config.site.search_page_url(page);
        let document = fetch_page(&self.client, &self.config.retry, &url).await?;
        let names = Self::parse_article_names(&document, &self.listing);
        log::debug!("On page {}, found article names {:?}", page, names);
        Ok(names)
    }

    /// Resolve an article's identifier and year from its info page.
    ///
    /// `Ok(None)` means the page exists but carries no usable citation.
    pub async fn article_info(&self, article: &ArticleRef) -> Result<Option<ArticleRecord>> {
        let url = self.config.site.article_info_url(article.as_str());
        let document = fetch_page(&self.client, &self.config.retry, &url).await?;

        let record = Self::parse_citation(&document, &self.citation);
        match &record {
            Some(r) => log::debug!("Found article ID [{}] in year [{}]", r.identifier, r.year),
            None => log::debug!("Skipping article [{}]: no information available", article),
        }
        Ok(record)
    }

    /// Locate the PDF link on the article page, resolved to an absolute URL.
    pub async fn download_url(&self, article: &ArticleRef) -> Result<Option<String>> {
        let url = self.config.site.article_page_url(article.as_str());
        let document = fetch_page(&self.client, &self.config.retry, &url).await?;

        let link = Self::parse_download_link(&document, &self.download, &url);
        match &link {
            Some(link) => log::debug!("Found download url [{}]", link),
            None => log::debug!("Skipping article [{}]: no downloadable PDF found", article),
        }
        Ok(link)
    }

    /// Download the PDF for an article whose record is already resolved.
    ///
    /// An existing destination file short-circuits before any request is
    /// made; a page without a download link is a no-op.
    pub async fn download(
        &self,
        article: &ArticleRef,
        record: &ArticleRecord,
        storage: &dyn PdfStorage,
    ) -> Result<DownloadOutcome> {
        if storage.contains(record).await? {
            log::debug!("File already exists: {}/{}", record.year, record.file_name());
            return Ok(DownloadOutcome::AlreadyExists);
        }

        let Some(link) = self.download_url(article).await? else {
            return Ok(DownloadOutcome::NoPdf);
        };

        let bytes = fetch_bytes(&self.client, &self.config.retry, &link).await?;
        let location = storage.store(record, &bytes).await?;
        log::info!("File successfully downloaded: {}", location);
        Ok(DownloadOutcome::Downloaded)
    }

    /// Resolve and download a single article.
    pub async fn download_article(
        &self,
        article: &ArticleRef,
        storage: &dyn PdfStorage,
    ) -> Result<DownloadOutcome> {
        match self.article_info(article).await? {
            Some(record) => self.download(article, &record, storage).await,
            None => Ok(DownloadOutcome::NoInfo),
        }
    }

    fn parse_article_names(document: &Html, listing: &Selector) -> Vec<ArticleRef> {
        document
            .select(listing)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(ArticleRef::from_href)
            .collect()
    }

    fn parse_citation(document: &Html, citation: &Selector) -> Option<ArticleRecord> {
        let element = document.select(citation).next()?;
        let text: String = element.text().collect();
        ArticleRecord::from_citation(&text)
    }

    fn parse_download_link(document: &Html, download: &Selector, page_url: &str) -> Option<String> {
        let href = document
            .select(download)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())?;
        Some(resolve(page_url, href).unwrap_or_else(|| href.to_string()))
    }
}
