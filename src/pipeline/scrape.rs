// src/pipeline/scrape.rs

//! Page-by-page scraping pipeline.

use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, ScrapeSummary};
use crate::services::ArticleScraper;
use crate::storage::PdfStorage;

/// Walk the configured page range and download every resolvable article.
///
/// Pages and articles are handled one at a time. The first error aborts the
/// run; the log names the page to resume from.
pub async fn run_scraper(
    config: &Config,
    scraper: &ArticleScraper,
    storage: &dyn PdfStorage,
) -> Result<ScrapeSummary> {
    let run = &config.run;
    let delay = Duration::from_millis(config.http.request_delay_ms);
    let mut summary = ScrapeSummary::start();

    log::info!(
        "Scraping pages {}..{} into {}",
        run.begin_page,
        run.end_page,
        run.output_dir.display()
    );

    for page in run.begin_page..run.end_page {
        if page % run.progress_every.max(1) == 0 {
            log::info!("Now at page {}...", page);
        }

        if let Err(e) = scrape_page(scraper, storage, page, delay, &mut summary).await {
            log::error!("Stopped at page {}: {}", page, e);
            log::error!("Resume with --begin-page {}", page);
            return Err(e);
        }
        summary.pages += 1;
    }

    summary.finish();
    log::info!(
        "Scraped pages {}..{} in {}s: {} articles, {} downloaded, {} already present, {} without info, {} without PDF",
        run.begin_page,
        run.end_page,
        summary.elapsed_secs(),
        summary.articles,
        summary.downloaded,
        summary.already_present,
        summary.no_info,
        summary.no_pdf
    );

    Ok(summary)
}

async fn scrape_page(
    scraper: &ArticleScraper,
    storage: &dyn PdfStorage,
    page: u32,
    delay: Duration,
    summary: &mut ScrapeSummary,
) -> Result<()> {
    let articles = scraper.find_article_names(page).await?;
    for article in &articles {
        let outcome = scraper.download_article(article, storage).await?;
        summary.record(outcome);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(())
}
