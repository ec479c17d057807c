//! End-to-end scraping against a mocked journal site.

use std::sync::Arc;

use ntvg::error::AppError;
use ntvg::models::{ArticleRecord, ArticleRef, Config, DownloadOutcome};
use ntvg::pipeline::run_scraper;
use ntvg::services::ArticleScraper;
use ntvg::storage::LocalStorage;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF: &[u8] = b"%PDF-1.4 fake";

fn test_config(server: &MockServer, output: &TempDir, end_page: u32) -> Config {
    let mut config = Config::default();
    config.site.search_url = format!("{}/search?page={{page}}", server.uri());
    config.site.article_url = format!("{}/artikelen", server.uri());
    config.site.citation_selector = "div.field-name-field-year > div > div".into();
    config.retry.max_attempts = 2;
    config.retry.initial_delay_ms = 0;
    config.retry.max_delay_ms = 0;
    config.run.begin_page = 0;
    config.run.end_page = end_page;
    config.run.output_dir = output.path().to_path_buf();
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(format!("<html><body>{body}</body></html>"))
}

fn citation(text: &str) -> String {
    format!(r#"<div class="field-name-field-year"><div><div>{text}</div></div></div>"#)
}

async fn mount_page(server: &MockServer, url_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Page 0 lists three articles: one complete, one without citation, one without PDF.
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "0"))
        .respond_with(html(
            r#"<ul class="content-list">
                 <li><a href="/artikelen/bezoek-aan-steden">Bezoek</a></li>
                 <li><a href="/artikelen/whiplash">Whiplash</a></li>
                 <li><a href="/artikelen/vrije-wil">Vrije wil</a></li>
               </ul>"#,
        ))
        .mount(server)
        .await;

    mount_page(
        server,
        "/artikelen/bezoek-aan-steden/artikelinfo",
        &citation("Citeer dit artikel als: Ned Tijdschr Geneeskd. 1968;112:630"),
    )
    .await;
    mount_page(
        server,
        "/artikelen/bezoek-aan-steden",
        r#"<a class="download" href="/files/bezoek.pdf">Download PDF</a>"#,
    )
    .await;

    mount_page(server, "/artikelen/whiplash/artikelinfo", "<p>Geen gegevens</p>").await;

    mount_page(
        server,
        "/artikelen/vrije-wil/artikelinfo",
        &citation("Ned Tijdschr Geneeskd. 2005;149:1"),
    )
    .await;
    mount_page(server, "/artikelen/vrije-wil", "<p>Alleen voor abonnees</p>").await;
}

#[tokio::test]
async fn test_scrape_downloads_only_resolvable_articles() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("GET"))
        .and(path("/files/bezoek.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = Arc::new(test_config(&server, &output, 1));
    let scraper = ArticleScraper::new(Arc::clone(&config)).unwrap();
    let storage = LocalStorage::new(output.path());

    let summary = run_scraper(&config, &scraper, &storage).await.unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.articles, 3);
    assert_eq!(summary.downloaded, 1);
    assert_eq!(summary.no_info, 1);
    assert_eq!(summary.no_pdf, 1);
    assert!(summary.end_time.is_some());

    let pdf = output.path().join("1968").join("112-630.pdf");
    assert_eq!(std::fs::read(pdf).unwrap(), PDF);
    assert!(!output.path().join("2005").exists());
}

#[tokio::test]
async fn test_second_run_skips_existing_files() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("GET"))
        .and(path("/files/bezoek.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = Arc::new(test_config(&server, &output, 1));
    let scraper = ArticleScraper::new(Arc::clone(&config)).unwrap();
    let storage = LocalStorage::new(output.path());

    run_scraper(&config, &scraper, &storage).await.unwrap();
    let summary = run_scraper(&config, &scraper, &storage).await.unwrap();

    assert_eq!(summary.downloaded, 0);
    assert_eq!(summary.already_present, 1);
}

#[tokio::test]
async fn test_download_is_noop_without_link() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let output = TempDir::new().unwrap();
    let config = Arc::new(test_config(&server, &output, 1));
    let scraper = ArticleScraper::new(Arc::clone(&config)).unwrap();
    let storage = LocalStorage::new(output.path());

    let article = ArticleRef::from_href("/artikelen/vrije-wil").unwrap();
    let record = ArticleRecord::from_citation("Ned Tijdschr Geneeskd. 2005;149:1").unwrap();

    for _ in 0..2 {
        let outcome = scraper.download(&article, &record, &storage).await.unwrap();
        assert_eq!(outcome, DownloadOutcome::NoPdf);
    }
    assert!(!output.path().join("2005").join("149-1.pdf").exists());
}

#[tokio::test]
async fn test_http_error_aborts_run() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/bezoek.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = Arc::new(test_config(&server, &output, 5));
    let scraper = ArticleScraper::new(Arc::clone(&config)).unwrap();
    let storage = LocalStorage::new(output.path());

    let err = run_scraper(&config, &scraper, &storage).await.unwrap_err();
    match err {
        AppError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error: {other}"),
    }
    // Work finished before the failing page stays on disk.
    assert!(output.path().join("1968").join("112-630.pdf").is_file());
}

#[tokio::test]
async fn test_listing_uses_configured_page() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let output = TempDir::new().unwrap();
    let config = Arc::new(test_config(&server, &output, 1));
    let scraper = ArticleScraper::new(Arc::clone(&config)).unwrap();

    let names: Vec<String> = scraper
        .find_article_names(0)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(names, vec!["bezoek-aan-steden", "whiplash", "vrije-wil"]);

    let record = scraper
        .article_info(&ArticleRef::from_href("bezoek-aan-steden").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.identifier, "112-630");
    assert_eq!(record.year, "1968");
}
