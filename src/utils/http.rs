// src/utils/http.rs

//! HTTP client utilities.
//!
//! Every request goes through [`with_retry`]: transport failures are retried
//! with bounded exponential backoff, while a response with an error status is
//! returned to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{HttpConfig, RetryConfig};

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Run `operation` until it succeeds, fails with a non-transport error, or
/// `retry.max_attempts` attempts have been made.
pub async fn with_retry<F, Fut, T>(retry: &RetryConfig, url: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    log::info!("{} succeeded on attempt {}", url, attempt);
                }
                return Ok(value);
            }
            Err(error) if error.is_transport() => {
                if attempt >= max_attempts {
                    log::error!("{} unreachable after {} attempts: {}", url, attempt, error);
                    return Err(match error {
                        AppError::Http(source) => AppError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            source,
                        },
                        other => other,
                    });
                }

                let delay = retry.delay_for(attempt - 1);
                log::warn!(
                    "Request to {} failed ({}), retry {}/{} in {:?}",
                    url,
                    error,
                    attempt,
                    max_attempts - 1,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// GET `url` and return the body, failing on a non-success status.
async fn get_checked(client: &Client, url: &str) -> Result<reqwest::Response> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(response)
}

/// Fetch a page as text, with retries.
pub async fn fetch_text(client: &Client, retry: &RetryConfig, url: &str) -> Result<String> {
    with_retry(retry, url, || async move {
        Ok::<_, AppError>(get_checked(client, url).await?.text().await?)
    })
    .await
}

/// Fetch a page and parse it as HTML, with retries.
pub async fn fetch_page(client: &Client, retry: &RetryConfig, url: &str) -> Result<Html> {
    let text = fetch_text(client, retry, url).await?;
    Ok(Html::parse_document(&text))
}

/// Fetch a binary body, with retries.
pub async fn fetch_bytes(client: &Client, retry: &RetryConfig, url: &str) -> Result<Vec<u8>> {
    with_retry(retry, url, || async move {
        Ok::<_, AppError>(get_checked(client, url).await?.bytes().await?.to_vec())
    })
    .await
}
