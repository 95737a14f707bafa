//! Page fetcher with safe logging and retries.
//!
//! - `GET` an absolute URL and hand back the raw body of a `200 OK`
//! - any other final status is [`HttpError::Status`]; transport failures are
//!   [`HttpError::Network`]
//! - retries network errors, 429 and 5xx with exponential backoff and
//!   `Retry-After` support
//! - sensitive query parameters are redacted from logs
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), postal_http::HttpError> {
//! use postal_http::{FetchSettings, HttpClient, PageSource};
//!
//! let client = HttpClient::new(FetchSettings::default())?;
//! let url = reqwest::Url::parse("https://example.com/terms").unwrap();
//! let body: Vec<u8> = client.fetch(&url).await?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events `http.request.start`,
//! `http.response`, `http.retrying` and `http.error`, correlated by `req_id`.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use uuid::Uuid;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const BASE_BACKOFF_MS: u64 = 200;
const RATE_LIMIT_FLOOR: Duration = Duration::from_millis(1100);
const SECRET_PARAMS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status} for {url}")]
    Status { status: StatusCode, url: String },
}

// ==============================
// Source trait
// ==============================

/// Anything that can turn a URL into the raw bytes of a page.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, HttpError>;
}

// ==============================
// Client
// ==============================

/// Per-client tuning knobs.
///
/// ```
/// use postal_http::FetchSettings;
/// use std::time::Duration;
///
/// let settings = FetchSettings {
///     retries: 0,
///     ..Default::default()
/// };
/// assert_eq!(settings.timeout, Duration::from_secs(15));
/// ```
#[derive(Clone, Debug)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub retries: usize,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
            user_agent: concat!("postal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    settings: FetchSettings,
}

impl HttpClient {
    pub fn new(settings: FetchSettings) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { inner, settings })
    }

    /// Parse `raw` and fetch it.
    pub async fn get_page_str(&self, raw: &str) -> Result<Vec<u8>, HttpError> {
        let url = Url::parse(raw).map_err(|e| HttpError::Url(format!("{raw}: {e}")))?;
        self.get_page(&url).await
    }

    /// Body of a `200 OK` response to `GET url`.
    pub async fn get_page(&self, url: &Url) -> Result<Vec<u8>, HttpError> {
        let req_id = Uuid::new_v4();
        let max_retries = self.settings.retries;
        let (host_path, query) = redact_query(url);
        let mut attempt = 0usize;

        loop {
            tracing::debug!(
                %req_id,
                attempt = attempt + 1,
                max_retries,
                host_path = %host_path,
                query = ?query,
                timeout_ms = self.settings.timeout.as_millis() as u64,
                "http.request.start"
            );

            let t0 = Instant::now();
            let sent = self
                .inner
                .get(url.clone())
                .timeout(self.settings.timeout)
                .send()
                .await;

            let resp = match sent {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            %req_id,
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(%req_id, attempt, message = %message, "http.error");
                    return Err(HttpError::Network(message));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            %req_id,
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(%req_id, attempt, message = %message, "http.error");
                    return Err(HttpError::Network(message));
                }
            };

            tracing::debug!(
                %req_id,
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                body_len = bytes.len(),
                "http.response"
            );

            if status == StatusCode::OK {
                return Ok(bytes.to_vec());
            }

            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            if (is_429 || status.is_server_error()) && attempt < max_retries {
                attempt += 1;
                let delay = match retry_after_delay_secs(&headers) {
                    Some(secs) => Duration::from_secs(secs),
                    None if is_429 => backoff(attempt).max(RATE_LIMIT_FLOOR),
                    None => backoff(attempt),
                };
                tracing::warn!(
                    %req_id,
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    body_snippet = %snip_body(&bytes),
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                %req_id,
                %status,
                host_path = %host_path,
                body_snippet = %snip_body(&bytes),
                "http.error"
            );
            return Err(HttpError::Status {
                status,
                url: host_path.clone(),
            });
        }
    }
}

#[async_trait::async_trait]
impl PageSource for HttpClient {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, HttpError> {
        self.get_page(url).await
    }
}

// ==============================
// Helpers
// ==============================

fn backoff(attempt: usize) -> Duration {
    let shift = attempt.saturating_sub(1).min(16) as u32;
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1u64 << shift))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

/// "host + path" plus the query pairs with secret values replaced.
fn redact_query(url: &Url) -> (String, Vec<(String, String)>) {
    let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());
    let redacted = url
        .query_pairs()
        .map(|(k, v)| {
            let is_secret = SECRET_PARAMS.contains(&k.to_ascii_lowercase().as_str());
            let v = if is_secret {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    (host_path, redacted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(4), Duration::from_millis(1600));
    }

    #[test]
    fn secret_query_values_are_redacted() {
        let url = Url::parse("https://example.com/terms?lang=en&api_key=sk-123&Token=abc").unwrap();
        let (host_path, query) = redact_query(&url);
        assert_eq!(host_path, "example.com/terms");
        assert_eq!(
            query,
            vec![
                ("lang".to_string(), "en".to_string()),
                ("api_key".to_string(), "<redacted>".to_string()),
                ("Token".to_string(), "<redacted>".to_string()),
            ]
        );
    }

    #[test]
    fn long_bodies_are_snipped_on_char_boundaries() {
        let body = "é".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= 503);
    }

    #[test]
    fn retry_after_is_read_in_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, "3".parse().unwrap());
        assert_eq!(retry_after_delay_secs(&headers), Some(3));
        headers.insert(RETRY_AFTER, "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap());
        assert_eq!(retry_after_delay_secs(&headers), None);
    }
}
