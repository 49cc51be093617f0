//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with browser-identification headers
//! - GET requests with bounded retry on transport failures
//! - Response body decoding using the server-declared charset
//!
//! A fetch never unwinds: exhausting the attempt budget produces a
//! [`FetchOutcome::Failed`] value that callers treat as "page unreachable,
//! skip".

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched and decoded the page
    Success(FetchedPage),

    /// All attempts failed; the page is unreachable this run
    Failed {
        /// Number of attempts made
        attempts: u32,
        /// Description of the last failure
        last_error: String,
    },
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Decoded page body
    pub body: String,

    /// Name of the encoding the body was decoded with
    pub encoding: String,
}

/// Retry behavior for a single page fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per page, >= 1
    pub max_attempts: u32,

    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }
}

/// Builds the HTTP client used for all crawl requests
///
/// The client presents a realistic browser header set, follows redirects
/// (up to 10 hops), enforces the configured per-request timeout, and keeps
/// TLS verification enabled.
///
/// # Arguments
///
/// * `http` - The browser-identification header configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(http: &HttpConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&http.accept) {
        headers.insert(ACCEPT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(http.user_agent.clone())
        .default_headers(headers)
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with bounded retry
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx response | Success |
/// | Non-2xx status | Wait retry delay, try again |
/// | Timeout | Wait retry delay, try again |
/// | Connection error | Wait retry delay, try again |
/// | Body read error | Wait retry delay, try again |
/// | Attempts exhausted | `FetchOutcome::Failed` |
///
/// The delay between attempts is fixed (no backoff growth); production
/// configuration uses 5 seconds.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `retry` - Attempt budget and inter-attempt delay
pub async fn fetch_page(client: &Client, url: &str, retry: &RetryPolicy) -> FetchOutcome {
    let mut last_error = String::new();

    for attempt in 1..=retry.max_attempts {
        match try_fetch(client, url).await {
            Ok(page) => return FetchOutcome::Success(page),
            Err(error) => {
                tracing::warn!("Attempt {} failed for {}: {}", attempt, url, error);
                last_error = error;
            }
        }

        if attempt < retry.max_attempts {
            tokio::time::sleep(retry.retry_delay).await;
        }
    }

    tracing::error!(
        "Failed to fetch {} after {} attempts",
        url,
        retry.max_attempts
    );
    FetchOutcome::Failed {
        attempts: retry.max_attempts,
        last_error,
    }
}

/// A single fetch attempt; any failure is reported as a description string
async fn try_fetch(client: &Client, url: &str) -> Result<FetchedPage, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Body read error: {}", e))?;

    let (body, encoding) = decode_body(&bytes, content_type.as_deref());

    Ok(FetchedPage {
        final_url,
        status: status.as_u16(),
        body,
        encoding,
    })
}

/// Maps a reqwest error to a short description
fn classify_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection error".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else {
        error.to_string()
    }
}

/// Decodes response bytes using the server-declared charset
///
/// Falls back to UTF-8 (lossy) when no charset is declared or the label is
/// unknown. Returns the decoded body together with the name of the encoding
/// actually used, which can differ from the label when the body carries a
/// byte-order mark.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> (String, String) {
    let declared = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()));

    let encoding = declared.unwrap_or(encoding_rs::UTF_8);
    let (decoded, used, _had_errors) = encoding.decode(bytes);
    (decoded.into_owned(), used.name().to_ascii_lowercase())
}

/// Extracts the charset parameter from a Content-Type header value
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .map(str::trim)
        .find_map(|param| {
            param
                .strip_prefix("charset=")
                .or_else(|| param.strip_prefix("CHARSET="))
        })
        .map(|cs| cs.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let http = HttpConfig::default();
        let client = build_http_client(&http, Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_retry_policy_floors_attempts_at_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(0));
        assert_eq!(policy.max_attempts, 1);
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=UTF-8"),
            Some("UTF-8".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/html; charset=\"windows-1251\""),
            Some("windows-1251".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn test_decode_body_defaults_to_utf8() {
        let (body, encoding) = decode_body("сайн байна уу".as_bytes(), Some("text/html"));
        assert_eq!(body, "сайн байна уу");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_body_declared_charset() {
        // "тест" in windows-1251
        let bytes = [0xF2, 0xE5, 0xF1, 0xF2];
        let (body, encoding) = decode_body(&bytes, Some("text/html; charset=windows-1251"));
        assert_eq!(body, "тест");
        assert_eq!(encoding, "windows-1251");
    }

    #[test]
    fn test_decode_body_unknown_label_falls_back() {
        let (body, encoding) = decode_body(b"plain ascii", Some("text/html; charset=bogus"));
        assert_eq!(body, "plain ascii");
        assert_eq!(encoding, "utf-8");
    }
}
