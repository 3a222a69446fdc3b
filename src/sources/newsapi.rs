//! NewsAPI client for finance headlines.
//!
//! Queries the [NewsAPI](https://newsapi.org) `/v2/everything` search
//! endpoint for English-language articles published within the trailing
//! seven days, newest first, five at a time. Category keys map to canned
//! search phrases; unknown keys fall back to a generic `"finance"` search.
//!
//! # Failure Policy
//!
//! A missing API key, a non-2xx status, or any transport error produces an
//! empty batch. The failure is logged with a truncated response preview and
//! never reaches the caller.

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use reqwest::Client;
use std::collections::HashMap;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};

use super::NewsSource;
use crate::models::{NewsApiResponse, NewsRecord};
use crate::utils::truncate_for_log;

/// NewsAPI search endpoint.
const ENDPOINT: &str = "https://newsapi.org/v2/everything";
/// How far back the search window reaches.
const WINDOW_DAYS: i64 = 7;
/// Articles requested per fetch.
const PAGE_SIZE: &str = "5";
/// Search phrase for category keys with no canned phrase.
const FALLBACK_PHRASE: &str = "finance";

/// Canned search phrases by category key.
static PHRASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("macro", "economy global market trends"),
        ("bitcoin", "cryptocurrency bitcoin finance"),
    ])
});

/// NewsAPI client.
///
/// Holds a shared HTTP client and the API key. Constructed once in `main`
/// and borrowed by the ingestion pipeline.
pub struct NewsApi {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl NewsApi {
    /// Create a client against the production endpoint.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `api_key` - NewsAPI key; `None` disables fetching
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Create a client against an arbitrary endpoint, for tests.
    #[cfg(test)]
    fn with_endpoint(client: Client, api_key: Option<String>, endpoint: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: endpoint.to_string(),
        }
    }

    /// Run one search request and normalize the results.
    async fn query(&self, api_key: &str, category: &str) -> Result<Vec<NewsRecord>, Box<dyn Error>> {
        let phrase = PHRASES.get(category).copied().unwrap_or(FALLBACK_PHRASE);
        let from_date = (Utc::now() - Duration::days(WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        debug!(%category, %phrase, %from_date, "Querying NewsAPI");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apiKey", api_key),
                ("q", phrase),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("from", from_date.as_str()),
                ("pageSize", PAGE_SIZE),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(format!(
                "NewsAPI returned {status}: {}",
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let parsed: NewsApiResponse = serde_json::from_str(&body)?;
        Ok(parsed.articles.iter().map(NewsRecord::from_raw).collect())
    }
}

impl NewsSource for NewsApi {
    #[instrument(level = "info", skip_all, fields(%category))]
    async fn fetch_news(&self, category: &str) -> Vec<NewsRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("NEWSAPI_KEY not set; skipping news fetch");
            return Vec::new();
        };

        match self.query(api_key, category).await {
            Ok(records) => {
                info!(count = records.len(), "Fetched news articles");
                records
            }
            Err(e) => {
                error!(error = %e, "NewsAPI fetch failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response, then close.
    async fn spawn_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_news_parses_and_normalizes_articles() {
        let endpoint = spawn_stub(
            "HTTP/1.1 200 OK",
            r#"{"status":"ok","articles":[
                {"title":"Rates hold steady","url":"https://example.com/1","description":"Central bank news"},
                {"title":null,"url":"https://example.com/2","description":null},
                {"title":"Markets rally","url":"https://example.com/3"}
            ]}"#,
        )
        .await;

        let source = NewsApi::with_endpoint(Client::new(), Some("key".to_string()), &endpoint);
        let records = source.fetch_news("macro").await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Rates hold steady");
        assert_eq!(records[1].title, "");
        assert_eq!(records[1].url, "https://example.com/2");
        assert_eq!(records[2].description, "");
    }

    #[tokio::test]
    async fn test_fetch_news_returns_empty_on_http_500() {
        let endpoint = spawn_stub("HTTP/1.1 500 Internal Server Error", "{}").await;
        let source = NewsApi::with_endpoint(Client::new(), Some("key".to_string()), &endpoint);
        assert!(source.fetch_news("macro").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_news_returns_empty_on_connection_refused() {
        // Bind and immediately drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let source = NewsApi::with_endpoint(Client::new(), Some("key".to_string()), &endpoint);
        assert!(source.fetch_news("macro").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_news_without_api_key_is_empty() {
        let source = NewsApi::new(Client::new(), None);
        assert!(source.fetch_news("macro").await.is_empty());
    }

    #[test]
    fn test_phrase_fallback_for_unknown_category() {
        assert_eq!(
            PHRASES.get("weather").copied().unwrap_or(FALLBACK_PHRASE),
            "finance"
        );
        assert_eq!(
            PHRASES.get("macro").copied().unwrap_or(FALLBACK_PHRASE),
            "economy global market trends"
        );
    }
}
