use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::ApiConfig;
use crate::mood::Mood;

/// A single news article as served by the article service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Errors that can occur while fetching articles for a mood.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Articles decoded from one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleBatch {
    /// Well-formed articles, in response order.
    pub articles: Vec<Article>,
    /// Entries dropped because `title` or `content` was missing or not a string.
    pub skipped: usize,
}

/// Identifies one fetch.  Generations increase with every mood selection so
/// that results of superseded fetches can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub mood: Mood,
}

/// The result of a background fetch, sent back to the main loop.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<ArticleBatch, FetchError>,
}

/// HTTP client for the mood-tagged article service.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    base_url: String,
    path: String,
}

impl NewsClient {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            client: build_client(api.timeout_secs),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            path: api.path.clone(),
        }
    }

    /// The endpoint for `mood`.
    ///
    /// The `{mood}` placeholder in the configured path is replaced by the
    /// mood's slug; a path without the placeholder gets the slug appended as
    /// the last segment.
    pub fn article_url(&self, mood: Mood) -> String {
        let path = if self.path.contains("{mood}") {
            self.path.replace("{mood}", mood.slug())
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), mood.slug())
        };

        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetch and decode the articles tagged with `mood`.
    pub async fn fetch_articles(&self, mood: Mood) -> Result<ArticleBatch, FetchError> {
        let url = self.article_url(mood);
        tracing::debug!(%mood, %url, "requesting articles");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        decode_articles(&bytes).map_err(|reason| FetchError::Decode { url, reason })
    }
}

/// Spawn a background task that fetches the articles for `ticket` and sends
/// the outcome through `tx`.
pub fn spawn_fetch(tx: &UnboundedSender<FetchOutcome>, client: &NewsClient, ticket: FetchTicket) {
    let tx = tx.clone();
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.fetch_articles(ticket.mood).await;
        // Receiver may be gone if the app is shutting down.
        let _ = tx.send(FetchOutcome { ticket, result });
    });
}

/// Build the shared HTTP client.
fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("moodboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

/// Decode a response body.
///
/// Accepts a bare JSON array of articles or an object with an `articles`
/// array.  Entries without a string `title` and `content` are skipped and
/// counted.
pub fn decode_articles(bytes: &[u8]) -> Result<ArticleBatch, String> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| format!("invalid JSON: {e}"))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err("\"articles\" is not an array".to_string()),
            None => return Err("expected an array of articles".to_string()),
        },
        _ => return Err("expected an array of articles".to_string()),
    };

    let mut batch = ArticleBatch::default();
    for item in items {
        match serde_json::from_value::<Article>(item) {
            Ok(article) => batch.articles.push(article),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed article entry");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dead_url, serve};

    fn api_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn article_url_substitutes_mood() {
        let client = NewsClient::new(&api_config("http://news.local/"));
        assert_eq!(
            client.article_url(Mood::Surprised),
            "http://news.local/api/news/surprised/"
        );
    }

    #[test]
    fn article_url_appends_mood_without_placeholder() {
        let client = NewsClient::new(&ApiConfig {
            base_url: "http://news.local".to_string(),
            path: "articles/by-mood/".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(
            client.article_url(Mood::Sad),
            "http://news.local/articles/by-mood/sad"
        );
    }

    #[test]
    fn decode_bare_array() {
        let body = br#"[{"title":"A","content":"one"},{"title":"B","content":"two"}]"#;
        let batch = decode_articles(body).unwrap();
        assert_eq!(batch.skipped, 0);
        assert_eq!(
            batch.articles,
            vec![
                Article { title: "A".into(), content: "one".into() },
                Article { title: "B".into(), content: "two".into() },
            ]
        );
    }

    #[test]
    fn decode_articles_envelope() {
        let body = br#"{"articles":[{"title":"A","content":"one","emotion":"happy"}]}"#;
        let batch = decode_articles(body).unwrap();
        assert_eq!(batch.articles.len(), 1);
        assert_eq!(batch.articles[0].title, "A");
    }

    #[test]
    fn decode_empty_array() {
        let batch = decode_articles(b"[]").unwrap();
        assert!(batch.articles.is_empty());
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn decode_skips_malformed_entries() {
        let body = br#"[{"title":"A","content":"one"},{"title":"B"},{"title":3,"content":"x"},"junk"]"#;
        let batch = decode_articles(body).unwrap();
        assert_eq!(batch.articles.len(), 1);
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn decode_rejects_non_array_bodies() {
        assert!(decode_articles(b"not json").is_err());
        assert!(decode_articles(br#"{"detail":"nope"}"#).is_err());
        assert!(decode_articles(br#"{"articles":"nope"}"#).is_err());
        assert!(decode_articles(b"42").is_err());
    }

    #[tokio::test]
    async fn each_mood_requests_its_own_path() {
        for mood in Mood::ALL {
            let (base_url, server) = serve(1, "200 OK", "[]").await;
            let client = NewsClient::new(&api_config(&base_url));

            client.fetch_articles(mood).await.unwrap();

            let lines = server.await.unwrap();
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0], format!("GET /api/news/{}/ HTTP/1.1", mood.slug()));
        }
    }

    #[tokio::test]
    async fn fetch_returns_articles_verbatim() {
        let body = r#"[{"title":"Sunny day","content":"Everyone smiles."},{"title":"Puppies","content":"So many."}]"#;
        let (base_url, server) = serve(1, "200 OK", body).await;
        let client = NewsClient::new(&api_config(&base_url));

        let batch = client.fetch_articles(Mood::Happy).await.unwrap();
        server.await.unwrap();

        assert_eq!(batch.articles.len(), 2);
        assert_eq!(batch.articles[0].title, "Sunny day");
        assert_eq!(batch.articles[0].content, "Everyone smiles.");
        assert_eq!(batch.articles[1].title, "Puppies");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base_url, server) = serve(1, "404 Not Found", r#"{"detail":"No articles"}"#).await;
        let client = NewsClient::new(&api_config(&base_url));

        let err = client.fetch_articles(Mood::Angry).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_error() {
        let client = NewsClient::new(&api_config(&dead_url().await));
        let err = client.fetch_articles(Mood::Sad).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn spawn_fetch_sends_outcome_with_ticket() {
        let (base_url, server) = serve(1, "200 OK", r#"[{"title":"T","content":"C"}]"#).await;
        let client = NewsClient::new(&api_config(&base_url));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let ticket = FetchTicket { generation: 7, mood: Mood::Sad };
        spawn_fetch(&tx, &client, ticket);

        let outcome = rx.recv().await.unwrap();
        server.await.unwrap();
        assert_eq!(outcome.ticket, ticket);
        assert_eq!(outcome.result.unwrap().articles.len(), 1);
    }
}
