//! Data models for news records, table snapshots, and run outcomes.
//!
//! This module defines the core data structures used throughout the agent:
//! - [`RawArticle`]: one article as the news API returns it, fields optional
//! - [`NewsRecord`]: the normalized, length-bounded form that gets stored
//! - [`TableSnapshot`]: a point-in-time read of a database table's rows
//! - [`IngestOutcome`] / [`ReportOutcome`]: the structured results each
//!   pipeline prints on exit
//!
//! Normalization lives on [`NewsRecord::from_raw`]: missing fields become
//! empty strings and every field is truncated to its column limit, so a
//! record is always safe to store by construction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::truncate_chars;

/// Maximum stored length of an article title, in characters.
pub const TITLE_MAX: usize = 255;
/// Maximum stored length of an article URL, in characters.
pub const URL_MAX: usize = 500;
/// Maximum stored length of an article description, in characters.
pub const DESCRIPTION_MAX: usize = 1000;

/// One row of a table snapshot: column name to value, in the order the
/// store returned the columns.
pub type SnapshotRow = Map<String, Value>;

/// A point-in-time read of a table's rows. Fetched fresh per report run and
/// discarded after formatting.
pub type TableSnapshot = Vec<SnapshotRow>;

/// The JSON envelope the news API wraps its results in.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    /// Matching articles, newest first. Absent on error responses.
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// A raw article as returned by the news API.
///
/// Every field is optional: the API omits or nulls fields freely, and the
/// normalizer degrades gracefully rather than rejecting such articles.
#[derive(Debug, Default, Deserialize)]
pub struct RawArticle {
    /// The article headline.
    pub title: Option<String>,
    /// Link to the full article.
    pub url: Option<String>,
    /// Short summary text.
    pub description: Option<String>,
}

/// A normalized news record, length-bounded and ready for storage.
///
/// Immutable after creation; consumed once by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRecord {
    /// Headline, at most [`TITLE_MAX`] characters.
    pub title: String,
    /// Article link, at most [`URL_MAX`] characters.
    pub url: String,
    /// Summary text, at most [`DESCRIPTION_MAX`] characters.
    pub description: String,
}

impl NewsRecord {
    /// Normalize a raw article into a storable record.
    ///
    /// Missing fields become empty strings; present fields are truncated to
    /// their maximum lengths. This never fails.
    pub fn from_raw(raw: &RawArticle) -> Self {
        Self {
            title: truncate_chars(raw.title.as_deref().unwrap_or(""), TITLE_MAX),
            url: truncate_chars(raw.url.as_deref().unwrap_or(""), URL_MAX),
            description: truncate_chars(raw.description.as_deref().unwrap_or(""), DESCRIPTION_MAX),
        }
    }

    /// Render the record as the free-text payload stored in the
    /// `finance_info` column.
    pub fn finance_info(&self) -> String {
        format!(
            "Title: {}\nURL: {}\nDescription: {}",
            self.title, self.url, self.description
        )
    }
}

/// Structured result of one ingestion run, printed as JSON on exit.
#[derive(Debug, Serialize)]
pub struct IngestOutcome {
    /// `"success"` or `"failed"`.
    pub status: String,
    /// Failure explanation, only present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of rows the store reported inserted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_count: Option<usize>,
    /// The inserted rows as the store returned them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_news: Option<Vec<Value>>,
}

impl IngestOutcome {
    /// Successful run: the store reported these rows inserted.
    pub fn success(stored: Vec<Value>) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            news_count: Some(stored.len()),
            stored_news: Some(stored),
        }
    }

    /// Failed run with an explanation.
    pub fn failed(message: &str) -> Self {
        Self {
            status: "failed".to_string(),
            message: Some(message.to_string()),
            news_count: None,
            stored_news: None,
        }
    }
}

/// Structured result of one report-and-send run, printed as JSON on exit.
#[derive(Debug, Serialize)]
pub struct ReportOutcome {
    /// `"success"` or `"failed"`.
    pub status: String,
    /// Failure explanation, only present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportOutcome {
    /// The report was compiled and handed to the mail transport.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
        }
    }

    /// The run aborted or the send failed.
    pub fn failed(message: &str) -> Self {
        Self {
            status: "failed".to_string(),
            message: Some(message.to_string()),
        }
    }
}
