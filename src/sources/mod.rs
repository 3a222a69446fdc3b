//! News source clients.
//!
//! Each source module exposes a client that turns a category key into a
//! batch of normalized [`NewsRecord`]s. Sources never surface transport
//! errors to their caller: a failed fetch is logged and becomes an empty
//! batch, which the ingestion pipeline treats as "nothing to do".
//!
//! # Supported Sources
//!
//! | Source  | Module      | Method | Notes |
//! |---------|-------------|--------|-------|
//! | NewsAPI | [`newsapi`] | `/v2/everything` search | Requires an API key |

pub mod newsapi;

use crate::models::NewsRecord;

/// Seam for anything that can produce news records for a category.
///
/// The production implementation is [`newsapi::NewsApi`]; tests substitute
/// canned fakes so the pipelines run without a network.
pub trait NewsSource {
    /// Fetch and normalize recent articles for `category`.
    ///
    /// Returns an empty vector when the source is unavailable or returned
    /// nothing; this method never fails.
    async fn fetch_news(&self, category: &str) -> Vec<NewsRecord>;
}
