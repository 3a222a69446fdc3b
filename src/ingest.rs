//! News ingestion pipeline: fetch, normalize, store.
//!
//! The flow is strictly linear. The source returns already-normalized
//! records (or nothing), the store stamps and appends them, and the outcome
//! reports what the store said it inserted. An empty fetch is not an error;
//! it just means there is nothing to store this run.

use tracing::{error, info, instrument};

use crate::models::IngestOutcome;
use crate::sources::NewsSource;
use crate::store::NewsStore;

/// Run one ingestion for `category`.
///
/// A store failure is logged and degrades to zero stored rows; the run
/// itself still completes.
#[instrument(level = "info", skip_all, fields(%category))]
pub async fn run_ingestion(
    source: &impl NewsSource,
    store: &impl NewsStore,
    category: &str,
) -> IngestOutcome {
    let records = source.fetch_news(category).await;
    if records.is_empty() {
        info!("No news found; nothing to store");
        return IngestOutcome::failed("No news found");
    }

    let stored = match store.insert_records(&records).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Storing news records failed");
            Vec::new()
        }
    };

    info!(
        fetched = records.len(),
        stored = stored.len(),
        "Ingestion complete"
    );
    IngestOutcome::success(stored)
}
