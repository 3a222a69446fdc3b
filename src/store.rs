//! Supabase record store.
//!
//! Persists normalized news records and serves bounded table snapshots over
//! Supabase's PostgREST interface. The news table is created out-of-band:
//!
//! ```sql
//! CREATE TABLE econews (
//!     id SERIAL PRIMARY KEY,
//!     timestamp TIMESTAMP WITHOUT TIME ZONE NOT NULL,
//!     finance_info TEXT
//! );
//! ```
//!
//! # Batch Timestamp
//!
//! One insert call is one batch: the UTC timestamp is captured once, at
//! second precision, and stamped onto every row in the batch. The batch is
//! also the unit of atomicity — a single PostgREST request either inserts
//! all rows or none.
//!
//! # Snapshot Ordering
//!
//! Snapshots order by `id` descending, so "up to 100 rows" always means the
//! 100 most recently inserted rows rather than whatever order the store
//! feels like returning.

use chrono::Utc;
use postgrest::Postgrest;
use serde_json::{Value, json};
use std::error::Error;
use tracing::{info, instrument};

use crate::models::{NewsRecord, TableSnapshot};
use crate::utils::truncate_for_log;

/// Storage format of the batch timestamp: UTC, second precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Upper bound on rows per table snapshot.
const SELECT_LIMIT: usize = 100;

/// Seam over the persistent store.
///
/// The production implementation is [`SupabaseStore`]; tests substitute
/// in-memory fakes so the pipelines run without a database.
pub trait NewsStore {
    /// Append one batch of records to the news table.
    ///
    /// Returns the inserted rows as the store reported them.
    async fn insert_records(&self, records: &[NewsRecord]) -> Result<Vec<Value>, Box<dyn Error>>;

    /// Read up to [`SELECT_LIMIT`] rows from `table`, newest first.
    async fn fetch_rows(&self, table: &str) -> Result<TableSnapshot, Box<dyn Error>>;
}

/// PostgREST-backed store against a Supabase project.
pub struct SupabaseStore {
    client: Postgrest,
    news_table: String,
}

impl SupabaseStore {
    /// Build a store client for one Supabase project.
    ///
    /// # Arguments
    ///
    /// * `supabase_url` - Project URL, e.g. `https://xyz.supabase.co`
    /// * `supabase_key` - Service key, sent as `apikey` and bearer token
    /// * `news_table` - Table ingestion inserts into
    pub fn new(supabase_url: &str, supabase_key: &str, news_table: &str) -> Self {
        let client = Postgrest::new(format!(
            "{}/rest/v1",
            supabase_url.trim_end_matches('/')
        ))
        .insert_header("apikey", supabase_key)
        .insert_header("Authorization", format!("Bearer {supabase_key}"));

        Self {
            client,
            news_table: news_table.to_string(),
        }
    }
}

/// Stamp a batch of records with one shared timestamp and shape them into
/// insertable rows.
fn build_batch(records: &[NewsRecord]) -> Vec<Value> {
    let batch_timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    records
        .iter()
        .map(|record| {
            json!({
                "timestamp": batch_timestamp,
                "finance_info": record.finance_info(),
            })
        })
        .collect()
}

impl NewsStore for SupabaseStore {
    #[instrument(level = "info", skip_all, fields(count = records.len(), table = %self.news_table))]
    async fn insert_records(&self, records: &[NewsRecord]) -> Result<Vec<Value>, Box<dyn Error>> {
        let rows = build_batch(records);

        let response = self
            .client
            .from(&self.news_table)
            .insert(serde_json::to_string(&rows)?)
            .execute()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(format!(
                "insert into {} returned {status}: {}",
                self.news_table,
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let stored: Vec<Value> = serde_json::from_str(&body)?;
        info!(count = stored.len(), "Inserted news records");
        Ok(stored)
    }

    #[instrument(level = "info", skip_all, fields(%table))]
    async fn fetch_rows(&self, table: &str) -> Result<TableSnapshot, Box<dyn Error>> {
        let response = self
            .client
            .from(table)
            .select("*")
            .order("id.desc")
            .limit(SELECT_LIMIT)
            .execute()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(format!(
                "select from {table} returned {status}: {}",
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let rows: TableSnapshot = serde_json::from_str(&body)?;
        info!(count = rows.len(), "Fetched table snapshot");
        Ok(rows)
    }
}
