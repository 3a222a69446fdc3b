//! Report pipeline: snapshot two tables, render HTML, email it.
//!
//! Each run fetches a fresh snapshot of both configured tables. A failed
//! fetch is logged and treated as an absent snapshot; the run only aborts
//! when *neither* table produced any rows, in which case there is nothing
//! worth mailing. With one-sided data the report still goes out, with the
//! missing side rendered as its "no data" notice.

use tracing::{error, info, instrument, warn};

use crate::models::{ReportOutcome, TableSnapshot};
use crate::outputs::email::Mailer;
use crate::outputs::html;
use crate::store::NewsStore;

/// Run one report-and-send over the two configured tables.
#[instrument(level = "info", skip_all, fields(%table_one, %table_two))]
pub async fn run_report(
    store: &impl NewsStore,
    mailer: &impl Mailer,
    table_one: &str,
    table_two: &str,
) -> ReportOutcome {
    let first = snapshot(store, table_one).await;
    let second = snapshot(store, table_two).await;

    if !has_rows(&first) && !has_rows(&second) {
        warn!("No rows available from either table; aborting report");
        return ReportOutcome::failed("No data available from either table");
    }

    let document = html::compile_report(first.as_ref(), second.as_ref(), table_one, table_two);

    match mailer.send_html(&document).await {
        Ok(()) => {
            info!("Report emailed");
            ReportOutcome::success()
        }
        Err(e) => {
            error!(error = %e, "Sending report email failed");
            ReportOutcome::failed("Failed to send report email")
        }
    }
}

/// Fetch one table, converting failure into an absent snapshot.
async fn snapshot(store: &impl NewsStore, table: &str) -> Option<TableSnapshot> {
    match store.fetch_rows(table).await {
        Ok(rows) => Some(rows),
        Err(e) => {
            error!(%table, error = %e, "Fetching table snapshot failed");
            None
        }
    }
}

fn has_rows(snapshot: &Option<TableSnapshot>) -> bool {
    snapshot.as_ref().is_some_and(|rows| !rows.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsRecord, SnapshotRow};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::error::Error;
    use std::sync::Mutex;

    struct FakeStore {
        // None means the fetch for that table fails outright.
        tables: HashMap<String, Option<TableSnapshot>>,
    }

    impl NewsStore for FakeStore {
        async fn insert_records(
            &self,
            _records: &[NewsRecord],
        ) -> Result<Vec<Value>, Box<dyn Error>> {
            unreachable!("reporting never inserts")
        }

        async fn fetch_rows(&self, table: &str) -> Result<TableSnapshot, Box<dyn Error>> {
            match self.tables.get(table) {
                Some(Some(rows)) => Ok(rows.clone()),
                _ => Err(format!("select from {table} failed").into()),
            }
        }
    }

    struct FakeMailer {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeMailer {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl Mailer for FakeMailer {
        async fn send_html(&self, html: &str) -> Result<(), Box<dyn Error>> {
            if self.fail {
                return Err("relay refused".into());
            }
            self.sent.lock().unwrap().push(html.to_string());
            Ok(())
        }
    }

    fn rows(n: usize) -> TableSnapshot {
        (0..n)
            .map(|i| {
                let mut row = SnapshotRow::new();
                row.insert("id".to_string(), json!(i));
                row.insert("price".to_string(), json!(100 + i));
                row
            })
            .collect()
    }

    fn store(one: Option<TableSnapshot>, two: Option<TableSnapshot>) -> FakeStore {
        FakeStore {
            tables: HashMap::from([
                ("bitcoin_prices".to_string(), one),
                ("econews".to_string(), two),
            ]),
        }
    }

    #[tokio::test]
    async fn test_both_tables_empty_aborts_before_mailing() {
        let store = store(Some(rows(0)), Some(rows(0)));
        let mailer = FakeMailer::new(false);

        let outcome = run_report(&store, &mailer, "bitcoin_prices", "econews").await;

        assert_eq!(outcome.status, "failed");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_both_fetches_failing_aborts_before_mailing() {
        let store = store(None, None);
        let mailer = FakeMailer::new(false);

        let outcome = run_report(&store, &mailer, "bitcoin_prices", "econews").await;

        assert_eq!(outcome.status, "failed");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_sided_data_still_sends() {
        let store = store(Some(rows(2)), None);
        let mailer = FakeMailer::new(false);

        let outcome = run_report(&store, &mailer, "bitcoin_prices", "econews").await;

        assert_eq!(outcome.status, "success");
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("<h3>Data from bitcoin_prices</h3>"));
        assert!(sent[0].contains("<p>Total records: 2</p>"));
        assert!(sent[0].contains("<p>No data available for econews.</p>"));
    }

    #[tokio::test]
    async fn test_both_tables_populated_sends_two_fragments() {
        let store = store(Some(rows(1)), Some(rows(3)));
        let mailer = FakeMailer::new(false);

        let outcome = run_report(&store, &mailer, "bitcoin_prices", "econews").await;

        assert_eq!(outcome.status, "success");
        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].contains("<h3>Data from bitcoin_prices</h3>"));
        assert!(sent[0].contains("<h3>Data from econews</h3>"));
    }

    #[tokio::test]
    async fn test_send_failure_reports_failed_outcome() {
        let store = store(Some(rows(1)), Some(rows(1)));
        let mailer = FakeMailer::new(true);

        let outcome = run_report(&store, &mailer, "bitcoin_prices", "econews").await;

        assert_eq!(outcome.status, "failed");
        assert_eq!(
            outcome.message.as_deref(),
            Some("Failed to send report email")
        );
    }
}
