//! HTML rendering for the database report.
//!
//! Turns table snapshots into self-contained HTML fragments and assembles
//! the fragments into the report document the notifier sends. All styling
//! is inline so the document survives mail clients that strip stylesheets.
//!
//! # Value Rendering
//!
//! Cell values come straight from PostgREST as JSON:
//! - `null` renders as an empty string
//! - arrays and objects render as compact JSON
//! - strings render as-is, without quotes
//! - any other scalar renders via its display form

use chrono::Local;
use serde_json::Value;
use std::fmt::Write;

use crate::models::TableSnapshot;

/// Render one table snapshot as an HTML fragment.
///
/// An empty snapshot produces a single "no data" notice. A non-empty one
/// produces a heading, a table whose header row comes from the first row's
/// keys, one data row per record with alternating background shading, and
/// a trailing record count.
///
/// # Arguments
///
/// * `rows` - The snapshot to render
/// * `label` - Display label, usually the table name
pub fn format_table(rows: &TableSnapshot, label: &str) -> String {
    if rows.is_empty() {
        return format!("<p>No data available for {label}.</p>");
    }

    let mut html = format!("<h3>Data from {label}</h3>");
    html.push_str(
        r#"<table border="1" cellpadding="5" cellspacing="0" style="border-collapse: collapse; width: 100%;">"#,
    );

    html.push_str(r#"<tr style="background-color: #f2f2f2;">"#);
    for key in rows[0].keys() {
        write!(html, r#"<th style="text-align: left;">{key}</th>"#).unwrap();
    }
    html.push_str("</tr>");

    for (idx, row) in rows.iter().enumerate() {
        let bg_color = if idx % 2 == 0 { "#ffffff" } else { "#f9f9f9" };
        write!(html, r#"<tr style="background-color: {bg_color};">"#).unwrap();
        for value in row.values() {
            write!(
                html,
                r#"<td style="text-align: left;">{}</td>"#,
                render_value(value)
            )
            .unwrap();
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    write!(html, "<p>Total records: {}</p>", rows.len()).unwrap();

    html
}

/// Render one cell value as display text.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Assemble the full report document from the two table snapshots.
///
/// A `None` snapshot (failed fetch) renders the same as an empty one: as
/// that table's "no data" notice. The caller decides whether the run is
/// worth composing at all; this function always produces a document.
///
/// # Arguments
///
/// * `first` - Snapshot of the first table, if the fetch succeeded
/// * `second` - Snapshot of the second table, if the fetch succeeded
/// * `label_one` - Display label for the first table
/// * `label_two` - Display label for the second table
pub fn compile_report(
    first: Option<&TableSnapshot>,
    second: Option<&TableSnapshot>,
    label_one: &str,
    label_two: &str,
) -> String {
    let empty = TableSnapshot::new();
    let generated_on = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut html = String::from("<h2>Finance Database Report</h2>");
    write!(html, "<p>Report generated on: {generated_on}</p>").unwrap();
    html.push_str(&format_table(first.unwrap_or(&empty), label_one));
    html.push_str("<br><hr><br>");
    html.push_str(&format_table(second.unwrap_or(&empty), label_two));

    html
}
