//! # Econews Agent
//!
//! A finance news agent that pulls headlines from NewsAPI into a Supabase
//! table and emails HTML reports of the collected data.
//!
//! ## Features
//!
//! - Fetches recent finance headlines by category (macro, bitcoin, or a
//!   generic fallback) and stores them length-bounded with a shared batch
//!   timestamp
//! - Renders two database tables as an inline-styled HTML report and sends
//!   it over authenticated SMTPS
//! - Optional fixed-interval re-runs for cron-less deployments
//!
//! ## Usage
//!
//! ```sh
//! econews_agent ingest --category macro
//! econews_agent report
//! econews_agent --every-hours 24 report
//! ```
//!
//! ## Architecture
//!
//! Two independent linear pipelines share nothing but configuration:
//! 1. **Ingestion**: NewsAPI fetch → field normalization → batch insert
//! 2. **Reporting**: two table snapshots → HTML document → SMTP delivery
//!
//! External clients (HTTP, PostgREST, SMTP) are constructed once here and
//! passed into the pipelines, so tests can substitute fakes at each seam.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod ingest;
mod models;
mod outputs;
mod report;
mod sources;
mod store;
mod utils;

use cli::{Cli, Command};
use config::Config;
use outputs::email::SmtpMailer;
use sources::newsapi::NewsApi;
use store::SupabaseStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("econews_agent starting up");
    dotenv::dotenv().ok();

    let args = Cli::parse();
    debug!(?args.command, ?args.every_hours, "Parsed CLI arguments");

    // Missing Supabase credentials abort here; everything else degrades at
    // its call site.
    let config = Config::from_env()?;
    info!(
        table_one = %config.table_one,
        table_two = %config.table_two,
        newsapi = config.newsapi_key.is_some(),
        mail = config.mail.is_some(),
        "Configuration loaded"
    );

    let source = NewsApi::new(reqwest::Client::new(), config.newsapi_key.clone());
    let store = SupabaseStore::new(&config.supabase_url, &config.supabase_key, &config.table_two);
    let mailer = SmtpMailer::new(config.mail.clone());

    match args.every_hours {
        Some(hours) => {
            let period = Duration::from_secs(hours * 60 * 60);
            loop {
                run_once(&args.command, &source, &store, &mailer, &config).await?;
                info!(hours, "Sleeping until next scheduled run");
                tokio::time::sleep(period).await;
            }
        }
        None => run_once(&args.command, &source, &store, &mailer, &config).await?,
    }

    Ok(())
}

/// Dispatch one run of the selected pipeline and print its outcome.
async fn run_once(
    command: &Command,
    source: &NewsApi,
    store: &SupabaseStore,
    mailer: &SmtpMailer,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ingest { category } => {
            let outcome = ingest::run_ingestion(source, store, category).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Report => {
            let outcome =
                report::run_report(store, mailer, &config.table_one, &config.table_two).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
