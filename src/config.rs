//! Environment-sourced runtime configuration.
//!
//! All settings come from the process environment (a `.env` file is loaded
//! at startup). Only the Supabase endpoint and key are required; everything
//! else either has a default or, when absent, disables the path that needs
//! it: no `NEWSAPI_KEY` means the fetcher returns nothing, and incomplete
//! mail settings mean every send reports "not configured".
//!
//! | Variable          | Required | Default          |
//! |-------------------|----------|------------------|
//! | `SUPABASE_URL`    | yes      | —                |
//! | `SUPABASE_KEY`    | yes      | —                |
//! | `TABLE_ONE`       | no       | `bitcoin_prices` |
//! | `TABLE_TWO`       | no       | `econews`        |
//! | `NEWSAPI_KEY`     | no       | —                |
//! | `EMAIL_HOST`      | no       | —                |
//! | `EMAIL_PORT`      | no       | `465`            |
//! | `EMAIL_USER`      | no       | —                |
//! | `EMAIL_PASS`      | no       | —                |
//! | `RECIPIENT_EMAIL` | no       | —                |

use std::env;
use std::error::Error;
use tracing::warn;

/// Default SMTPS submission port, matching an implicit-TLS session.
const DEFAULT_EMAIL_PORT: u16 = 465;

/// Everything the agent reads from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    /// Supabase service key, sent as both `apikey` and bearer token.
    pub supabase_key: String,
    /// First report table (price records).
    pub table_one: String,
    /// Second report table (news records); also the ingestion target.
    pub table_two: String,
    /// NewsAPI key. `None` disables the news fetch.
    pub newsapi_key: Option<String>,
    /// Mail transport settings. `None` disables the notifier.
    pub mail: Option<MailConfig>,
}

/// SMTP submission settings for the report notifier.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP host to submit through.
    pub host: String,
    /// SMTPS port.
    pub port: u16,
    /// Account name, also used as the sender address.
    pub user: String,
    /// Account password.
    pub password: String,
    /// The single recipient every report goes to.
    pub recipient: String,
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `SUPABASE_URL` or `SUPABASE_KEY` is missing, or
    /// when `EMAIL_PORT` is present but not a valid port number. Missing
    /// optional values are not errors.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::from_lookup(&|name| env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, Box<dyn Error>> {
        let supabase_url = require(lookup, "SUPABASE_URL")?;
        let supabase_key = require(lookup, "SUPABASE_KEY")?;
        let table_one = lookup("TABLE_ONE").unwrap_or_else(|| "bitcoin_prices".to_string());
        let table_two = lookup("TABLE_TWO").unwrap_or_else(|| "econews".to_string());
        let newsapi_key = lookup("NEWSAPI_KEY");

        Ok(Self {
            supabase_url,
            supabase_key,
            table_one,
            table_two,
            newsapi_key,
            mail: MailConfig::from_lookup(lookup)?,
        })
    }
}

impl MailConfig {
    /// Gather the mail settings, returning `None` if any of host, user,
    /// password, or recipient is absent.
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Option<Self>, Box<dyn Error>> {
        let host = lookup("EMAIL_HOST");
        let user = lookup("EMAIL_USER");
        let password = lookup("EMAIL_PASS");
        let recipient = lookup("RECIPIENT_EMAIL");

        let (Some(host), Some(user), Some(password), Some(recipient)) =
            (host, user, password, recipient)
        else {
            warn!("Mail settings incomplete; report emails will not be sent");
            return Ok(None);
        };

        let port = match lookup("EMAIL_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("EMAIL_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_EMAIL_PORT,
        };

        Ok(Some(Self {
            host,
            port,
            user,
            password,
            recipient,
        }))
    }
}

fn require(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Result<String, Box<dyn Error>> {
    lookup(name).ok_or_else(|| format!("{name} not set").into())
}
