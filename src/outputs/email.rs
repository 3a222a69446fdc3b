//! SMTP delivery of the compiled report.
//!
//! Builds a multipart/alternative message with an HTML body and submits it
//! over an implicit-TLS SMTP session. One message per invocation, one fixed
//! recipient, no retry: a failed send is logged by the caller and the next
//! scheduled run tries again from scratch.

use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::error::Error;
use tracing::{info, instrument};

use crate::config::MailConfig;

/// Fixed subject line for every report email.
pub const SUBJECT: &str = "Finance Database Report - Market Prices and Economic News";

/// Seam over the mail transport.
///
/// The production implementation is [`SmtpMailer`]; tests substitute fakes
/// that record what would have been sent.
pub trait Mailer {
    /// Deliver a complete HTML document to the configured recipient.
    async fn send_html(&self, html: &str) -> Result<(), Box<dyn Error>>;
}

/// Mailer submitting over authenticated SMTPS.
///
/// Holds `None` when the mail settings were incomplete at startup; every
/// send then fails with a "not configured" error, which keeps the report
/// pipeline runnable without credentials.
pub struct SmtpMailer {
    mail: Option<MailConfig>,
}

impl SmtpMailer {
    /// Wrap the mail settings resolved at startup.
    pub fn new(mail: Option<MailConfig>) -> Self {
        Self { mail }
    }
}

impl Mailer for SmtpMailer {
    #[instrument(level = "info", skip_all)]
    async fn send_html(&self, html: &str) -> Result<(), Box<dyn Error>> {
        let Some(mail) = &self.mail else {
            return Err("mail transport not configured".into());
        };

        let message = Message::builder()
            .from(format!("Database Reporter <{}>", mail.user).parse()?)
            .to(mail.recipient.parse()?)
            .subject(SUBJECT)
            .multipart(MultiPart::alternative().singlepart(SinglePart::html(html.to_string())))?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.host)?
                .port(mail.port)
                .credentials(Credentials::new(mail.user.clone(), mail.password.clone()))
                .build();

        transport.send(message).await?;
        info!(recipient = %mail.recipient, "Report email sent");
        Ok(())
    }
}
