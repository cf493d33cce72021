//! Notification dispatcher: the admin alert and the enquirer confirmation.
//!
//! Both messages travel through an injected [`Channel`] and are shadowed by
//! a backend-bridge record. The two legs have different failure contracts:
//! an admin alert that cannot be sent aborts the submission, while a failed
//! confirmation is only logged, because by then the academy already knows
//! about the enquiry.

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use enrolldesk_enquiry::Enquiry;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::bridge::{BackendBridge, BridgeOutcome, DispatchTag};
use crate::config::NotifyConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to send admin notification: {0}")]
    AdminChannel(#[source] anyhow::Error),
    #[error("failed to compose notification: {0}")]
    Compose(#[from] askama::Error),
}

/// What happened to one notification leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { bridge: BridgeOutcome },
    Skipped,
}

/// A composed, ready-to-send message.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// The messaging capability the dispatcher depends on. SMTP in production,
/// a logging no-op without credentials, a recording mock in tests.
#[async_trait]
pub trait Channel: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()>;
}

#[derive(Template)]
#[template(path = "emails/admin-alert.txt")]
struct AdminAlertTemplate<'a> {
    form_label: String,
    timestamp: String,
    enquiry: &'a Enquiry,
}

#[derive(Template)]
#[template(path = "emails/confirmation.txt")]
struct ConfirmationTemplate<'a> {
    enquiry: &'a Enquiry,
    academy_name: &'a str,
    contact_phones: &'a [String],
}

#[derive(Clone)]
pub struct Dispatcher {
    channel: Arc<dyn Channel>,
    bridge: BackendBridge,
    config: NotifyConfig,
}

impl Dispatcher {
    pub fn new(channel: Arc<dyn Channel>, bridge: BackendBridge, config: NotifyConfig) -> Self {
        Self {
            channel,
            bridge,
            config,
        }
    }

    /// Alert the academy staff about a new enquiry. A channel failure here
    /// propagates and aborts the submission; the bridge leg never does.
    pub async fn notify_admin(&self, enquiry: &Enquiry) -> Result<DispatchOutcome, NotifyError> {
        let body = AdminAlertTemplate {
            form_label: enquiry.kind.to_string(),
            timestamp: now_rfc2822(),
            enquiry,
        }
        .render()?;

        let email = OutboundEmail {
            to: self.config.admin_email.clone(),
            subject: format!("New enquiry from {} ({})", enquiry.name, enquiry.kind),
            body,
        };

        self.channel
            .send(email)
            .await
            .map_err(NotifyError::AdminChannel)?;

        let bridge = self.bridge.post(enquiry, DispatchTag::Admin).await;
        info!(enquiry = %enquiry.id, form = enquiry.kind.slug(), "admin notified");

        Ok(DispatchOutcome::Sent { bridge })
    }

    /// Acknowledge receipt to the enquirer. Never fails the submission:
    /// compose and channel errors are logged and reported as `Skipped`.
    pub async fn notify_user(&self, enquiry: &Enquiry) -> DispatchOutcome {
        let body = match (ConfirmationTemplate {
            enquiry,
            academy_name: &self.config.from_name,
            contact_phones: &self.config.contact_phones,
        })
        .render()
        {
            Ok(body) => body,
            Err(err) => {
                warn!(enquiry = %enquiry.id, error = %err, "confirmation compose failed");
                return DispatchOutcome::Skipped;
            }
        };

        let email = OutboundEmail {
            to: enquiry.email.clone(),
            subject: format!("Thank you for your enquiry, {}", enquiry.name),
            body,
        };

        if let Err(err) = self.channel.send(email).await {
            warn!(enquiry = %enquiry.id, error = %err, "confirmation email failed");
            return DispatchOutcome::Skipped;
        }

        let bridge = self.bridge.post(enquiry, DispatchTag::Confirmation).await;
        info!(enquiry = %enquiry.id, "enquirer confirmation sent");

        DispatchOutcome::Sent { bridge }
    }
}

fn now_rfc2822() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc2822)
        .unwrap_or_default()
}

/// Build the channel the configuration asks for.
pub fn channel_from_config(config: &NotifyConfig) -> anyhow::Result<Arc<dyn Channel>> {
    if config.smtp_host.is_empty() {
        info!("SMTP host not configured, notifications will be logged only");
        return Ok(Arc::new(NoopChannel));
    }
    Ok(Arc::new(SmtpChannel::new(config)?))
}

/// Delivers through SMTP with lettre.
pub struct SmtpChannel {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpChannel {
    pub fn new(config: &NotifyConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email).parse()?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl Channel for SmtpChannel {
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)?;

        self.mailer.send(&message)?;
        Ok(())
    }
}

/// Stands in for the external channel when no credentials are configured.
pub struct NoopChannel;

#[async_trait]
impl Channel for NoopChannel {
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()> {
        info!(to = %email.to, subject = %email.subject, "notification channel inert, logging only");
        Ok(())
    }
}
