//! Backend bridge: forwards each dispatched notification to the academy's
//! enquiry endpoint over HTTP.
//!
//! The bridge is best-effort. A backend outage must never break a
//! visitor-facing submission, so every failure, connection errors and
//! non-2xx responses alike, is absorbed into [`BridgeOutcome::LocallyQueued`]
//! after logging. Callers that care whether the backend really received the
//! enquiry inspect the tagged outcome instead of catching an error.

use anyhow::Context;
use enrolldesk_enquiry::Enquiry;
use serde::Serialize;
use std::time::Duration;
use strum::Display;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::config::BridgeConfig;

const ENQUIRY_PATH: &str = "/api/enquiry";
const SOURCE: &str = "website";

/// Which notification leg a bridge record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DispatchTag {
    Admin,
    Confirmation,
}

/// Whether the backend actually received the record, or the failure was
/// absorbed and the enquiry only lives in this process's logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    Delivered,
    LocallyQueued,
}

#[derive(Debug, Error)]
enum BridgeError {
    #[error("server error: {status}")]
    Server { status: u16 },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct EnquiryRecord<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    course: Option<&'a str>,
    message: Option<&'a str>,
    #[serde(rename = "type")]
    tag: String,
    timestamp: String,
    source: &'static str,
}

#[derive(Clone)]
pub struct BackendBridge {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl BackendBridge {
    pub fn new(config: &BridgeConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build bridge HTTP client")?;

        let base_url = match config.base_url.trim() {
            "" => None,
            url => Some(url.trim_end_matches('/').to_owned()),
        };

        Ok(Self { client, base_url })
    }

    /// Post one enquiry record. Infallible by type; see the module docs.
    pub async fn post(&self, enquiry: &Enquiry, tag: DispatchTag) -> BridgeOutcome {
        let Some(base_url) = &self.base_url else {
            debug!(enquiry = %enquiry.id, %tag, "bridge disabled, recording locally");
            return BridgeOutcome::LocallyQueued;
        };

        match self.try_post(base_url, enquiry, tag).await {
            Ok(()) => {
                debug!(enquiry = %enquiry.id, %tag, "bridge accepted enquiry record");
                BridgeOutcome::Delivered
            }
            Err(err) => {
                warn!(
                    enquiry = %enquiry.id,
                    %tag,
                    error = %err,
                    "bridge unreachable, enquiry recorded locally"
                );
                BridgeOutcome::LocallyQueued
            }
        }
    }

    async fn try_post(
        &self,
        base_url: &str,
        enquiry: &Enquiry,
        tag: DispatchTag,
    ) -> Result<(), BridgeError> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();

        let record = EnquiryRecord {
            name: &enquiry.name,
            email: &enquiry.email,
            phone: &enquiry.phone,
            course: enquiry.course.as_deref(),
            message: enquiry.message.as_deref(),
            tag: tag.to_string(),
            timestamp,
            source: SOURCE,
        };

        let response = self
            .client
            .post(format!("{base_url}{ENQUIRY_PATH}"))
            .json(&record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BridgeError::Server {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
