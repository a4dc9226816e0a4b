//! Lead relay client.
//!
//! Leads go to a single stateless relay endpoint which fans them out to the
//! marketing platform and the spreadsheet log. This module only speaks the
//! relay's `POST` JSON contract.

use async_trait::async_trait;
use mailcheck_core::{LeadSubmission, MailcheckError, RelayAck, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::RetryConfig;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination for captured leads
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Deliver one lead
    async fn submit(&self, lead: &LeadSubmission) -> Result<RelayAck>;
}

/// HTTP client for the lead relay
#[derive(Clone)]
pub struct RelayClient {
    inner: Arc<RelayInner>,
}

struct RelayInner {
    http: HttpClient,
    endpoint: Url,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl RelayClient {
    /// Create a builder for the given relay endpoint
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> RelayClientBuilder {
        RelayClientBuilder::new(endpoint)
    }

    async fn post_once(&self, lead: &LeadSubmission) -> Result<RelayAck> {
        debug!(url = %self.inner.endpoint, "POST lead");

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(lead)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        if !status.is_success() {
            // The relay reports failures as {"error": "..."}
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(MailcheckError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let ack: RelayAck = serde_json::from_str(&body)?;
        if ack.ok {
            Ok(ack)
        } else {
            Err(MailcheckError::Relay(
                ack.error_message()
                    .unwrap_or_else(|| "relay reported failure".to_string()),
            ))
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn map_transport_error(&self, e: &reqwest::Error) -> MailcheckError {
        if e.is_timeout() {
            MailcheckError::Timeout(self.inner.timeout.as_millis() as u64)
        } else if e.is_connect() {
            MailcheckError::Connection(e.to_string())
        } else {
            MailcheckError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl LeadSink for RelayClient {
    async fn submit(&self, lead: &LeadSubmission) -> Result<RelayAck> {
        let mut attempt = 0;
        loop {
            match self.post_once(lead).await {
                Ok(ack) => {
                    info!(domain = %lead.domain, attempts = attempt + 1, "lead relayed");
                    return Ok(ack);
                }
                Err(e) if self.inner.retry_config.should_retry(attempt, &e) => {
                    let backoff = self.inner.retry_config.backoff_for(attempt);
                    warn!(error = %e, ?backoff, attempt, "lead relay failed, retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Builder for configuring a [`RelayClient`]
pub struct RelayClientBuilder {
    endpoint: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl RelayClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("mailcheck/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<RelayClient> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| MailcheckError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| MailcheckError::Config(e.to_string()))?;

        Ok(RelayClient {
            inner: Arc::new(RelayInner {
                http,
                endpoint,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}
