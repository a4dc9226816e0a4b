//! DNS-over-HTTPS JSON client.

use crate::config::RetryConfig;
use crate::resolver::Resolver;
use async_trait::async_trait;
use mailcheck_core::{DohResponse, MailcheckError, RecordType, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Google's public JSON resolver
pub const DEFAULT_RESOLVER_URL: &str = "https://dns.google/resolve";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Media type of the JSON DoH dialect
const DNS_JSON: &str = "application/dns-json";

/// Client for a JSON DNS-over-HTTPS resolver
#[derive(Clone)]
pub struct DohClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    endpoint: Url,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl Default for DohClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DohClient {
    /// Create a client for the default resolver
    #[must_use]
    pub fn new() -> Self {
        DohClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DohClientBuilder {
        DohClientBuilder::new()
    }

    /// Resolver endpoint in use
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Query the resolver, retrying per the client's [`RetryConfig`]
    pub async fn query(&self, name: &str, record_type: RecordType) -> Result<DohResponse> {
        let mut attempt = 0;
        loop {
            match self.query_once(name, record_type).await {
                Ok(resp) => return Ok(resp),
                Err(e) if self.inner.retry_config.should_retry(attempt, &e) => {
                    let backoff = self.inner.retry_config.backoff_for(attempt);
                    warn!(
                        name = %name,
                        %record_type,
                        error = %e,
                        ?backoff,
                        "DoH query failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Record data for `name`, empty when the name has none
    pub async fn records(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        let resp = self.query(name, record_type).await?;

        if resp.is_nxdomain() {
            debug!(name = %name, %record_type, "NXDOMAIN");
            return Ok(Vec::new());
        }
        if resp.status != 0 {
            return Err(MailcheckError::Resolver { rcode: resp.status });
        }

        Ok(resp.data_for(record_type))
    }

    async fn query_once(&self, name: &str, record_type: RecordType) -> Result<DohResponse> {
        let url = self.build_url(name, record_type);
        debug!(url = %url, "DoH request");

        let response = self
            .inner
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    fn build_url(&self, name: &str, record_type: RecordType) -> Url {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("type", record_type.as_str());
        url
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<DohResponse> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        if !status.is_success() {
            return Err(MailcheckError::Api {
                code: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            MailcheckError::UnexpectedResponse(format!("{e}: {}", truncate(&body)))
        })
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
impl Resolver for DohClient {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        self.records(name, record_type).await
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(80).collect()
}

/// Builder for configuring a [`DohClient`]
pub struct DohClientBuilder {
    endpoint: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl Default for DohClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DohClientBuilder {
    /// Create a new builder with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_RESOLVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("mailcheck/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::none(),
        }
    }

    /// Set the resolver endpoint (useful for testing)
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
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

    /// Build the client, validating the endpoint
    pub fn try_build(self) -> Result<DohClient> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| MailcheckError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| MailcheckError::Config(e.to_string()))?;

        Ok(DohClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }

    /// Build the client
    ///
    /// # Panics
    ///
    /// Panics if the endpoint is not a valid URL or the TLS backend fails to
    /// initialize. Use [`Self::try_build`] for user-supplied endpoints.
    #[must_use]
    pub fn build(self) -> DohClient {
        self.try_build().expect("Failed to build DoH client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parameters_are_encoded() {
        let client = DohClient::new();
        let url = client.build_url("google._domainkey.example.com", RecordType::Txt);
        assert_eq!(
            url.as_str(),
            "https://dns.google/resolve?name=google._domainkey.example.com&type=TXT"
        );
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let err = DohClient::builder().endpoint("not a url").try_build().err();
        assert!(matches!(err, Some(MailcheckError::InvalidUrl(_))));
    }
}
