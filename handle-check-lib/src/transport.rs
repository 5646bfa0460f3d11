//! HTTP transport abstraction for platform probes.
//!
//! The checker talks to the network exclusively through the
//! `HttpTransport` trait, so tests can substitute a stub that returns
//! canned responses or counts in-flight requests. The production
//! implementation wraps a single shared `reqwest::Client`, which is safe
//! for concurrent use and pools connections across probes.

use crate::error::HandleCheckError;
use async_trait::async_trait;
use std::time::Duration;

/// Minimal view of an HTTP response, sufficient for classification.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// HTTP status code of the final response (after redirects)
    pub status: u16,

    /// Response body as text
    pub body: String,
}

/// A transport capable of fetching a URL on behalf of a probe task.
///
/// Implementations must be safe to share across concurrent probe tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a single GET request and return the final response.
    ///
    /// Implementations follow redirects and apply their own
    /// request-level timeout. A single failed attempt is final; the
    /// checker never retries.
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, HandleCheckError>;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout and User-Agent.
    ///
    /// The client-level timeout gets a small buffer on top of the probe
    /// timeout so the checker's own deadline fires first and produces
    /// the more descriptive error.
    pub fn new(request_timeout: Duration, user_agent: &str) -> Result<Self, HandleCheckError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout + Duration::from_secs(2))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| {
                HandleCheckError::network_with_source(
                    "Failed to create HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, HandleCheckError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProbeResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(10), "handle-check/test");
        assert!(transport.is_ok());
    }
}
