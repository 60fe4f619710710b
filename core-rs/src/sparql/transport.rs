//! HTTP transport for SPARQL GET requests
//!
//! The client only needs "GET this URL, give me status and body". Keeping that
//! behind a trait lets the refresh pipeline run against canned responses.

use crate::errors::{IngestError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use url::Url;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam used by [`SparqlClient`](super::SparqlClient)
///
/// Implementations return `IngestError::Network` for anything that prevents
/// a response from arriving (DNS, refused connection, timeout). Non-2xx
/// statuses are NOT errors at this layer.
#[async_trait]
pub trait SparqlTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a request timeout and `User-Agent`
    ///
    /// # Example
    ///
    /// ```
    /// use odissei_schema::sparql::HttpTransport;
    /// use std::time::Duration;
    ///
    /// let transport = HttpTransport::new(Duration::from_secs(30), "ODISSEI-Schema-Visualizer/1.0").unwrap();
    /// ```
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap a preconfigured reqwest client (proxy, TLS or header settings)
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SparqlTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| IngestError::Network(format!("Failed to read response body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
