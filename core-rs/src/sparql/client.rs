//! SPARQL endpoint client
//!
//! Executes SELECT queries over HTTP GET and turns the bindings of one
//! projection variable into [`Term`]s.
//!
//! Failure policy:
//! - transport failure → `IngestError::Network`
//! - non-2xx status → `IngestError::HttpStatus`
//! - body that is not JSON → empty bindings (endpoints sometimes answer with an
//!   HTML error page and a 200)
//! - JSON of an unknown layout → no terms

use super::query::SparqlQuery;
use super::response::{empty_bindings, ResultShape};
use super::transport::{HttpTransport, SparqlTransport};
use crate::errors::{IngestError, Result};
use crate::schema::Term;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Client bound to one SPARQL endpoint
#[derive(Clone)]
pub struct SparqlClient {
    endpoint: Url,
    transport: Arc<dyn SparqlTransport>,
}

impl std::fmt::Debug for SparqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparqlClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl SparqlClient {
    /// Create a client using the reqwest transport
    ///
    /// # Example
    ///
    /// ```
    /// use odissei_schema::sparql::SparqlClient;
    /// use std::time::Duration;
    ///
    /// let client = SparqlClient::new(
    ///     "https://example.org/sparql",
    ///     Duration::from_secs(30),
    ///     "ODISSEI-Schema-Visualizer/1.0",
    /// ).unwrap();
    /// assert_eq!(client.endpoint(), "https://example.org/sparql");
    /// ```
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let transport = HttpTransport::new(timeout, user_agent)?;
        Self::with_transport(endpoint, Arc::new(transport))
    }

    /// Create a client over any transport
    pub fn with_transport(endpoint: &str, transport: Arc<dyn SparqlTransport>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self { endpoint, transport })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Endpoint URL with the query text appended as the `query` parameter
    ///
    /// # Example
    ///
    /// ```
    /// use odissei_schema::sparql::SparqlClient;
    /// use std::time::Duration;
    ///
    /// let client = SparqlClient::new("https://example.org/sparql", Duration::from_secs(1), "t").unwrap();
    /// let url = client.request_url("SELECT ?s WHERE {?s ?p ?o}");
    /// assert!(url.as_str().starts_with("https://example.org/sparql?query="));
    /// ```
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    /// Run a query and return the parsed JSON body
    pub async fn execute(&self, query: &SparqlQuery) -> Result<Value> {
        let url = self.request_url(query.as_str());
        info!("[SparqlClient] Executing SPARQL query: {}...", query.preview());

        let response = self.transport.get(&url).await.map_err(|e| {
            error!("[SparqlClient] Error executing SPARQL query: {}", e);
            e
        })?;

        if !response.is_success() {
            error!(
                "[SparqlClient] Endpoint answered HTTP {} for query: {}...",
                response.status,
                query.preview()
            );
            return Err(IngestError::HttpStatus {
                code: response.status,
                query: query.preview(),
            });
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("[SparqlClient] Response is not valid JSON ({}), treating as empty result", e);
                Ok(empty_bindings())
            }
        }
    }

    /// Run a query and map the bindings of its projection variable to terms
    pub async fn select_terms(&self, query: &SparqlQuery) -> Result<Vec<Term>> {
        let shape = ResultShape::decode(self.execute(query).await?);

        if let ResultShape::Unrecognized(kind) = &shape {
            warn!("[SparqlClient] Unexpected result format: {}", kind);
            return Ok(Vec::new());
        }

        let terms: Vec<Term> = shape
            .values_of(query.variable())
            .into_iter()
            .map(Term::from_uri)
            .collect();

        debug!(
            "[SparqlClient] Decoded {} ?{} term(s) from {} response",
            terms.len(),
            query.variable(),
            shape.label()
        );
        Ok(terms)
    }

    pub async fn try_distinct_predicates(&self, limit: usize) -> Result<Vec<Term>> {
        self.select_terms(&SparqlQuery::distinct_predicates(limit)).await
    }

    pub async fn try_distinct_classes(&self, limit: usize) -> Result<Vec<Term>> {
        self.select_terms(&SparqlQuery::distinct_classes(limit)).await
    }

    /// Distinct predicates; empty on any failure
    pub async fn get_distinct_predicates(&self, limit: usize) -> Vec<Term> {
        self.try_distinct_predicates(limit).await.unwrap_or_default()
    }

    /// Distinct classes; empty on any failure
    pub async fn get_distinct_classes(&self, limit: usize) -> Vec<Term> {
        self.try_distinct_classes(limit).await.unwrap_or_default()
    }
}
