//! Schema aggregation
//!
//! Runs the predicate and class queries and folds the results into a
//! [`SchemaDocument`].
//!
//! Only predicate namespaces feed `odissei_namespaces` / `dataverse_namespaces`.
//! Class namespaces reach `all_namespaces` and nothing else.

use super::document::{SchemaDocument, Term};
use crate::errors::{IngestError, Result};
use crate::sparql::SparqlClient;
use crate::vocabulary::{classify_group, NamespaceGroup, TermKind};
use tracing::info;

/// Default LIMIT applied to both harvesting queries.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Builds schema documents from one endpoint
#[derive(Debug, Clone)]
pub struct SchemaAggregator {
    client: SparqlClient,
    limit: usize,
}

impl SchemaAggregator {
    pub fn new(client: SparqlClient) -> Self {
        Self {
            client,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn client(&self) -> &SparqlClient {
        &self.client
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Fetch and assemble a fresh document
    ///
    /// # Errors
    ///
    /// Propagates transport and HTTP status failures from either query, and
    /// returns `EmptyResult` when the endpoint reported no classes at all.
    pub async fn build(&self) -> Result<SchemaDocument> {
        info!("[Aggregator] Fetching schema data from {}", self.endpoint());

        let predicates = self.client.try_distinct_predicates(self.limit).await?;
        let classes = self.client.try_distinct_classes(self.limit).await?;

        if classes.is_empty() {
            return Err(IngestError::EmptyResult(format!(
                "no classes returned by {} ({} predicates)",
                self.endpoint(),
                predicates.len()
            )));
        }

        let document = assemble(self.endpoint(), predicates, classes);
        info!(
            "[Aggregator] Fetched {} classes and {} predicates",
            document.metadata.total_classes, document.metadata.total_predicates
        );
        Ok(document)
    }
}

/// Fetch and assemble with the default limit
pub async fn build_schema_document(client: &SparqlClient) -> Result<SchemaDocument> {
    SchemaAggregator::new(client.clone()).build().await
}

/// Pure assembly of a document from already-fetched terms
///
/// # Example
///
/// ```
/// use odissei_schema::schema::{assemble, Term};
///
/// let predicates = vec![Term::from_uri("https://portal.odissei.nl/schema/geospatial#hasLocation".to_string())];
/// let classes = vec![Term::from_uri("http://xmlns.com/foaf/0.1/Person".to_string())];
///
/// let doc = assemble("https://example.org/sparql", predicates, classes);
/// assert_eq!(doc.metadata.domain_specific_predicates, 1);
/// assert_eq!(doc.namespaces.odissei_namespaces, vec!["https://portal.odissei.nl/schema/geospatial#"]);
/// assert!(doc.is_consistent());
/// ```
pub fn assemble(endpoint: &str, predicates: Vec<Term>, classes: Vec<Term>) -> SchemaDocument {
    let mut document = SchemaDocument::empty(endpoint);

    for predicate in &predicates {
        let namespace = predicate.namespace();
        document.namespaces.all_namespaces.insert(namespace.clone());

        if !TermKind::Predicate.is_domain_specific(&namespace) {
            continue;
        }
        document.predicates.domain_specific.push(predicate.clone());

        let group_list = match classify_group(&namespace) {
            NamespaceGroup::Odissei => &mut document.namespaces.odissei_namespaces,
            NamespaceGroup::Dataverse => &mut document.namespaces.dataverse_namespaces,
            NamespaceGroup::Other => continue,
        };
        if !group_list.contains(&namespace) {
            group_list.push(namespace);
        }
    }

    for class in &classes {
        let namespace = class.namespace();
        if TermKind::Class.is_domain_specific(&namespace) {
            document.classes.domain_specific.push(class.clone());
        }
        document.namespaces.all_namespaces.insert(namespace);
    }

    document.predicates.all = predicates;
    document.classes.all = classes;
    document.refresh_counts();
    document
}
