//! Schema document data model
//!
//! The JSON layout of these types is the snapshot file format and the shape
//! the dashboard reads, so field names are kept in snake_case as written.

use crate::uri::{local_name_of, namespace_of};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_TITLE: &str = "ODISSEI Knowledge Graph Schema";
pub const DEFAULT_DESCRIPTION: &str = "RDF Schema extracted from the ODISSEI SPARQL endpoint";

/// A class or predicate identifier with its display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub uri: String,
    pub local_name: String,
}

impl Term {
    /// Build a term, deriving the local name from the URI
    ///
    /// # Example
    ///
    /// ```
    /// use odissei_schema::schema::Term;
    ///
    /// let term = Term::from_uri("http://xmlns.com/foaf/0.1/Person".to_string());
    /// assert_eq!(term.local_name, "Person");
    /// ```
    pub fn from_uri(uri: String) -> Self {
        let local_name = local_name_of(&uri);
        Self { uri, local_name }
    }

    pub fn namespace(&self) -> String {
        namespace_of(&self.uri)
    }
}

/// All terms of one kind plus the domain-specific subset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCollection {
    #[serde(default)]
    pub all: Vec<Term>,
    #[serde(default)]
    pub domain_specific: Vec<Term>,
}

/// Document-level counts and provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub total_classes: usize,
    #[serde(default)]
    pub total_predicates: usize,
    #[serde(default)]
    pub domain_specific_classes: usize,
    #[serde(default)]
    pub domain_specific_predicates: usize,
    /// Set by the refresh scheduler, never by the aggregator
    #[serde(default)]
    pub last_updated: Option<String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl SchemaMetadata {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            endpoint: endpoint.into(),
            total_classes: 0,
            total_predicates: 0,
            domain_specific_classes: 0,
            domain_specific_predicates: 0,
            last_updated: None,
        }
    }
}

/// Namespace groupings
///
/// `odissei_namespaces` and `dataverse_namespaces` keep first-seen order;
/// `all_namespaces` is a set and serializes sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespaces {
    #[serde(default)]
    pub odissei_namespaces: Vec<String>,
    #[serde(default)]
    pub dataverse_namespaces: Vec<String>,
    #[serde(default)]
    pub all_namespaces: BTreeSet<String>,
}

/// Aggregate root consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub metadata: SchemaMetadata,
    #[serde(default)]
    pub namespaces: Namespaces,
    #[serde(default)]
    pub classes: TermCollection,
    #[serde(default)]
    pub predicates: TermCollection,
}

impl SchemaDocument {
    /// Well-formed document with no data
    ///
    /// # Example
    ///
    /// ```
    /// use odissei_schema::schema::SchemaDocument;
    ///
    /// let doc = SchemaDocument::empty("https://example.org/sparql");
    /// assert_eq!(doc.metadata.total_classes, 0);
    /// assert!(doc.is_consistent());
    /// ```
    pub fn empty(endpoint: impl Into<String>) -> Self {
        Self {
            metadata: SchemaMetadata::new(endpoint),
            namespaces: Namespaces::default(),
            classes: TermCollection::default(),
            predicates: TermCollection::default(),
        }
    }

    /// Recompute the four metadata counts from the collections
    pub fn refresh_counts(&mut self) {
        self.metadata.total_classes = self.classes.all.len();
        self.metadata.total_predicates = self.predicates.all.len();
        self.metadata.domain_specific_classes = self.classes.domain_specific.len();
        self.metadata.domain_specific_predicates = self.predicates.domain_specific.len();
    }

    /// True when every metadata count matches its collection
    pub fn is_consistent(&self) -> bool {
        self.metadata.total_classes == self.classes.all.len()
            && self.metadata.total_predicates == self.predicates.all.len()
            && self.metadata.domain_specific_classes == self.classes.domain_specific.len()
            && self.metadata.domain_specific_predicates == self.predicates.domain_specific.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.all.is_empty() && self.predicates.all.is_empty()
    }
}
