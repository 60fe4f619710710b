//! # ODISSEI Schema - SPARQL schema harvester
//!
//! Harvests the RDF/OWL schema (classes, predicates, namespaces) of a SPARQL
//! endpoint and keeps a normalized schema document that a dashboard can read
//! at any time.
//!
//! ## Pipeline
//!
//! ```text
//! RefreshScheduler ──▶ SchemaAggregator ──▶ SparqlClient ──▶ endpoint
//!        │                    │
//!        │                    ├── uri::namespace_of / local_name_of
//!        │                    └── vocabulary::classify_group / markers
//!        ▼
//!   SchemaStore (Arc swap) ◀── dashboard reads
//!        │
//!        └── snapshot JSON (backup on success, fallback at startup)
//! ```
//!
//! ## Modes
//!
//! - **Static**: [`SchemaStore::from_snapshot`] loads a document once.
//! - **Live**: [`RefreshScheduler::start`] fetches at startup and then on a
//!   fixed interval, keeping the last good document when the endpoint fails.

pub mod config;
pub mod errors;
pub mod refresh;
pub mod schema;
pub mod sparql;
pub mod uri;
pub mod vocabulary;

pub use config::HarvestConfig;
pub use errors::{IngestError, IngestFailure};
pub use refresh::{LastUpdated, RefreshHandle, RefreshOptions, RefreshOutcome, RefreshScheduler, SchemaStore};
pub use schema::{assemble, build_schema_document, SchemaAggregator, SchemaDocument, Term, TermCollection};
pub use sparql::{HttpTransport, ResultShape, SparqlClient, SparqlQuery, SparqlTransport};
pub use uri::{local_name_of, namespace_of};
pub use vocabulary::{classify_group, is_domain_specific, NamespaceGroup};

/// Crate version, also reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
