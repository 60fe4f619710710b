/**
 * schema module
 *
 * - document: SchemaDocument data model (snapshot / dashboard JSON shape)
 * - aggregator: builds documents from SPARQL query results
 * - snapshot: atomic JSON persistence
 */

pub mod aggregator;
pub mod document;
pub mod snapshot;

pub use aggregator::{assemble, build_schema_document, SchemaAggregator, DEFAULT_QUERY_LIMIT};
pub use document::{Namespaces, SchemaDocument, SchemaMetadata, Term, TermCollection};
pub use snapshot::{load_snapshot, save_snapshot};
