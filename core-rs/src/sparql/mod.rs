//! SPARQL endpoint access
//!
//! - query: SELECT builders for the harvesting queries
//! - response: tagged decoding of the accepted JSON result layouts
//! - transport: HTTP GET seam (reqwest implementation)
//! - client: query execution and term extraction

pub mod client;
pub mod query;
pub mod response;
pub mod transport;

pub use client::SparqlClient;
pub use query::SparqlQuery;
pub use response::{empty_bindings, ResultShape};
pub use transport::{HttpTransport, RawResponse, SparqlTransport};
