//! URI decomposition module
//!
//! Splits RDF resource identifiers into a namespace and a local name.
//!
//! ## Rules
//!
//! **Hash URIs:**
//! ```text
//! https://portal.odissei.nl/schema/geospatial#hasLocation
//! namespace:  https://portal.odissei.nl/schema/geospatial#
//! local name: hasLocation
//! ```
//!
//! **Slash URIs:**
//! ```text
//! https://dataverse.org/schema/citation/author
//! namespace:  https://dataverse.org/schema/citation/
//! local name: author
//! ```

mod decomposer;

pub use decomposer::{local_name_of, namespace_of, namespace_short_name, split_uri};
