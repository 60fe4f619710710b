/**
 * query.rs
 * SELECT query builders for schema harvesting
 */

/// Number of characters of query text included in log lines.
pub const LOG_PREVIEW_CHARS: usize = 100;

/// A SPARQL query plus the projection variable its terms are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    query: String,
    variable: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variable: variable.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Variable name whose bindings become terms (without the `?`).
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// First characters of the query text, for diagnostics.
    pub fn preview(&self) -> String {
        self.query.chars().take(LOG_PREVIEW_CHARS).collect()
    }

    /// Every distinct predicate used in the store
    pub fn distinct_predicates(limit: usize) -> Self {
        Self::new(format!("SELECT DISTINCT ?p WHERE {{?s ?p ?o}} LIMIT {}", limit), "p")
    }

    /// Every distinct `rdf:type` object in the store
    pub fn distinct_classes(limit: usize) -> Self {
        Self::new(format!("SELECT DISTINCT ?type WHERE {{?s a ?type}} LIMIT {}", limit), "type")
    }
}
