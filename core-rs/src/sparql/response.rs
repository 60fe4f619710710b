//! Result-shape decoding for SPARQL SELECT responses
//!
//! Endpoints in the wild answer the same SELECT in more than one JSON layout.
//! Two are accepted:
//!
//! ```text
//! [{"p": "http://x/#a"}]                                  flat list
//! {"results": {"bindings": [{"p": {"value": "http://x/#a"}}]}}   SPARQL 1.1 JSON
//! ```
//!
//! Everything else decodes to `Unrecognized` and yields no terms.

use serde_json::{json, Map, Value};

type Row = Map<String, Value>;

/// Discriminated form of a decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResultShape {
    /// Array of objects keyed directly by variable name
    FlatList(Vec<Row>),

    /// `results.bindings` array of SPARQL 1.1 JSON results
    SparqlBindings(Vec<Row>),

    /// Anything else; carries the JSON type name for logging
    Unrecognized(&'static str),
}

impl ResultShape {
    /// Classify a response body. Non-object array entries are dropped.
    pub fn decode(value: Value) -> Self {
        match value {
            Value::Array(items) => ResultShape::FlatList(into_rows(items)),
            Value::Object(mut object) => match object.remove("results") {
                Some(Value::Object(mut results)) => match results.remove("bindings") {
                    Some(Value::Array(bindings)) => ResultShape::SparqlBindings(into_rows(bindings)),
                    _ => ResultShape::SparqlBindings(Vec::new()),
                },
                Some(_) => ResultShape::SparqlBindings(Vec::new()),
                None => ResultShape::Unrecognized("object"),
            },
            other => ResultShape::Unrecognized(json_type_name(&other)),
        }
    }

    /// Short label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            ResultShape::FlatList(_) => "flat-list",
            ResultShape::SparqlBindings(_) => "sparql-bindings",
            ResultShape::Unrecognized(_) => "unrecognized",
        }
    }

    /// String values bound to `variable`, in row order.
    ///
    /// Rows without the variable are skipped. A binding that is a bare string
    /// instead of a `{"value": ...}` term object is accepted in either shape.
    pub fn values_of(&self, variable: &str) -> Vec<String> {
        let rows = match self {
            ResultShape::FlatList(rows) | ResultShape::SparqlBindings(rows) => rows,
            ResultShape::Unrecognized(_) => return Vec::new(),
        };

        rows.iter()
            .filter_map(|row| row.get(variable))
            .filter_map(term_value)
            .collect()
    }
}

/// Body substituted when an endpoint answers with something that is not JSON.
pub fn empty_bindings() -> Value {
    json!({"results": {"bindings": []}})
}

fn into_rows(items: Vec<Value>) -> Vec<Row> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect()
}

fn term_value(bound: &Value) -> Option<String> {
    match bound {
        Value::String(s) => Some(s.clone()),
        Value::Object(term) => term.get("value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
