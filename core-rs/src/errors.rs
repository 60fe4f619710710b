//! Error types for the schema harvester

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {code} for query: {query}")]
    HttpStatus { code: u16, query: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The failure contract of a single ingestion attempt.
pub type IngestFailure = IngestError;

impl From<url::ParseError> for IngestError {
    fn from(err: url::ParseError) -> Self {
        IngestError::InvalidEndpoint(err.to_string())
    }
}

impl IngestError {
    /// Short machine-readable kind, used in log lines and refresh outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Network(_) => "network",
            IngestError::HttpStatus { .. } => "http_status",
            IngestError::MalformedResponse(_) => "malformed_response",
            IngestError::EmptyResult(_) => "empty_result",
            IngestError::Persistence(_) => "persistence",
            IngestError::InvalidEndpoint(_) => "invalid_endpoint",
            IngestError::Config(_) => "config",
            IngestError::FileNotFound(_) => "file_not_found",
            IngestError::Io(_) => "io",
            IngestError::Json(_) => "json",
            IngestError::Yaml(_) => "yaml",
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
