/**
 * harvest.rs
 * Parser for harvester configuration files (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: odissei-schema/v1
 * kind: Harvester
 * spec:
 *   endpoint: https://api.kg.odissei.nl/.../sparql
 *   refreshIntervalSecs: 300
 *   requestTimeoutSecs: 30
 *   queryLimit: 100
 *   userAgent: ODISSEI-Schema-Visualizer/1.0
 *   snapshotPath: odissei_schema_processed.json
 *   backupPath: odissei_schema_live.json
 * ```
 *
 * Every spec key except `endpoint` is optional and falls back to the defaults
 * below. `snapshotPath: null` / `backupPath: null` disable the file.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::IngestError;
use crate::schema::DEFAULT_QUERY_LIMIT;

pub const API_VERSION: &str = "odissei-schema/v1";
pub const KIND: &str = "Harvester";

pub const DEFAULT_ENDPOINT: &str = "https://api.kg.odissei.nl/datasets/odissei/odissei-kg-acceptance/services/odissei-kg-acceptance-virtuoso/sparql";
pub const DEFAULT_USER_AGENT: &str = "ODISSEI-Schema-Visualizer/1.0";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SNAPSHOT_PATH: &str = "odissei_schema_processed.json";
pub const DEFAULT_BACKUP_PATH: &str = "odissei_schema_live.json";

/// Harvester config file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HarvestConfig {
    pub api_version: String,
    pub kind: String,
    pub spec: HarvestSpec,
}

/// Harvester settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HarvestSpec {
    /// SPARQL endpoint base URL
    pub endpoint: String,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// LIMIT applied to the predicate and class queries
    #[serde(default = "default_query_limit")]
    pub query_limit: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Seed snapshot read at startup when the endpoint is unreachable
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: Option<PathBuf>,
    /// Written after every successful refresh
    #[serde(default = "default_backup_path")]
    pub backup_path: Option<PathBuf>,
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_query_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_snapshot_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH))
}

fn default_backup_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_BACKUP_PATH))
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT.to_string())
    }
}

impl HarvestConfig {
    /// Config for `endpoint` with every other setting at its default
    ///
    /// # Example
    /// ```
    /// use odissei_schema::config::HarvestConfig;
    ///
    /// let config = HarvestConfig::new("https://example.org/sparql".to_string());
    /// assert_eq!(config.spec.query_limit, 100);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(endpoint: String) -> Self {
        HarvestConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            spec: HarvestSpec {
                endpoint,
                refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                query_limit: DEFAULT_QUERY_LIMIT,
                user_agent: default_user_agent(),
                snapshot_path: default_snapshot_path(),
                backup_path: default_backup_path(),
            },
        }
    }

    /// Load and validate a config file
    ///
    /// # Arguments
    /// * `path` - Path to the YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            IngestError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: HarvestConfig = serde_yaml::from_str(&content).map_err(|e| {
            IngestError::Config(format!("Invalid harvester YAML: {}", e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate structure and values
    ///
    /// Ensures:
    /// - apiVersion is "odissei-schema/v1" and kind is "Harvester"
    /// - endpoint is an absolute http(s) URL
    /// - interval, timeout and limit are non-zero
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.api_version != API_VERSION {
            return Err(IngestError::Config(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(IngestError::Config(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.spec.endpoint.is_empty() {
            return Err(IngestError::Config("spec.endpoint cannot be empty".to_string()));
        }

        let endpoint = Url::parse(&self.spec.endpoint)
            .map_err(|e| IngestError::Config(format!("spec.endpoint is not a URL: {}", e)))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(IngestError::Config(format!(
                "spec.endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        if self.spec.refresh_interval_secs == 0 {
            return Err(IngestError::Config("spec.refreshIntervalSecs must be positive".to_string()));
        }

        if self.spec.request_timeout_secs == 0 {
            return Err(IngestError::Config("spec.requestTimeoutSecs must be positive".to_string()));
        }

        if self.spec.query_limit == 0 {
            return Err(IngestError::Config("spec.queryLimit must be positive".to_string()));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), IngestError> {
        let yaml = serde_yaml::to_string(self)?;

        fs::write(path.as_ref(), yaml).map_err(|e| {
            IngestError::Config(format!("Failed to write harvester config: {}", e))
        })?;

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.spec.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.spec.request_timeout_secs)
    }
}
