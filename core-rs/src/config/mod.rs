//! Harvester configuration (YAML)

pub mod harvest;

pub use harvest::{HarvestConfig, HarvestSpec, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
