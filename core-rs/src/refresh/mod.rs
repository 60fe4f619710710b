//! Live-data refresh
//!
//! - store: the current-document cell (`read` / `swap`)
//! - scheduler: periodic and manual refresh with snapshot fallback

pub mod scheduler;
pub mod store;

pub use scheduler::{RefreshHandle, RefreshOptions, RefreshOutcome, RefreshScheduler, DEFAULT_REFRESH_INTERVAL};
pub use store::{LastUpdated, SchemaStore, TIMESTAMP_FORMAT};
