//! Refresh scheduler
//!
//! Keeps the [`SchemaStore`] of the live-data mode fresh:
//!
//! 1. `start` fetches once before returning. If that fails, the store is seeded
//!    from the backup snapshot, then the seed snapshot, and otherwise keeps its
//!    empty document.
//! 2. A background task repeats the fetch on a fixed interval until
//!    [`RefreshHandle::shutdown`] is called.
//! 3. [`RefreshScheduler::refresh_now`] runs the same fetch-and-swap on demand.
//!
//! Refreshes are serialized by a gate; a trigger that arrives while another
//! refresh is running waits for it and then performs its own fetch.

use super::store::{LastUpdated, SchemaStore};
use crate::config::HarvestConfig;
use crate::errors::{IngestError, Result};
use crate::schema::{load_snapshot, save_snapshot, SchemaAggregator, SchemaDocument};
use crate::sparql::SparqlClient;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Default refresh interval (5 minutes)
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Scheduling and persistence settings
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    pub interval: Duration,
    /// Written after every successful refresh, read first at startup
    pub backup_path: Option<PathBuf>,
    /// Read at startup when no backup is available
    pub seed_path: Option<PathBuf>,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            backup_path: None,
            seed_path: None,
        }
    }
}

/// Result of one refresh attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated {
        classes: usize,
        predicates: usize,
        at: LastUpdated,
    },
    Failed {
        kind: &'static str,
        message: String,
    },
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }

    fn failed(err: &IngestError) -> Self {
        RefreshOutcome::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Owner of the live document and its refresh policy
#[derive(Debug)]
pub struct RefreshScheduler {
    aggregator: SchemaAggregator,
    store: Arc<SchemaStore>,
    options: RefreshOptions,
    gate: Mutex<()>,
}

impl RefreshScheduler {
    pub fn new(aggregator: SchemaAggregator, options: RefreshOptions) -> Self {
        let store = Arc::new(SchemaStore::empty(aggregator.endpoint()));
        Self {
            aggregator,
            store,
            options,
            gate: Mutex::new(()),
        }
    }

    /// Wire client, aggregator and options from a harvester config
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        let spec = &config.spec;
        let client = SparqlClient::new(&spec.endpoint, config.request_timeout(), &spec.user_agent)?;
        let aggregator = SchemaAggregator::new(client).with_limit(spec.query_limit);
        let options = RefreshOptions {
            interval: config.refresh_interval(),
            backup_path: spec.backup_path.clone(),
            seed_path: spec.snapshot_path.clone(),
        };
        Ok(Self::new(aggregator, options))
    }

    pub fn store(&self) -> Arc<SchemaStore> {
        Arc::clone(&self.store)
    }

    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }

    /// Latest published document (never blocks on a running refresh)
    pub fn current_document(&self) -> Arc<SchemaDocument> {
        self.store.read()
    }

    pub fn last_updated(&self) -> LastUpdated {
        self.store.last_updated()
    }

    /// Fetch, and on success stamp, publish and back up the new document
    ///
    /// On failure the published document and timestamp stay exactly as they
    /// were. A failed backup write is logged; the new document stays published.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let _gate = self.gate.lock().await;
        debug!("[Refresh] Starting refresh of {}", self.aggregator.endpoint());

        let mut document = match self.aggregator.build().await {
            Ok(document) => document,
            Err(e) => {
                warn!("[Refresh] Refresh failed ({}), keeping current document: {}", e.kind(), e);
                return RefreshOutcome::failed(&e);
            }
        };

        let stamp = LastUpdated::At(Local::now());
        document.metadata.last_updated = Some(stamp.to_string());
        let document = Arc::new(document);
        self.store.swap(Arc::clone(&document), stamp);
        info!("[Refresh] Data updated successfully at {}", stamp);

        if let Some(path) = &self.options.backup_path {
            match save_snapshot(&document, path) {
                Ok(()) => debug!("[Refresh] Backup snapshot written to {}", path.display()),
                Err(e) => warn!("[Refresh] Could not write backup snapshot: {}", e),
            }
        }

        RefreshOutcome::Updated {
            classes: document.metadata.total_classes,
            predicates: document.metadata.total_predicates,
            at: stamp,
        }
    }

    /// Initial fetch with snapshot fallback
    pub async fn initialize(&self) -> RefreshOutcome {
        info!("[Refresh] Performing initial data fetch...");
        let outcome = self.refresh_now().await;
        if outcome.is_updated() {
            return outcome;
        }

        let candidates = [self.options.backup_path.as_ref(), self.options.seed_path.as_ref()];
        for path in candidates.into_iter().flatten() {
            match load_snapshot(path) {
                Ok(document) => {
                    info!("[Refresh] Serving snapshot {} until the endpoint recovers", path.display());
                    self.store.swap(Arc::new(document), LastUpdated::LoadedFromFile);
                    return outcome;
                }
                Err(IngestError::FileNotFound(_)) => {
                    debug!("[Refresh] No snapshot at {}", path.display());
                }
                Err(e) => warn!("[Refresh] Ignoring unreadable snapshot: {}", e),
            }
        }

        info!("[Refresh] No snapshot available, serving empty schema document");
        outcome
    }

    /// Initialize, then spawn the periodic refresh task
    pub async fn start(self) -> (RefreshHandle, RefreshOutcome) {
        let scheduler = Arc::new(self);
        let initial = scheduler.initialize().await;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(Arc::clone(&scheduler).run(shutdown_rx));

        let handle = RefreshHandle {
            scheduler,
            shutdown_tx,
            task,
        };
        (handle, initial)
    }

    async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; startup already fetched
        ticker.tick().await;

        info!("[Refresh] Background refresh every {:?}", self.options.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_now().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("[Refresh] Background refresh stopped");
    }
}

/// Running scheduler: read access, manual trigger, shutdown
#[derive(Debug)]
pub struct RefreshHandle {
    scheduler: Arc<RefreshScheduler>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn scheduler(&self) -> &Arc<RefreshScheduler> {
        &self.scheduler
    }

    pub fn store(&self) -> Arc<SchemaStore> {
        self.scheduler.store()
    }

    pub fn current_document(&self) -> Arc<SchemaDocument> {
        self.scheduler.current_document()
    }

    pub fn last_updated(&self) -> LastUpdated {
        self.scheduler.last_updated()
    }

    pub async fn refresh_now(&self) -> RefreshOutcome {
        self.scheduler.refresh_now().await
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the background loop and wait for it to exit
    ///
    /// A refresh already in progress is allowed to finish first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("[Refresh] Background task ended abnormally: {}", e);
        }
    }
}
