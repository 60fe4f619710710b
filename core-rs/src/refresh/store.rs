//! Current-document state cell
//!
//! One writer (the refresh path) replaces the whole document; any number of
//! readers take an `Arc` to whatever was last published. The document and its
//! timestamp are published together under a single lock, held only for the
//! pointer copy.

use crate::errors::Result;
use crate::schema::{load_snapshot, SchemaDocument};
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Display format of refresh timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// When the current document was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastUpdated {
    Never,
    LoadedFromFile,
    At(DateTime<Local>),
}

impl LastUpdated {
    pub fn is_never(&self) -> bool {
        matches!(self, LastUpdated::Never)
    }
}

impl std::fmt::Display for LastUpdated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastUpdated::Never => f.write_str("Never"),
            LastUpdated::LoadedFromFile => f.write_str("Loaded from file"),
            LastUpdated::At(at) => write!(f, "{}", at.format(TIMESTAMP_FORMAT)),
        }
    }
}

#[derive(Debug)]
struct Published {
    document: Arc<SchemaDocument>,
    last_updated: LastUpdated,
}

/// Holder of the current schema document
#[derive(Debug)]
pub struct SchemaStore {
    current: RwLock<Arc<Published>>,
}

impl SchemaStore {
    /// Store holding `document`, stamped `last_updated`
    pub fn new(document: SchemaDocument, last_updated: LastUpdated) -> Self {
        Self {
            current: RwLock::new(Arc::new(Published {
                document: Arc::new(document),
                last_updated,
            })),
        }
    }

    /// Store holding an empty, well-formed document
    pub fn empty(endpoint: &str) -> Self {
        Self::new(SchemaDocument::empty(endpoint), LastUpdated::Never)
    }

    /// Static mode: a store loaded once from a snapshot file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use odissei_schema::refresh::SchemaStore;
    ///
    /// let store = SchemaStore::from_snapshot("odissei_schema_processed.json").unwrap();
    /// println!("{} classes", store.read().metadata.total_classes);
    /// ```
    pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let document = load_snapshot(path)?;
        Ok(Self::new(document, LastUpdated::LoadedFromFile))
    }

    fn published(&self) -> Arc<Published> {
        // A poisoned lock still holds a complete Arc; keep serving it
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Latest published document
    pub fn read(&self) -> Arc<SchemaDocument> {
        Arc::clone(&self.published().document)
    }

    pub fn last_updated(&self) -> LastUpdated {
        self.published().last_updated
    }

    /// Document and timestamp from the same publication
    pub fn snapshot(&self) -> (Arc<SchemaDocument>, LastUpdated) {
        let published = self.published();
        (Arc::clone(&published.document), published.last_updated)
    }

    /// Publish a replacement document; returns the one it replaced
    pub fn swap(&self, document: Arc<SchemaDocument>, last_updated: LastUpdated) -> Arc<SchemaDocument> {
        let next = Arc::new(Published {
            document,
            last_updated,
        });
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(&mut *guard, next);
        Arc::clone(&previous.document)
    }
}
