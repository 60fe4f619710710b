//! JSON snapshot persistence for schema documents
//!
//! Snapshots are pretty-printed JSON. Writes go to a sibling `.tmp` file that
//! is renamed over the target, so a reader never sees a half-written file.

use super::document::SchemaDocument;
use crate::errors::{IngestError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a snapshot
///
/// # Errors
///
/// `FileNotFound` when the file does not exist, `Persistence` when it cannot
/// be read or does not hold a schema document.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SchemaDocument> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_string_lossy().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        IngestError::Persistence(format!("Failed to read snapshot {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        IngestError::Persistence(format!("Invalid snapshot {}: {}", path.display(), e))
    })
}

/// Write a snapshot atomically
pub fn save_snapshot<P: AsRef<Path>>(document: &SchemaDocument, path: P) -> Result<()> {
    let path = path.as_ref();

    let json = serde_json::to_string_pretty(document).map_err(|e| {
        IngestError::Persistence(format!("Failed to serialize snapshot: {}", e))
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                IngestError::Persistence(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, json).map_err(|e| {
        IngestError::Persistence(format!("Failed to write {}: {}", tmp_path.display(), e))
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        IngestError::Persistence(format!("Failed to replace {}: {}", path.display(), e))
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "snapshot.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
