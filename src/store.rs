//! Durable snapshot storage for the journal: one JSON array in one file.

use crate::entry::Entry;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Fixed storage name; the store holds exactly one journal per installation.
const STORAGE_FILE: &str = "calorieInfo.json";

/// Persists the journal as a single serialized snapshot.
///
/// Reads fail soft: a missing, unreadable, or corrupt snapshot yields the
/// empty journal plus a log line, never an error. Writes overwrite the whole
/// snapshot and are serialized through an internal gate, so overlapping
/// `save` calls cannot interleave and silently drop an update.
#[derive(Debug)]
pub struct JournalStore {
    path: PathBuf,
    write_gate: Mutex<()>,
}

impl JournalStore {
    /// Creates a store rooted at `journal_dir`. Nothing is touched on disk
    /// until the first `load` or `save`.
    pub fn new(journal_dir: &Path) -> Self {
        Self {
            path: journal_dir.join(STORAGE_FILE),
            write_gate: Mutex::new(()),
        }
    }

    /// Absolute path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted journal.
    ///
    /// Returns the empty sequence on any I/O or deserialization error; the
    /// condition is logged and the session continues with an empty journal.
    pub async fn load(&self) -> Vec<Entry> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no journal snapshot at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("reading journal snapshot {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Entry>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "journal snapshot {} is not valid JSON, starting empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Serializes `entries` and replaces the snapshot file.
    ///
    /// The new snapshot is written to a sibling temp file and renamed into
    /// place, so a crash mid-write can never leave a torn snapshot at the
    /// load path; readers see either the previous snapshot or the new one.
    /// The caller decides what a failure means; in the journal's case the
    /// in-memory sequence stays authoritative for the rest of the session.
    pub async fn save(&self, entries: &[Entry]) -> Result<()> {
        let json = serde_json::to_string(entries).context("serializing journal snapshot")?;

        let _gate = self.write_gate.lock().await;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
