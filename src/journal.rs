//! The in-memory journal aggregate and its persistence lifecycle.

use crate::config::Config;
use crate::entry::Entry;
use crate::store::JournalStore;
use anyhow::{Context, Result};
use chrono::Local;
use log::warn;
use std::fs;

/// The ordered collection of entries for the active session.
///
/// The journal is append-only: entries are added through [`append`] and never
/// edited or removed. Each append persists the full snapshot through the
/// [`JournalStore`]; if that persist fails, the in-memory sequence remains
/// the source of truth for the rest of the session and the failure is only
/// logged.
///
/// [`append`]: Journal::append
#[derive(Debug)]
pub struct Journal {
    pub config: Config,
    store: JournalStore,
    entries: Vec<Entry>,
}

impl Journal {
    /// Creates a new `Journal`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Journal` with a specific `Config`.
    ///
    /// This also ensures that the journal's root directory exists. The
    /// journal starts empty; call [`hydrate`](Journal::hydrate) to fill it.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.journal_dir)
            .with_context(|| format!("creating {}", config.journal_dir.display()))?;
        let store = JournalStore::new(&config.journal_dir);
        Ok(Self {
            config,
            store,
            entries: Vec::new(),
        })
    }

    /// Replaces the in-memory sequence wholesale.
    ///
    /// Called once at session entry: `Some` carries a hand-off value from the
    /// capture flow, `None` falls back to the persisted snapshot (which is
    /// empty when nothing was ever saved or the snapshot is unreadable).
    pub async fn hydrate(&mut self, initial: Option<Vec<Entry>>) {
        self.entries = match initial {
            Some(entries) => entries,
            None => self.store.load().await,
        };
    }

    /// Appends an entry and persists the updated snapshot.
    ///
    /// Stamps `date_added = now()` when the entry doesn't carry one yet. The
    /// in-memory append is visible to readers before the persist completes;
    /// a persist failure is logged and otherwise ignored, leaving this
    /// journal authoritative for the session. Returns the appended entry.
    pub async fn append(&mut self, mut entry: Entry) -> &Entry {
        if entry.date_added.is_none() {
            entry.date_added = Some(Local::now());
        }
        self.entries.push(entry);

        if let Err(e) = self.store.save(&self.entries).await {
            warn!("persisting journal snapshot failed: {e:#}");
        }

        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// All entries in insertion (= chronological) order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
