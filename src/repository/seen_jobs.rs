//! Persisted set of job ids that have already been reported.
//!
//! The store is a concurrent map mirrored to a single JSON file. The file is
//! rewritten in full on every persist through a temp-file-plus-rename, so a
//! crash mid-write leaves either the old or the new complete file. Entries
//! are never expired; only an explicit clear drops them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dashmap::DashMap;

use crate::domain::models::SeenEntry;

pub struct SeenJobStore {
    entries: DashMap<String, SeenEntry>,
    path: PathBuf,
}

impl SeenJobStore {
    /// Empty store backed by `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            entries: DashMap::new(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Rehydrate from disk. A missing or unreadable file is not an error:
    /// the store starts empty and everything counts as unseen.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let store = Self::new(path);

        let raw = match std::fs::read_to_string(&store.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No seen-jobs file at {}, starting fresh", store.path.display());
                return store;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", store.path.display(), e);
                return store;
            }
        };

        // Unknown extra fields inside each entry are ignored on read.
        match serde_json::from_str::<BTreeMap<String, SeenEntry>>(&raw) {
            Ok(map) => {
                for (id, entry) in map {
                    store.entries.insert(id, entry);
                }
                log::info!("Loaded {} previous job listings", store.entries.len());
            }
            Err(e) => {
                log::warn!(
                    "Seen-jobs file {} is corrupt ({}); treating everything as unseen",
                    store.path.display(),
                    e
                );
            }
        }

        store
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Upsert an entry. Overwriting is harmless since entries never change
    /// once written.
    pub fn record(&self, entry: SeenEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Drop every entry. The file is untouched until the next persist.
    pub fn clear(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the full mapping to disk. Writes a sibling temp file first and
    /// renames it over the target.
    pub async fn persist(&self) -> Result<()> {
        let snapshot: BTreeMap<String, SeenEntry> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let json = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize seen jobs")?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        log::debug!("Persisted {} seen jobs to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}
