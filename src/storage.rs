// ABOUTME: Injected key-value persistence with memory and file backends
// ABOUTME: Best-effort writes; storage failure never rolls back in-memory state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Pluggable key-value persistence.
//!
//! The engine treats storage the way the original treated `localStorage`:
//! one blob key holds the full training state, and prefixed time-series
//! keys hold weekly session snapshots consumed by analytics collaborators.
//! Writes are synchronous and best-effort; the in-memory state stays
//! authoritative for the session when a write fails.

use crate::errors::{AppError, AppResult};
use crate::models::MesocyclePhase;
use crate::state::{LandmarkStore, MesocycleState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Key under which the full training state blob is persisted
pub const STATE_KEY: &str = "training-state";

/// Prefix for weekly session snapshot keys
pub const SESSION_KEY_PREFIX: &str = "session:";

/// Key-value store abstraction injected into the engine
pub trait StateStore {
    /// Read the value at a key, if present
    ///
    /// # Errors
    /// Returns a storage error when the backend cannot be read.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value at a key, replacing any existing value
    ///
    /// # Errors
    /// Returns a storage error when the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// List all keys with the given prefix
    ///
    /// # Errors
    /// Returns a storage error when the backend cannot be enumerated.
    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;
}

/// Full persisted engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    /// Per-muscle landmark and volume state
    pub store: LandmarkStore,
    /// Mesocycle progression
    pub meso: MesocycleState,
    /// Current orchestrator phase
    pub phase: MesocyclePhase,
}

/// Weekly time-series snapshot for analytics collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Snapshot identifier
    pub id: Uuid,
    /// When the snapshot was taken
    pub date: DateTime<Utc>,
    /// Total weekly sets across all muscles
    pub total_sets: u32,
    /// Composite fatigue score at the time, 0-100
    pub fatigue_score: u32,
    /// Mean performance rating across reported muscles
    pub performance: f64,
}

impl SessionSnapshot {
    /// Storage key for this snapshot
    #[must_use]
    pub fn key(&self) -> String {
        format!("{SESSION_KEY_PREFIX}{id}", id = self.id)
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// File-backed store holding the whole key space as one JSON document.
///
/// The document is re-read before every operation so that external edits
/// are picked up; writes rewrite the file in place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or create on first write) a file-backed store at the path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            AppError::serialization(format!(
                "state file {path} is corrupt: {e}",
                path = self.path.display()
            ))
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries)
    }

    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .load()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn memory_store_round_trips_and_lists_by_prefix() {
        let mut store = MemoryStore::new();
        store.write("training-state", "{}").unwrap();
        store.write("session:a", "1").unwrap();
        store.write("session:b", "2").unwrap();

        assert_eq!(store.read("training-state").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.read("missing").unwrap(), None);
        assert_eq!(
            store.keys_with_prefix(SESSION_KEY_PREFIX).unwrap(),
            vec!["session:a", "session:b"]
        );
    }
}
