// ABOUTME: Tests for key-value persistence, state restore, and best-effort failure handling
// ABOUTME: Covers the file-backed store, blob round trips, and corrupt-state fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use meso_engine::errors::{AppError, AppResult};
use meso_engine::models::MuscleGroup;
use meso_engine::orchestrator::TrainingEngine;
use meso_engine::simulation::FeedbackSimulator;
use meso_engine::storage::{FileStore, MemoryStore, StateStore, SESSION_KEY_PREFIX, STATE_KEY};

#[test]
fn test_file_store_round_trips_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut store = FileStore::new(&path);

    assert_eq!(store.read("missing").unwrap(), None);
    store.write("training-state", r#"{"week":1}"#).unwrap();
    store.write("session:aaa", "1").unwrap();

    // A second handle over the same file sees the data
    let reopened = FileStore::new(&path);
    assert_eq!(
        reopened.read("training-state").unwrap().as_deref(),
        Some(r#"{"week":1}"#)
    );
    assert_eq!(
        reopened.keys_with_prefix(SESSION_KEY_PREFIX).unwrap(),
        vec!["session:aaa"]
    );
}

#[test]
fn test_engine_state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let mut engine = TrainingEngine::new(5)
            .unwrap()
            .with_storage(Box::new(FileStore::new(&path)));
        engine.update_landmarks(MuscleGroup::Chest, 4, 8, 18, 24).unwrap();
        engine.set_current_sets(MuscleGroup::Chest, 12);
        let mut simulator = FeedbackSimulator::new(3);
        let feedback = simulator.weekly_feedback(engine.landmark_store());
        engine.advance_week(&feedback);
    }

    let engine = TrainingEngine::new(5)
        .unwrap()
        .with_storage(Box::new(FileStore::new(&path)));
    assert_eq!(engine.mesocycle().week(), 2);
    assert_eq!(
        engine.landmark_store().muscle(MuscleGroup::Chest).landmarks.mrv(),
        24
    );
}

#[test]
fn test_weekly_ticks_write_session_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut engine = TrainingEngine::new(4)
        .unwrap()
        .with_storage(Box::new(FileStore::new(&path)));
    engine.advance_week(&std::collections::BTreeMap::new());
    engine.advance_week(&std::collections::BTreeMap::new());

    let store = FileStore::new(&path);
    let snapshots = store.keys_with_prefix(SESSION_KEY_PREFIX).unwrap();
    assert_eq!(snapshots.len(), 2);
    assert!(store.read(STATE_KEY).unwrap().is_some());
}

#[test]
fn test_corrupt_blob_falls_back_to_defaults() {
    let mut backing = MemoryStore::new();
    backing.write(STATE_KEY, "not json at all").unwrap();

    let engine = TrainingEngine::new(4).unwrap().with_storage(Box::new(backing));
    assert_eq!(engine.mesocycle().week(), 1);
    assert_eq!(engine.landmark_store().len(), 13);
}

/// Store whose writes always fail, for the best-effort policy test
struct BrokenStore;

impl StateStore for BrokenStore {
    fn read(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("disk on fire"))
    }

    fn keys_with_prefix(&self, _prefix: &str) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }
}

#[test]
fn test_failed_writes_do_not_roll_back_memory_state() {
    let mut engine = TrainingEngine::new(4)
        .unwrap()
        .with_storage(Box::new(BrokenStore));

    engine.set_current_sets(MuscleGroup::Back, 15);
    assert_eq!(engine.landmark_store().current_sets(MuscleGroup::Back), 15);

    let report = engine.advance_week(&std::collections::BTreeMap::new());
    assert_eq!(report.week, 1);
    assert_eq!(engine.mesocycle().week(), 2);
}
