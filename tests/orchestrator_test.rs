// ABOUTME: Integration tests for the weekly orchestrator state machine
// ABOUTME: Full-mesocycle scenario, deload-week handling, and landmark update rejection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use meso_engine::models::{
    MesocyclePhase, MuscleFeedback, MuscleGroup, StimulusFeedback, VolumeStatus,
};
use meso_engine::orchestrator::TrainingEngine;
use std::collections::BTreeMap;

fn growth_feedback() -> MuscleFeedback {
    // Low stimulus, low soreness, performance held: add-sets progression
    MuscleFeedback {
        stimulus: StimulusFeedback::new(1, 0, 1),
        soreness: 0,
        performance: 1,
        ..MuscleFeedback::default()
    }
}

fn chest_only(feedback: MuscleFeedback) -> BTreeMap<MuscleGroup, MuscleFeedback> {
    let mut map = BTreeMap::new();
    map.insert(MuscleGroup::Chest, feedback);
    map
}

#[test]
fn test_rejected_landmark_update_leaves_state_unchanged() {
    let mut engine = TrainingEngine::new(4).unwrap();
    let before = engine.landmark_store().muscle(MuscleGroup::Chest).landmarks;

    let result = engine.update_landmarks(MuscleGroup::Chest, 10, 6, 16, 20);
    assert!(result.is_err());
    assert_eq!(
        engine.landmark_store().muscle(MuscleGroup::Chest).landmarks,
        before
    );

    engine.update_landmarks(MuscleGroup::Chest, 4, 8, 16, 20).unwrap();
    assert_eq!(
        engine.landmark_store().muscle(MuscleGroup::Chest).landmarks.mev(),
        8
    );
}

#[test]
fn test_initialize_muscle_at_mev() {
    let mut engine = TrainingEngine::new(4).unwrap();
    engine.set_current_sets(MuscleGroup::Back, 17);
    engine.initialize_muscle_at_mev(MuscleGroup::Back);
    assert_eq!(
        engine.landmark_store().current_sets(MuscleGroup::Back),
        engine.landmark_store().muscle(MuscleGroup::Back).landmarks.mev()
    );
}

#[test]
fn test_advance_volume_applies_the_projection() {
    let mut engine = TrainingEngine::new(4).unwrap();
    let before = engine.landmark_store().current_sets(MuscleGroup::Chest);
    let rec = engine.advance_volume(MuscleGroup::Chest, &growth_feedback());
    assert_eq!(rec.projected_sets, before + 2);
    assert_eq!(
        engine.landmark_store().current_sets(MuscleGroup::Chest),
        before + 2
    );
    assert_eq!(
        engine.landmark_store().muscle(MuscleGroup::Chest).last_stimulus,
        Some(2)
    );
}

#[test]
fn test_week_advances_until_the_final_week_flags_a_deload() {
    let mut engine = TrainingEngine::new(3).unwrap();
    let report = engine.advance_week(&chest_only(growth_feedback()));
    assert_eq!(report.week, 1);
    assert!(!report.deload.should_deload);
    assert_eq!(report.next_week, 2);

    engine.advance_week(&chest_only(growth_feedback()));
    let final_week = engine.advance_week(&chest_only(growth_feedback()));
    assert_eq!(final_week.week, 3);
    assert!(final_week.deload.should_deload);
    assert!(final_week
        .deload
        .reasons
        .iter()
        .any(|r| r.contains("end of mesocycle")));
    assert_eq!(final_week.next_phase, MesocyclePhase::Deload);
}

#[test]
fn test_deload_week_resets_to_a_fresh_mesocycle() {
    let mut engine = TrainingEngine::new(2).unwrap();
    engine.advance_week(&chest_only(growth_feedback()));
    let flagged = engine.advance_week(&chest_only(growth_feedback()));
    assert_eq!(flagged.next_phase, MesocyclePhase::Deload);

    let deload_report = engine.advance_week(&BTreeMap::new());
    assert_eq!(deload_report.phase, MesocyclePhase::Deload);
    assert!(deload_report.deload_outcome.is_some());
    assert_eq!(deload_report.next_week, 1);
    assert_eq!(deload_report.next_phase, MesocyclePhase::Accumulation);
    assert_eq!(engine.mesocycle().block(), 2);

    // Fresh mesocycle starts at MEV everywhere
    for (_, state) in engine.landmark_store().iter() {
        assert_eq!(state.current_sets, state.landmarks.mev());
        assert_eq!(state.mrv_streak, 0);
    }
}

#[test]
fn test_six_week_mesocycle_caps_at_mrv_and_deloads() {
    // Chest at MEV 8 / MAV 16 / MRV 20, starting week 1 at 10 sets, fed an
    // add-sets stimulus with low soreness and held performance every week.
    let mut engine = TrainingEngine::new(6).unwrap();
    engine.update_landmarks(MuscleGroup::Chest, 4, 8, 16, 20).unwrap();
    engine.set_current_sets(MuscleGroup::Chest, 10);

    let mut deload_week = None;
    for tick in 1..=6 {
        let report = engine.advance_week(&chest_only(growth_feedback()));
        let sets = engine.landmark_store().current_sets(MuscleGroup::Chest);
        assert!(sets <= 20, "week {tick}: {sets} sets exceeded MRV");
        if report.deload.should_deload && deload_week.is_none() {
            deload_week = Some(report.week);
            assert!(report
                .deload
                .reasons
                .iter()
                .any(|r| r.contains("capped at MRV")));
            break;
        }
    }

    // 10 -> 12 -> 14 -> 16 -> 18 -> 20, then the cap fires in week 6
    assert_eq!(deload_week, Some(6));
    assert_eq!(engine.landmark_store().current_sets(MuscleGroup::Chest), 20);
    assert_eq!(engine.phase(), MesocyclePhase::Deload);
}

#[test]
fn test_snapshot_reflects_engine_state() {
    let mut engine = TrainingEngine::new(4).unwrap();
    engine.advance_week(&chest_only(growth_feedback()));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.week, 2);
    assert_eq!(snapshot.meso_length, 4);
    assert_eq!(snapshot.muscles.len(), 13);
    let chest = snapshot
        .muscles
        .iter()
        .find(|m| m.muscle == MuscleGroup::Chest)
        .unwrap();
    assert_eq!(chest.status, VolumeStatus::Optimal);
    assert_eq!(chest.last_stimulus, Some(2));
}

#[test]
fn test_illness_hold_does_not_change_sets_in_a_weekly_tick() {
    let mut engine = TrainingEngine::new(4).unwrap();
    let before = engine.landmark_store().current_sets(MuscleGroup::Chest);

    let mut sick = growth_feedback();
    sick.has_illness = true;
    let report = engine.advance_week(&chest_only(sick));
    assert!(report.entries[0].adjustment.is_hold());
    assert_eq!(
        engine.landmark_store().current_sets(MuscleGroup::Chest),
        before
    );
}

#[test]
fn test_high_fatigue_week_holds_for_a_recovery_session() {
    let mut engine = TrainingEngine::new(4).unwrap();
    let before = engine.landmark_store().current_sets(MuscleGroup::Quads);

    // Sore, aching, regressed, and a flat session: SFR collapses
    let wrecked = MuscleFeedback {
        stimulus: StimulusFeedback::new(1, 1, 0),
        soreness: 3,
        performance: 0,
        joint_ache: 2,
        ..MuscleFeedback::default()
    };
    let mut map = BTreeMap::new();
    map.insert(MuscleGroup::Quads, wrecked);

    let report = engine.advance_week(&map);
    assert!(report.entries[0].adjustment.is_hold());
    assert!(report.entries[0].advice.contains("recovery session"));
    assert_eq!(
        engine.landmark_store().current_sets(MuscleGroup::Quads),
        before
    );
}

#[test]
fn test_scheduled_rir_entry_point_matches_the_schedule() {
    assert!((TrainingEngine::get_scheduled_rir(1, 6) - 4.0).abs() < f64::EPSILON);
    assert!(TrainingEngine::get_scheduled_rir(6, 6).abs() < f64::EPSILON);
}
