// ABOUTME: Unit tests for weekly volume progression against landmarks
// ABOUTME: Covers increments, penalties, illness holds, and the MRV deload cap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use meso_engine::intelligence::{session_progression, SessionAction, VolumeProgressionEngine};
use meso_engine::models::{
    MuscleFeedback, MuscleGroup, SetAdjustment, StimulusFeedback, VolumeLandmarks, VolumeStatus,
};

fn landmarks() -> VolumeLandmarks {
    VolumeLandmarks::new(4, 6, 16, 20).unwrap()
}

fn feedback(score_per_rating: u8, soreness: u8, performance: u8) -> MuscleFeedback {
    MuscleFeedback {
        stimulus: StimulusFeedback::new(score_per_rating, score_per_rating, score_per_rating),
        soreness,
        performance,
        ..MuscleFeedback::default()
    }
}

#[test]
fn test_low_stimulus_adds_two_sets() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(1, 0, 1),
        &landmarks(),
        10,
    );
    assert_eq!(rec.adjustment, SetAdjustment::Change { delta: 2 });
    assert_eq!(rec.projected_sets, 12);
    assert_eq!(rec.volume_status, VolumeStatus::Optimal);
}

#[test]
fn test_adequate_stimulus_adds_the_default_single_set() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(2, 0, 1),
        &landmarks(),
        10,
    );
    assert_eq!(rec.adjustment, SetAdjustment::Change { delta: 1 });
}

#[test]
fn test_excessive_stimulus_adds_nothing() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(3, 0, 1),
        &landmarks(),
        10,
    );
    assert_eq!(rec.adjustment, SetAdjustment::Change { delta: 0 });
}

#[test]
fn test_high_soreness_subtracts_one_set() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(1, 3, 1),
        &landmarks(),
        10,
    );
    assert_eq!(rec.adjustment, SetAdjustment::Change { delta: 1 });
}

#[test]
fn test_worse_performance_subtracts_one_set_and_better_earns_no_bonus() {
    let worse = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(1, 0, 0),
        &landmarks(),
        10,
    );
    assert_eq!(worse.adjustment, SetAdjustment::Change { delta: 1 });

    let better = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(1, 0, 2),
        &landmarks(),
        10,
    );
    // Asymmetric by design: no bonus for a better week
    assert_eq!(better.adjustment, SetAdjustment::Change { delta: 2 });
}

#[test]
fn test_combined_penalties_can_remove_a_set() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(2, 3, 0),
        &landmarks(),
        10,
    );
    assert_eq!(rec.adjustment, SetAdjustment::Change { delta: -1 });
    assert_eq!(rec.projected_sets, 9);
}

#[test]
fn test_sets_never_go_negative() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(2, 3, 0),
        &landmarks(),
        0,
    );
    assert_eq!(rec.projected_sets, 0);
}

#[test]
fn test_projection_never_exceeds_mrv_and_flags_deload() {
    for current in 18..=25 {
        let rec = VolumeProgressionEngine::advance(
            MuscleGroup::Chest,
            &feedback(1, 0, 1),
            &landmarks(),
            current,
        );
        assert!(rec.projected_sets <= 20);
        if i64::from(current) + 2 > 20 {
            assert!(rec.deload_recommended, "expected deload at {current} sets");
            assert_eq!(rec.projected_sets, 20);
        }
    }
}

#[test]
fn test_at_mrv_with_positive_delta_forces_deload() {
    let rec = VolumeProgressionEngine::advance(
        MuscleGroup::Chest,
        &feedback(2, 0, 1),
        &landmarks(),
        20,
    );
    assert!(rec.deload_recommended);
    assert_eq!(rec.projected_sets, 20);
}

#[test]
fn test_illness_holds_volume_as_an_explicit_variant() {
    let mut fb = feedback(1, 0, 1);
    fb.has_illness = true;
    let rec = VolumeProgressionEngine::advance(MuscleGroup::Back, &fb, &landmarks(), 12);
    assert!(rec.adjustment.is_hold());
    assert_eq!(rec.adjustment.delta(), 0);
    assert_eq!(rec.projected_sets, 12);
    assert!(!rec.deload_recommended);
}

#[test]
fn test_session_matrix_matches_the_table() {
    // No soreness, better performance: aggressive addition
    let cell = session_progression(0, 3);
    assert_eq!(cell.action, SessionAction::AddSets);
    assert_eq!(cell.adjustment, SetAdjustment::Change { delta: 3 });

    // Mild soreness, worse performance: hold
    let cell = session_progression(1, 0);
    assert_eq!(cell.action, SessionAction::Maintain);

    // High soreness: recovery session, expressed as a hold
    let cell = session_progression(3, 1);
    assert_eq!(cell.action, SessionAction::Recovery);
    assert!(cell.adjustment.is_hold());

    // High soreness with much better performance: hold, not recovery
    let cell = session_progression(3, 3);
    assert_eq!(cell.action, SessionAction::Maintain);
}
