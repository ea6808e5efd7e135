// ABOUTME: Unit tests for stimulus scoring thresholds and clamping
// ABOUTME: Covers the 0-9 score range and the add/keep/stop action boundaries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use meso_engine::intelligence::{score_stimulus, StimulusAction};

#[test]
fn test_score_is_the_simple_sum() {
    let result = score_stimulus(2, 1, 3);
    assert_eq!(result.score, 6);
    assert_eq!(result.breakdown.mmc, 2);
    assert_eq!(result.breakdown.pump, 1);
    assert_eq!(result.breakdown.disruption, 3);
}

#[test]
fn test_score_stays_in_range_for_any_input() {
    for mmc in 0..=10_u8 {
        for pump in 0..=10_u8 {
            for disruption in 0..=10_u8 {
                let result = score_stimulus(mmc, pump, disruption);
                assert!(result.score <= 9, "score {} out of range", result.score);
            }
        }
    }
}

#[test]
fn test_action_threshold_boundaries() {
    // score 3 is the top of the add-sets band
    assert_eq!(score_stimulus(1, 1, 1).action, StimulusAction::AddSets);
    // score 4 and 6 are both in the keep band
    assert_eq!(score_stimulus(2, 1, 1).action, StimulusAction::Keep);
    assert_eq!(score_stimulus(2, 2, 2).action, StimulusAction::Keep);
    // score 7 is the bottom of the stop band
    assert_eq!(score_stimulus(3, 2, 2).action, StimulusAction::Stop);
}

#[test]
fn test_zero_feedback_requests_more_volume() {
    let result = score_stimulus(0, 0, 0);
    assert_eq!(result.score, 0);
    assert_eq!(result.action, StimulusAction::AddSets);
    assert!(result.advice.contains("too low"));
}

#[test]
fn test_scoring_is_deterministic() {
    let a = score_stimulus(2, 2, 1);
    let b = score_stimulus(2, 2, 1);
    assert_eq!(a.score, b.score);
    assert_eq!(a.action, b.action);
    assert_eq!(a.advice, b.advice);
}
