// ABOUTME: Weekly set-count progression against volume landmarks with deload capping
// ABOUTME: Combines stimulus action, soreness, performance, and illness into a set delta
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Volume progression engine.
//!
//! Decides next week's set-count change for one muscle from the stimulus
//! score plus soreness, performance, and illness flags, constrained by the
//! muscle's volume landmarks. Progression can never auto-push volume past
//! MRV; attempts to do so cap the projection and raise a deload
//! recommendation instead.

use crate::constants::progression;
use crate::intelligence::stimulus::{score_feedback, StimulusAction};
use crate::models::{MuscleFeedback, MuscleGroup, SetAdjustment, VolumeLandmarks, VolumeStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weekly progression decision for one muscle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRecommendation {
    /// The muscle this recommendation applies to
    pub muscle: MuscleGroup,
    /// Set count going into the decision
    pub current_sets: u32,
    /// Set count recommended for next week
    pub projected_sets: u32,
    /// The decided adjustment (signed delta, or an explicit hold)
    pub adjustment: SetAdjustment,
    /// Classification of the projected set count
    pub volume_status: VolumeStatus,
    /// Stimulus score that drove the base increment
    pub stimulus_score: u8,
    /// Human-readable rationale
    pub advice: String,
    /// Whether this muscle now needs a deload
    pub deload_recommended: bool,
}

/// Stateless progression engine
pub struct VolumeProgressionEngine;

impl VolumeProgressionEngine {
    /// Decide next week's set change for one muscle.
    ///
    /// Illness short-circuits to an explicit hold. Otherwise the stimulus
    /// action sets a base increment (add-sets +2, keep +1, stop 0), high
    /// soreness and regressed performance each subtract one set, and the
    /// projection is clamped so it can never exceed MRV. A clamped
    /// projection raises `deload_recommended`.
    #[must_use]
    pub fn advance(
        muscle: MuscleGroup,
        feedback: &MuscleFeedback,
        landmarks: &VolumeLandmarks,
        current_sets: u32,
    ) -> ProgressionRecommendation {
        let stimulus = score_feedback(&feedback.stimulus);

        if feedback.has_illness {
            let reason = "illness reported: hold current volume".to_owned();
            return ProgressionRecommendation {
                muscle,
                current_sets,
                projected_sets: current_sets,
                adjustment: SetAdjustment::Hold {
                    reason: reason.clone(),
                },
                volume_status: landmarks.classify(current_sets),
                stimulus_score: stimulus.score,
                advice: format!("{muscle}: {reason}"),
                deload_recommended: false,
            };
        }

        let mut set_change = match stimulus.action {
            StimulusAction::AddSets => progression::ADD_SETS_INCREMENT,
            StimulusAction::Keep => progression::KEEP_INCREMENT,
            StimulusAction::Stop => 0,
        };
        let mut notes: Vec<String> = vec![stimulus.advice.clone()];

        if feedback.soreness >= progression::HIGH_SORENESS_THRESHOLD {
            set_change -= progression::SORENESS_PENALTY;
            notes.push("high soreness: one set removed from the increment".to_owned());
        }

        // Performance modifier is asymmetric: regression costs a set, but a
        // better week earns no bonus, which keeps escalation in check.
        let performance = feedback.performance.min(2);
        if performance == 0 {
            set_change -= progression::PERFORMANCE_PENALTY;
            notes.push("performance regressed: one set removed from the increment".to_owned());
        }

        set_change = set_change.max(progression::MIN_SET_CHANGE);

        let unclamped = i64::from(current_sets) + i64::from(set_change);
        let floored = u32::try_from(unclamped.max(0)).unwrap_or(0);
        let mrv = landmarks.mrv();

        let (projected_sets, deload_recommended) = if floored > mrv {
            notes.push(format!(
                "projected volume would exceed MRV ({mrv}): capped, deload recommended"
            ));
            (mrv, true)
        } else {
            (floored, false)
        };

        // Recompute the applied delta after clamping so the adjustment the
        // caller applies always lands exactly on the projection.
        let applied_delta = i64::from(projected_sets) - i64::from(current_sets);
        let adjustment = SetAdjustment::Change {
            delta: i32::try_from(applied_delta).unwrap_or(0),
        };

        let volume_status = landmarks.classify(projected_sets);
        debug!(
            muscle = %muscle,
            stimulus = stimulus.score,
            set_change,
            projected_sets,
            status = %volume_status,
            "volume progression decided"
        );

        ProgressionRecommendation {
            muscle,
            current_sets,
            projected_sets,
            adjustment,
            volume_status,
            stimulus_score: stimulus.score,
            advice: notes.join("; "),
            deload_recommended,
        }
    }
}

/// Session-level action from the soreness/performance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    /// Add sets next session
    AddSets,
    /// Hold sets at the current level
    Maintain,
    /// Replace the next session with a recovery session
    Recovery,
}

/// Per-session set advice from the soreness/performance matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAdvice {
    /// Matrix action
    pub action: SessionAction,
    /// The adjustment to apply (recovery cells are explicit holds)
    pub adjustment: SetAdjustment,
    /// Human-readable advice
    pub advice: String,
}

/// Set-progression matrix lookup by soreness (0-3) and performance (0-3).
///
/// Inputs are clamped into range. Recovery cells come back as
/// [`SetAdjustment::Hold`] so they cannot be misread as numeric deltas.
#[must_use]
pub fn session_progression(soreness: u8, performance: u8) -> SessionAdvice {
    let soreness = soreness.min(3);
    let performance = performance.min(3);

    let (action, delta, advice) = match (soreness, performance) {
        (0, 0) => (SessionAction::AddSets, 1, "Add 1 set next session"),
        (0, 1) => (SessionAction::AddSets, 2, "Add 2 sets next session"),
        (0, 2) => (SessionAction::AddSets, 2, "Add 2-3 sets next session"),
        (0, 3) => (SessionAction::AddSets, 3, "Add 2-3 sets next session"),
        (1, 0) => (SessionAction::Maintain, 0, "Hold sets at current level"),
        (1, 1) => (SessionAction::AddSets, 1, "Add 1 set next session"),
        (1, 2) => (SessionAction::AddSets, 2, "Add 2 sets next session"),
        (1, 3) => (SessionAction::AddSets, 2, "Add 2-3 sets next session"),
        (2, 1 | 2) => (SessionAction::Maintain, 0, "Hold sets at current level"),
        (2, 3) => (SessionAction::AddSets, 1, "Add 1 set next session"),
        (3, 3) => (SessionAction::Maintain, 0, "Hold sets at current level"),
        // Soreness 2 with regressed performance, or soreness 3 otherwise
        _ => (SessionAction::Recovery, 0, "Do a recovery session"),
    };

    let adjustment = if action == SessionAction::Recovery {
        SetAdjustment::Hold {
            reason: "recovery session recommended".to_owned(),
        }
    } else {
        SetAdjustment::Change { delta }
    };

    SessionAdvice {
        action,
        adjustment,
        advice: advice.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::StimulusFeedback;

    fn feedback(mmc: u8, pump: u8, disruption: u8, soreness: u8, performance: u8) -> MuscleFeedback {
        MuscleFeedback {
            stimulus: StimulusFeedback::new(mmc, pump, disruption),
            soreness,
            performance,
            ..MuscleFeedback::default()
        }
    }

    #[test]
    fn low_stimulus_adds_two_sets() {
        let landmarks = VolumeLandmarks::new(4, 6, 16, 20).unwrap();
        let rec = VolumeProgressionEngine::advance(
            MuscleGroup::Chest,
            &feedback(1, 0, 1, 0, 1),
            &landmarks,
            10,
        );
        assert_eq!(rec.adjustment, SetAdjustment::Change { delta: 2 });
        assert_eq!(rec.projected_sets, 12);
        assert!(!rec.deload_recommended);
    }

    #[test]
    fn projection_caps_at_mrv_and_flags_deload() {
        let landmarks = VolumeLandmarks::new(4, 6, 16, 20).unwrap();
        let rec = VolumeProgressionEngine::advance(
            MuscleGroup::Chest,
            &feedback(1, 0, 1, 0, 1),
            &landmarks,
            19,
        );
        assert_eq!(rec.projected_sets, 20);
        assert!(rec.deload_recommended);
    }

    #[test]
    fn illness_holds_volume() {
        let landmarks = VolumeLandmarks::new(4, 6, 16, 20).unwrap();
        let mut fb = feedback(2, 2, 2, 0, 1);
        fb.has_illness = true;
        let rec = VolumeProgressionEngine::advance(MuscleGroup::Back, &fb, &landmarks, 12);
        assert!(rec.adjustment.is_hold());
        assert_eq!(rec.projected_sets, 12);
    }

    #[test]
    fn matrix_recovery_cells_are_holds() {
        assert_eq!(session_progression(3, 0).action, SessionAction::Recovery);
        assert!(session_progression(2, 0).adjustment.is_hold());
        assert_eq!(
            session_progression(0, 3).adjustment,
            SetAdjustment::Change { delta: 3 }
        );
    }
}
