// ABOUTME: Fatigue analysis - deload triggers, accumulation scoring, and frequency checks
// ABOUTME: Aggregates volume status, MRV streaks, and manual flags into deload decisions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Fatigue management.
//!
//! The deload decision is an OR across three independent triggers, and the
//! reasons list accumulates every trigger that fired (downstream surfaces
//! display all of them, never just the first). A composite 0-100 fatigue
//! score with a per-factor breakdown backs the persisted weekly snapshots.

use crate::constants::fatigue;
use crate::models::{MuscleFeedback, VolumeStatus};
use crate::state::LandmarkStore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Manual override flags feeding the deload decision
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ManualFlags {
    /// Athlete reported illness
    pub illness: bool,
    /// Athlete reported low motivation
    pub low_motivation: bool,
    /// Athlete explicitly reported breaching their recoverable volume
    pub mrv_breach_reported: bool,
}

impl ManualFlags {
    /// Whether any manual flag is set
    #[must_use]
    pub const fn any(&self) -> bool {
        self.illness || self.low_motivation || self.mrv_breach_reported
    }
}

/// Outcome of a deload-need analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeloadAssessment {
    /// Whether a deload should be scheduled
    pub should_deload: bool,
    /// Every condition that triggered, in evaluation order
    pub reasons: Vec<String>,
    /// True when a volume condition fired (as opposed to manual flags only)
    pub auto_detected: bool,
}

/// Fatigue analyzer over the whole landmark store
pub struct FatigueAnalyzer;

impl FatigueAnalyzer {
    /// Analyze whether the athlete needs a deload.
    ///
    /// Triggers, all evaluated and all reported:
    /// - more than half of tracked muscles sit above MRV;
    /// - any muscle has been at/above MRV for two consecutive weekly checks;
    /// - any manual flag is set.
    #[must_use]
    pub fn analyze_deload_need(store: &LandmarkStore, flags: &ManualFlags) -> DeloadAssessment {
        let mut reasons = Vec::new();
        let mut auto_detected = false;

        let total = store.len();
        let at_maximum = store.count_with_status(VolumeStatus::Maximum);
        if at_maximum * 2 > total {
            auto_detected = true;
            reasons.push(format!(
                "{at_maximum} of {total} muscle groups are above maximum recoverable volume"
            ));
        }

        let streaked = store.muscles_with_mrv_streak();
        if !streaked.is_empty() {
            auto_detected = true;
            for muscle in streaked {
                reasons.push(format!(
                    "{muscle} has been at or above MRV for {streak} consecutive weeks",
                    streak = store.muscle(muscle).mrv_streak
                ));
            }
        }

        if flags.illness {
            reasons.push("illness reported".to_owned());
        }
        if flags.low_motivation {
            reasons.push("low motivation reported".to_owned());
        }
        if flags.mrv_breach_reported {
            reasons.push("athlete reported exceeding recoverable volume".to_owned());
        }

        let should_deload = !reasons.is_empty();
        if should_deload {
            info!(reason_count = reasons.len(), auto_detected, "deload recommended");
        }

        DeloadAssessment {
            should_deload,
            reasons,
            auto_detected,
        }
    }
}

/// Weekly wellness inputs for the composite fatigue score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeeklyWellness {
    /// Mean soreness rating across muscles, 0-3
    pub average_soreness: f64,
    /// Sleep quality, 1-10
    pub sleep_quality: f64,
    /// Life stress level, 1-10
    pub stress_level: f64,
    /// Muscles currently in the high or maximum volume zones
    pub muscles_needing_recovery: u32,
    /// Total tracked muscles
    pub tracked_muscles: u32,
    /// Longest current at/above-MRV streak in weeks
    pub consecutive_mrv_weeks: u32,
    /// Whether performance regressed week over week
    pub performance_decline: bool,
}

impl Default for WeeklyWellness {
    fn default() -> Self {
        Self {
            average_soreness: 1.0,
            sleep_quality: 7.0,
            stress_level: 5.0,
            muscles_needing_recovery: 0,
            tracked_muscles: 13,
            consecutive_mrv_weeks: 0,
            performance_decline: false,
        }
    }
}

/// Composite fatigue level bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    /// Score 0-25
    Low,
    /// Score 26-50
    Moderate,
    /// Score 51-75
    High,
    /// Score 76-100
    Excessive,
}

/// How urgently a deload should follow the fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeloadUrgency {
    /// No deload pressure from fatigue
    None,
    /// Keep an eye on recovery
    Low,
    /// Plan a recovery week soon
    Medium,
    /// Deload immediately
    High,
}

/// Per-factor contribution to the composite fatigue score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FatigueBreakdown {
    /// Points from average soreness (0-30)
    pub soreness: f64,
    /// Points from poor sleep (0-20)
    pub sleep: f64,
    /// Points from life stress (0-20)
    pub stress: f64,
    /// Points from volume overreach (0-20)
    pub volume: f64,
    /// Points from consecutive MRV weeks (0-10)
    pub consecutive: f64,
    /// Points from performance decline (0 or 10)
    pub performance: f64,
}

/// Composite fatigue assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueAccumulation {
    /// Composite score, 0-100
    pub score: u32,
    /// Banded level
    pub level: FatigueLevel,
    /// Urgency of a deload implied by the score
    pub deload_urgency: DeloadUrgency,
    /// Recommendations for the athlete
    pub recommendations: Vec<String>,
    /// Per-factor contributions
    pub breakdown: FatigueBreakdown,
}

/// Score accumulated fatigue 0-100 from weekly wellness inputs
#[must_use]
pub fn assess_fatigue_accumulation(wellness: &WeeklyWellness) -> FatigueAccumulation {
    let soreness = ((wellness.average_soreness / 3.0) * fatigue::SORENESS_POINTS)
        .clamp(0.0, fatigue::SORENESS_POINTS);
    let sleep = (fatigue::SLEEP_POINTS - (wellness.sleep_quality / 10.0) * fatigue::SLEEP_POINTS)
        .clamp(0.0, fatigue::SLEEP_POINTS);
    let stress =
        ((wellness.stress_level / 10.0) * fatigue::STRESS_POINTS).clamp(0.0, fatigue::STRESS_POINTS);
    let volume = ((f64::from(wellness.muscles_needing_recovery)
        / f64::from(wellness.tracked_muscles.max(1)))
        * fatigue::VOLUME_POINTS)
        .clamp(0.0, fatigue::VOLUME_POINTS);
    let consecutive = (f64::from(wellness.consecutive_mrv_weeks) * fatigue::MRV_WEEK_POINTS)
        .min(fatigue::MRV_WEEK_POINTS_MAX);
    let performance = if wellness.performance_decline {
        fatigue::PERFORMANCE_DECLINE_POINTS
    } else {
        0.0
    };

    let total = soreness + sleep + stress + volume + consecutive + performance;
    let score = total.round().clamp(0.0, 100.0) as u32;

    let (level, deload_urgency, recommendations) = if score <= 25 {
        (
            FatigueLevel::Low,
            DeloadUrgency::None,
            vec![
                "Continue the current program".to_owned(),
                "Look for volume progression opportunities".to_owned(),
            ],
        )
    } else if score <= 50 {
        (
            FatigueLevel::Moderate,
            DeloadUrgency::Low,
            vec![
                "Monitor recovery closely".to_owned(),
                "Ensure adequate sleep and nutrition".to_owned(),
            ],
        )
    } else if score <= 75 {
        (
            FatigueLevel::High,
            DeloadUrgency::Medium,
            vec![
                "Reduce training stress".to_owned(),
                "Consider a recovery week".to_owned(),
                "Prioritize sleep and stress management".to_owned(),
            ],
        )
    } else {
        (
            FatigueLevel::Excessive,
            DeloadUrgency::High,
            vec![
                "Implement a deload immediately".to_owned(),
                "Address sleep and lifestyle factors".to_owned(),
                "Consider extending the deload period".to_owned(),
            ],
        )
    };

    FatigueAccumulation {
        score,
        level,
        deload_urgency,
        recommendations,
        breakdown: FatigueBreakdown {
            soreness,
            sleep,
            stress,
            volume,
            consecutive,
            performance,
        },
    }
}

/// High-fatigue check from the stimulus-to-fatigue ratio.
///
/// Fatigue is soreness + joint ache + a flat penalty for regressed
/// performance; stimulus is pump + disruption (mind-muscle connection says
/// little about fatigue). `SFR <= 1` or a rep-strength drop below baseline
/// marks the muscle as highly fatigued.
#[must_use]
pub fn is_high_fatigue(feedback: &MuscleFeedback, strength_drop: bool) -> bool {
    let performance_penalty = if feedback.performance == 0 { 2.0 } else { 0.0 };
    let fatigue_load =
        f64::from(feedback.soreness) + f64::from(feedback.joint_ache) + performance_penalty;
    let stimulus = f64::from(feedback.stimulus.pump) + f64::from(feedback.stimulus.disruption);

    let sfr = stimulus / fatigue_load.max(1.0);
    sfr <= 1.0 || strength_drop
}

/// Frequency adjustment direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyAction {
    /// Recovery outpaces the session gap: train more often
    IncreaseFrequency,
    /// Recovery lags the session gap: add a rest day
    DecreaseFrequency,
    /// Timing is appropriate
    Maintain,
    /// Work on recovery quality instead of moving sessions
    ImproveRecovery,
}

/// Session-frequency analysis for one muscle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyAnalysis {
    /// Days until soreness resolves
    pub soreness_recovery_days: u32,
    /// Days between sessions for this muscle
    pub session_gap_days: u32,
    /// Recovery-to-gap ratio
    pub recovery_ratio: f64,
    /// Recommended action
    pub action: FrequencyAction,
    /// Human-readable recommendation
    pub recommendation: String,
}

/// Compare soreness recovery time to session spacing.
///
/// The volume status caps the advice: a muscle at maximum volume keeps its
/// frequency even when it recovers early, and one below minimum volume gets
/// recovery advice instead of fewer sessions.
#[must_use]
pub fn analyze_frequency(
    soreness_recovery_days: u32,
    session_gap_days: u32,
    volume_status: Option<VolumeStatus>,
) -> FrequencyAnalysis {
    let gap = session_gap_days.max(1);
    let recovery_ratio = f64::from(soreness_recovery_days) / f64::from(gap);

    let (mut action, mut recommendation) = if recovery_ratio < fatigue::EARLY_RECOVERY_RATIO {
        (
            FrequencyAction::IncreaseFrequency,
            "Recovery finishes early: add one session per week".to_owned(),
        )
    } else if recovery_ratio > fatigue::LAGGING_RECOVERY_RATIO {
        (
            FrequencyAction::DecreaseFrequency,
            "Recovery lags: insert an extra rest day".to_owned(),
        )
    } else {
        (
            FrequencyAction::Maintain,
            "Frequency is appropriate".to_owned(),
        )
    };

    match (volume_status, action) {
        (Some(VolumeStatus::Maximum), FrequencyAction::IncreaseFrequency) => {
            action = FrequencyAction::Maintain;
            recommendation = "At MRV: keep frequency despite early recovery".to_owned();
        }
        (Some(VolumeStatus::BelowMinimum), FrequencyAction::DecreaseFrequency) => {
            action = FrequencyAction::ImproveRecovery;
            recommendation =
                "Below MV: improve recovery quality instead of dropping sessions".to_owned();
        }
        _ => {}
    }

    FrequencyAnalysis {
        soreness_recovery_days,
        session_gap_days: gap,
        recovery_ratio,
        action,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MuscleGroup, StimulusFeedback};

    #[test]
    fn manual_flags_alone_trigger_a_deload() {
        let store = LandmarkStore::with_defaults();
        let flags = ManualFlags {
            illness: true,
            ..ManualFlags::default()
        };
        let assessment = FatigueAnalyzer::analyze_deload_need(&store, &flags);
        assert!(assessment.should_deload);
        assert!(!assessment.auto_detected);
        assert_eq!(assessment.reasons.len(), 1);
    }

    #[test]
    fn reasons_accumulate_across_triggers() {
        let mut store = LandmarkStore::with_defaults();
        let mrv = store.muscle(MuscleGroup::Chest).landmarks.mrv();
        store.set_current_sets(MuscleGroup::Chest, mrv);
        store.record_weekly_status();
        store.record_weekly_status();

        let flags = ManualFlags {
            low_motivation: true,
            ..ManualFlags::default()
        };
        let assessment = FatigueAnalyzer::analyze_deload_need(&store, &flags);
        assert!(assessment.should_deload);
        assert!(assessment.auto_detected);
        assert_eq!(assessment.reasons.len(), 2);
    }

    #[test]
    fn sfr_at_or_below_one_is_high_fatigue() {
        let tired = MuscleFeedback {
            stimulus: StimulusFeedback::new(2, 1, 1),
            soreness: 2,
            performance: 0,
            ..MuscleFeedback::default()
        };
        assert!(is_high_fatigue(&tired, false));

        let fresh = MuscleFeedback {
            stimulus: StimulusFeedback::new(2, 3, 2),
            soreness: 1,
            performance: 1,
            ..MuscleFeedback::default()
        };
        assert!(!is_high_fatigue(&fresh, false));
        assert!(is_high_fatigue(&fresh, true));
    }

    #[test]
    fn frequency_advice_respects_volume_status() {
        let analysis = analyze_frequency(1, 3, Some(VolumeStatus::Maximum));
        assert_eq!(analysis.action, FrequencyAction::Maintain);

        let analysis = analyze_frequency(5, 2, Some(VolumeStatus::BelowMinimum));
        assert_eq!(analysis.action, FrequencyAction::ImproveRecovery);
    }
}
