// ABOUTME: Validation helpers for loads, set counts, frequency, and mesocycle length
// ABOUTME: Produces inline warning/recommendation text, never hard failures, per UI contract
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Training-parameter validation.
//!
//! These helpers return structured outcomes with warning and recommendation
//! text for inline display. A value can be valid and still carry a warning
//! (for example a technically-allowed but short mesocycle); that asymmetry
//! is deliberate and preserved.

use crate::constants::frequency;
use crate::models::{TrainingGoal, VolumeLandmarks, VolumeStatus};
use serde::{Deserialize, Serialize};

/// Severity of a validation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to flag
    Normal,
    /// Worth adjusting
    Medium,
    /// Needs attention
    High,
}

/// Goal-specific load range as percent of 1RM
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadRange {
    /// Minimum productive load
    pub min: f64,
    /// Maximum safe load
    pub max: f64,
    /// Lower bound of the optimal band
    pub optimal_min: f64,
    /// Upper bound of the optimal band
    pub optimal_max: f64,
}

impl LoadRange {
    /// Load range for a training goal
    #[must_use]
    pub const fn for_goal(goal: TrainingGoal) -> Self {
        match goal {
            TrainingGoal::Hypertrophy => Self {
                min: 30.0,
                max: 85.0,
                optimal_min: 65.0,
                optimal_max: 80.0,
            },
            TrainingGoal::Strength => Self {
                min: 70.0,
                max: 100.0,
                optimal_min: 85.0,
                optimal_max: 95.0,
            },
            TrainingGoal::Power => Self {
                min: 30.0,
                max: 70.0,
                optimal_min: 40.0,
                optimal_max: 60.0,
            },
            TrainingGoal::Endurance => Self {
                min: 20.0,
                max: 60.0,
                optimal_min: 30.0,
                optimal_max: 50.0,
            },
        }
    }
}

/// Outcome of validating a load percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadValidation {
    /// Whether the load is usable for the goal
    pub is_valid: bool,
    /// Whether the load sits inside the optimal band
    pub is_optimal: bool,
    /// The validated load percentage
    pub load: f64,
    /// The goal the load was checked against
    pub goal: TrainingGoal,
    /// Warning text, when something is off
    pub warning: Option<String>,
    /// Recommendation text for inline display
    pub recommendation: String,
    /// Severity of the outcome
    pub severity: Severity,
    /// The range the load was checked against
    pub range: LoadRange,
}

/// Validate a load percentage (of 1RM) for a training goal
#[must_use]
pub fn validate_load(load_percent: f64, goal: TrainingGoal) -> LoadValidation {
    let range = LoadRange::for_goal(goal);

    if !load_percent.is_finite() || load_percent <= 0.0 {
        return LoadValidation {
            is_valid: false,
            is_optimal: false,
            load: load_percent,
            goal,
            warning: Some("Load must be a positive number".to_owned()),
            recommendation: "Enter a valid load percentage".to_owned(),
            severity: Severity::High,
            range,
        };
    }

    let is_optimal = load_percent >= range.optimal_min && load_percent <= range.optimal_max;
    let (is_valid, warning, recommendation, severity) = if load_percent < range.min {
        (
            false,
            Some(format!(
                "Load too light for {goal} ({load_percent}% < {min}%)",
                min = range.min
            )),
            format!(
                "Increase to {lo}-{hi}% for productive {goal} training",
                lo = range.optimal_min,
                hi = range.optimal_max
            ),
            Severity::High,
        )
    } else if load_percent > range.max {
        (
            false,
            Some(format!(
                "Load too heavy for {goal} ({load_percent}% > {max}%)",
                max = range.max
            )),
            format!(
                "Reduce to {lo}-{hi}% for safer {goal} training",
                lo = range.optimal_min,
                hi = range.optimal_max
            ),
            Severity::High,
        )
    } else if load_percent < range.optimal_min {
        (
            true,
            Some(format!(
                "Load is light for {goal} ({load_percent}% < {lo}%)",
                lo = range.optimal_min
            )),
            format!(
                "Consider increasing toward {lo}-{hi}% for a better stimulus",
                lo = range.optimal_min,
                hi = range.optimal_max
            ),
            Severity::Medium,
        )
    } else if load_percent > range.optimal_max {
        (
            true,
            Some(format!(
                "Load is heavy for {goal} ({load_percent}% > {hi}%)",
                hi = range.optimal_max
            )),
            format!(
                "Consider reducing toward {lo}-{hi}% for better recovery",
                lo = range.optimal_min,
                hi = range.optimal_max
            ),
            Severity::Medium,
        )
    } else {
        (
            true,
            None,
            format!("Good load for {goal} training"),
            Severity::Normal,
        )
    };

    LoadValidation {
        is_valid,
        is_optimal,
        load: load_percent,
        goal,
        warning,
        recommendation,
        severity,
        range,
    }
}

/// Outcome of validating a weekly set count against landmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetsValidation {
    /// Whether the set count is acceptable
    pub is_valid: bool,
    /// The validated set count
    pub sets: u32,
    /// Volume zone the count falls in
    pub zone: VolumeStatus,
    /// Warning text, when something is off
    pub warning: Option<String>,
    /// Recommendation text for inline display
    pub recommendation: String,
    /// Severity of the outcome
    pub severity: Severity,
    /// Set count as a percentage of MRV
    pub percentage_of_mrv: u32,
}

/// Validate a proposed weekly set count against volume landmarks.
///
/// Counts above MRV are invalid unless `allow_overreach` is set, in which
/// case they pass with a short-term-only warning.
#[must_use]
pub fn validate_sets(
    sets: u32,
    landmarks: &VolumeLandmarks,
    allow_overreach: bool,
) -> SetsValidation {
    let zone = landmarks.classify(sets);
    let mrv = landmarks.mrv();

    let (is_valid, warning, recommendation, severity) = match zone {
        VolumeStatus::BelowMinimum => (
            true,
            Some(format!(
                "Below maintenance volume ({sets} < {mv})",
                mv = landmarks.mv()
            )),
            "Increase sets for a minimal stimulus".to_owned(),
            Severity::High,
        ),
        VolumeStatus::Maintenance => (
            true,
            Some(format!(
                "In the maintenance zone ({sets} < {mev})",
                mev = landmarks.mev()
            )),
            "Increase sets for a growth stimulus".to_owned(),
            Severity::Medium,
        ),
        VolumeStatus::Optimal => (
            true,
            None,
            format!(
                "Optimal volume zone ({mev}-{mav} sets)",
                mev = landmarks.mev(),
                mav = landmarks.mav()
            ),
            Severity::Normal,
        ),
        VolumeStatus::High => (
            true,
            Some(format!("High volume zone ({sets} approaching {mrv})")),
            "Monitor recovery closely".to_owned(),
            Severity::Medium,
        ),
        VolumeStatus::Maximum => {
            if allow_overreach {
                (
                    true,
                    Some(format!("Overreaching territory ({sets} > {mrv})")),
                    "Short-term only: plan a deload soon".to_owned(),
                    Severity::High,
                )
            } else {
                (
                    false,
                    Some(format!(
                        "Above maximum recoverable volume ({sets} > {mrv})"
                    )),
                    "Reduce sets or plan a deload".to_owned(),
                    Severity::High,
                )
            }
        }
    };

    let percentage_of_mrv = if mrv == 0 {
        0
    } else {
        ((f64::from(sets) / f64::from(mrv)) * 100.0).round() as u32
    };

    SetsValidation {
        is_valid,
        sets,
        zone,
        warning,
        recommendation,
        severity,
        percentage_of_mrv,
    }
}

/// Outcome of validating a frequency/volume distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyValidation {
    /// Whether the distribution is acceptable
    pub is_valid: bool,
    /// Sessions per week
    pub sessions_per_week: u32,
    /// Total weekly sets
    pub weekly_volume: u32,
    /// Resulting sets per session
    pub sets_per_session: f64,
    /// Warning text, when something is off
    pub warning: Option<String>,
    /// Recommendation text for inline display
    pub recommendation: String,
    /// Severity of the outcome
    pub severity: Severity,
}

/// Validate how a weekly volume is spread over training sessions
#[must_use]
pub fn validate_frequency(sessions_per_week: u32, weekly_volume: u32) -> FrequencyValidation {
    if sessions_per_week == 0 {
        return FrequencyValidation {
            is_valid: false,
            sessions_per_week,
            weekly_volume,
            sets_per_session: 0.0,
            warning: Some("Frequency must be at least one session per week".to_owned()),
            recommendation: "Train each muscle at least once per week".to_owned(),
            severity: Severity::High,
        };
    }

    let sets_per_session = f64::from(weekly_volume) / f64::from(sessions_per_week);
    let (is_valid, warning, recommendation, severity) =
        if sets_per_session > frequency::MAX_SETS_PER_SESSION {
            (
                false,
                Some(format!("Too many sets per session ({sets_per_session:.1})")),
                "Increase frequency or reduce volume".to_owned(),
                Severity::High,
            )
        } else if sets_per_session > frequency::HIGH_SETS_PER_SESSION {
            (
                true,
                Some(format!("High sets per session ({sets_per_session:.1})")),
                "Consider increasing frequency".to_owned(),
                Severity::Medium,
            )
        } else if sets_per_session < frequency::LOW_SETS_PER_SESSION
            && weekly_volume >= frequency::LOW_VOLUME_CUTOFF
        {
            (
                true,
                Some(format!(
                    "Very low sets per session ({sets_per_session:.1})"
                )),
                "Consider reducing frequency".to_owned(),
                Severity::Medium,
            )
        } else {
            (
                true,
                None,
                format!("Good distribution ({sets_per_session:.1} sets/session)"),
                Severity::Normal,
            )
        };

    FrequencyValidation {
        is_valid,
        sessions_per_week,
        weekly_volume,
        sets_per_session,
        warning,
        recommendation,
        severity,
    }
}

/// Goal-specific recommended mesocycle length range, in weeks
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MesoLengthRange {
    /// Minimum recommended length
    pub min: u32,
    /// Maximum recommended length
    pub max: u32,
    /// Optimal length
    pub optimal: u32,
}

impl MesoLengthRange {
    /// Recommended range for a training goal
    #[must_use]
    pub const fn for_goal(goal: TrainingGoal) -> Self {
        match goal {
            TrainingGoal::Hypertrophy => Self {
                min: 3,
                max: 6,
                optimal: 4,
            },
            TrainingGoal::Strength => Self {
                min: 2,
                max: 8,
                optimal: 4,
            },
            TrainingGoal::Power => Self {
                min: 2,
                max: 4,
                optimal: 3,
            },
            TrainingGoal::Endurance => Self {
                min: 4,
                max: 12,
                optimal: 6,
            },
        }
    }
}

/// Outcome of validating a mesocycle length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesoLengthValidation {
    /// Whether the length is acceptable
    pub is_valid: bool,
    /// Whether the length is the goal's optimum
    pub is_optimal: bool,
    /// The validated length in weeks
    pub weeks: u32,
    /// The goal the length was checked against
    pub goal: TrainingGoal,
    /// Warning text, when something is off
    pub warning: Option<String>,
    /// Recommendation text for inline display
    pub recommendation: String,
    /// Severity of the outcome
    pub severity: Severity,
    /// The range the length was checked against
    pub range: MesoLengthRange,
}

/// Validate a mesocycle length for a training goal.
///
/// Lengths below the goal's recommended minimum stay *valid* but carry a
/// "Short mesocycle" warning. That asymmetry matches observed product
/// behavior and is kept pending clarification; do not harden it here.
#[must_use]
pub fn validate_mesocycle_length(weeks: u32, goal: TrainingGoal) -> MesoLengthValidation {
    let range = MesoLengthRange::for_goal(goal);

    if weeks == 0 {
        return MesoLengthValidation {
            is_valid: false,
            is_optimal: false,
            weeks,
            goal,
            warning: Some("Mesocycle must be at least 1 week".to_owned()),
            recommendation: "Enter a valid mesocycle length".to_owned(),
            severity: Severity::High,
            range,
        };
    }

    let is_optimal = weeks == range.optimal;
    let (warning, recommendation, severity) = if weeks < range.min {
        (
            Some(format!(
                "Short mesocycle for {goal} ({weeks} < {min} weeks)",
                min = range.min
            )),
            format!(
                "Consider {optimal} weeks for better {goal} adaptations",
                optimal = range.optimal
            ),
            Severity::Medium,
        )
    } else if weeks > range.max {
        (
            Some(format!(
                "Long mesocycle for {goal} ({weeks} > {max} weeks)",
                max = range.max
            )),
            format!(
                "Consider {optimal} weeks to limit overreaching",
                optimal = range.optimal
            ),
            Severity::Medium,
        )
    } else if is_optimal {
        (
            None,
            format!("Optimal length for {goal} training"),
            Severity::Normal,
        )
    } else {
        (
            None,
            format!("Good length for {goal} training"),
            Severity::Normal,
        )
    };

    MesoLengthValidation {
        is_valid: true,
        is_optimal,
        weeks,
        goal,
        warning,
        recommendation,
        severity,
        range,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn hypertrophy_load_of_seventy_is_optimal() {
        let result = validate_load(70.0, TrainingGoal::Hypertrophy);
        assert!(result.is_valid);
        assert!(result.is_optimal);
    }

    #[test]
    fn strength_load_above_max_is_invalid() {
        let result = validate_load(110.0, TrainingGoal::Strength);
        assert!(!result.is_valid);
        assert_eq!(result.severity, Severity::High);
    }

    #[test]
    fn sets_above_mrv_need_overreach_permission() {
        let landmarks = VolumeLandmarks::new(4, 6, 16, 20).unwrap();
        assert!(!validate_sets(25, &landmarks, false).is_valid);
        assert!(validate_sets(25, &landmarks, true).is_valid);
    }

    #[test]
    fn short_power_mesocycle_is_valid_with_warning() {
        let result = validate_mesocycle_length(1, TrainingGoal::Power);
        assert!(result.is_valid);
        let warning = result.warning.unwrap();
        assert!(warning.starts_with("Short mesocycle"));
    }
}
