// ABOUTME: Target-RIR scheduling across a mesocycle and actual-vs-target effort validation
// ABOUTME: Linear 4-to-0 RIR curve plus tiered percentage load adjustments by deviation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Effort management on the load axis.
//!
//! The RIR schedule is a piecewise-linear ramp from exactly 4.0 in week 1
//! down to 0.0 in the final scheduled week. Reported effort is compared to
//! the schedule with goal-specific tolerance, and deviations translate into
//! tiered percentage load changes.

use crate::constants::rir;
use crate::models::TrainingGoal;
use serde::{Deserialize, Serialize};

/// Intensity classification of a target RIR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    /// 2.5+ RIR: far from failure
    Low,
    /// 2.0-2.5 RIR: balanced effort
    Moderate,
    /// 1.0-2.0 RIR: hard training
    High,
    /// Below 1.0 RIR: at or near failure
    Maximum,
}

/// Mesocycle phase by completed fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPhase {
    /// First quarter: building the foundation
    Accumulation,
    /// Up to 60%: steady overload
    Progression,
    /// Up to 85%: high demands
    Intensification,
    /// Final stretch: maximum effort
    Peak,
}

/// Scheduled effort target for one week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RirTarget {
    /// Target reps in reserve
    pub target_rir: f64,
    /// Intensity classification of the target
    pub intensity: IntensityLevel,
    /// Phase of the mesocycle this week falls in
    pub phase: TrainingPhase,
    /// Week the target applies to, 1-indexed
    pub week: u32,
    /// Mesocycle length in weeks
    pub meso_length: u32,
    /// Completed fraction of the mesocycle, 0-100
    pub progression_percent: u8,
    /// Week-appropriate coaching advice
    pub advice: String,
}

/// Scheduled target RIR for a week of a mesocycle.
///
/// Linear interpolation from [`rir::START_RIR`] (week 1) to [`rir::END_RIR`]
/// (final week), clamped into that band. Weeks beyond the mesocycle length
/// are the caller's responsibility; rollover normally prevents them.
#[must_use]
pub fn scheduled_rir(week: u32, meso_length: u32) -> f64 {
    let span = f64::from(meso_length.saturating_sub(1).max(1));
    let progressed = f64::from(week.saturating_sub(1));
    let raw = (rir::START_RIR - rir::END_RIR).mul_add(-(progressed / span), rir::START_RIR);
    raw.clamp(rir::END_RIR, rir::START_RIR)
}

/// Scheduled RIR enriched with intensity, phase, and advice
#[must_use]
pub fn rir_target(week: u32, meso_length: u32) -> RirTarget {
    let target_rir = scheduled_rir(week, meso_length);

    let (intensity, advice) = if target_rir >= 2.5 {
        (
            IntensityLevel::Low,
            "Focus on form and mind-muscle connection",
        )
    } else if target_rir >= 2.0 {
        (
            IntensityLevel::Moderate,
            "Balanced effort: challenge without excessive fatigue",
        )
    } else if target_rir >= 1.0 {
        (IntensityLevel::High, "High effort: monitor recovery closely")
    } else {
        (
            IntensityLevel::Maximum,
            "Maximum effort: deload approaching",
        )
    };

    let fraction = f64::from(week) / f64::from(meso_length.max(1));
    let phase = if fraction <= 0.25 {
        TrainingPhase::Accumulation
    } else if fraction <= 0.60 {
        TrainingPhase::Progression
    } else if fraction <= 0.85 {
        TrainingPhase::Intensification
    } else {
        TrainingPhase::Peak
    };

    let span = f64::from(meso_length.saturating_sub(1).max(1));
    let progression_percent = ((f64::from(week.saturating_sub(1)) / span) * 100.0)
        .clamp(0.0, 100.0)
        .round() as u8;

    RirTarget {
        target_rir,
        intensity,
        phase,
        week,
        meso_length,
        progression_percent,
        advice: advice.to_owned(),
    }
}

/// Recommended load change from an effort deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadAdjustment {
    /// Effort was on target: keep the load
    NoChange,
    /// Set felt too easy: add load
    Increase {
        /// Lower bound of the recommended increase, percent
        min_percent: f64,
        /// Upper bound of the recommended increase, percent
        max_percent: f64,
    },
    /// Set felt too hard: remove load
    Decrease {
        /// Lower bound of the recommended decrease, percent
        min_percent: f64,
        /// Upper bound of the recommended decrease, percent
        max_percent: f64,
    },
    /// Reported RIR is implausibly high: the load is presumed far too light
    InvalidInput {
        /// Why the report was rejected
        warning: String,
    },
}

/// Urgency of acting on an effort validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// On target, nothing to do
    Normal,
    /// Moderate deviation, adjust next session
    Medium,
    /// Large deviation, adjust immediately
    High,
}

/// Result of comparing reported effort to the scheduled target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffortValidation {
    /// Reported RIR (clamped at zero)
    pub actual_rir: f64,
    /// Scheduled target RIR
    pub target_rir: f64,
    /// Absolute deviation from target
    pub deviation: f64,
    /// Whether the deviation is within the goal's tolerance
    pub is_on_target: bool,
    /// Recommended load change
    pub adjustment: LoadAdjustment,
    /// How urgently to act
    pub urgency: Urgency,
    /// Human-readable feedback line
    pub feedback: String,
}

/// Validate reported effort against the target for a training goal.
///
/// Tolerance is goal-specific (hypertrophy 1.0 RIR, strength 0.5, power 1.5,
/// endurance 2.0). Deviations above [`rir::LARGE_DEVIATION`] get the
/// aggressive 10-15% tier, smaller ones 5-10%. A report above
/// [`rir::MAX_REPORTABLE_RIR`] is answered with a warning instead of a
/// numeric adjustment.
#[must_use]
pub fn validate_effort(actual_rir: f64, target_rir: f64, goal: TrainingGoal) -> EffortValidation {
    let actual = actual_rir.max(0.0);

    if actual > rir::MAX_REPORTABLE_RIR {
        let warning = format!(
            "RIR {actual:.1} is above {max:.0}: load is far too light to gauge effort",
            max = rir::MAX_REPORTABLE_RIR
        );
        return EffortValidation {
            actual_rir: actual,
            target_rir,
            deviation: (actual - target_rir).abs(),
            is_on_target: false,
            adjustment: LoadAdjustment::InvalidInput {
                warning: warning.clone(),
            },
            urgency: Urgency::High,
            feedback: warning,
        };
    }

    let tolerance = goal.rir_tolerance();
    let deviation = (actual - target_rir).abs();

    if deviation <= tolerance {
        return EffortValidation {
            actual_rir: actual,
            target_rir,
            deviation,
            is_on_target: true,
            adjustment: LoadAdjustment::NoChange,
            urgency: Urgency::Normal,
            feedback: format!("On target ({actual:.1} vs {target_rir:.1} RIR)"),
        };
    }

    let (min_percent, max_percent) = if deviation > rir::LARGE_DEVIATION {
        rir::LARGE_ADJUSTMENT
    } else {
        rir::MODERATE_ADJUSTMENT
    };
    let urgency = if deviation > rir::LARGE_DEVIATION {
        Urgency::High
    } else {
        Urgency::Medium
    };

    let (adjustment, feedback) = if actual > target_rir {
        (
            LoadAdjustment::Increase {
                min_percent,
                max_percent,
            },
            format!(
                "Too easy ({deviation:.1} RIR above target): increase load {min_percent:.0}-{max_percent:.0}%"
            ),
        )
    } else {
        (
            LoadAdjustment::Decrease {
                min_percent,
                max_percent,
            },
            format!(
                "Too hard ({deviation:.1} RIR below target): reduce load {min_percent:.0}-{max_percent:.0}%"
            ),
        )
    };

    EffortValidation {
        actual_rir: actual,
        target_rir,
        deviation,
        is_on_target: false,
        adjustment,
        urgency,
        feedback,
    }
}
