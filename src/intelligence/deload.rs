// ABOUTME: Deload transformation halving weekly volume plus adaptive strategy selection
// ABOUTME: Mutates LandmarkStore set counts only; landmarks themselves never change here
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Deload execution and strategy.
//!
//! The transform halves every current-week set count (integer floor, never
//! below zero) and reports a matching load multiplier alongside; the
//! landmark quadruples are untouched. It is deliberately not idempotent:
//! applying it twice halves twice, so callers gate it behind the fatigue
//! analyzer or explicit user confirmation.

use crate::constants::deload;
use crate::models::{MuscleGroup, VolumeStatus};
use crate::state::LandmarkStore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One muscle's volume change during a deload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeloadChange {
    /// Affected muscle
    pub muscle: MuscleGroup,
    /// Set count before halving
    pub previous_sets: u32,
    /// Set count after halving
    pub new_sets: u32,
}

/// Result of applying the deload transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeloadOutcome {
    /// Multiplier to apply to working loads for the deload week
    pub load_multiplier: f64,
    /// Per-muscle set-count changes
    pub changes: Vec<DeloadChange>,
}

/// Deload state transformation
pub struct DeloadTransform;

impl DeloadTransform {
    /// Halve every muscle's current-week sets and clear MRV streaks.
    ///
    /// Landmarks are not modified. The returned outcome carries the 50%
    /// load multiplier for the caller; load itself is not stored state.
    pub fn apply(store: &mut LandmarkStore) -> DeloadOutcome {
        let mut changes = Vec::with_capacity(store.len());
        for (muscle, state) in store.iter() {
            changes.push(DeloadChange {
                muscle,
                previous_sets: state.current_sets,
                new_sets: state.current_sets / 2,
            });
        }
        for change in &changes {
            store.set_current_sets(change.muscle, change.new_sets);
        }
        store.clear_mrv_streaks();

        info!(
            muscles = changes.len(),
            load_multiplier = deload::LOAD_MULTIPLIER,
            "deload applied"
        );

        DeloadOutcome {
            load_multiplier: deload::LOAD_MULTIPLIER,
            changes,
        }
    }
}

/// Deload depth selected from accumulated fatigue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeloadKind {
    /// Brief recovery before resuming progression
    Light,
    /// Standard one-week reduction
    Standard,
    /// Deep recovery for heavy accumulated fatigue
    Deep,
}

/// Selected deload strategy with its reduction factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeloadStrategy {
    /// Chosen depth
    pub kind: DeloadKind,
    /// Fraction of MEV to train at during the deload
    pub volume_reduction: f64,
    /// Fraction of working loads to keep during the deload
    pub load_reduction: f64,
    /// Recommended deload duration in weeks
    pub duration_weeks: u32,
    /// Overall fatigue level that drove the choice, 0-1
    pub fatigue_level: f64,
    /// Volume pressure that drove the choice, 0-1
    pub volume_pressure: f64,
    /// Human-readable recommendation
    pub recommendation: String,
}

/// Mean proximity of every muscle's volume to its MRV, plus streak penalty.
///
/// Each muscle contributes `clamp((current - MEV) / (MRV - MEV), 0, 1)`;
/// sustained MRV streaks and muscles already in the high zones push the
/// level further toward 1.
#[must_use]
pub fn overall_fatigue_level(store: &LandmarkStore) -> f64 {
    let total = store.len() as f64;
    if store.is_empty() {
        return 0.0;
    }

    let mut volume_score = 0.0;
    let mut longest_streak = 0;
    let mut needing_recovery = 0_u32;
    for (_, state) in store.iter() {
        let mev = f64::from(state.landmarks.mev());
        let mrv = f64::from(state.landmarks.mrv());
        let span = (mrv - mev).max(1.0);
        let ratio = (f64::from(state.current_sets) - mev) / span;
        volume_score += ratio.clamp(0.0, 1.0);
        longest_streak = longest_streak.max(state.mrv_streak);
        if matches!(state.status(), VolumeStatus::High | VolumeStatus::Maximum) {
            needing_recovery += 1;
        }
    }

    let streak_penalty = (f64::from(longest_streak) * 0.2).min(0.4);
    let recovery_penalty = (f64::from(needing_recovery) / total) * 0.3;

    (volume_score / total + streak_penalty + recovery_penalty).min(1.0)
}

/// Fraction of muscles at or within two sets of their MRV
#[must_use]
pub fn volume_pressure(store: &LandmarkStore) -> f64 {
    if store.is_empty() {
        return 0.0;
    }
    let near_mrv = store
        .iter()
        .filter(|(_, s)| s.current_sets + deload::NEAR_MRV_MARGIN >= s.landmarks.mrv())
        .count();
    near_mrv as f64 / store.len() as f64
}

/// Select a deload strategy from the store's accumulated fatigue
#[must_use]
pub fn deload_strategy(store: &LandmarkStore) -> DeloadStrategy {
    let fatigue_level = overall_fatigue_level(store);
    let pressure = volume_pressure(store);

    let (kind, volume_reduction, load_reduction) = if fatigue_level >= deload::DEEP_FATIGUE_LEVEL
        || pressure >= deload::DEEP_VOLUME_PRESSURE
    {
        (DeloadKind::Deep, 0.4, 0.6)
    } else if fatigue_level >= deload::STANDARD_FATIGUE_LEVEL
        || pressure >= deload::STANDARD_VOLUME_PRESSURE
    {
        (DeloadKind::Standard, 0.5, 0.7)
    } else {
        (DeloadKind::Light, 0.7, 0.8)
    };

    let fatigue_pct = (fatigue_level * 100.0).round();
    let volume_pct = (pressure * 100.0).round();
    let recommendation = match kind {
        DeloadKind::Deep => format!(
            "Deep deload: high fatigue ({fatigue_pct}%) and volume pressure ({volume_pct}%). Focus on recovery and technique work."
        ),
        DeloadKind::Standard => format!(
            "Standard deload: moderate fatigue ({fatigue_pct}%) and volume pressure ({volume_pct}%). Keep movement patterns at reduced intensity."
        ),
        DeloadKind::Light => format!(
            "Light deload: manageable fatigue ({fatigue_pct}%) and volume pressure ({volume_pct}%). Brief recovery before resuming progression."
        ),
    };

    DeloadStrategy {
        kind,
        volume_reduction,
        load_reduction,
        duration_weeks: 1,
        fatigue_level,
        volume_pressure: pressure,
        recommendation,
    }
}
