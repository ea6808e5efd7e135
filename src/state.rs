// ABOUTME: Single source of truth for per-muscle volume state and mesocycle progression
// ABOUTME: LandmarkStore and MesocycleState with controlled mutation and invariant checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Training state owned by the orchestrator.
//!
//! `LandmarkStore` and `MesocycleState` are single-owner values: collaborator
//! layers receive read-only snapshots and every mutation flows through the
//! engine's operations. There is no ambient global state.

use crate::constants::{deload, fatigue, recovery};
use crate::errors::{AppError, AppResult};
use crate::models::{MuscleGroup, VolumeLandmarks, VolumeStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-muscle tracked state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleState {
    /// Volume landmarks for this muscle
    pub landmarks: VolumeLandmarks,
    /// Current-week set count
    pub current_sets: u32,
    /// Last recorded stimulus score (0-9), if any week has completed
    pub last_stimulus: Option<u8>,
    /// Consecutive weekly checks this muscle has spent at/above MRV
    pub mrv_streak: u32,
    /// Baseline top-set load for rep-strength-drop detection
    pub baseline_load: Option<f64>,
}

impl MuscleState {
    fn at_mev(landmarks: VolumeLandmarks) -> Self {
        Self {
            landmarks,
            current_sets: landmarks.mev(),
            last_stimulus: None,
            mrv_streak: 0,
            baseline_load: None,
        }
    }

    /// Classification of the current-week set count
    #[must_use]
    pub const fn status(&self) -> VolumeStatus {
        self.landmarks.classify(self.current_sets)
    }

    /// Whether the current-week set count is at or above MRV
    #[must_use]
    pub const fn at_or_above_mrv(&self) -> bool {
        self.current_sets >= self.landmarks.mrv()
    }
}

/// Holds the landmark quadruple and current-week volume for every muscle.
///
/// All muscle groups are always present; lookups are total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkStore {
    muscles: BTreeMap<MuscleGroup, MuscleState>,
}

impl Default for LandmarkStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LandmarkStore {
    /// Create a store with the literature-default landmarks, every muscle
    /// initialized at its MEV.
    #[must_use]
    pub fn with_defaults() -> Self {
        let muscles = MuscleGroup::ALL
            .into_iter()
            .map(|m| (m, MuscleState::at_mev(m.default_landmarks())))
            .collect();
        Self { muscles }
    }

    /// Number of tracked muscle groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.muscles.len()
    }

    /// Whether the store tracks no muscles (never true for default stores)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.muscles.is_empty()
    }

    /// State for one muscle
    ///
    /// Lookups are total because every [`MuscleGroup`] variant is seeded at
    /// construction and entries are never removed.
    #[must_use]
    pub fn muscle(&self, muscle: MuscleGroup) -> &MuscleState {
        // Safe: every variant is seeded at construction
        &self.muscles[&muscle]
    }

    /// Iterate all muscle states in display order
    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, &MuscleState)> {
        self.muscles.iter().map(|(m, s)| (*m, s))
    }

    /// Current-week set count for one muscle
    #[must_use]
    pub fn current_sets(&self, muscle: MuscleGroup) -> u32 {
        self.muscle(muscle).current_sets
    }

    /// Volume status for one muscle's current-week set count
    #[must_use]
    pub fn volume_status(&self, muscle: MuscleGroup) -> VolumeStatus {
        self.muscle(muscle).status()
    }

    fn muscle_mut(&mut self, muscle: MuscleGroup) -> &mut MuscleState {
        self.muscles
            .entry(muscle)
            .or_insert_with(|| MuscleState::at_mev(muscle.default_landmarks()))
    }

    /// Replace the landmarks for one muscle.
    ///
    /// The quadruple was already validated at construction; the current-week
    /// set count is left untouched even if its classification changes.
    pub fn update_landmarks(&mut self, muscle: MuscleGroup, landmarks: VolumeLandmarks) {
        self.muscle_mut(muscle).landmarks = landmarks;
    }

    /// Overwrite the current-week set count for one muscle
    pub fn set_current_sets(&mut self, muscle: MuscleGroup, sets: u32) {
        self.muscle_mut(muscle).current_sets = sets;
    }

    /// Apply a signed set-count delta, saturating at zero
    pub fn add_sets(&mut self, muscle: MuscleGroup, delta: i32) {
        let state = self.muscle_mut(muscle);
        let current = i64::from(state.current_sets);
        let next = current + i64::from(delta);
        state.current_sets = u32::try_from(next.max(0)).unwrap_or(0);
    }

    /// Record the stimulus score observed for this week
    pub fn record_stimulus(&mut self, muscle: MuscleGroup, score: u8) {
        self.muscle_mut(muscle).last_stimulus = Some(score);
    }

    /// Reset one muscle's current-week volume to its MEV
    pub fn initialize_at_mev(&mut self, muscle: MuscleGroup) {
        let state = self.muscle_mut(muscle);
        state.current_sets = state.landmarks.mev();
    }

    /// Reset every muscle's current-week volume to its MEV
    pub fn reset_all_to_mev(&mut self) {
        for state in self.muscles.values_mut() {
            state.current_sets = state.landmarks.mev();
        }
    }

    /// Update every muscle's MRV streak from its current-week set count.
    ///
    /// Called once per weekly check: a muscle at/above MRV extends its
    /// streak, anything below resets it.
    pub fn record_weekly_status(&mut self) {
        for state in self.muscles.values_mut() {
            if state.current_sets >= state.landmarks.mrv() {
                state.mrv_streak += 1;
            } else {
                state.mrv_streak = 0;
            }
        }
    }

    /// Clear every muscle's MRV streak (after a completed deload)
    pub fn clear_mrv_streaks(&mut self) {
        for state in self.muscles.values_mut() {
            state.mrv_streak = 0;
        }
    }

    /// Muscles whose streak has reached the deload window
    #[must_use]
    pub fn muscles_with_mrv_streak(&self) -> Vec<MuscleGroup> {
        self.muscles
            .iter()
            .filter(|(_, s)| s.mrv_streak >= deload::MRV_STREAK_WINDOW)
            .map(|(m, _)| *m)
            .collect()
    }

    /// Count of muscles currently classified at the given status
    #[must_use]
    pub fn count_with_status(&self, status: VolumeStatus) -> usize {
        self.muscles.values().filter(|s| s.status() == status).count()
    }

    /// Sum of current-week sets across all muscles
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.muscles.values().map(|s| s.current_sets).sum()
    }

    /// Record a baseline top-set load for rep-strength-drop detection
    pub fn set_baseline_load(&mut self, muscle: MuscleGroup, load: f64) {
        self.muscle_mut(muscle).baseline_load = Some(load);
    }

    /// Whether the given load is a meaningful drop below the recorded baseline
    #[must_use]
    pub fn rep_strength_drop(&self, muscle: MuscleGroup, last_load: f64) -> bool {
        self.muscle(muscle)
            .baseline_load
            .is_some_and(|baseline| last_load < baseline * fatigue::STRENGTH_DROP_RATIO)
    }

    /// Recovery-session volume for one muscle: the MEV..MRV midpoint minus a
    /// small adjustment, floored at half the MEV.
    #[must_use]
    pub fn recovery_volume(&self, muscle: MuscleGroup, has_illness: bool) -> u32 {
        let landmarks = self.muscle(muscle).landmarks;
        let midpoint = (landmarks.mev() + landmarks.mrv()).div_ceil(2);
        let adjustment = if has_illness {
            recovery::ILLNESS_ADJUSTMENT
        } else {
            recovery::STANDARD_ADJUSTMENT
        };
        let floor = landmarks.mev().div_ceil(2);
        midpoint.saturating_sub(adjustment).max(floor)
    }
}

/// Mesocycle progression state.
///
/// Invariant: `1 <= week <= length_weeks`; rollover past the final week is
/// handled by the orchestrator together with the deload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MesocycleState {
    week: u32,
    length_weeks: u32,
    block: u32,
}

impl MesocycleState {
    /// Create a mesocycle of the given length, starting at week 1, block 1.
    ///
    /// # Errors
    /// Returns an error when `length_weeks` is zero.
    pub fn new(length_weeks: u32) -> AppResult<Self> {
        if length_weeks == 0 {
            return Err(AppError::config("mesocycle length must be at least 1 week"));
        }
        Ok(Self {
            week: 1,
            length_weeks,
            block: 1,
        })
    }

    /// Current week, 1-indexed
    #[must_use]
    pub const fn week(&self) -> u32 {
        self.week
    }

    /// Mesocycle length in weeks
    #[must_use]
    pub const fn length_weeks(&self) -> u32 {
        self.length_weeks
    }

    /// Completed-mesocycle counter, 1-indexed
    #[must_use]
    pub const fn block(&self) -> u32 {
        self.block
    }

    /// Whether the current week is the final scheduled week
    #[must_use]
    pub const fn is_final_week(&self) -> bool {
        self.week >= self.length_weeks
    }

    /// Advance to the next accumulation week, holding at the final week.
    ///
    /// The week counter never moves past `length_weeks` here; the reset to
    /// week 1 happens in [`Self::start_next_block`] once the deload completes.
    pub fn advance_week(&mut self) {
        if self.week < self.length_weeks {
            self.week += 1;
        }
    }

    /// Begin the next mesocycle: week back to 1, block counter incremented
    pub fn start_next_block(&mut self) {
        self.week = 1;
        self.block += 1;
    }

    /// Change the mesocycle length.
    ///
    /// # Errors
    /// Returns an error when the new length is zero or shorter than the
    /// current week (which would break the week invariant mid-cycle).
    pub fn set_length_weeks(&mut self, length_weeks: u32) -> AppResult<()> {
        if length_weeks == 0 {
            return Err(AppError::config("mesocycle length must be at least 1 week"));
        }
        if length_weeks < self.week {
            return Err(AppError::invariant(format!(
                "cannot shorten mesocycle to {length_weeks} weeks at week {week}",
                week = self.week
            )));
        }
        self.length_weeks = length_weeks;
        Ok(())
    }
}
