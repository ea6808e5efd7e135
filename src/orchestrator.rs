// ABOUTME: TrainingEngine - owns all training state and drives the weekly tick
// ABOUTME: Accumulation/Deload state machine plus the callable engine entry points
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Weekly orchestrator.
//!
//! `TrainingEngine` is the single owner of `LandmarkStore` and
//! `MesocycleState`; UI layers hold read-only snapshots and mutate only
//! through the operations here. One `advance_week` tick runs volume
//! progression and RIR scheduling for every muscle, then the fatigue
//! analyzer; a deload signal flags the *next* advance as a deload week
//! (applied, never silently skipped), and the week counter resets to 1 only
//! after that deload completes. The cycle has no terminal state.

use crate::errors::AppResult;
use crate::intelligence::deload::{DeloadOutcome, DeloadTransform};
use crate::intelligence::effort::{rir_target, scheduled_rir, validate_effort, EffortValidation, RirTarget};
use crate::intelligence::fatigue::{
    assess_fatigue_accumulation, is_high_fatigue, DeloadAssessment, FatigueAnalyzer, ManualFlags,
    WeeklyWellness,
};
use crate::intelligence::progression::{ProgressionRecommendation, VolumeProgressionEngine};
use crate::intelligence::stimulus::{score_feedback, score_stimulus, StimulusScore};
use crate::models::{
    MesocyclePhase, MuscleFeedback, MuscleGroup, SetAdjustment, TrainingGoal, VolumeLandmarks,
    VolumeStatus,
};
use crate::state::{LandmarkStore, MesocycleState};
use crate::storage::{PersistedState, SessionSnapshot, StateStore, STATE_KEY};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Read-only view of one muscle for collaborator layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleSnapshot {
    /// The muscle
    pub muscle: MuscleGroup,
    /// Current-week set count
    pub current_sets: u32,
    /// Landmarks in effect
    pub landmarks: VolumeLandmarks,
    /// Classification of the current set count
    pub status: VolumeStatus,
    /// Consecutive weekly checks at/above MRV
    pub mrv_streak: u32,
    /// Last recorded stimulus score, if any
    pub last_stimulus: Option<u8>,
}

/// Read-only view of the whole engine for collaborator layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Current week, 1-indexed
    pub week: u32,
    /// Mesocycle length in weeks
    pub meso_length: u32,
    /// Completed-mesocycle counter
    pub block: u32,
    /// Current phase
    pub phase: MesocyclePhase,
    /// Scheduled RIR target for the current week
    pub target_rir: f64,
    /// Whether a deload is currently recommended
    pub deload_recommended: bool,
    /// Per-muscle state
    pub muscles: Vec<MuscleSnapshot>,
}

/// Consolidated result of one weekly tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// The week that was processed, 1-indexed
    pub week: u32,
    /// Phase the tick ran in
    pub phase: MesocyclePhase,
    /// Per-muscle progression decisions (empty for a deload week)
    pub entries: Vec<ProgressionRecommendation>,
    /// Scheduled effort target for the processed week
    pub rir: RirTarget,
    /// Deload analysis after progression was applied
    pub deload: DeloadAssessment,
    /// Composite fatigue score recorded in the weekly snapshot
    pub fatigue_score: u32,
    /// Volume changes, when this tick executed a deload
    pub deload_outcome: Option<DeloadOutcome>,
    /// Week number going into the next tick
    pub next_week: u32,
    /// Phase going into the next tick
    pub next_phase: MesocyclePhase,
}

/// Shared handle for UI layers that dispatch into one engine.
///
/// The engine itself is synchronous; the mutex only serializes access from
/// event handlers so simultaneous calls cannot interleave partial updates.
pub type SharedEngine = std::sync::Arc<std::sync::Mutex<TrainingEngine>>;

/// The engine owning all training state.
///
/// Single mutation entry point by construction: every state change goes
/// through a `&mut self` operation, so UI-triggered calls cannot interleave
/// partial updates. Wrap the engine in a [`SharedEngine`] when a shared
/// handle is needed.
pub struct TrainingEngine {
    store: LandmarkStore,
    meso: MesocycleState,
    phase: MesocyclePhase,
    flags: ManualFlags,
    storage: Option<Box<dyn StateStore>>,
}

impl TrainingEngine {
    /// Create an engine with default landmarks, week 1, accumulation phase.
    ///
    /// # Errors
    /// Returns an error when `meso_length_weeks` is zero.
    pub fn new(meso_length_weeks: u32) -> AppResult<Self> {
        Ok(Self {
            store: LandmarkStore::with_defaults(),
            meso: MesocycleState::new(meso_length_weeks)?,
            phase: MesocyclePhase::Accumulation,
            flags: ManualFlags::default(),
            storage: None,
        })
    }

    /// Attach a storage backend, restoring persisted state when present.
    ///
    /// A missing blob starts fresh; a corrupt blob is logged and ignored so
    /// the session still starts (the in-memory state is authoritative).
    #[must_use]
    pub fn with_storage(mut self, storage: Box<dyn StateStore>) -> Self {
        match storage.read(STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(persisted) => {
                    info!(week = persisted.meso.week(), "restored training state");
                    self.store = persisted.store;
                    self.meso = persisted.meso;
                    self.phase = persisted.phase;
                }
                Err(e) => {
                    warn!(error = %e, "persisted training state is corrupt, using defaults");
                }
            },
            Ok(None) => debug!("no persisted training state found"),
            Err(e) => warn!(error = %e, "failed to read persisted training state"),
        }
        self.storage = Some(storage);
        self
    }

    /// Score a training stimulus from subjective ratings
    #[must_use]
    pub fn score_stimulus(mmc: u8, pump: u8, disruption: u8) -> StimulusScore {
        score_stimulus(mmc, pump, disruption)
    }

    /// Scheduled target RIR for a week of a mesocycle
    #[must_use]
    pub fn get_scheduled_rir(week: u32, meso_length: u32) -> f64 {
        scheduled_rir(week, meso_length)
    }

    /// Validate reported effort against a target for a training goal
    #[must_use]
    pub fn validate_effort(actual_rir: f64, target_rir: f64, goal: TrainingGoal) -> EffortValidation {
        validate_effort(actual_rir, target_rir, goal)
    }

    /// Enriched RIR target for the engine's current week
    #[must_use]
    pub fn current_rir_target(&self) -> RirTarget {
        rir_target(self.meso.week(), self.meso.length_weeks())
    }

    /// Progress one muscle's volume from this week's feedback and apply the
    /// projection to the store. Holds leave the set count untouched.
    pub fn advance_volume(
        &mut self,
        muscle: MuscleGroup,
        feedback: &MuscleFeedback,
    ) -> ProgressionRecommendation {
        let landmarks = self.store.muscle(muscle).landmarks;
        let current_sets = self.store.current_sets(muscle);
        let recommendation =
            VolumeProgressionEngine::advance(muscle, feedback, &landmarks, current_sets);

        if let SetAdjustment::Change { .. } = recommendation.adjustment {
            self.store
                .set_current_sets(muscle, recommendation.projected_sets);
        }
        self.store.record_stimulus(muscle, recommendation.stimulus_score);
        if let Some(load) = feedback.last_load {
            if self.store.muscle(muscle).baseline_load.is_none() {
                self.store.set_baseline_load(muscle, load);
            }
        }
        self.persist();
        recommendation
    }

    /// Analyze whether a deload is needed right now
    #[must_use]
    pub fn analyze_deload_need(&self) -> DeloadAssessment {
        FatigueAnalyzer::analyze_deload_need(&self.store, &self.flags)
    }

    /// Apply the deload transform immediately.
    ///
    /// Not idempotent; gate behind [`Self::analyze_deload_need`] or explicit
    /// user confirmation. The weekly state machine calls this on its own
    /// during a deload tick.
    pub fn apply_deload(&mut self) -> DeloadOutcome {
        let outcome = DeloadTransform::apply(&mut self.store);
        self.persist();
        outcome
    }

    /// Replace one muscle's landmarks.
    ///
    /// # Errors
    /// Rejects the update before any mutation when the quadruple violates
    /// `MV <= MEV <= MAV <= MRV`.
    pub fn update_landmarks(
        &mut self,
        muscle: MuscleGroup,
        mv: u32,
        mev: u32,
        mav: u32,
        mrv: u32,
    ) -> AppResult<()> {
        let landmarks = VolumeLandmarks::new(mv, mev, mav, mrv)?;
        self.store.update_landmarks(muscle, landmarks);
        self.persist();
        Ok(())
    }

    /// Reset one muscle's current-week volume to its MEV
    pub fn initialize_muscle_at_mev(&mut self, muscle: MuscleGroup) {
        self.store.initialize_at_mev(muscle);
        self.persist();
    }

    /// Overwrite one muscle's current-week set count
    pub fn set_current_sets(&mut self, muscle: MuscleGroup, sets: u32) {
        self.store.set_current_sets(muscle, sets);
        self.persist();
    }

    /// Set the manual deload flags considered by the fatigue analyzer
    pub fn set_manual_flags(&mut self, flags: ManualFlags) {
        self.flags = flags;
    }

    /// Run one weekly tick of the state machine.
    ///
    /// In an accumulation week this progresses every muscle in the feedback
    /// map, updates MRV streaks, and runs the fatigue analysis; a deload
    /// signal switches the next tick to a deload week. A deload tick halves
    /// volume, then starts the next mesocycle at MEV with the week counter
    /// back at 1.
    pub fn advance_week(
        &mut self,
        weekly_feedback: &BTreeMap<MuscleGroup, MuscleFeedback>,
    ) -> WeeklyReport {
        match self.phase {
            MesocyclePhase::Deload => self.run_deload_week(),
            MesocyclePhase::Accumulation => self.run_accumulation_week(weekly_feedback),
        }
    }

    fn run_deload_week(&mut self) -> WeeklyReport {
        let week = self.meso.week();
        let rir = rir_target(week, self.meso.length_weeks());
        let outcome = DeloadTransform::apply(&mut self.store);

        // The halved volume is the deload week itself; the next mesocycle
        // then starts fresh at MEV.
        self.store.reset_all_to_mev();
        self.meso.start_next_block();
        self.phase = MesocyclePhase::Accumulation;

        info!(block = self.meso.block(), "deload week completed, new mesocycle started");

        let fatigue_score = self.weekly_fatigue_score(&BTreeMap::new());
        self.persist();
        self.write_snapshot(fatigue_score, 1.0);

        WeeklyReport {
            week,
            phase: MesocyclePhase::Deload,
            entries: Vec::new(),
            rir,
            deload: DeloadAssessment {
                should_deload: false,
                reasons: Vec::new(),
                auto_detected: false,
            },
            fatigue_score,
            deload_outcome: Some(outcome),
            next_week: self.meso.week(),
            next_phase: self.phase,
        }
    }

    fn run_accumulation_week(
        &mut self,
        weekly_feedback: &BTreeMap<MuscleGroup, MuscleFeedback>,
    ) -> WeeklyReport {
        let week = self.meso.week();
        let rir = rir_target(week, self.meso.length_weeks());

        let mut entries = Vec::with_capacity(weekly_feedback.len());
        for (&muscle, feedback) in weekly_feedback {
            let landmarks = self.store.muscle(muscle).landmarks;
            let current_sets = self.store.current_sets(muscle);

            // Stimulus-to-fatigue check, only meaningful when the week
            // carried an actual fatigue signal (soreness, joint ache,
            // regressed performance, or a rep-strength drop).
            let strength_drop = feedback
                .last_load
                .is_some_and(|load| self.store.rep_strength_drop(muscle, load));
            let fatigued = feedback.soreness > 0
                || feedback.joint_ache > 0
                || feedback.performance == 0
                || strength_drop;
            let recommendation = if !feedback.has_illness
                && fatigued
                && is_high_fatigue(feedback, strength_drop)
            {
                let recovery_sets = self.store.recovery_volume(muscle, false);
                let reason = format!(
                    "high fatigue: recovery session at {recovery_sets} sets recommended"
                );
                ProgressionRecommendation {
                    muscle,
                    current_sets,
                    projected_sets: current_sets,
                    adjustment: SetAdjustment::Hold {
                        reason: reason.clone(),
                    },
                    volume_status: landmarks.classify(current_sets),
                    stimulus_score: score_feedback(&feedback.stimulus).score,
                    advice: format!("{muscle}: {reason}"),
                    deload_recommended: false,
                }
            } else {
                VolumeProgressionEngine::advance(muscle, feedback, &landmarks, current_sets)
            };

            if let SetAdjustment::Change { .. } = recommendation.adjustment {
                self.store
                    .set_current_sets(muscle, recommendation.projected_sets);
            }
            self.store
                .record_stimulus(muscle, recommendation.stimulus_score);
            entries.push(recommendation);
        }

        self.store.record_weekly_status();

        let mut assessment = FatigueAnalyzer::analyze_deload_need(&self.store, &self.flags);

        // Progression that had to cap at MRV is itself a deload trigger.
        let capped: Vec<String> = entries
            .iter()
            .filter(|e| e.deload_recommended)
            .map(|e| e.muscle.to_string())
            .collect();
        if !capped.is_empty() {
            assessment.should_deload = true;
            assessment.auto_detected = true;
            assessment.reasons.push(format!(
                "progression capped at MRV for: {list}",
                list = capped.join(", ")
            ));
        }

        if self.meso.is_final_week() {
            assessment.should_deload = true;
            assessment.auto_detected = true;
            assessment.reasons.push("end of mesocycle reached".to_owned());
        }

        if assessment.should_deload {
            self.phase = MesocyclePhase::Deload;
            info!(week, reasons = assessment.reasons.len(), "next week flagged as deload");
        } else {
            self.meso.advance_week();
        }

        let mean_performance = if weekly_feedback.is_empty() {
            1.0
        } else {
            weekly_feedback
                .values()
                .map(|f| f64::from(f.performance.min(2)))
                .sum::<f64>()
                / weekly_feedback.len() as f64
        };
        let fatigue_score = self.weekly_fatigue_score(weekly_feedback);
        self.persist();
        self.write_snapshot(fatigue_score, mean_performance);

        WeeklyReport {
            week,
            phase: MesocyclePhase::Accumulation,
            entries,
            rir,
            deload: assessment,
            fatigue_score,
            deload_outcome: None,
            next_week: self.meso.week(),
            next_phase: self.phase,
        }
    }

    fn weekly_fatigue_score(
        &self,
        weekly_feedback: &BTreeMap<MuscleGroup, MuscleFeedback>,
    ) -> u32 {
        let average_soreness = if weekly_feedback.is_empty() {
            1.0
        } else {
            weekly_feedback
                .values()
                .map(|f| f64::from(f.soreness.min(3)))
                .sum::<f64>()
                / weekly_feedback.len() as f64
        };
        let muscles_needing_recovery = (self.store.count_with_status(VolumeStatus::High)
            + self.store.count_with_status(VolumeStatus::Maximum))
            as u32;
        let consecutive_mrv_weeks = self
            .store
            .iter()
            .map(|(_, s)| s.mrv_streak)
            .max()
            .unwrap_or(0);
        let performance_decline = weekly_feedback.values().any(|f| f.performance == 0);

        let wellness = WeeklyWellness {
            average_soreness,
            muscles_needing_recovery,
            tracked_muscles: self.store.len() as u32,
            consecutive_mrv_weeks,
            performance_decline,
            ..WeeklyWellness::default()
        };
        assess_fatigue_accumulation(&wellness).score
    }

    /// Read-only view of the engine state
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let muscles = self
            .store
            .iter()
            .map(|(muscle, state)| MuscleSnapshot {
                muscle,
                current_sets: state.current_sets,
                landmarks: state.landmarks,
                status: state.status(),
                mrv_streak: state.mrv_streak,
                last_stimulus: state.last_stimulus,
            })
            .collect();

        EngineSnapshot {
            week: self.meso.week(),
            meso_length: self.meso.length_weeks(),
            block: self.meso.block(),
            phase: self.phase,
            target_rir: scheduled_rir(self.meso.week(), self.meso.length_weeks()),
            deload_recommended: self.analyze_deload_need().should_deload,
            muscles,
        }
    }

    /// Read-only access to the landmark store
    #[must_use]
    pub const fn landmark_store(&self) -> &LandmarkStore {
        &self.store
    }

    /// Read-only access to the mesocycle state
    #[must_use]
    pub const fn mesocycle(&self) -> &MesocycleState {
        &self.meso
    }

    /// Current orchestrator phase
    #[must_use]
    pub const fn phase(&self) -> MesocyclePhase {
        self.phase
    }

    /// Change the mesocycle length mid-cycle.
    ///
    /// # Errors
    /// Rejects zero lengths and lengths shorter than the current week.
    pub fn set_meso_length(&mut self, length_weeks: u32) -> AppResult<()> {
        self.meso.set_length_weeks(length_weeks)?;
        self.persist();
        Ok(())
    }

    /// Persist the full state blob, best-effort.
    ///
    /// A failed write is logged and does not roll back in-memory state.
    fn persist(&mut self) {
        let Some(storage) = self.storage.as_mut() else {
            return;
        };
        let persisted = PersistedState {
            store: self.store.clone(),
            meso: self.meso,
            phase: self.phase,
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(e) = storage.write(STATE_KEY, &raw) {
                    warn!(error = %e, "failed to persist training state");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize training state"),
        }
    }

    fn write_snapshot(&mut self, fatigue_score: u32, performance: f64) {
        let snapshot = SessionSnapshot {
            id: Uuid::new_v4(),
            date: Utc::now(),
            total_sets: self.store.total_sets(),
            fatigue_score,
            performance,
        };
        let Some(storage) = self.storage.as_mut() else {
            return;
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => {
                if let Err(e) = storage.write(&snapshot.key(), &raw) {
                    warn!(error = %e, "failed to persist weekly snapshot");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize weekly snapshot"),
        }
    }
}

impl std::fmt::Debug for TrainingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingEngine")
            .field("week", &self.meso.week())
            .field("meso_length", &self.meso.length_weeks())
            .field("phase", &self.phase)
            .field("muscles", &self.store.len())
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}
