// ABOUTME: Core domain types for muscle groups, volume landmarks, and weekly feedback
// ABOUTME: Closed enumerations and validated value types shared across the engine
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Domain model for the autoregulation engine.
//!
//! The muscle-group set is a closed enumeration validated at the boundary;
//! free-form string keys from UI forms are parsed once via [`std::str::FromStr`]
//! and rejected early instead of being indexed dynamically.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported muscle groups. Fixed at configuration time, not dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Upper and mid back
    Back,
    /// Quadriceps
    Quads,
    /// Gluteals
    Glutes,
    /// Hamstrings
    Hamstrings,
    /// Deltoids
    Shoulders,
    /// Biceps
    Biceps,
    /// Triceps
    Triceps,
    /// Calves
    Calves,
    /// Abdominals
    Abs,
    /// Forearms
    Forearms,
    /// Neck
    Neck,
    /// Trapezius
    Traps,
}

impl MuscleGroup {
    /// Every tracked muscle group, in display order
    pub const ALL: [Self; 13] = [
        Self::Chest,
        Self::Back,
        Self::Quads,
        Self::Glutes,
        Self::Hamstrings,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Calves,
        Self::Abs,
        Self::Forearms,
        Self::Neck,
        Self::Traps,
    ];

    /// Lowercase identifier used in persisted keys and CLI arguments
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Quads => "quads",
            Self::Glutes => "glutes",
            Self::Hamstrings => "hamstrings",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Calves => "calves",
            Self::Abs => "abs",
            Self::Forearms => "forearms",
            Self::Neck => "neck",
            Self::Traps => "traps",
        }
    }

    /// Default volume landmarks from the RP literature tables
    #[must_use]
    pub const fn default_landmarks(self) -> VolumeLandmarks {
        let (mv, mev, mav, mrv) = match self {
            Self::Chest => (4, 6, 16, 22),
            Self::Back => (6, 10, 20, 25),
            Self::Quads => (6, 10, 16, 20),
            Self::Glutes => (0, 2, 12, 25),
            Self::Hamstrings => (4, 6, 16, 20),
            Self::Shoulders => (4, 8, 16, 20),
            Self::Biceps => (4, 6, 14, 20),
            Self::Triceps => (4, 6, 14, 18),
            Self::Calves => (6, 8, 16, 22),
            Self::Abs => (0, 6, 16, 25),
            Self::Forearms => (2, 4, 10, 16),
            Self::Neck => (0, 2, 8, 12),
            Self::Traps => (2, 4, 12, 16),
        };
        VolumeLandmarks { mv, mev, mav, mrv }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lowered)
            .ok_or_else(|| AppError::invalid_input(format!("unknown muscle group: {s}")))
    }
}

/// Raw landmark quadruple used for serde validation on deserialize
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawVolumeLandmarks {
    mv: u32,
    mev: u32,
    mav: u32,
    mrv: u32,
}

/// Per-muscle volume landmarks in weekly sets.
///
/// Invariant: `MV <= MEV <= MAV <= MRV` holds for every constructed value;
/// a quadruple violating the ordering is a configuration error, never a
/// runtime warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVolumeLandmarks", into = "RawVolumeLandmarks")]
pub struct VolumeLandmarks {
    mv: u32,
    mev: u32,
    mav: u32,
    mrv: u32,
}

impl VolumeLandmarks {
    /// Build a validated landmark quadruple.
    ///
    /// # Errors
    /// Returns [`crate::errors::ErrorCode::InvariantViolation`] when the
    /// ordering `MV <= MEV <= MAV <= MRV` does not hold.
    pub fn new(mv: u32, mev: u32, mav: u32, mrv: u32) -> AppResult<Self> {
        if mv <= mev && mev <= mav && mav <= mrv {
            Ok(Self { mv, mev, mav, mrv })
        } else {
            Err(AppError::invariant(format!(
                "volume landmarks must satisfy MV <= MEV <= MAV <= MRV, got {mv}/{mev}/{mav}/{mrv}"
            )))
        }
    }

    /// Maintenance volume
    #[must_use]
    pub const fn mv(&self) -> u32 {
        self.mv
    }

    /// Minimum effective volume
    #[must_use]
    pub const fn mev(&self) -> u32 {
        self.mev
    }

    /// Maximum adaptive volume
    #[must_use]
    pub const fn mav(&self) -> u32 {
        self.mav
    }

    /// Maximum recoverable volume
    #[must_use]
    pub const fn mrv(&self) -> u32 {
        self.mrv
    }

    /// Classify a weekly set count against these landmarks.
    ///
    /// Half-open interval rules: `< MV` below-minimum, `[MV, MEV)`
    /// maintenance, `[MEV, MAV]` optimal, `(MAV, MRV]` high, `> MRV` maximum.
    #[must_use]
    pub const fn classify(&self, sets: u32) -> VolumeStatus {
        if sets < self.mv {
            VolumeStatus::BelowMinimum
        } else if sets < self.mev {
            VolumeStatus::Maintenance
        } else if sets <= self.mav {
            VolumeStatus::Optimal
        } else if sets <= self.mrv {
            VolumeStatus::High
        } else {
            VolumeStatus::Maximum
        }
    }
}

impl TryFrom<RawVolumeLandmarks> for VolumeLandmarks {
    type Error = AppError;

    fn try_from(raw: RawVolumeLandmarks) -> Result<Self, Self::Error> {
        Self::new(raw.mv, raw.mev, raw.mav, raw.mrv)
    }
}

impl From<VolumeLandmarks> for RawVolumeLandmarks {
    fn from(landmarks: VolumeLandmarks) -> Self {
        Self {
            mv: landmarks.mv,
            mev: landmarks.mev,
            mav: landmarks.mav,
            mrv: landmarks.mrv,
        }
    }
}

/// Weekly volume classification relative to the landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeStatus {
    /// Below MV: insufficient even for maintenance
    BelowMinimum,
    /// In `[MV, MEV)`: maintains but does not grow
    Maintenance,
    /// In `[MEV, MAV]`: the productive growth zone
    Optimal,
    /// In `(MAV, MRV]`: recoverable but accumulating fatigue
    High,
    /// Above MRV: unrecoverable volume
    Maximum,
}

impl VolumeStatus {
    /// Kebab-case identifier matching the persisted representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BelowMinimum => "below-minimum",
            Self::Maintenance => "maintenance",
            Self::Optimal => "optimal",
            Self::High => "high",
            Self::Maximum => "maximum",
        }
    }
}

impl fmt::Display for VolumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training goal context driving tolerances, load ranges, and meso lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingGoal {
    /// Muscle growth
    Hypertrophy,
    /// Maximal strength
    Strength,
    /// Rate of force development
    Power,
    /// Muscular endurance
    Endurance,
}

impl TrainingGoal {
    /// Lowercase identifier used in messages and CLI arguments
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hypertrophy => "hypertrophy",
            Self::Strength => "strength",
            Self::Power => "power",
            Self::Endurance => "endurance",
        }
    }

    /// Acceptable RIR deviation before a load adjustment is recommended
    #[must_use]
    pub const fn rir_tolerance(self) -> f64 {
        match self {
            Self::Hypertrophy => 1.0,
            Self::Strength => 0.5,
            Self::Power => 1.5,
            Self::Endurance => 2.0,
        }
    }
}

impl fmt::Display for TrainingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hypertrophy" => Ok(Self::Hypertrophy),
            "strength" => Ok(Self::Strength),
            "power" => Ok(Self::Power),
            "endurance" => Ok(Self::Endurance),
            other => Err(AppError::invalid_input(format!(
                "unknown training goal: {other}"
            ))),
        }
    }
}

/// Subjective stimulus ratings for one muscle in one training week.
///
/// Each rating is nominally 0-3; out-of-range values are clamped during
/// scoring rather than rejected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StimulusFeedback {
    /// Mind-muscle connection quality
    pub mmc: u8,
    /// Muscle pump magnitude
    pub pump: u8,
    /// Workload disruption (how much the session took out of the muscle)
    pub disruption: u8,
}

impl StimulusFeedback {
    /// Convenience constructor
    #[must_use]
    pub const fn new(mmc: u8, pump: u8, disruption: u8) -> Self {
        Self {
            mmc,
            pump,
            disruption,
        }
    }
}

/// Complete weekly feedback for one muscle group
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MuscleFeedback {
    /// Stimulus ratings for the week's sessions
    pub stimulus: StimulusFeedback,
    /// Soreness 0-3 (0 none, 3 high)
    pub soreness: u8,
    /// Performance versus last week: 0 worse, 1 same, 2 better
    pub performance: u8,
    /// Whether illness or injury was reported this week
    #[serde(default)]
    pub has_illness: bool,
    /// Joint ache 0-3, used by the stimulus-to-fatigue ratio check
    #[serde(default)]
    pub joint_ache: u8,
    /// Top-set load this week, if logged, for rep-strength-drop detection
    #[serde(default)]
    pub last_load: Option<f64>,
}

impl Default for MuscleFeedback {
    fn default() -> Self {
        Self {
            stimulus: StimulusFeedback::default(),
            soreness: 0,
            performance: 1,
            has_illness: false,
            joint_ache: 0,
            last_load: None,
        }
    }
}

/// Weekly set-count decision for one muscle.
///
/// Replaces the legacy `-99` "hold" sentinel: a hold is its own variant and
/// cannot be mistaken for a numeric delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetAdjustment {
    /// Apply a signed set-count delta next week
    Change {
        /// Sets to add (positive) or remove (negative)
        delta: i32,
    },
    /// Hold current volume; no delta applies
    Hold {
        /// Why volume is being held
        reason: String,
    },
}

impl SetAdjustment {
    /// The delta to apply, or 0 for a hold
    #[must_use]
    pub const fn delta(&self) -> i32 {
        match self {
            Self::Change { delta } => *delta,
            Self::Hold { .. } => 0,
        }
    }

    /// Whether this adjustment is a hold
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        matches!(self, Self::Hold { .. })
    }
}

/// Weekly orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MesocyclePhase {
    /// Normal progressive-overload week
    Accumulation,
    /// Volume/load reduction week dissipating accumulated fatigue
    Deload,
}
