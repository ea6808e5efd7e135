// ABOUTME: Intelligence module re-exports for the autoregulation engine components
// ABOUTME: Stimulus scoring, volume progression, effort management, fatigue, deload, validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Engine intelligence: the pure decision functions of the autoregulation
//! core. Every component here is synchronous and free of ambient state;
//! anything stateful lives in [`crate::state`] and is threaded through
//! explicitly.

/// Deload transformation and strategy selection
pub mod deload;
/// RIR scheduling and effort validation
pub mod effort;
/// Fatigue analysis and deload triggers
pub mod fatigue;
/// Weekly set-count progression
pub mod progression;
/// Stimulus quality scoring
pub mod stimulus;
/// Load, set, frequency, and mesocycle validation helpers
pub mod validation;

pub use deload::{DeloadKind, DeloadOutcome, DeloadStrategy, DeloadTransform};
pub use effort::{
    rir_target, scheduled_rir, validate_effort, EffortValidation, IntensityLevel, LoadAdjustment,
    RirTarget, TrainingPhase, Urgency,
};
pub use fatigue::{
    analyze_frequency, assess_fatigue_accumulation, is_high_fatigue, DeloadAssessment,
    DeloadUrgency, FatigueAccumulation, FatigueAnalyzer, FatigueLevel, FrequencyAnalysis,
    ManualFlags, WeeklyWellness,
};
pub use progression::{
    session_progression, ProgressionRecommendation, SessionAction, SessionAdvice,
    VolumeProgressionEngine,
};
pub use stimulus::{score_feedback, score_stimulus, StimulusAction, StimulusScore};
pub use validation::{
    validate_frequency, validate_load, validate_mesocycle_length, validate_sets, LoadRange,
    LoadValidation, MesoLengthRange, MesoLengthValidation, Severity, SetsValidation,
};
