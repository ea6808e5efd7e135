// ABOUTME: Main library entry point for the autoregulated training volume engine
// ABOUTME: Stimulus scoring, volume progression, RIR scheduling, fatigue and deload management
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Meso Engine
//!
//! An autoregulation engine for training-program design: it turns subjective
//! weekly feedback (soreness, pump, performance, reps in reserve) into
//! volume and load recommendations, tracks per-muscle volume landmarks
//! (MV/MEV/MAV/MRV), schedules a target-RIR curve across each mesocycle,
//! and detects when accumulated fatigue demands a deload.
//!
//! ## Architecture
//!
//! - **Models**: closed muscle-group enumeration, validated landmark
//!   quadruples, feedback and adjustment types
//! - **State**: `LandmarkStore` and `MesocycleState`, the single source of
//!   truth owned by the orchestrator
//! - **Intelligence**: the pure decision functions (stimulus scoring, set
//!   progression, RIR scheduling, effort validation, fatigue analysis,
//!   deload transformation, parameter validation)
//! - **Orchestrator**: `TrainingEngine` drives the weekly
//!   accumulation/deload state machine and exposes the callable operations
//! - **Storage**: injected key-value persistence, best-effort and non-fatal
//!
//! ## Example
//!
//! ```rust
//! use meso_engine::models::{MuscleFeedback, MuscleGroup, StimulusFeedback};
//! use meso_engine::orchestrator::TrainingEngine;
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), meso_engine::errors::AppError> {
//! let mut engine = TrainingEngine::new(5)?;
//!
//! let mut feedback = BTreeMap::new();
//! feedback.insert(
//!     MuscleGroup::Chest,
//!     MuscleFeedback {
//!         stimulus: StimulusFeedback::new(1, 1, 1),
//!         soreness: 1,
//!         performance: 1,
//!         ..MuscleFeedback::default()
//!     },
//! );
//!
//! let report = engine.advance_week(&feedback);
//! println!("week {} target RIR {:.1}", report.week, report.rir.target_rir);
//! # Ok(())
//! # }
//! ```

/// Domain constants for volume, RIR, fatigue, and validation policy
pub mod constants;

/// Unified error handling with structured codes
pub mod errors;

/// The autoregulation decision functions
pub mod intelligence;

/// Logging configuration and setup
pub mod logging;

/// Core domain types
pub mod models;

/// Weekly orchestrator and engine entry points
pub mod orchestrator;

/// Seeded feedback simulation for demos and tests
pub mod simulation;

/// Training state owned by the orchestrator
pub mod state;

/// Injected key-value persistence
pub mod storage;
