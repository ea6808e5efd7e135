// ABOUTME: meso-cli - command-line front end for the training volume engine
// ABOUTME: Status display, feedback scoring, landmark editing, and seeded week simulation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Usage:
//! ```bash
//! # Show the current training state
//! meso-cli status
//!
//! # Score a stimulus rating triple
//! meso-cli stimulus --mmc 2 --pump 1 --disruption 1
//!
//! # Check reported effort against the schedule
//! meso-cli effort --actual 3.0 --target 2.0 --goal hypertrophy
//!
//! # Update landmarks for a muscle
//! meso-cli landmarks chest --mv 4 --mev 6 --mav 16 --mrv 22
//!
//! # Simulate a number of weeks with seeded feedback
//! meso-cli simulate --weeks 6 --seed 42
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meso_engine::logging;
use meso_engine::models::{MuscleGroup, TrainingGoal};
use meso_engine::orchestrator::TrainingEngine;
use meso_engine::simulation::FeedbackSimulator;
use meso_engine::storage::FileStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "meso-cli",
    about = "Training volume engine CLI",
    long_about = "Command-line tool for driving the autoregulated training volume engine: \
                  stimulus scoring, weekly progression, effort validation, and deload tracking."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path of the JSON state file
    #[arg(long, global = true, default_value = "meso-state.json")]
    state_path: PathBuf,

    /// Mesocycle length used when no saved state exists
    #[arg(long, global = true, default_value_t = 4)]
    meso_length: u32,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the current training state
    Status,

    /// Score a stimulus rating triple
    Stimulus {
        /// Mind-muscle connection rating 0-3
        #[arg(long)]
        mmc: u8,

        /// Pump rating 0-3
        #[arg(long)]
        pump: u8,

        /// Disruption rating 0-3
        #[arg(long)]
        disruption: u8,
    },

    /// Validate reported effort against a target RIR
    Effort {
        /// Reported reps in reserve
        #[arg(long)]
        actual: f64,

        /// Target reps in reserve (defaults to the scheduled target)
        #[arg(long)]
        target: Option<f64>,

        /// Training goal context
        #[arg(long, default_value = "hypertrophy")]
        goal: String,
    },

    /// Update volume landmarks for a muscle
    Landmarks {
        /// Muscle group to update
        muscle: String,

        /// Maintenance volume
        #[arg(long)]
        mv: u32,

        /// Minimum effective volume
        #[arg(long)]
        mev: u32,

        /// Maximum adaptive volume
        #[arg(long)]
        mav: u32,

        /// Maximum recoverable volume
        #[arg(long)]
        mrv: u32,
    },

    /// Reset a muscle's current volume to its MEV
    Reset {
        /// Muscle group to reset
        muscle: String,
    },

    /// Simulate weekly ticks with seeded feedback
    Simulate {
        /// Number of weekly ticks to run
        #[arg(long, default_value_t = 4)]
        weeks: u32,

        /// Seed for the feedback generator
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn open_engine(cli: &Cli) -> Result<TrainingEngine> {
    let engine = TrainingEngine::new(cli.meso_length)
        .context("failed to create engine")?
        .with_storage(Box::new(FileStore::new(&cli.state_path)));
    Ok(engine)
}

fn show_status(engine: &TrainingEngine) {
    let snapshot = engine.snapshot();
    println!(
        "week {}/{} (block {}) phase {:?}, target RIR {:.1}",
        snapshot.week,
        snapshot.meso_length,
        snapshot.block,
        snapshot.phase,
        snapshot.target_rir
    );
    if snapshot.deload_recommended {
        println!("deload recommended");
    }
    for muscle in &snapshot.muscles {
        println!(
            "  {:<11} {:>2} sets  [{}/{}/{}/{}]  {}",
            muscle.muscle.to_string(),
            muscle.current_sets,
            muscle.landmarks.mv(),
            muscle.landmarks.mev(),
            muscle.landmarks.mav(),
            muscle.landmarks.mrv(),
            muscle.status
        );
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Status => {
            let engine = open_engine(&cli)?;
            show_status(&engine);
        }
        Command::Stimulus {
            mmc,
            pump,
            disruption,
        } => {
            let score = TrainingEngine::score_stimulus(*mmc, *pump, *disruption);
            println!("score {}/9 action {:?}", score.score, score.action);
            println!("{}", score.advice);
        }
        Command::Effort {
            actual,
            target,
            goal,
        } => {
            let goal: TrainingGoal = goal.parse()?;
            let engine = open_engine(&cli)?;
            let target = target.unwrap_or_else(|| engine.current_rir_target().target_rir);
            let validation = TrainingEngine::validate_effort(*actual, target, goal);
            println!("{}", validation.feedback);
        }
        Command::Landmarks {
            muscle,
            mv,
            mev,
            mav,
            mrv,
        } => {
            let muscle: MuscleGroup = muscle.parse()?;
            let mut engine = open_engine(&cli)?;
            engine.update_landmarks(muscle, *mv, *mev, *mav, *mrv)?;
            println!("updated landmarks for {muscle}");
        }
        Command::Reset { muscle } => {
            let muscle: MuscleGroup = muscle.parse()?;
            let mut engine = open_engine(&cli)?;
            engine.initialize_muscle_at_mev(muscle);
            println!(
                "{muscle} reset to MEV ({} sets)",
                engine.landmark_store().current_sets(muscle)
            );
        }
        Command::Simulate { weeks, seed } => {
            let mut engine = open_engine(&cli)?;
            let mut simulator = FeedbackSimulator::new(*seed);
            for _ in 0..*weeks {
                let feedback = simulator.weekly_feedback(engine.landmark_store());
                let report = engine.advance_week(&feedback);
                println!(
                    "week {} ({:?}): target RIR {:.1}, fatigue {}, {} progressions{}",
                    report.week,
                    report.phase,
                    report.rir.target_rir,
                    report.fatigue_score,
                    report.entries.len(),
                    if report.deload.should_deload {
                        ", deload flagged"
                    } else {
                        ""
                    }
                );
                for reason in &report.deload.reasons {
                    println!("    - {reason}");
                }
            }
            show_status(&engine);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init_from_env().ok();
    run()
}
