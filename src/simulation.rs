// ABOUTME: Deterministic weekly-feedback simulator for demos and scenario tests
// ABOUTME: Seeded ChaCha8 generator; never used by the engine's own decisions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Seeded feedback simulation.
//!
//! The demo workflows need plausible weekly feedback without a real athlete.
//! Randomness is injected through an explicitly-seeded generator so every
//! simulated mesocycle is reproducible; the engine itself stays fully
//! deterministic and never draws random numbers.

use crate::models::{MuscleFeedback, MuscleGroup, StimulusFeedback, VolumeStatus};
use crate::state::LandmarkStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Deterministic weekly-feedback generator
#[derive(Debug)]
pub struct FeedbackSimulator {
    rng: ChaCha8Rng,
}

impl FeedbackSimulator {
    /// Create a simulator from an explicit seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate one week of feedback for every muscle in the store.
    ///
    /// Ratings are biased by volume status: muscles deep into the high
    /// zones come back sorer and with flatter stimulus, which is what a
    /// real accumulation phase looks like.
    pub fn weekly_feedback(
        &mut self,
        store: &LandmarkStore,
    ) -> BTreeMap<MuscleGroup, MuscleFeedback> {
        let mut feedback = BTreeMap::new();
        for (muscle, state) in store.iter() {
            let (soreness_max, stimulus_min) = match state.status() {
                VolumeStatus::BelowMinimum | VolumeStatus::Maintenance => (1, 0),
                VolumeStatus::Optimal => (2, 0),
                VolumeStatus::High => (3, 1),
                VolumeStatus::Maximum => (3, 2),
            };

            let stimulus = StimulusFeedback::new(
                self.rng.gen_range(stimulus_min..=2),
                self.rng.gen_range(stimulus_min..=2),
                self.rng.gen_range(0..=2),
            );
            let soreness = self.rng.gen_range(0..=soreness_max);
            let performance = self.rng.gen_range(0..=2);

            feedback.insert(
                muscle,
                MuscleFeedback {
                    stimulus,
                    soreness,
                    performance,
                    ..MuscleFeedback::default()
                },
            );
        }
        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_same_feedback() {
        let store = LandmarkStore::with_defaults();
        let week_a = FeedbackSimulator::new(42).weekly_feedback(&store);
        let week_b = FeedbackSimulator::new(42).weekly_feedback(&store);
        for (muscle, a) in &week_a {
            let b = &week_b[muscle];
            assert_eq!(a.soreness, b.soreness);
            assert_eq!(a.performance, b.performance);
            assert_eq!(a.stimulus.pump, b.stimulus.pump);
        }
    }
}
