// ABOUTME: Criterion benchmarks for the autoregulation engine hot paths
// ABOUTME: Measures stimulus scoring, progression decisions, and full weekly ticks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for the engine's decision functions.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meso_engine::intelligence::{scheduled_rir, score_stimulus, VolumeProgressionEngine};
use meso_engine::models::{MuscleFeedback, MuscleGroup, StimulusFeedback, VolumeLandmarks};
use meso_engine::orchestrator::TrainingEngine;
use meso_engine::simulation::FeedbackSimulator;

fn bench_score_stimulus(c: &mut Criterion) {
    c.bench_function("score_stimulus", |b| {
        b.iter(|| score_stimulus(black_box(2), black_box(1), black_box(3)));
    });
}

fn bench_volume_progression(c: &mut Criterion) {
    let landmarks = VolumeLandmarks::new(4, 6, 16, 22).unwrap();
    let feedback = MuscleFeedback {
        stimulus: StimulusFeedback::new(1, 1, 1),
        soreness: 1,
        performance: 1,
        ..MuscleFeedback::default()
    };
    c.bench_function("volume_progression_advance", |b| {
        b.iter(|| {
            VolumeProgressionEngine::advance(
                MuscleGroup::Chest,
                black_box(&feedback),
                black_box(&landmarks),
                black_box(12),
            )
        });
    });
}

fn bench_rir_schedule(c: &mut Criterion) {
    c.bench_function("scheduled_rir_full_meso", |b| {
        b.iter(|| {
            for week in 1..=6 {
                black_box(scheduled_rir(black_box(week), 6));
            }
        });
    });
}

fn bench_weekly_tick(c: &mut Criterion) {
    c.bench_function("advance_week_all_muscles", |b| {
        b.iter_batched(
            || {
                let engine = TrainingEngine::new(6).unwrap();
                let feedback = FeedbackSimulator::new(11).weekly_feedback(engine.landmark_store());
                (engine, feedback)
            },
            |(mut engine, feedback)| engine.advance_week(black_box(&feedback)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_score_stimulus,
    bench_volume_progression,
    bench_rir_schedule,
    bench_weekly_tick
);
criterion_main!(benches);
