// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel Pipeline Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the ring hot path, single-stage sampling
//! and a full seeded pipeline run.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use frontier_core::{NoveltyMetric, Pipeline, Ring, Stage};
use frontier_physics::{ProblemParameters, SimpleRng, Synthesizer, VoltageSynthesizer};
use frontier_types::{FrontierConfig, State, StateId};

fn bench_config(timeslots: u32) -> FrontierConfig {
    FrontierConfig {
        ring_capacity: 64,
        state_dimension: 16,
        sample_size: 16,
        minimal_contribution: 0.002,
        future_capacity: 256,
        timeslots,
        seed: Some(7),
        idle_backoff_us: 0,
    }
}

// ── Ring push/pop ───────────────────────────────────────────────────

fn bench_ring_push_pop(c: &mut Criterion) {
    let ring = Ring::new(64, 16).unwrap();
    let state = Arc::new(State::new(StateId::new(1, 0), vec![1.0; 16], None));
    c.bench_function("ring_push_pop_63", |b| {
        b.iter(|| {
            while ring.push(Arc::clone(&state)) {}
            while let Some(s) = ring.take_first() {
                black_box(s);
            }
        })
    });
}

// ── VoltageSynthesizer ──────────────────────────────────────────────

fn bench_voltage_step(c: &mut Criterion) {
    let params = ProblemParameters::radial_feeder(16);
    let parent = params.initial_state();
    let mut rng = SimpleRng::new(1);
    c.bench_function("voltage_step_16", |b| {
        b.iter(|| VoltageSynthesizer.synthesize(black_box(&parent), &params, 18, &mut rng))
    });
}

// ── Stage cycle ─────────────────────────────────────────────────────

fn bench_stage_cycle(c: &mut Criterion) {
    let config = bench_config(1);
    let params = Arc::new(ProblemParameters::radial_feeder(16));
    let seed = Arc::new(params.initial_state());

    c.bench_function("stage_cycle_16_samples", |b| {
        b.iter(|| {
            let past = Arc::new(Ring::new(config.ring_capacity, 16).unwrap());
            let own = Arc::new(Ring::new(config.ring_capacity, 16).unwrap());
            past.push(Arc::clone(&seed));
            let mut stage = Stage::new(
                1,
                &config,
                Arc::clone(&params),
                past,
                own,
                Arc::new(VoltageSynthesizer),
                Arc::new(NoveltyMetric),
                Arc::new(AtomicBool::new(false)),
            )
            .unwrap();
            black_box(stage.run_cycle())
        })
    });
}

// ── Full pipeline ───────────────────────────────────────────────────

fn bench_pipeline_24_slots(c: &mut Criterion) {
    let pipeline = Pipeline::new(
        bench_config(24),
        ProblemParameters::radial_feeder(16),
        Arc::new(VoltageSynthesizer),
        Arc::new(NoveltyMetric),
    )
    .unwrap();
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.bench_function("pipeline_24_slots", |b| {
        b.iter(|| black_box(pipeline.run().unwrap().total_admitted()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_ring_push_pop,
    bench_voltage_step,
    bench_stage_cycle,
    bench_pipeline_24_slots,
);
criterion_main!(benches);
