// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Concurrent generation pipeline: each time slot owns a bounded ring
//! of interesting states, and a stage per slot samples successors of
//! the previous slot's states, keeping only those that add enough new
//! coverage to its feasible future.
//!
//! # Concurrency Invariants
//!
//! 1. **One writer, one reader per ring**: a stage is the only writer of
//!    its own ring and the only reader of its upstream ring. Cursor
//!    updates are lock-free atomics with `Release`/`Acquire` pairing.
//!
//! 2. **Never blocks**: an empty upstream ring makes a stage idle for
//!    one poll, never wait. Shutdown is checked once per outer cycle.
//!
//! 3. **All or nothing**: a candidate is either in both the feasible
//!    future and the ring, or in neither.
//!
//! 4. **Per-candidate failures stay local**: synthesis, scoring and
//!    capacity errors cost one unit of the parent's budget and nothing
//!    more.

pub mod contribution;
pub mod future;
pub mod pipeline;
pub mod ring;
pub mod stage;

pub use contribution::{ContributionMetric, ExternalMetric, NoveltyMetric};
pub use future::FeasibleFuture;
pub use pipeline::{Pipeline, PipelineReport};
pub use ring::Ring;
pub use stage::{
    stage_main, CycleOutcome, Stage, StagePhase, StageReport, StageStats, TerminationReason,
};
