// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Generation Stage (Worker)
// ─────────────────────────────────────────────────────────────────────
//! Per-time-slot driver. A stage reads parents from the previous
//! generation's ring, samples successors, scores them against its
//! feasible future, and publishes admitted states into its own ring.
//!
//! Phases: `Idle → Sampling → (Advancing | Draining) → Idle | Terminated`.
//!
//! - `Idle` on an empty upstream ring returns immediately; the caller
//!   re-polls. An empty upstream is not an error.
//! - `Sampling` consumes one parent and makes at most `sample_size`
//!   synthesis attempts, stopping early once the own ring is full.
//! - `Advancing`: the attempt budget ran out. `Draining`: the own ring
//!   filled up first; if it was already full the parent is consumed
//!   without a single attempt.
//! - `Terminated` is entered on the shutdown signal or once the
//!   upstream ring is closed and empty. It is final.
//!
//! A failing candidate (synthesis, scoring, capacity) still costs one
//! unit of budget and never aborts the stage. A panic inside the
//! synthesizer or metric is caught and counted as that candidate's
//! failure.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use frontier_physics::{successor, ProblemParameters, SimpleRng, Synthesizer};
use frontier_types::{FrontierConfig, FrontierError, FrontierResult, State, StateId};

use crate::contribution::ContributionMetric;
use crate::future::FeasibleFuture;
use crate::ring::Ring;

/// Where a stage is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    Idle,
    Sampling,
    Advancing,
    Draining,
    Terminated,
}

/// Result of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No parent available yet; poll again later.
    Idle,
    /// A parent was sampled until its budget ran out.
    Advanced,
    /// A parent was consumed while the own ring was full.
    Drained,
    /// The stage will not run again.
    Terminated(TerminationReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Upstream ring closed and fully consumed.
    Completed,
    /// Global shutdown signal observed.
    Shutdown,
}

/// Running tallies kept by a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    /// Synthesis attempts (each costs one unit of budget).
    pub attempts: u64,
    pub admitted: u64,
    pub below_threshold: u64,
    pub synthesis_failures: u64,
    pub scoring_failures: u64,
    pub capacity_rejections: u64,
    pub parents_consumed: u64,
    /// Parents consumed with zero attempts because the own ring was full.
    pub parents_drained: u64,
    pub idle_polls: u64,
}

/// Final account of a stage, returned when its thread ends.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub timeslot: u32,
    pub stats: StageStats,
    pub reason: TerminationReason,
    /// The stage's feasible future at termination.
    pub accepted: Vec<Arc<State>>,
}

/// Driver for one time slot.
pub struct Stage {
    timeslot: u32,
    sample_size: usize,
    idle_backoff: Duration,
    params: Arc<ProblemParameters>,
    past: Arc<Ring>,
    states: Arc<Ring>,
    future: FeasibleFuture,
    synthesizer: Arc<dyn Synthesizer>,
    rng: SimpleRng,
    shutdown: Arc<AtomicBool>,
    phase: StagePhase,
    reason: Option<TerminationReason>,
    next_index: u64,
    stats: StageStats,
}

impl Stage {
    /// Build a stage, failing fast on any configuration mismatch.
    ///
    /// `past` is read-only from this stage's side; `states` is the ring
    /// this stage alone writes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timeslot: u32,
        config: &FrontierConfig,
        params: Arc<ProblemParameters>,
        past: Arc<Ring>,
        states: Arc<Ring>,
        synthesizer: Arc<dyn Synthesizer>,
        metric: Arc<dyn ContributionMetric>,
        shutdown: Arc<AtomicBool>,
    ) -> FrontierResult<Self> {
        config.validate()?;
        params.validate()?;
        let dim = config.state_dimension;
        if params.dimension() != dim {
            return Err(FrontierError::InvalidConfig(format!(
                "stage {timeslot}: problem dimension {} != state_dimension {dim}",
                params.dimension()
            )));
        }
        if past.dimension() != dim || states.dimension() != dim {
            return Err(FrontierError::InvalidConfig(format!(
                "stage {timeslot}: ring dimensions (past {}, own {}) != state_dimension {dim}",
                past.dimension(),
                states.dimension()
            )));
        }
        if Arc::ptr_eq(&past, &states) {
            return Err(FrontierError::InvalidConfig(format!(
                "stage {timeslot}: past and own ring are the same buffer"
            )));
        }

        if config.future_capacity < states.usable_capacity() {
            log::warn!(
                "stage {timeslot}: future capacity {} < ring usable capacity {}, ring cannot fill",
                config.future_capacity,
                states.usable_capacity()
            );
        }

        let rng = match config.seed {
            Some(seed) => SimpleRng::for_stage(seed, timeslot),
            None => SimpleRng::from_time(),
        };

        Ok(Self {
            timeslot,
            sample_size: config.sample_size,
            idle_backoff: Duration::from_micros(config.idle_backoff_us),
            params,
            past,
            states,
            future: FeasibleFuture::from_config(config, metric)?,
            synthesizer,
            rng,
            shutdown,
            phase: StagePhase::Idle,
            reason: None,
            next_index: 0,
            stats: StageStats::default(),
        })
    }

    pub fn timeslot(&self) -> u32 {
        self.timeslot
    }

    pub fn phase(&self) -> StagePhase {
        self.phase
    }

    pub fn stats(&self) -> StageStats {
        self.stats
    }

    pub fn future(&self) -> &FeasibleFuture {
        &self.future
    }

    /// This stage's own generation (the next stage's past).
    pub fn states(&self) -> &Arc<Ring> {
        &self.states
    }

    /// One outer iteration: pick a parent and sample it, or idle.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        if let Some(reason) = self.reason {
            return CycleOutcome::Terminated(reason);
        }
        if self.shutdown.load(Ordering::SeqCst) {
            return self.terminate(TerminationReason::Shutdown);
        }

        if self.past.is_exhausted() {
            return self.terminate(TerminationReason::Completed);
        }
        let parent = match self.past.take_first() {
            Some(parent) => parent,
            None => {
                if self.phase != StagePhase::Idle {
                    log::debug!("stage {}: upstream empty, idling", self.timeslot);
                }
                self.phase = StagePhase::Idle;
                self.stats.idle_polls += 1;
                return CycleOutcome::Idle;
            }
        };

        self.phase = StagePhase::Sampling;
        self.stats.parents_consumed += 1;
        let admitted_before = self.stats.admitted;

        let mut ttl = self.sample_size;
        while ttl > 0 && !self.states.is_full() {
            ttl -= 1;
            self.sample_one(&parent);
        }

        let admitted = self.stats.admitted - admitted_before;
        if ttl > 0 {
            if ttl == self.sample_size {
                self.stats.parents_drained += 1;
            }
            self.phase = StagePhase::Draining;
            log::debug!(
                "stage {}: ring full after {admitted} admissions from {}",
                self.timeslot,
                parent.id()
            );
            CycleOutcome::Drained
        } else {
            self.phase = StagePhase::Advancing;
            log::debug!(
                "stage {}: budget spent on {}, {admitted} admitted",
                self.timeslot,
                parent.id()
            );
            CycleOutcome::Advanced
        }
    }

    /// Synthesize, score and possibly admit one candidate.
    fn sample_one(&mut self, parent: &State) {
        self.stats.attempts += 1;
        let id = StateId::new(self.timeslot, self.next_index);

        let synthesized = catch_unwind(AssertUnwindSafe(|| {
            successor(
                parent,
                &self.params,
                self.timeslot,
                self.synthesizer.as_ref(),
                &mut self.rng,
                id,
            )
        }));
        let candidate = match synthesized {
            Ok(Ok(candidate)) => candidate,
            Ok(Err(e)) => {
                self.stats.synthesis_failures += 1;
                self.log_candidate_error(&e, parent.id());
                return;
            }
            Err(_) => {
                self.stats.synthesis_failures += 1;
                log::error!(
                    "stage {}: synthesizer panicked on {}, candidate dropped",
                    self.timeslot,
                    parent.id()
                );
                return;
            }
        };

        let future = &self.future;
        let scored = catch_unwind(AssertUnwindSafe(|| future.contribution(&candidate)));
        let score = match scored {
            Ok(Ok(score)) => score,
            Ok(Err(e)) => {
                self.stats.scoring_failures += 1;
                self.log_candidate_error(&e, candidate.id());
                return;
            }
            Err(_) => {
                self.stats.scoring_failures += 1;
                log::error!(
                    "stage {}: metric panicked on {}, candidate dropped",
                    self.timeslot,
                    candidate.id()
                );
                return;
            }
        };

        if !self.future.admits(score) {
            self.stats.below_threshold += 1;
            return;
        }

        let candidate = Arc::new(candidate);
        if let Err(e) = self.future.add(Arc::clone(&candidate)) {
            self.stats.capacity_rejections += 1;
            log::debug!("stage {}: {e}", self.timeslot);
            return;
        }
        if !self.states.push(candidate) {
            // Admission and publication succeed together or not at all.
            self.future.retract_last();
            self.stats.capacity_rejections += 1;
            return;
        }

        self.next_index += 1;
        self.stats.admitted += 1;
    }

    fn log_candidate_error(&self, e: &FrontierError, origin: StateId) {
        if e.is_recoverable() {
            log::warn!("stage {}: candidate from {origin} dropped: {e}", self.timeslot);
        } else {
            log::error!("stage {}: unexpected error on {origin}: {e}", self.timeslot);
        }
    }

    fn terminate(&mut self, reason: TerminationReason) -> CycleOutcome {
        self.phase = StagePhase::Terminated;
        self.reason = Some(reason);
        self.states.close();
        CycleOutcome::Terminated(reason)
    }

    /// Run cycles until terminated, backing off while idle.
    pub fn run(mut self) -> StageReport {
        log::info!(
            "stage {} started (sample_size={}, threshold={})",
            self.timeslot,
            self.sample_size,
            self.future.minimal_contribution()
        );

        let reason = loop {
            match self.run_cycle() {
                CycleOutcome::Terminated(reason) => break reason,
                CycleOutcome::Idle => {
                    if self.idle_backoff.is_zero() {
                        std::thread::yield_now();
                    } else {
                        std::thread::sleep(self.idle_backoff);
                    }
                }
                CycleOutcome::Advanced | CycleOutcome::Drained => {}
            }
        };

        log::info!(
            "stage {} terminated ({reason:?}): {} parents, {} attempts, {} admitted, {} failures",
            self.timeslot,
            self.stats.parents_consumed,
            self.stats.attempts,
            self.stats.admitted,
            self.stats.synthesis_failures + self.stats.scoring_failures
        );

        StageReport {
            timeslot: self.timeslot,
            stats: self.stats,
            reason,
            accepted: self.future.into_accepted(),
        }
    }
}

/// Thread entry hook: takes ownership of a fully built stage.
pub fn stage_main(stage: Stage) -> StageReport {
    stage.run()
}
