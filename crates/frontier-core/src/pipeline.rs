// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Generation Pipeline Orchestrator
// ─────────────────────────────────────────────────────────────────────
//! Wires one stage per time slot into a producer–consumer chain:
//!
//!   Ring(0) → Stage(1) → Ring(1) → Stage(2) → … → Ring(T)
//!
//! Ring 0 holds the seed state and is closed before any stage starts.
//! The orchestrator keeps every ring alive for the whole run, so a
//! stage's upstream ring always outlives the stage reading it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use frontier_physics::{ProblemParameters, Synthesizer};
use frontier_types::{FrontierConfig, FrontierError, FrontierResult, State};

use crate::contribution::ContributionMetric;
use crate::ring::Ring;
use crate::stage::{stage_main, Stage, StageReport, TerminationReason};

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// One report per stage, in time-slot order.
    pub stages: Vec<StageReport>,
    /// Whatever the last stage left in its ring.
    pub final_generation: Vec<Arc<State>>,
}

impl PipelineReport {
    /// Total admitted states across all stages.
    pub fn total_admitted(&self) -> u64 {
        self.stages.iter().map(|s| s.stats.admitted).sum()
    }

    /// True when no stage stopped because of the shutdown signal.
    pub fn completed(&self) -> bool {
        self.stages
            .iter()
            .all(|s| s.reason == TerminationReason::Completed)
    }
}

/// Owner of the configuration, shared collaborators and all rings.
pub struct Pipeline {
    config: FrontierConfig,
    params: Arc<ProblemParameters>,
    synthesizer: Arc<dyn Synthesizer>,
    metric: Arc<dyn ContributionMetric>,
    shutdown: Arc<AtomicBool>,
}

impl Pipeline {
    pub fn new(
        config: FrontierConfig,
        params: ProblemParameters,
        synthesizer: Arc<dyn Synthesizer>,
        metric: Arc<dyn ContributionMetric>,
    ) -> FrontierResult<Self> {
        config.validate()?;
        params.validate()?;
        if params.dimension() != config.state_dimension {
            return Err(FrontierError::InvalidConfig(format!(
                "problem dimension {} != state_dimension {}",
                params.dimension(),
                config.state_dimension
            )));
        }
        Ok(Self {
            config,
            params: Arc::new(params),
            synthesizer,
            metric,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Global termination flag shared by every stage.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Ask every running stage to stop after its current parent.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Build all rings and stages without starting anything.
    fn build(&self) -> FrontierResult<(Vec<Arc<Ring>>, Vec<Stage>)> {
        let slots = self.config.timeslots as usize + 1;
        let mut rings = Vec::with_capacity(slots);
        for _ in 0..slots {
            rings.push(Arc::new(Ring::new(
                self.config.ring_capacity,
                self.config.state_dimension,
            )?));
        }

        let seed = Arc::new(self.params.initial_state());
        rings[0].push(seed);
        rings[0].close();

        let mut stages = Vec::with_capacity(slots - 1);
        for t in 1..slots {
            stages.push(Stage::new(
                t as u32,
                &self.config,
                Arc::clone(&self.params),
                Arc::clone(&rings[t - 1]),
                Arc::clone(&rings[t]),
                Arc::clone(&self.synthesizer),
                Arc::clone(&self.metric),
                Arc::clone(&self.shutdown),
            )?);
        }
        Ok((rings, stages))
    }

    /// Run every stage on its own thread and wait for all of them.
    ///
    /// Configuration errors surface before any thread is spawned.
    pub fn run(&self) -> FrontierResult<PipelineReport> {
        let (rings, stages) = self.build()?;
        log::info!(
            "pipeline starting: {} stages, {} usable slots per ring, dimension {}",
            stages.len(),
            self.config.usable_ring_capacity(),
            self.config.state_dimension
        );

        let mut handles = Vec::with_capacity(stages.len());
        for stage in stages {
            let t = stage.timeslot();
            let handle = thread::Builder::new()
                .name(format!("frontier-stage-{t}"))
                .spawn(move || stage_main(stage));
            match handle {
                Ok(h) => handles.push((t, h)),
                Err(e) => {
                    // Stop the stages already running, then report.
                    self.request_shutdown();
                    close_all(&rings);
                    join_all(handles);
                    return Err(FrontierError::Stage(format!(
                        "failed to spawn stage {t}: {e}"
                    )));
                }
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (t, handle) in handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    log::error!("stage {t} panicked, shutting pipeline down");
                    self.request_shutdown();
                    // Unblock the panicked stage's consumer.
                    rings[t as usize].close();
                    failure.get_or_insert(t);
                }
            }
        }
        if let Some(t) = failure {
            return Err(FrontierError::Stage(format!("stage {t} panicked")));
        }

        let final_generation = rings.last().map(|r| r.drain()).unwrap_or_default();
        let report = PipelineReport {
            stages: reports,
            final_generation,
        };
        log::info!(
            "pipeline finished: {} admitted, {} in final generation",
            report.total_admitted(),
            report.final_generation.len()
        );
        Ok(report)
    }
}

fn close_all(rings: &[Arc<Ring>]) {
    for ring in rings {
        ring.close();
    }
}

fn join_all(handles: Vec<(u32, thread::JoinHandle<StageReport>)>) {
    for (t, handle) in handles {
        if handle.join().is_err() {
            log::error!("stage {t} panicked during shutdown");
        }
    }
}
