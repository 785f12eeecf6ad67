// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Contribution Metric Interface
// ─────────────────────────────────────────────────────────────────────
//! How much a candidate state adds to an already-accepted set.
//!
//! The metric is a pure function of the candidate and the accepted
//! set as it exists at the moment of the call. Higher is more novel.

use std::sync::Arc;

use frontier_types::{FrontierError, FrontierResult, State};

/// Trait for contribution metrics.
pub trait ContributionMetric: Send + Sync {
    fn contribution(&self, candidate: &State, accepted: &[Arc<State>]) -> FrontierResult<f64>;
}

/// Novelty as the RMS distance to the nearest accepted state.
///
/// Against an empty set the contribution is `+∞`: the first feasible
/// state always covers new ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoveltyMetric;

impl ContributionMetric for NoveltyMetric {
    fn contribution(&self, candidate: &State, accepted: &[Arc<State>]) -> FrontierResult<f64> {
        let mut nearest = f64::INFINITY;
        for member in accepted {
            let d = candidate.rms_distance(member).ok_or_else(|| {
                FrontierError::Scoring(format!(
                    "candidate {} dimension {} does not match accepted {}",
                    candidate.id(),
                    candidate.dimension(),
                    member.id()
                ))
            })?;
            if d.is_nan() {
                return Err(FrontierError::Numerical(format!(
                    "distance from {} to {} is NaN",
                    candidate.id(),
                    member.id()
                )));
            }
            nearest = nearest.min(d);
        }
        Ok(nearest)
    }
}

/// Contribution function supplied by the embedding application.
type ContributionFn = Box<dyn Fn(&State, &[Arc<State>]) -> FrontierResult<f64> + Send + Sync>;

/// Metric that delegates to a closure.
pub struct ExternalMetric {
    contribution_fn: ContributionFn,
}

impl ExternalMetric {
    pub fn new(
        contribution_fn: impl Fn(&State, &[Arc<State>]) -> FrontierResult<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            contribution_fn: Box::new(contribution_fn),
        }
    }

    /// Metric returning the same score for every candidate.
    pub fn constant(score: f64) -> Self {
        Self::new(move |_, _| Ok(score))
    }
}

impl ContributionMetric for ExternalMetric {
    fn contribution(&self, candidate: &State, accepted: &[Arc<State>]) -> FrontierResult<f64> {
        (self.contribution_fn)(candidate, accepted)
    }
}
