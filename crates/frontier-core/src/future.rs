// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Feasible Future (Acceptance Policy)
// ─────────────────────────────────────────────────────────────────────
//! Per-time-slot accumulator of admitted states.
//!
//! `contribution()` scores a candidate against the accepted set as it
//! is now; `add()` stores a candidate unconditionally up to the
//! capacity bound. The threshold comparison lives with the caller
//! (`admits()` is provided for it), and members are never re-scored
//! once later states arrive.

use std::sync::Arc;

use frontier_types::{FrontierConfig, FrontierError, FrontierResult, State};

use crate::contribution::ContributionMetric;

/// Capacity-bounded set of admitted states for one time slot.
pub struct FeasibleFuture {
    accepted: Vec<Arc<State>>,
    capacity: usize,
    minimal_contribution: f64,
    metric: Arc<dyn ContributionMetric>,
}

impl FeasibleFuture {
    pub fn new(
        capacity: usize,
        minimal_contribution: f64,
        metric: Arc<dyn ContributionMetric>,
    ) -> FrontierResult<Self> {
        if capacity < 1 {
            return Err(FrontierError::InvalidConfig(
                "future capacity must be >= 1".to_string(),
            ));
        }
        if !minimal_contribution.is_finite() {
            return Err(FrontierError::InvalidConfig(format!(
                "minimal_contribution must be finite, got {minimal_contribution}"
            )));
        }
        Ok(Self {
            accepted: Vec::with_capacity(capacity),
            capacity,
            minimal_contribution,
            metric,
        })
    }

    pub fn from_config(
        config: &FrontierConfig,
        metric: Arc<dyn ContributionMetric>,
    ) -> FrontierResult<Self> {
        Self::new(config.future_capacity, config.minimal_contribution, metric)
    }

    /// Score `candidate` against the current accepted set.
    ///
    /// A NaN score is reported as a scoring failure.
    pub fn contribution(&self, candidate: &State) -> FrontierResult<f64> {
        let score = self.metric.contribution(candidate, &self.accepted)?;
        if score.is_nan() {
            return Err(FrontierError::Scoring(format!(
                "metric returned NaN for {}",
                candidate.id()
            )));
        }
        Ok(score)
    }

    /// Threshold test applied by the caller before `add()`.
    #[inline]
    pub fn admits(&self, score: f64) -> bool {
        score >= self.minimal_contribution
    }

    /// Append `candidate`. Fails with `CapacityExceeded` when full,
    /// leaving the accepted set unchanged.
    pub fn add(&mut self, candidate: Arc<State>) -> FrontierResult<()> {
        if self.accepted.len() >= self.capacity {
            return Err(FrontierError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.accepted.push(candidate);
        Ok(())
    }

    /// Undo the most recent `add()`.
    pub(crate) fn retract_last(&mut self) -> Option<Arc<State>> {
        self.accepted.pop()
    }

    pub fn accepted(&self) -> &[Arc<State>] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.accepted.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn minimal_contribution(&self) -> f64 {
        self.minimal_contribution
    }

    pub fn into_accepted(self) -> Vec<Arc<State>> {
        self.accepted
    }
}

#[cfg(test)]
mod tests {
    use frontier_types::StateId;

    use super::*;
    use crate::contribution::{ExternalMetric, NoveltyMetric};

    fn s(i: u64, payload: Vec<f64>) -> Arc<State> {
        Arc::new(State::new(StateId::new(1, i), payload, None))
    }

    #[test]
    fn test_add_up_to_capacity() {
        let mut future = FeasibleFuture::new(2, 0.0, Arc::new(NoveltyMetric)).unwrap();
        future.add(s(0, vec![0.0])).unwrap();
        future.add(s(1, vec![1.0])).unwrap();
        assert!(future.is_full());

        let err = future.add(s(2, vec![2.0])).unwrap_err();
        assert_eq!(err, FrontierError::CapacityExceeded { capacity: 2 });
        assert_eq!(future.len(), 2);
        assert_eq!(future.accepted()[1].id().index, 1);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut future = FeasibleFuture::new(5, 0.0, Arc::new(NoveltyMetric)).unwrap();
        for i in 0..50 {
            let _ = future.add(s(i, vec![i as f64]));
            assert!(future.len() <= future.capacity());
        }
        assert_eq!(future.len(), 5);
    }

    #[test]
    fn test_contribution_is_pure() {
        let mut future = FeasibleFuture::new(4, 0.0, Arc::new(NoveltyMetric)).unwrap();
        future.add(s(0, vec![0.0, 0.0])).unwrap();
        let cand = s(1, vec![0.3, 0.4]);
        let a = future.contribution(&cand).unwrap();
        let b = future.contribution(&cand).unwrap();
        assert_eq!(a, b);
        assert_eq!(future.len(), 1);
    }

    #[test]
    fn test_contribution_sees_current_set() {
        let mut future = FeasibleFuture::new(4, 0.5, Arc::new(NoveltyMetric)).unwrap();
        let cand = s(0, vec![1.0, 1.0]);
        assert!(future.admits(future.contribution(&cand).unwrap()));
        future.add(Arc::clone(&cand)).unwrap();
        // Same point again contributes nothing.
        assert!(!future.admits(future.contribution(&cand).unwrap()));
    }

    #[test]
    fn test_add_does_not_recheck_threshold() {
        let mut future = FeasibleFuture::new(4, 10.0, Arc::new(ExternalMetric::constant(0.0))).unwrap();
        assert!(future.add(s(0, vec![0.0])).is_ok());
        assert_eq!(future.len(), 1);
    }

    #[test]
    fn test_admits_boundary_inclusive() {
        let future = FeasibleFuture::new(1, 0.25, Arc::new(NoveltyMetric)).unwrap();
        assert!(future.admits(0.25));
        assert!(!future.admits(0.2499));
    }

    #[test]
    fn test_nan_score_is_scoring_error() {
        let future = FeasibleFuture::new(1, 0.0, Arc::new(ExternalMetric::constant(f64::NAN))).unwrap();
        let err = future.contribution(&s(0, vec![0.0])).unwrap_err();
        assert!(matches!(err, FrontierError::Scoring(_)));
    }

    #[test]
    fn test_retract_last() {
        let mut future = FeasibleFuture::new(2, 0.0, Arc::new(NoveltyMetric)).unwrap();
        future.add(s(0, vec![0.0])).unwrap();
        future.add(s(1, vec![1.0])).unwrap();
        assert_eq!(future.retract_last().unwrap().id().index, 1);
        assert_eq!(future.len(), 1);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(FeasibleFuture::new(0, 0.0, Arc::new(NoveltyMetric)).is_err());
        assert!(FeasibleFuture::new(1, f64::INFINITY, Arc::new(NoveltyMetric)).is_err());
    }
}
