// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{FrontierError, FrontierResult};

/// Per-stage configuration surface for the generation pipeline.
///
/// Every stage of one run shares the same values; the orchestrator
/// validates them once before any stage is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Slots per ring. One slot is reserved, so a ring holds at most
    /// `ring_capacity - 1` states.
    /// Default: 64.
    pub ring_capacity: usize,

    /// Length of every state payload (one value per network node).
    /// Default: 8.
    pub state_dimension: usize,

    /// Maximum synthesis attempts per parent state.
    /// Default: 16.
    pub sample_size: usize,

    /// A candidate is admitted only if its contribution is >= this.
    /// Default: 0.01.
    pub minimal_contribution: f64,

    /// Bound on the accepted set of each stage's feasible future.
    /// Default: 256.
    pub future_capacity: usize,

    /// Number of stages (time slots after the seed generation).
    /// Default: 24.
    pub timeslots: u32,

    /// Base RNG seed. `None` seeds every stage from the clock.
    pub seed: Option<u64>,

    /// Sleep between polls of an empty upstream ring, in microseconds.
    /// 0 yields the thread instead of sleeping.
    /// Default: 50.
    pub idle_backoff_us: u64,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 64,
            state_dimension: 8,
            sample_size: 16,
            minimal_contribution: 0.01,
            future_capacity: 256,
            timeslots: 24,
            seed: None,
            idle_backoff_us: 50,
        }
    }
}

impl FrontierConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> FrontierResult<()> {
        if self.ring_capacity < 2 {
            return Err(FrontierError::InvalidConfig(format!(
                "ring_capacity must be >= 2, got {}",
                self.ring_capacity
            )));
        }
        if self.state_dimension < 1 {
            return Err(FrontierError::InvalidConfig(
                "state_dimension must be >= 1".to_string(),
            ));
        }
        if self.sample_size < 1 {
            return Err(FrontierError::InvalidConfig(
                "sample_size must be >= 1".to_string(),
            ));
        }
        if !self.minimal_contribution.is_finite() {
            return Err(FrontierError::InvalidConfig(format!(
                "minimal_contribution must be finite, got {}",
                self.minimal_contribution
            )));
        }
        if self.future_capacity < 1 {
            return Err(FrontierError::InvalidConfig(
                "future_capacity must be >= 1".to_string(),
            ));
        }
        if self.timeslots < 1 {
            return Err(FrontierError::InvalidConfig(
                "timeslots must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Usable slots per ring.
    pub fn usable_ring_capacity(&self) -> usize {
        self.ring_capacity.saturating_sub(1)
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> FrontierResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FrontierError::InvalidConfig(format!("JSON parse error: {e}")))
    }
}
