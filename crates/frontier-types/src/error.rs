// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Frontier Kernel failures.
///
/// Only `InvalidConfig` and `Stage` are fatal. Every other variant is
/// raised for a single candidate and absorbed by the sampling loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontierError {
    /// Malformed configuration or parameter set; the stage never starts.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The feasible future already holds `capacity` states.
    #[error("feasible future full: capacity {capacity} reached")]
    CapacityExceeded { capacity: usize },

    /// Successor synthesis failed for one candidate.
    #[error("synthesis failure: {0}")]
    Synthesis(String),

    /// Contribution metric failed for one candidate.
    #[error("scoring failure: {0}")]
    Scoring(String),

    /// Numerical error (NaN/Inf in a payload or score).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// A stage thread could not be spawned or terminated abnormally.
    #[error("stage error: {0}")]
    Stage(String),
}

impl FrontierError {
    /// True for errors scoped to a single candidate.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::Synthesis(_)
                | Self::Scoring(_)
                | Self::Numerical(_)
        )
    }
}

pub type FrontierResult<T> = Result<T, FrontierError>;
