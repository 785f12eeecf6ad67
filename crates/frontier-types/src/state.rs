// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel State Snapshot
// ─────────────────────────────────────────────────────────────────────
//! Immutable snapshot of the network configuration at one time slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provenance identifier: which time slot produced a state and its
/// admission order within that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId {
    pub timeslot: u32,
    pub index: u64,
}

impl StateId {
    pub const fn new(timeslot: u32, index: u64) -> Self {
        Self { timeslot, index }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}#{}", self.timeslot, self.index)
    }
}

/// One reachable configuration.
///
/// Fields are private; a state cannot be changed once built. The
/// `parent` link is provenance only and is never followed by the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    payload: Vec<f64>,
    parent: Option<StateId>,
}

impl State {
    pub fn new(id: StateId, payload: Vec<f64>, parent: Option<StateId>) -> Self {
        Self {
            id,
            payload,
            parent,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn timeslot(&self) -> u32 {
        self.id.timeslot
    }

    pub fn payload(&self) -> &[f64] {
        &self.payload
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn dimension(&self) -> usize {
        self.payload.len()
    }

    /// True when every payload value is finite.
    pub fn is_finite(&self) -> bool {
        self.payload.iter().all(|v| v.is_finite())
    }

    /// Root-mean-square distance between two payloads.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn rms_distance(&self, other: &State) -> Option<f64> {
        if self.payload.len() != other.payload.len() {
            log::warn!(
                "rms_distance: dimension mismatch {} vs {} ({} / {})",
                self.payload.len(),
                other.payload.len(),
                self.id,
                other.id
            );
            return None;
        }
        if self.payload.is_empty() {
            return Some(0.0);
        }
        let sum_sq: f64 = self
            .payload
            .iter()
            .zip(&other.payload)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Some((sum_sq / self.payload.len() as f64).sqrt())
    }
}
