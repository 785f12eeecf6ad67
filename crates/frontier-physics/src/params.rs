// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Voltage Network Parameters
// ─────────────────────────────────────────────────────────────────────
//! Problem parameters for a radial distribution feeder: per-node
//! nominal voltages, the node coupling (admittance) matrix, nodal
//! loads and the daily load profile that scales them per time slot.
//!
//! All voltages are per-unit.

use serde::{Deserialize, Serialize};

use frontier_types::{FrontierError, FrontierResult, State, StateId};

/// Number of slots in the canonical daily load profile.
pub const PROFILE_SLOTS: usize = 24;

/// Canonical hourly load multipliers (night trough, evening peak).
pub const DAILY_LOAD_PROFILE: [f64; PROFILE_SLOTS] = [
    0.62, 0.58, 0.55, 0.54, 0.55, 0.60, // 00–05
    0.72, 0.86, 0.95, 0.98, 1.00, 1.01, // 06–11
    1.00, 0.98, 0.97, 0.98, 1.03, 1.12, // 12–17
    1.20, 1.22, 1.15, 1.02, 0.86, 0.71, // 18–23
];

const Y_BASE: f64 = 0.8;
const DECAY_ALPHA: f64 = 0.9;
const ADJACENT_BOOST: f64 = 1.5;

/// Full parameter set consumed at stage construction and at every
/// successor synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemParameters {
    /// Number of network nodes (= state vector dimension).
    pub nodes: usize,
    /// Nominal voltage per node (p.u.).
    pub nominal_voltage: Vec<f64>,
    /// Coupling matrix Y, nodes×nodes row-major, symmetric, zero diagonal.
    pub admittance: Vec<f64>,
    /// Base load drawn at each node (p.u. per unit time).
    pub load: Vec<f64>,
    /// Load multipliers indexed by `timeslot % len`.
    pub load_profile: Vec<f64>,
    /// Voltage regulation gain pulling each node back to nominal.
    pub restoring_gain: f64,
    /// Noise amplitude σ of the stochastic transition.
    pub noise_amplitude: f64,
    /// Integration step per time slot.
    pub dt: f64,
    /// Lower feasibility bound (p.u.).
    pub v_min: f64,
    /// Upper feasibility bound (p.u.).
    pub v_max: f64,
}

impl ProblemParameters {
    /// Canonical radial feeder with `n` nodes.
    ///
    /// Construction:
    ///   1. Exponential decay baseline: Y_nm = Y_base * exp(-α * |n-m|)
    ///   2. Boost adjacent (line-connected) pairs
    ///   3. Symmetrise and zero diagonal
    ///
    /// Load grows linearly along the feeder, so the far end sags most.
    pub fn radial_feeder(n: usize) -> Self {
        let mut y = vec![0.0f64; n * n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let dist = i.abs_diff(j);
                    let mut v = Y_BASE * (-DECAY_ALPHA * dist as f64).exp();
                    if dist == 1 {
                        v *= ADJACENT_BOOST;
                    }
                    y[i * n + j] = v;
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let avg = 0.5 * (y[i * n + j] + y[j * n + i]);
                y[i * n + j] = avg;
                y[j * n + i] = avg;
            }
            y[i * n + i] = 0.0;
        }

        let load = (0..n)
            .map(|i| 0.01 + 0.02 * (i as f64 + 1.0) / n.max(1) as f64)
            .collect();

        Self {
            nodes: n,
            nominal_voltage: vec![1.0; n],
            admittance: y,
            load,
            load_profile: DAILY_LOAD_PROFILE.to_vec(),
            restoring_gain: 0.5,
            noise_amplitude: 0.02,
            dt: 0.25,
            v_min: 0.9,
            v_max: 1.1,
        }
    }

    /// State vector dimension.
    pub fn dimension(&self) -> usize {
        self.nodes
    }

    /// Coupling between nodes `i` and `j`.
    #[inline]
    pub fn coupling(&self, i: usize, j: usize) -> f64 {
        self.admittance[i * self.nodes + j]
    }

    /// Effective load at `node` during `timeslot`.
    pub fn load_at(&self, timeslot: u32, node: usize) -> f64 {
        let factor = if self.load_profile.is_empty() {
            1.0
        } else {
            self.load_profile[timeslot as usize % self.load_profile.len()]
        };
        self.load[node] * factor
    }

    /// Starting payload: every node at nominal voltage.
    pub fn initial_payload(&self) -> Vec<f64> {
        self.nominal_voltage.clone()
    }

    /// The seed state of time slot 0.
    pub fn initial_state(&self) -> State {
        State::new(StateId::new(0, 0), self.initial_payload(), None)
    }

    /// True when `v` lies inside the feasible voltage band.
    #[inline]
    pub fn is_feasible(&self, v: f64) -> bool {
        v >= self.v_min && v <= self.v_max
    }

    /// Validate parameter consistency.
    pub fn validate(&self) -> FrontierResult<()> {
        let n = self.nodes;
        if n < 1 {
            return Err(FrontierError::InvalidConfig(
                "nodes must be >= 1".to_string(),
            ));
        }
        if self.nominal_voltage.len() != n {
            return Err(FrontierError::InvalidConfig(format!(
                "nominal_voltage has {} entries, expected {n}",
                self.nominal_voltage.len()
            )));
        }
        if self.admittance.len() != n * n {
            return Err(FrontierError::InvalidConfig(format!(
                "admittance has {} entries, expected {}",
                self.admittance.len(),
                n * n
            )));
        }
        if self.load.len() != n {
            return Err(FrontierError::InvalidConfig(format!(
                "load has {} entries, expected {n}",
                self.load.len()
            )));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(FrontierError::InvalidConfig(format!(
                "dt must be > 0, got {}",
                self.dt
            )));
        }
        if self.noise_amplitude < 0.0 {
            return Err(FrontierError::InvalidConfig(format!(
                "noise_amplitude must be >= 0, got {}",
                self.noise_amplitude
            )));
        }
        if self.v_min >= self.v_max {
            return Err(FrontierError::InvalidConfig(format!(
                "v_min ({}) must be < v_max ({})",
                self.v_min, self.v_max
            )));
        }
        if let Some(&v) = self
            .nominal_voltage
            .iter()
            .find(|&&v| !self.is_feasible(v))
        {
            return Err(FrontierError::InvalidConfig(format!(
                "nominal voltage {v} outside [{}, {}]",
                self.v_min, self.v_max
            )));
        }
        let all_finite = self
            .admittance
            .iter()
            .chain(&self.load)
            .chain(&self.load_profile)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FrontierError::InvalidConfig(
                "parameters contain NaN or Inf".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> FrontierResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FrontierError::InvalidConfig(format!("JSON parse error: {e}")))
    }
}
