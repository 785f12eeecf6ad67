// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Stochastic Successor Synthesis
// ─────────────────────────────────────────────────────────────────────
//! Euler-Maruyama transition for the feeder voltage dynamics:
//!
//!   dV_n = [ Σ_m Y_nm (V_m - V_n) + g (V_nom,n - V_n) - L_n(t) ] dt + σ √dt ξ_n
//!
//! A successor outside the feasible band [v_min, v_max] is rejected
//! rather than clamped: it is not a reachable configuration.

use frontier_types::{FrontierError, FrontierResult, State, StateId};

use crate::params::ProblemParameters;
use crate::rng::SimpleRng;

/// Produces the payload of one random successor of `parent`.
///
/// Implementations may be randomized but must draw all randomness
/// from `rng`, so a seeded stage replays identically.
pub trait Synthesizer: Send + Sync {
    fn synthesize(
        &self,
        parent: &State,
        params: &ProblemParameters,
        timeslot: u32,
        rng: &mut SimpleRng,
    ) -> FrontierResult<Vec<f64>>;
}

/// Feeder voltage transition (see module docs).
#[derive(Debug, Clone, Copy, Default)]
pub struct VoltageSynthesizer;

impl Synthesizer for VoltageSynthesizer {
    fn synthesize(
        &self,
        parent: &State,
        params: &ProblemParameters,
        timeslot: u32,
        rng: &mut SimpleRng,
    ) -> FrontierResult<Vec<f64>> {
        let n = params.dimension();
        let v = parent.payload();
        if v.len() != n {
            return Err(FrontierError::Synthesis(format!(
                "parent {} has dimension {}, expected {n}",
                parent.id(),
                v.len()
            )));
        }
        if !parent.is_finite() {
            return Err(FrontierError::Numerical(format!(
                "parent {} contains NaN or Inf",
                parent.id()
            )));
        }

        let dt = params.dt;
        let sqrt_dt = dt.sqrt();
        let mut next = Vec::with_capacity(n);

        for i in 0..n {
            let mut coupling = 0.0;
            for (j, &vj) in v.iter().enumerate() {
                coupling += params.coupling(i, j) * (vj - v[i]);
            }
            let restoring = params.restoring_gain * (params.nominal_voltage[i] - v[i]);
            let drift = coupling + restoring - params.load_at(timeslot, i);
            let noise = params.noise_amplitude * sqrt_dt * rng.next_normal();

            let vi = v[i] + drift * dt + noise;
            if !vi.is_finite() {
                return Err(FrontierError::Numerical(format!(
                    "node {i} voltage diverged at timeslot {timeslot}"
                )));
            }
            if !params.is_feasible(vi) {
                return Err(FrontierError::Synthesis(format!(
                    "node {i} voltage {vi:.4} outside [{}, {}]",
                    params.v_min, params.v_max
                )));
            }
            next.push(vi);
        }

        Ok(next)
    }
}

/// Synthesis function supplied by the embedding application.
type SynthesizeFn = Box<
    dyn Fn(&State, &ProblemParameters, u32, &mut SimpleRng) -> FrontierResult<Vec<f64>>
        + Send
        + Sync,
>;

/// Synthesizer that delegates to a closure.
pub struct ExternalSynthesizer {
    synthesize_fn: SynthesizeFn,
}

impl ExternalSynthesizer {
    pub fn new(
        synthesize_fn: impl Fn(&State, &ProblemParameters, u32, &mut SimpleRng) -> FrontierResult<Vec<f64>>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            synthesize_fn: Box::new(synthesize_fn),
        }
    }
}

impl Synthesizer for ExternalSynthesizer {
    fn synthesize(
        &self,
        parent: &State,
        params: &ProblemParameters,
        timeslot: u32,
        rng: &mut SimpleRng,
    ) -> FrontierResult<Vec<f64>> {
        (self.synthesize_fn)(parent, params, timeslot, rng)
    }
}

/// Build a successor state of `parent` for `timeslot`.
///
/// The synthesized payload must match the problem dimension.
pub fn successor(
    parent: &State,
    params: &ProblemParameters,
    timeslot: u32,
    synthesizer: &dyn Synthesizer,
    rng: &mut SimpleRng,
    id: StateId,
) -> FrontierResult<State> {
    let payload = synthesizer.synthesize(parent, params, timeslot, rng)?;
    if payload.len() != params.dimension() {
        return Err(FrontierError::Synthesis(format!(
            "synthesized payload has dimension {}, expected {}",
            payload.len(),
            params.dimension()
        )));
    }
    Ok(State::new(id, payload, Some(parent.id())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_step_feasible() {
        let params = ProblemParameters::radial_feeder(8);
        let parent = params.initial_state();
        let mut rng = SimpleRng::new(1);
        let next = VoltageSynthesizer
            .synthesize(&parent, &params, 1, &mut rng)
            .unwrap();
        assert_eq!(next.len(), 8);
        assert!(next.iter().all(|&v| params.is_feasible(v)));
    }

    #[test]
    fn test_seeded_synthesis_reproducible() {
        let params = ProblemParameters::radial_feeder(8);
        let parent = params.initial_state();
        let a = VoltageSynthesizer
            .synthesize(&parent, &params, 4, &mut SimpleRng::new(9))
            .unwrap();
        let b = VoltageSynthesizer
            .synthesize(&parent, &params, 4, &mut SimpleRng::new(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_free_load_sags_voltage() {
        let mut params = ProblemParameters::radial_feeder(6);
        params.noise_amplitude = 0.0;
        let parent = params.initial_state();
        let next = VoltageSynthesizer
            .synthesize(&parent, &params, 19, &mut SimpleRng::new(1))
            .unwrap();
        // Flat start: coupling and restoring terms vanish, only load acts.
        assert!(next.iter().all(|&v| v < 1.0));
        assert!(next[5] < next[0], "far end should sag most");
    }

    #[test]
    fn test_out_of_band_rejected() {
        let mut params = ProblemParameters::radial_feeder(4);
        params.noise_amplitude = 0.0;
        params.load = vec![10.0; 4];
        let parent = params.initial_state();
        let err = VoltageSynthesizer
            .synthesize(&parent, &params, 0, &mut SimpleRng::new(1))
            .unwrap_err();
        assert!(matches!(err, FrontierError::Synthesis(_)));
    }

    #[test]
    fn test_parent_dimension_mismatch_rejected() {
        let params = ProblemParameters::radial_feeder(4);
        let parent = State::new(StateId::new(0, 0), vec![1.0; 3], None);
        assert!(VoltageSynthesizer
            .synthesize(&parent, &params, 1, &mut SimpleRng::new(1))
            .is_err());
    }

    #[test]
    fn test_nan_parent_rejected() {
        let params = ProblemParameters::radial_feeder(2);
        let parent = State::new(StateId::new(0, 0), vec![f64::NAN, 1.0], None);
        let err = VoltageSynthesizer
            .synthesize(&parent, &params, 1, &mut SimpleRng::new(1))
            .unwrap_err();
        assert!(matches!(err, FrontierError::Numerical(_)));
    }

    #[test]
    fn test_successor_links_parent() {
        let params = ProblemParameters::radial_feeder(3);
        let parent = params.initial_state();
        let child = successor(
            &parent,
            &params,
            1,
            &VoltageSynthesizer,
            &mut SimpleRng::new(3),
            StateId::new(1, 0),
        )
        .unwrap();
        assert_eq!(child.parent(), Some(parent.id()));
        assert_eq!(child.timeslot(), 1);
    }

    #[test]
    fn test_successor_rejects_wrong_length_payload() {
        let params = ProblemParameters::radial_feeder(3);
        let parent = params.initial_state();
        let synth = ExternalSynthesizer::new(|_, _, _, _| Ok(vec![1.0]));
        let err = successor(
            &parent,
            &params,
            1,
            &synth,
            &mut SimpleRng::new(3),
            StateId::new(1, 0),
        )
        .unwrap_err();
        assert!(matches!(err, FrontierError::Synthesis(_)));
    }
}
