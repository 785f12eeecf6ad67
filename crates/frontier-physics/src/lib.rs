// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Network Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Feeder voltage physics: problem parameters, the seedable noise
//! source, and stochastic successor synthesis between time slots.

pub mod params;
pub mod rng;
pub mod transition;

pub use params::{ProblemParameters, DAILY_LOAD_PROFILE, PROFILE_SLOTS};
pub use rng::SimpleRng;
pub use transition::{successor, ExternalSynthesizer, Synthesizer, VoltageSynthesizer};
