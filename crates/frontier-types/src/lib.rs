// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frontier Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! State snapshots, configuration, and error hierarchy for the
//! Frontier Kernel — the generation-by-generation explorer of
//! reachable network configurations.

pub mod config;
pub mod error;
pub mod state;

pub use config::FrontierConfig;
pub use error::{FrontierError, FrontierResult};
pub use state::{State, StateId};
