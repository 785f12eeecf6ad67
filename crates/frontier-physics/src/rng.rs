// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Seedable Noise Source
// ─────────────────────────────────────────────────────────────────────

/// Minimal xorshift64 RNG for transition noise (no external dep).
///
/// Every stage owns one; passing it explicitly into synthesis keeps a
/// seeded run reproducible.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF_CAFE_BABE } else { seed },
        }
    }

    /// Seed from the system clock (non-reproducible).
    pub fn from_time() -> Self {
        use std::time::SystemTime;
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::new(seed)
    }

    /// Independent stream for one stage, derived from a base seed.
    ///
    /// The timeslot is mixed through splitmix64 so neighbouring
    /// stages do not share correlated prefixes.
    pub fn for_stage(base_seed: u64, timeslot: u32) -> Self {
        let mut z = base_seed ^ (u64::from(timeslot)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximate standard normal via Box-Muller.
    pub fn next_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-300);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}
