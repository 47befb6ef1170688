//! Randomness for spin magnitudes and choice order.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniform numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

/// Default source: a small fast generator seeded from OS / browser entropy with
/// the `rng` feature, or from the clock when the feature is off or entropy fails.
pub struct SystemRandom {
    rng: SmallRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self { rng: entropy_seeded() }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

#[cfg(feature = "rng")]
fn entropy_seeded() -> SmallRng {
    SmallRng::from_rng(rand::rngs::OsRng).unwrap_or_else(|err| {
        log::debug!("no entropy source ({}), seeding from the clock", err);
        SmallRng::seed_from_u64(clock_ms().to_bits())
    })
}

#[cfg(not(feature = "rng"))]
fn entropy_seeded() -> SmallRng {
    SmallRng::seed_from_u64(clock_ms().to_bits())
}

/// Replays a fixed list of values, cycling when exhausted. Handy for tests and
/// deterministic demos.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_ms() -> f64 {
    crate::performance_now()
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
