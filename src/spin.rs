//! Spin resolution: which wheel segment ends up under the pointer.
//!
//! The wheel texture starts at angle 0 = "3 o'clock" and the presentation layer
//! rotates it clockwise by the accumulated rotation. The pointer is fixed at
//! "12 o'clock", i.e. 270° in canvas convention (y grows downwards).

use crate::catalog;
use crate::random::RandomSource;

const POINTER_DEG: f64 = 270.0;

/// Wheel-local angle (degrees, `[0, 360)`) sitting under the pointer.
pub fn pointer_angle(rotation_deg: f64) -> f64 {
    let final_rotation = rotation_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let angle = (360.0 - final_rotation + POINTER_DEG).rem_euclid(360.0);
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Segment index under the pointer for a total accumulated rotation.
///
/// Exact boundaries resolve with `floor`, so an angle of exactly `k * span` lands
/// on segment `k`. The result is always in `[0, segments)` and is reduced modulo
/// the catalog size so it can index word pairs directly.
pub fn resolve_segment(rotation_deg: f64, segments: usize) -> usize {
    let segments = segments.max(1);
    let span = 360.0 / segments as f64;
    let idx = (pointer_angle(rotation_deg) / span).floor() as usize;
    (idx % segments) % catalog::len()
}

/// Random spin magnitude: `uniform[0, 360) + min_full_turns * 360`.
pub fn spin_magnitude<R: RandomSource + ?Sized>(rng: &mut R, min_full_turns: u32) -> f64 {
    rng.next_unit() * 360.0 + 360.0 * min_full_turns as f64
}
