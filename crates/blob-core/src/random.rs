//! Injected-RNG helpers shared by the schedulers.
//!
//! Every random draw in the engine goes through a caller-owned `Rng`, so a
//! seeded `StdRng` reproduces a whole session.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one entry from a `(value, weight)` table.
///
/// Returns `None` when the table is empty or no weight is positive.
pub fn pick_weighted<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[(T, f32)]) -> Option<T> {
    table
        .choose_weighted(rng, |entry| entry.1.max(0.0))
        .ok()
        .map(|entry| entry.0)
}

/// Uniform draw in `[min, max)`; degenerate ranges return `min`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniform draw in `[center - jitter, center + jitter)`.
#[inline]
pub fn jittered<R: Rng + ?Sized>(rng: &mut R, center: f32, jitter: f32) -> f32 {
    uniform(rng, center - jitter.abs(), center + jitter.abs())
}

/// Bernoulli trial that tolerates out-of-range probabilities.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f32) -> bool {
    rng.gen::<f32>() < probability.clamp(0.0, 1.0)
}
