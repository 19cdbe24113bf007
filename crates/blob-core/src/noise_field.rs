//! Deterministic 3D value noise used to make the body surface wobble.

use ::noise::{NoiseFn, Value};

/// Seeded 3D value-noise sampler.
///
/// The permutation table is built once in [`NoiseField::new`]; sampling
/// never mutates it, so identical seeds and inputs give identical outputs.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u32,
    source: Value,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            source: Value::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field. Output is clamped to `[-1, 1]`; non-finite inputs
    /// sample as 0.
    #[inline]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return 0.0;
        }
        let v = self.source.get([x as f64, y as f64, z as f64]) as f32;
        if v.is_finite() {
            v.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(crate::constants::NOISE_SEED)
    }
}
