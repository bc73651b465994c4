//! Injectable random perturbation sources.
//!
//! Every noise term in the physics goes through [`NoiseSource::uniform`], so
//! tests can swap the random generator for a silent or fixed-offset source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of bounded uniform perturbations.
pub trait NoiseSource {
    /// Draw a value in `[-amplitude, amplitude]`.
    ///
    /// Negative amplitudes are treated as their magnitude; a zero amplitude
    /// always yields zero.
    fn uniform(&mut self, amplitude: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn uniform(&mut self, amplitude: f64) -> f64 {
        (**self).uniform(amplitude)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn uniform(&mut self, amplitude: f64) -> f64 {
        (**self).uniform(amplitude)
    }
}

/// ChaCha8-backed uniform noise, seeded or drawn from entropy.
#[derive(Debug, Clone)]
pub struct RandomNoise {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl RandomNoise {
    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Non-reproducible stream seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Use `seed` when given, otherwise entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RandomNoise {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl NoiseSource for RandomNoise {
    fn uniform(&mut self, amplitude: f64) -> f64 {
        let a = amplitude.abs();
        if a == 0.0 || !a.is_finite() {
            return 0.0;
        }
        self.rng.gen_range(-1.0..=1.0) * a
    }
}

/// Noise source that never perturbs anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNoise;

impl NoiseSource for SilentNoise {
    fn uniform(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}

/// Always returns the same offset, clamped to the requested amplitude.
///
/// `FixedNoise(f64::INFINITY)` pins every draw to the upper bound.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, amplitude: f64) -> f64 {
        let a = amplitude.abs();
        if a == 0.0 || self.0.is_nan() {
            return 0.0;
        }
        self.0.clamp(-a, a)
    }
}
