//! Jitter sources for the pattern-repeat strategy
//!
//! The projector never touches a global random generator. Callers hand it a
//! [`JitterSource`], so a seeded or fixed source makes projections
//! reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

/// Supplies relative perturbations for projected values
pub trait JitterSource {
    /// Next jitter in `[-amplitude, amplitude]`
    fn next_jitter(&mut self, amplitude: f64) -> f64;
}

/// Uniformly distributed jitter backed by a `StdRng`
#[derive(Debug, Clone)]
pub struct UniformJitter {
    rng: StdRng,
}

impl UniformJitter {
    /// Jitter seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible jitter: equal seeds yield equal sequences
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for UniformJitter {
    fn next_jitter(&mut self, amplitude: f64) -> f64 {
        let amplitude = amplitude.abs();
        if amplitude == 0.0 || !amplitude.is_finite() {
            return 0.0;
        }
        Uniform::new_inclusive(-amplitude, amplitude).sample(&mut self.rng)
    }
}

/// A constant jitter, clamped to the requested amplitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl FixedJitter {
    /// No perturbation at all
    pub fn zero() -> Self {
        FixedJitter(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn next_jitter(&mut self, amplitude: f64) -> f64 {
        let amplitude = amplitude.abs();
        self.0.clamp(-amplitude, amplitude)
    }
}
