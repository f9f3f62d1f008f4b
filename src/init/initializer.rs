use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::fmt::Debug;

use crate::math::matrix::Matrix;

/// A source of initial values for weight and bias entries.
///
/// Each call is independent of the entry position, so the order in which
/// `seed` visits a matrix does not matter.
pub trait Initializer: Debug {
    fn generate(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Zeros;

impl Initializer for Zeros {
    fn generate(&mut self) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ones;

impl Initializer for Ones {
    fn generate(&mut self) -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Constant(pub f64);

impl Initializer for Constant {
    fn generate(&mut self) -> f64 {
        self.0
    }
}

/// Glorot (Xavier) normal: samples N(0, sqrt(2 / (fan_in + fan_out))).
#[derive(Debug, Clone)]
pub struct GlorotNormal {
    std_dev: f64,
    rng: StdRng,
}

impl GlorotNormal {
    pub fn new(fan_in: usize, fan_out: usize) -> GlorotNormal {
        GlorotNormal::from_rng(fan_in, fan_out, StdRng::from_entropy())
    }

    /// Reproducible variant for tests and seeded runs.
    pub fn with_seed(fan_in: usize, fan_out: usize, seed: u64) -> GlorotNormal {
        GlorotNormal::from_rng(fan_in, fan_out, StdRng::seed_from_u64(seed))
    }

    fn from_rng(fan_in: usize, fan_out: usize, rng: StdRng) -> GlorotNormal {
        let std_dev = (2.0 / (fan_in + fan_out) as f64).sqrt();
        GlorotNormal { std_dev, rng }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Initializer for GlorotNormal {
    fn generate(&mut self) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * self.std_dev
    }
}

/// He initialization: samples N(0, sqrt(2 / fan_in)).
///
/// Recommended before ReLU layers. The variance 2/fan_in accounts for
/// the fact that ReLU zeroes half of its inputs on average.
#[derive(Debug, Clone)]
pub struct HeNormal {
    std_dev: f64,
    rng: StdRng,
}

impl HeNormal {
    pub fn new(fan_in: usize) -> HeNormal {
        HeNormal { std_dev: (2.0 / fan_in as f64).sqrt(), rng: StdRng::from_entropy() }
    }

    pub fn with_seed(fan_in: usize, seed: u64) -> HeNormal {
        HeNormal { std_dev: (2.0 / fan_in as f64).sqrt(), rng: StdRng::seed_from_u64(seed) }
    }
}

impl Initializer for HeNormal {
    fn generate(&mut self) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * self.std_dev
    }
}

/// Overwrites every entry of `m` with a fresh `generate()` value.
pub fn seed(m: &mut Matrix, initializer: &mut dyn Initializer) {
    for row in m.data.iter_mut() {
        for x in row.iter_mut() {
            *x = initializer.generate();
        }
    }
}
