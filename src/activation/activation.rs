use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt::Debug;

use crate::math::matrix::Matrix;

/// An element-wise nonlinearity and its derivative.
///
/// Implementations must be pure scalar functions: the backward pass relies on
/// there being no coupling between entries of a matrix. Any type implementing
/// this trait can be installed in a `Layer`.
pub trait Activation: Debug {
    fn apply(&self, x: f64) -> f64;

    /// Derivative with respect to the pre-activation input `x`.
    fn derivative(&self, x: f64) -> f64;

    fn apply_matrix(&self, m: &Matrix) -> Matrix {
        m.map(|x| self.apply(x))
    }

    fn derivative_matrix(&self, m: &Matrix) -> Matrix {
        m.map(|x| self.derivative(x))
    }
}

/// Built-in activations, nameable from a `TrainConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    Tanh,
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// ReLU's derivative at exactly 0 is taken as 0.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }
}

impl Activation for ActivationFunction {
    fn apply(&self, x: f64) -> f64 {
        self.function(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        ActivationFunction::derivative(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives_and_keeps_positives() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(relu.apply(-3.5), 0.0);
        assert_eq!(relu.apply(0.0), 0.0);
        assert_eq!(relu.apply(2.25), 2.25);
    }

    #[test]
    fn relu_derivative_is_zero_at_boundary() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(Activation::derivative(&relu, 0.0), 0.0);
        assert_eq!(Activation::derivative(&relu, -1.0), 0.0);
        assert_eq!(Activation::derivative(&relu, 1e-9), 1.0);
    }

    #[test]
    fn sigmoid_derivative_peaks_at_origin() {
        let s = ActivationFunction::Sigmoid;
        assert!((s.apply(0.0) - 0.5).abs() < 1e-12);
        assert!((Activation::derivative(&s, 0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn matrix_application_is_positional() {
        let m = Matrix::from_rows(vec![vec![-1.0, 2.0], vec![3.0, -4.0]]).unwrap();
        let out = ActivationFunction::ReLU.apply_matrix(&m);
        assert_eq!(out.data, vec![vec![0.0, 2.0], vec![3.0, 0.0]]);
    }
}
