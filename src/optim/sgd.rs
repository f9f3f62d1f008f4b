use crate::error::MathError;
use crate::math::matrix::Matrix;

/// Plain gradient descent: `new = old - learning_rate * grad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Returns the stepped parameter; `param` itself is left untouched.
    pub fn step(&self, param: &Matrix, grad: &Matrix) -> Result<Matrix, MathError> {
        param.sub(&grad.scale(self.learning_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_against_the_gradient() {
        let w = Matrix::row_vector(vec![1.0, -1.0]);
        let g = Matrix::row_vector(vec![2.0, -4.0]);
        let stepped = Sgd::new(0.5).step(&w, &g).unwrap();
        assert_eq!(stepped.data, vec![vec![0.0, 1.0]]);
    }
}
