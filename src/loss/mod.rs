pub mod l2;
pub mod mse;
pub mod loss_type;

use std::fmt::Debug;

use crate::error::MathError;
use crate::math::matrix::Matrix;

pub use l2::L2Loss;
pub use mse::MseLoss;
pub use loss_type::LossType;

/// Reduces a batch of predictions against targets to one value per example.
///
/// Implementations must not mutate either argument.
pub trait Loss: Debug {
    /// Per-row loss; the result has one entry per batch row.
    fn evaluate(&self, predicted: &Matrix, target: &Matrix) -> Result<Vec<f64>, MathError>;

    /// Error term fed into the output layer of the backward pass.
    fn gradient(&self, predicted: &Matrix, target: &Matrix) -> Result<Matrix, MathError> {
        predicted.sub(target)
    }

    /// Mean of `evaluate` over the batch; 0 for an empty batch.
    fn mean(&self, predicted: &Matrix, target: &Matrix) -> Result<f64, MathError> {
        let per_row = self.evaluate(predicted, target)?;
        if per_row.is_empty() {
            return Ok(0.0);
        }
        Ok(per_row.iter().sum::<f64>() / per_row.len() as f64)
    }
}

/// Row-wise sum of squared differences, shape-checked.
pub(crate) fn squared_error_rows(
    op: &'static str,
    predicted: &Matrix,
    target: &Matrix,
) -> Result<Vec<f64>, MathError> {
    if predicted.shape() != target.shape() {
        return Err(MathError::ShapeMismatch { op, lhs: predicted.shape(), rhs: target.shape() });
    }
    Ok(predicted.data.iter().zip(&target.data)
        .map(|(p, t)| p.iter().zip(t).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
        .collect())
}
