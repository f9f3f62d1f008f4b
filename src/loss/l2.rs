use crate::error::MathError;
use crate::loss::{squared_error_rows, Loss};
use crate::math::matrix::Matrix;

/// Half squared error averaged over the output columns:
///   L(row) = sum_j (p_j - t_j)^2 / (2 * cols)
///
/// The gradient handed to the backward pass is the unscaled `p - t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Loss;

impl Loss for L2Loss {
    fn evaluate(&self, predicted: &Matrix, target: &Matrix) -> Result<Vec<f64>, MathError> {
        let denom = 2.0 * predicted.cols as f64;
        Ok(squared_error_rows("l2_loss", predicted, target)?
            .into_iter()
            .map(|s| s / denom)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_matches_hand_computation() {
        let x = Matrix::row_vector(vec![-4.0, 2.0, -3.0]);
        let y = Matrix::row_vector(vec![1.0, 1.0, 1.0]);
        assert_eq!(L2Loss.evaluate(&x, &y).unwrap(), vec![7.0]);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let x = Matrix::zeros(2, 3);
        let y = Matrix::zeros(2, 2);
        assert!(matches!(
            L2Loss.evaluate(&x, &y),
            Err(MathError::ShapeMismatch { op: "l2_loss", .. })
        ));
    }
}
