use crate::error::MathError;
use crate::loss::{squared_error_rows, Loss};
use crate::math::matrix::Matrix;

/// Per-row mean squared error: mean_j (p_j - t_j)^2
#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss;

impl Loss for MseLoss {
    fn evaluate(&self, predicted: &Matrix, target: &Matrix) -> Result<Vec<f64>, MathError> {
        let n = predicted.cols as f64;
        Ok(squared_error_rows("mse_loss", predicted, target)?
            .into_iter()
            .map(|s| s / n)
            .collect())
    }
}
