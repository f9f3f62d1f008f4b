use serde::{Serialize, Deserialize};

use crate::error::MathError;
use crate::math::matrix::Matrix;

/// Column statistics used to standardize a dataset.
///
/// Returned by `Dataset::setup` so callers can map predictions back to the
/// original units. A column whose standard deviation is 0 is only centred,
/// never scaled; the stored value stays 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub input_mean: Vec<f64>,
    pub input_std_dev: Vec<f64>,
    pub output_mean: Vec<f64>,
    pub output_std_dev: Vec<f64>,
}

impl Normalization {
    /// Standardizes raw inputs with the statistics captured at setup.
    pub fn normalize_input(&self, raw: &Matrix) -> Result<Matrix, MathError> {
        standardize(raw, &self.input_mean, &self.input_std_dev)
    }

    /// Maps normalized network outputs back to the original output units.
    pub fn denormalize_output(&self, normalized: &Matrix) -> Result<Matrix, MathError> {
        if self.output_mean.len() != normalized.cols {
            return Err(MathError::ShapeMismatch {
                op: "denormalize_output",
                lhs: normalized.shape(),
                rhs: (1, self.output_mean.len()),
            });
        }
        let scale = divisors(&self.output_std_dev);
        Ok(Matrix {
            rows: normalized.rows,
            cols: normalized.cols,
            data: normalized.data.iter()
                .map(|row| {
                    row.iter().zip(&scale).zip(&self.output_mean)
                        .map(|((z, s), m)| z * s + m)
                        .collect()
                })
                .collect(),
        })
    }

    /// Serializes the statistics to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes statistics previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Normalization> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

/// Mean subtraction followed by division by the non-zero standard deviation.
pub(crate) fn standardize(m: &Matrix, mean: &[f64], std_dev: &[f64]) -> Result<Matrix, MathError> {
    m.subtract_row_vector(mean)?.divide_row_vector(&divisors(std_dev))
}

fn divisors(std_dev: &[f64]) -> Vec<f64> {
    std_dev.iter().map(|&s| if s > 0.0 { s } else { 1.0 }).collect()
}
