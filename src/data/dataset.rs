use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::data::normalization::{standardize, Normalization};
use crate::error::DatasetError;
use crate::math::matrix::Matrix;

/// One contiguous slice of the normalized dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub x: Matrix,
    pub y: Matrix,
    pub size: usize,
}

/// Raw examples plus the normalized batches carved from them.
///
/// Deserializes from `{"input": [[..]], "output": [[..]]}`. Nothing is usable
/// until `setup` has run; calling `setup` twice is unsupported.
///
/// Iteration is a cursor over the batches: `get_batch` until `completed()`,
/// then `reset()` at the epoch boundary. The caller owns that loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub input: Vec<Vec<f64>>,
    pub output: Vec<Vec<f64>>,
    #[serde(skip)]
    batches: Vec<Batch>,
    #[serde(skip)]
    batch_size: usize,
    #[serde(skip)]
    current_location: usize,
    #[serde(skip)]
    input_count: usize,
    #[serde(skip)]
    output_count: usize,
    #[serde(skip)]
    normalization: Option<Normalization>,
}

impl Dataset {
    pub fn new(input: Vec<Vec<f64>>, output: Vec<Vec<f64>>) -> Dataset {
        Dataset { input, output, ..Dataset::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Dataset, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &str) -> Result<Dataset, DatasetError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validates the raw tables, standardizes both column-wise and splits them
    /// into batches of `batch_size` rows (the last batch may be shorter).
    ///
    /// Returns the statistics used so predictions can be mapped back later.
    pub fn setup(&mut self, batch_size: usize) -> Result<Normalization, DatasetError> {
        if batch_size == 0 {
            return Err(DatasetError::ZeroBatchSize);
        }

        let (in_len, out_len) = (self.input.len(), self.output.len());
        if in_len != out_len {
            return Err(DatasetError::LengthMismatch { input: in_len, output: out_len });
        }
        if in_len == 0 {
            return Err(DatasetError::Empty);
        }

        let input_count = check_width("input", &self.input)?;
        let output_count = check_width("output", &self.output)?;
        if in_len < 2 {
            return Err(DatasetError::TooFewExamples(in_len));
        }

        let raw_x = Matrix::from_rows(self.input.clone())?;
        let raw_y = Matrix::from_rows(self.output.clone())?;

        let input_mean = raw_x.column_mean();
        let input_std_dev = raw_x.column_std_dev(&input_mean)?;
        let output_mean = raw_y.column_mean();
        let output_std_dev = raw_y.column_std_dev(&output_mean)?;

        warn_constant_columns("input", &input_std_dev);
        warn_constant_columns("output", &output_std_dev);

        let x = standardize(&raw_x, &input_mean, &input_std_dev)?;
        let y = standardize(&raw_y, &output_mean, &output_std_dev)?;

        self.batches = (0..in_len)
            .step_by(batch_size)
            .map(|start| {
                let end = (start + batch_size).min(in_len);
                Batch {
                    x: slice_rows(&x, start, end),
                    y: slice_rows(&y, start, end),
                    size: end - start,
                }
            })
            .collect();

        self.batch_size = batch_size;
        self.input_count = input_count;
        self.output_count = output_count;
        self.current_location = 0;

        let normalization = Normalization { input_mean, input_std_dev, output_mean, output_std_dev };
        self.normalization = Some(normalization.clone());

        info!(
            examples = in_len,
            input_count,
            output_count,
            batch_size,
            batches = self.batches.len(),
            "dataset ready"
        );

        Ok(normalization)
    }

    /// Copies out the next batch and advances the cursor.
    pub fn get_batch(&mut self) -> Result<(Matrix, Matrix), DatasetError> {
        if !self.is_ready() {
            return Err(DatasetError::NotReady);
        }
        let batch = self.batches
            .get(self.current_location)
            .ok_or(DatasetError::Exhausted(self.batches.len()))?;

        let pair = (batch.x.clone(), batch.y.clone());
        self.current_location += 1;
        Ok(pair)
    }

    pub fn completed(&self) -> bool {
        self.current_location >= self.batches.len()
    }

    /// Rewinds to the first batch. Call once per epoch boundary.
    pub fn reset(&mut self) {
        self.current_location = 0;
    }

    pub fn is_ready(&self) -> bool {
        self.normalization.is_some()
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn normalization(&self) -> Option<&Normalization> {
        self.normalization.as_ref()
    }
}

/// Width of the first row; every other row must match it.
fn check_width(table: &'static str, rows: &[Vec<f64>]) -> Result<usize, DatasetError> {
    let expected = rows.first().map(Vec::len).unwrap_or(0);
    if expected == 0 {
        return Err(DatasetError::Empty);
    }
    match rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        Some((row, r)) => Err(DatasetError::RaggedRow { table, row, expected, found: r.len() }),
        None => Ok(expected),
    }
}

fn warn_constant_columns(table: &str, std_dev: &[f64]) {
    for (column, _) in std_dev.iter().enumerate().filter(|(_, s)| **s == 0.0) {
        warn!(table, column, "constant column; centred but not scaled");
    }
}

fn slice_rows(m: &Matrix, start: usize, end: usize) -> Matrix {
    Matrix {
        rows: end - start,
        cols: m.cols,
        data: m.data[start..end].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Dataset {
        Dataset::new(
            vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]],
            vec![vec![0.5], vec![1.5], vec![2.5]],
        )
    }

    #[test]
    fn get_batch_before_setup_is_not_ready() {
        let mut d = tiny();
        assert!(matches!(d.get_batch(), Err(DatasetError::NotReady)));
    }

    #[test]
    fn get_batch_after_last_batch_is_exhausted() {
        let mut d = tiny();
        d.setup(2).unwrap();
        d.get_batch().unwrap();
        d.get_batch().unwrap();
        assert!(d.completed());
        assert!(matches!(d.get_batch(), Err(DatasetError::Exhausted(2))));
    }

    #[test]
    fn ragged_rows_are_reported_with_their_table() {
        let mut d = Dataset::new(
            vec![vec![1.0, 2.0], vec![3.0]],
            vec![vec![1.0], vec![2.0]],
        );
        assert!(matches!(
            d.setup(1),
            Err(DatasetError::RaggedRow { table: "input", row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(matches!(tiny().setup(0), Err(DatasetError::ZeroBatchSize)));
    }

    #[test]
    fn single_example_cannot_be_normalized() {
        let mut d = Dataset::new(vec![vec![1.0]], vec![vec![2.0]]);
        assert!(matches!(d.setup(1), Err(DatasetError::TooFewExamples(1))));
    }
}
