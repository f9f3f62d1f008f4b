use serde::{Serialize, Deserialize};

use crate::error::MathError;

/// Dense row-major matrix of `f64`.
///
/// Treated as immutable: every operation returns a new matrix. Binary
/// operations check operand shapes before touching any entry and report
/// `MathError::ShapeMismatch` instead of panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from row vectors. All rows must share the first row's width.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix, MathError> {
        let cols = match data.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(MathError::Empty),
        };

        if let Some((row, found)) = data.iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != cols)
        {
            return Err(MathError::RaggedRows { row, expected: cols, found });
        }

        Ok(Matrix { rows: data.len(), cols, data })
    }

    /// Single-row matrix, e.g. a bias vector.
    pub fn row_vector(values: Vec<f64>) -> Matrix {
        Matrix { rows: 1, cols: values.len(), data: vec![values] }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Standard matrix product. Requires `self.cols == rhs.rows`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, MathError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("multiply", rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Adds a single-row matrix to every row of `self`.
    pub fn add_row_broadcast(&self, row: &Matrix) -> Result<Matrix, MathError> {
        if row.rows != 1 || row.cols != self.cols {
            return Err(self.mismatch("add_row_broadcast", row));
        }

        let bias = &row.data[0];
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|r| r.iter().zip(bias).map(|(x, b)| x + b).collect())
                .collect(),
        })
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, MathError> {
        self.zip_with("hadamard", rhs, |a, b| a * b)
    }

    /// Element-wise difference `self - rhs`.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, MathError> {
        self.zip_with("sub", rhs, |a, b| a - b)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Sums every column into a 1×cols matrix.
    pub fn sum_columns(&self) -> Matrix {
        let mut sums = vec![0.0; self.cols];
        for row in &self.data {
            for (sum, x) in sums.iter_mut().zip(row) {
                *sum += x;
            }
        }
        Matrix::row_vector(sums)
    }

    /// Per-column arithmetic mean. Returns an empty vector for a matrix with no rows.
    pub fn column_mean(&self) -> Vec<f64> {
        if self.rows == 0 {
            return Vec::new();
        }
        let n = self.rows as f64;
        self.sum_columns().data[0].iter().map(|s| s / n).collect()
    }

    /// Per-column sample standard deviation (N - 1 denominator) around `mean`.
    pub fn column_std_dev(&self, mean: &[f64]) -> Result<Vec<f64>, MathError> {
        if mean.len() != self.cols {
            return Err(MathError::ShapeMismatch {
                op: "column_std_dev",
                lhs: self.shape(),
                rhs: (1, mean.len()),
            });
        }
        if self.rows < 2 {
            return Err(MathError::InsufficientRows {
                op: "column_std_dev",
                required: 2,
                rows: self.rows,
            });
        }

        let mut squares = vec![0.0; self.cols];
        for row in &self.data {
            for j in 0..self.cols {
                squares[j] += (row[j] - mean[j]).powi(2);
            }
        }

        let denom = (self.rows - 1) as f64;
        Ok(squares.into_iter().map(|s| (s / denom).sqrt()).collect())
    }

    /// Subtracts `values[j]` from every entry of column `j`.
    pub fn subtract_row_vector(&self, values: &[f64]) -> Result<Matrix, MathError> {
        self.columnwise("subtract_row_vector", values, |x, v| x - v)
    }

    /// Divides every entry of column `j` by `values[j]`.
    pub fn divide_row_vector(&self, values: &[f64]) -> Result<Matrix, MathError> {
        self.columnwise("divide_row_vector", values, |x, v| x / v)
    }

    fn columnwise<F>(&self, op: &'static str, values: &[f64], f: F) -> Result<Matrix, MathError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if values.len() != self.cols {
            return Err(MathError::ShapeMismatch { op, lhs: self.shape(), rhs: (1, values.len()) });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().zip(values).map(|(&x, &v)| f(x, v)).collect())
                .collect(),
        })
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Matrix, f: F) -> Result<Matrix, MathError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&rhs.data)
                .map(|(row_a, row_b)| {
                    row_a.iter().zip(row_b).map(|(&a, &b)| f(a, b)).collect()
                })
                .collect(),
        })
    }

    fn mismatch(&self, op: &'static str, rhs: &Matrix) -> MathError {
        MathError::ShapeMismatch { op, lhs: self.shape(), rhs: rhs.shape() }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, MathError::RaggedRows { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(Matrix::from_rows(vec![]).unwrap_err(), MathError::Empty);
        assert_eq!(Matrix::from_rows(vec![vec![]]).unwrap_err(), MathError::Empty);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.data, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn sum_columns_collapses_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, -2.0], vec![3.0, 4.0], vec![5.0, 0.5]]).unwrap();
        assert_eq!(m.sum_columns().data, vec![vec![9.0, 2.5]]);
    }

    #[test]
    fn std_dev_of_single_row_is_rejected() {
        let m = Matrix::row_vector(vec![1.0, 2.0]);
        let mean = m.column_mean();
        assert!(matches!(
            m.column_std_dev(&mean),
            Err(MathError::InsufficientRows { rows: 1, .. })
        ));
    }
}
