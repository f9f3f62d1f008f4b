// Tests for the shape-checked matrix primitives and column statistics.

use approx::assert_relative_eq;
use ferrite_dense::{MathError, Matrix};

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

#[test]
fn multiply_follows_row_column_dot_products() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);

    let c = a.multiply(&b).unwrap();

    assert_eq!(c.shape(), (2, 2));
    for i in 0..2 {
        for j in 0..2 {
            let expected: f64 = (0..3).map(|t| a.get(i, t) * b.get(t, j)).sum();
            assert_relative_eq!(c.get(i, j), expected, epsilon = 1e-12);
        }
    }
    assert_eq!(c.data, vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
}

#[test]
fn multiply_rejects_inner_dimension_mismatch() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);

    assert_eq!(
        a.multiply(&b).unwrap_err(),
        MathError::ShapeMismatch { op: "multiply", lhs: (2, 3), rhs: (2, 3) }
    );
}

#[test]
fn add_row_broadcast_adds_to_every_row() {
    let matrix = m(vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![0.0, -1.0]]);
    let row = Matrix::row_vector(vec![1.0, 2.0]);

    let sum = matrix.add_row_broadcast(&row).unwrap();

    assert_eq!(sum.data, vec![vec![2.0, 3.0], vec![2.0, 3.0], vec![1.0, 1.0]]);
}

#[test]
fn add_row_broadcast_rejects_multi_row_operand() {
    let matrix = Matrix::zeros(3, 2);
    let two_rows = Matrix::zeros(2, 2);

    assert!(matches!(
        matrix.add_row_broadcast(&two_rows),
        Err(MathError::ShapeMismatch { op: "add_row_broadcast", .. })
    ));
}

#[test]
fn add_row_broadcast_rejects_width_mismatch() {
    let matrix = Matrix::zeros(3, 2);
    let row = Matrix::row_vector(vec![1.0, 2.0, 3.0]);

    assert!(matrix.add_row_broadcast(&row).is_err());
}

#[test]
fn hadamard_product_is_entrywise() {
    let a = Matrix::row_vector(vec![1.0, 2.0]);
    let b = Matrix::row_vector(vec![3.0, 4.0]);

    assert_eq!(a.hadamard(&b).unwrap().data, vec![vec![3.0, 8.0]]);
}

#[test]
fn hadamard_product_requires_identical_shapes() {
    let a = Matrix::zeros(2, 2);
    let b = Matrix::zeros(2, 1);

    assert!(matches!(
        a.hadamard(&b),
        Err(MathError::ShapeMismatch { op: "hadamard", lhs: (2, 2), rhs: (2, 1) })
    ));
}

#[test]
fn column_mean_of_positive_values() {
    let matrix = m(vec![
        vec![5.0, 6.0, 7.0],
        vec![3.0, 5.0, 6.0],
        vec![6.0, 6.0, 7.0],
        vec![4.0, 3.0, 2.0],
    ]);

    assert_eq!(matrix.column_mean(), vec![4.5, 5.0, 5.5]);
}

#[test]
fn column_mean_of_mixed_values() {
    let matrix = m(vec![
        vec![5.0, -6.0, 7.0],
        vec![-3.0, 5.0, -6.0],
        vec![6.0, -6.0, 7.0],
        vec![-4.0, 3.0, -2.0],
    ]);

    assert_eq!(matrix.column_mean(), vec![1.0, -1.0, 1.5]);
}

#[test]
fn column_std_dev_uses_sample_denominator() {
    let matrix = m(vec![
        vec![4.0, 2.0],
        vec![4.0, 2.0],
        vec![-4.0, -2.0],
        vec![-4.0, -2.0],
    ]);
    let mean = matrix.column_mean();

    let std_dev = matrix.column_std_dev(&mean).unwrap();

    // sum of squares 64 and 16 over N - 1 = 3
    assert_relative_eq!(std_dev[0], (64.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(std_dev[1], (16.0f64 / 3.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn column_std_dev_rejects_mean_of_wrong_length() {
    let matrix = Matrix::zeros(3, 2);

    assert!(matches!(
        matrix.column_std_dev(&[0.0]),
        Err(MathError::ShapeMismatch { op: "column_std_dev", .. })
    ));
}

#[test]
fn subtract_then_divide_row_vector() {
    let matrix = m(vec![vec![4.0, 2.0], vec![-4.0, -2.0]]);

    let shifted = matrix.subtract_row_vector(&[1.0, 2.0]).unwrap();
    assert_eq!(shifted.data, vec![vec![3.0, 0.0], vec![-5.0, -4.0]]);

    let scaled = matrix.divide_row_vector(&[4.0, 2.0]).unwrap();
    assert_eq!(scaled.data, vec![vec![1.0, 1.0], vec![-1.0, -1.0]]);
}

#[test]
fn operations_leave_operands_untouched() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = m(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
    let (a_before, b_before) = (a.clone(), b.clone());

    let _ = a.multiply(&b).unwrap();
    let _ = a.hadamard(&b).unwrap();
    let _ = a.sub(&b).unwrap();
    let _ = a.transpose();

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}
