//! Dense matrix storage and the small set of helpers the inverse cache needs

use num_traits::{One, Zero};
use std::ops::{Index, IndexMut};

use crate::scalar::Scalar;

/// Simple 2D matrix backed by a row-major Vec
///
/// `Matrix::default()` is the empty 0x0 placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Clone> Matrix<T> {
    /// Create a matrix from row-major data
    ///
    /// # Panics
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_row_major(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "data length does not match a ({}, {}) matrix",
            nrows,
            ncols
        );
        Self { data, nrows, ncols }
    }
}

impl<T> Matrix<T> {
    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// True if the matrix has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// True if the matrix has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Clone + Zero> Matrix<T> {
    /// Create a zeros matrix
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }
}

impl<T> Index<[usize; 2]> for Matrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.data[idx[0] * self.ncols + idx[1]]
    }
}

impl<T> IndexMut<[usize; 2]> for Matrix<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut Self::Output {
        &mut self.data[idx[0] * self.ncols + idx[1]]
    }
}

/// Create a zeros matrix with given dimensions
pub fn zeros<T: Clone + Zero>(nrows: usize, ncols: usize) -> Matrix<T> {
    Matrix::zeros(nrows, ncols)
}

/// Create an identity matrix
pub fn eye<T: Clone + Zero + One>(n: usize) -> Matrix<T> {
    let mut m = zeros(n, n);
    for i in 0..n {
        m[[i, i]] = T::one();
    }
    m
}

/// Create a matrix from a 2D vector (row-major)
///
/// # Panics
/// Panics if the rows do not all have the same length.
pub fn from_vec2d<T: Clone + Zero>(data: Vec<Vec<T>>) -> Matrix<T> {
    let nrows = data.len();
    let ncols = if nrows > 0 { data[0].len() } else { 0 };
    let mut m = zeros(nrows, ncols);
    for (i, row) in data.into_iter().enumerate() {
        assert_eq!(row.len(), ncols, "row {} has length {}, expected {}", i, row.len(), ncols);
        for (j, x) in row.into_iter().enumerate() {
            m[[i, j]] = x;
        }
    }
    m
}

/// Create a matrix from column-major data
///
/// `from_col_major(2, 2, vec![-1.0, -2.0, 1.0, 1.0])` is `[[-1, 1], [-2, 1]]`.
///
/// # Panics
/// Panics if `data.len() != nrows * ncols`.
pub fn from_col_major<T: Clone + Zero>(nrows: usize, ncols: usize, data: Vec<T>) -> Matrix<T> {
    assert_eq!(
        data.len(),
        nrows * ncols,
        "data length does not match a ({}, {}) matrix",
        nrows,
        ncols
    );
    let mut m = zeros(nrows, ncols);
    for (k, x) in data.into_iter().enumerate() {
        m[[k % nrows, k / nrows]] = x;
    }
    m
}

/// Matrix multiplication: A * B
pub fn mat_mul<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    let m = a.nrows();
    let k = a.ncols();
    let n = b.ncols();
    assert_eq!(b.nrows(), k);

    let mut result = zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            for l in 0..k {
                sum = sum + a[[i, l]] * b[[l, j]];
            }
            result[[i, j]] = sum;
        }
    }
    result
}

/// Largest elementwise |a - b|, or `f64::INFINITY` if the shapes differ
pub fn max_abs_diff<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> f64 {
    if a.shape() != b.shape() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).abs_val())
        .fold(0.0, f64::max)
}

/// Elementwise comparison within an absolute tolerance
pub fn approx_eq<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, tol: f64) -> bool {
    max_abs_diff(a, b) <= tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_basic() {
        let mut m = zeros::<f64>(3, 3);
        m[[0, 0]] = 1.0;
        m[[1, 1]] = 2.0;
        m[[2, 2]] = 3.0;

        assert_eq!(m[[0, 0]], 1.0);
        assert_eq!(m[[1, 1]], 2.0);
        assert_eq!(m[[2, 2]], 3.0);
        assert!(m.is_square());
    }

    #[test]
    fn test_default_is_empty_placeholder() {
        let m: Matrix<f64> = Matrix::default();
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
        assert!(m.is_square());
    }

    #[test]
    fn test_from_col_major() {
        let m = from_col_major(2, 2, vec![-1.0, -2.0, 1.0, 1.0]);
        assert_eq!(m, from_vec2d(vec![vec![-1.0, 1.0], vec![-2.0, 1.0]]));

        let r = from_col_major(2, 3, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(r.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn test_from_vec2d_ragged() {
        let _ = from_vec2d(vec![vec![1.0, 2.0], vec![3.0]]);
    }

    #[test]
    fn test_mat_mul() {
        let a = from_vec2d(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = from_vec2d(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let c = mat_mul(&a, &b);

        assert_eq!(c[[0, 0]], 19.0);
        assert_eq!(c[[0, 1]], 22.0);
        assert_eq!(c[[1, 0]], 43.0);
        assert_eq!(c[[1, 1]], 50.0);
    }

    #[test]
    fn test_approx_eq() {
        let a = from_vec2d(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let mut b = a.clone();
        b[[1, 1]] += 1e-12;
        assert!(approx_eq(&a, &b, 1e-10));
        assert!(!approx_eq(&a, &eye(2), 1e-10));
        assert_eq!(max_abs_diff(&a, &zeros(2, 3)), f64::INFINITY);
    }
}
