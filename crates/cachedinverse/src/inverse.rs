//! Matrix inversion: the `Invert` seam and the default Gauss-Jordan inverter

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{InversionError, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Something that can compute the inverse of a square matrix.
///
/// Implemented for [`GaussJordan`] and for any closure
/// `Fn(&Matrix<T>) -> Result<Matrix<T>>`, so callers can plug in their own
/// routine (or a counting stub in tests).
pub trait Invert<T: Scalar> {
    /// Compute the inverse of `m`, failing with [`InversionError`] when it
    /// has none.
    fn invert(&self, m: &Matrix<T>) -> Result<Matrix<T>>;
}

impl<T, F> Invert<T> for F
where
    T: Scalar,
    F: Fn(&Matrix<T>) -> Result<Matrix<T>>,
{
    fn invert(&self, m: &Matrix<T>) -> Result<Matrix<T>> {
        self(m)
    }
}

/// Options for matrix inversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertOptions {
    /// Relative pivot tolerance. A pivot with |p| <= pivot_tol * max|a_ij|
    /// is treated as zero and the matrix is reported singular.
    /// If `None`, uses the global default.
    pub pivot_tol: Option<f64>,
}

impl InvertOptions {
    /// Create new options with the specified pivot tolerance.
    pub fn with_pivot_tol(pivot_tol: f64) -> Self {
        Self {
            pivot_tol: Some(pivot_tol),
        }
    }

    fn resolved_pivot_tol(&self) -> f64 {
        self.pivot_tol.unwrap_or_else(default_pivot_tol)
    }
}

// Stored as f64::to_bits()
static DEFAULT_PIVOT_TOL: AtomicU64 = AtomicU64::new(1e-12_f64.to_bits());

/// Get the global default relative pivot tolerance.
///
/// The default value is 1e-12.
pub fn default_pivot_tol() -> f64 {
    f64::from_bits(DEFAULT_PIVOT_TOL.load(Ordering::Relaxed))
}

/// Set the global default relative pivot tolerance.
///
/// # Errors
/// Returns `InversionError::InvalidTolerance` if `tol` is not finite or is negative.
pub fn set_default_pivot_tol(tol: f64) -> Result<()> {
    if !tol.is_finite() || tol < 0.0 {
        return Err(InversionError::InvalidTolerance(tol));
    }
    DEFAULT_PIVOT_TOL.store(tol.to_bits(), Ordering::Relaxed);
    Ok(())
}

/// Gauss-Jordan elimination with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan {
    pub options: InvertOptions,
}

impl GaussJordan {
    pub fn new(options: InvertOptions) -> Self {
        Self { options }
    }
}

impl<T: Scalar> Invert<T> for GaussJordan {
    fn invert(&self, m: &Matrix<T>) -> Result<Matrix<T>> {
        gauss_jordan(m, self.options.resolved_pivot_tol())
    }
}

/// Invert `m` with the default inverter and the global pivot tolerance.
pub fn invert<T: Scalar>(m: &Matrix<T>) -> Result<Matrix<T>> {
    invert_with(m, InvertOptions::default())
}

/// Invert `m` with the default inverter and explicit options.
pub fn invert_with<T: Scalar>(m: &Matrix<T>, options: InvertOptions) -> Result<Matrix<T>> {
    GaussJordan::new(options).invert(m)
}

fn check_invertible_shape<T: Scalar>(m: &Matrix<T>) -> Result<()> {
    if !m.is_square() {
        return Err(InversionError::NotSquare {
            nrows: m.nrows(),
            ncols: m.ncols(),
        });
    }
    if m.is_empty() {
        return Err(InversionError::Empty);
    }
    Ok(())
}

#[allow(clippy::needless_range_loop)]
fn gauss_jordan<T: Scalar>(m: &Matrix<T>, pivot_tol: f64) -> Result<Matrix<T>> {
    check_invertible_shape(m)?;
    let n = m.nrows();

    let mut scale = 0.0f64;
    for i in 0..n {
        for j in 0..n {
            let x = m[[i, j]];
            if !x.is_finite() {
                return Err(InversionError::NonFinite { row: i, col: j });
            }
            scale = scale.max(x.abs_val());
        }
    }
    let threshold = pivot_tol * scale;

    // Augmented matrix [A | I]
    let mut aug: Vec<Vec<T>> = (0..n)
        .map(|i| {
            let mut row = Vec::with_capacity(2 * n);
            row.extend((0..n).map(|j| m[[i, j]]));
            row.extend((0..n).map(|j| if i == j { T::one() } else { T::zero() }));
            row
        })
        .collect();

    for k in 0..n {
        let mut max_idx = k;
        // abs_val, not abs_sq: squaring underflows for entries below ~1e-162
        let mut max_val: f64 = aug[k][k].abs_val();
        for i in (k + 1)..n {
            let val: f64 = aug[i][k].abs_val();
            if val > max_val {
                max_val = val;
                max_idx = i;
            }
        }

        if max_val <= threshold {
            return Err(InversionError::Singular { column: k });
        }

        if max_idx != k {
            aug.swap(k, max_idx);
        }

        let pivot = aug[k][k];
        for j in k..(2 * n) {
            aug[k][j] = aug[k][j] / pivot;
        }

        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = aug[i][k];
            if factor == T::zero() {
                continue;
            }
            for j in k..(2 * n) {
                aug[i][j] = aug[i][j] - factor * aug[k][j];
            }
        }
    }

    let data = aug.into_iter().flat_map(|row| row.into_iter().skip(n)).collect();
    Ok(Matrix::from_row_major(n, n, data))
}
