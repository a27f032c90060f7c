//! Matrix holder with a lazily computed, invalidate-on-write inverse

use crate::error::Result;
use crate::inverse::{GaussJordan, Invert};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// A matrix together with its cached inverse
///
/// If an inverse is cached, it is the inverse of the current value: every
/// write through [`set_value`](Self::set_value) drops it. The inverse is
/// only computed when requested, see [`compute_or_fetch_inverse`].
#[derive(Debug, Clone, Default)]
pub struct CachedMatrix<T> {
    /// The held matrix
    value: Matrix<T>,
    /// Inverse of `value` as of the last write, if computed since
    inverse: Option<Matrix<T>>,
    /// Number of inverses computed and stored
    num_evals: usize,
    /// Number of requests answered from the cache
    num_cache_hits: usize,
}

impl<T> CachedMatrix<T> {
    /// Wrap `initial` with no cached inverse. No validation is done here;
    /// a matrix without an inverse only fails when the inverse is requested.
    pub fn new(initial: Matrix<T>) -> Self {
        Self {
            value: initial,
            inverse: None,
            num_evals: 0,
            num_cache_hits: 0,
        }
    }

    /// Replace the held matrix and drop any cached inverse
    pub fn set_value(&mut self, m: Matrix<T>) {
        self.value = m;
        self.inverse = None;
    }

    /// The held matrix
    pub fn value(&self) -> &Matrix<T> {
        &self.value
    }

    /// Store `inv` as the cached inverse.
    ///
    /// `inv` is trusted to be the inverse of the current value; it is not
    /// checked.
    pub fn set_inverse(&mut self, inv: Matrix<T>) {
        self.inverse = Some(inv);
    }

    /// The cached inverse, if any. Never computes.
    pub fn cached_inverse(&self) -> Option<&Matrix<T>> {
        self.inverse.as_ref()
    }

    pub fn has_cached_inverse(&self) -> bool {
        self.inverse.is_some()
    }

    /// Drop the cached inverse, keeping the value
    pub fn clear_cache(&mut self) {
        self.inverse = None;
    }

    /// Consume the holder, returning the value and the cached inverse
    pub fn into_parts(self) -> (Matrix<T>, Option<Matrix<T>>) {
        (self.value, self.inverse)
    }

    /// Get the number of inverses computed
    pub fn num_evals(&self) -> usize {
        self.num_evals
    }

    /// Get the number of cache hits
    pub fn num_cache_hits(&self) -> usize {
        self.num_cache_hits
    }

    /// Get the total number of successful requests (evals + cache hits)
    pub fn total_calls(&self) -> usize {
        self.num_evals + self.num_cache_hits
    }

    /// Get the cache hit ratio
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            self.num_cache_hits as f64 / total as f64
        }
    }
}

impl<T: Scalar> CachedMatrix<T> {
    /// Inverse of the held matrix, computed with the default inverter on a miss
    pub fn inverse(&mut self) -> Result<Matrix<T>> {
        compute_or_fetch_inverse(self, &GaussJordan::default())
    }

    /// Inverse of the held matrix, computed with `inverter` on a miss
    pub fn inverse_with<I>(&mut self, inverter: &I) -> Result<Matrix<T>>
    where
        I: Invert<T> + ?Sized,
    {
        compute_or_fetch_inverse(self, inverter)
    }
}

impl<T> From<Matrix<T>> for CachedMatrix<T> {
    fn from(m: Matrix<T>) -> Self {
        Self::new(m)
    }
}

/// Return the cached inverse of `cm`, computing and storing it first if absent.
///
/// A cache hit emits a debug event and does not call `inverter`. An error
/// from `inverter` is returned unchanged and nothing is stored, so the next
/// call computes again.
pub fn compute_or_fetch_inverse<T, I>(cm: &mut CachedMatrix<T>, inverter: &I) -> Result<Matrix<T>>
where
    T: Scalar,
    I: Invert<T> + ?Sized,
{
    if let Some(inv) = cm.cached_inverse() {
        let inv = inv.clone();
        tracing::debug!("getting cached data");
        cm.num_cache_hits += 1;
        return Ok(inv);
    }

    tracing::trace!(
        nrows = cm.value().nrows(),
        ncols = cm.value().ncols(),
        "computing inverse"
    );
    let inv = inverter.invert(cm.value())?;
    cm.set_inverse(inv.clone());
    cm.num_evals += 1;
    Ok(inv)
}
