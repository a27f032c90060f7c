//! Lock-guarded [`CachedMatrix`] for sharing between threads
//!
//! One mutex covers both the value and its cached inverse. Writes and the
//! whole check/compute/store sequence of an inverse request run under that
//! lock, so an inverse computed for a matrix that has since been replaced can
//! never be stored.

use parking_lot::Mutex;

use crate::cached_matrix::{compute_or_fetch_inverse, CachedMatrix};
use crate::error::Result;
use crate::inverse::{GaussJordan, Invert};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Thread-safe [`CachedMatrix`]
///
/// Accessors return clones since the lock is released on return.
#[derive(Debug, Default)]
pub struct SyncCachedMatrix<T> {
    inner: Mutex<CachedMatrix<T>>,
}

impl<T: Scalar> SyncCachedMatrix<T> {
    pub fn new(initial: Matrix<T>) -> Self {
        Self {
            inner: Mutex::new(CachedMatrix::new(initial)),
        }
    }

    /// Replace the held matrix and drop any cached inverse
    pub fn set_value(&self, m: Matrix<T>) {
        self.inner.lock().set_value(m);
    }

    pub fn value(&self) -> Matrix<T> {
        self.inner.lock().value().clone()
    }

    /// Store `inv` as the cached inverse without checking it
    pub fn set_inverse(&self, inv: Matrix<T>) {
        self.inner.lock().set_inverse(inv);
    }

    pub fn cached_inverse(&self) -> Option<Matrix<T>> {
        self.inner.lock().cached_inverse().cloned()
    }

    pub fn clear_cache(&self) {
        self.inner.lock().clear_cache();
    }

    /// Inverse of the held matrix, computed with the default inverter on a miss
    pub fn inverse(&self) -> Result<Matrix<T>> {
        self.inverse_with(&GaussJordan::default())
    }

    /// Inverse of the held matrix, computed with `inverter` on a miss.
    ///
    /// The lock is held while `inverter` runs.
    pub fn inverse_with<I>(&self, inverter: &I) -> Result<Matrix<T>>
    where
        I: Invert<T> + ?Sized,
    {
        let mut guard = self.inner.lock();
        compute_or_fetch_inverse(&mut *guard, inverter)
    }

    /// (evals, cache hits)
    pub fn stats(&self) -> (usize, usize) {
        let guard = self.inner.lock();
        (guard.num_evals(), guard.num_cache_hits())
    }

    pub fn into_inner(self) -> CachedMatrix<T> {
        self.inner.into_inner()
    }
}

impl<T> From<CachedMatrix<T>> for SyncCachedMatrix<T> {
    fn from(cm: CachedMatrix<T>) -> Self {
        Self {
            inner: Mutex::new(cm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inverse::invert;
    use crate::matrix::{approx_eq, eye, from_vec2d, mat_mul};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_requests_compute_once() {
        let a = from_vec2d(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
        let shared = Arc::new(SyncCachedMatrix::new(a.clone()));
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    let counting = |m: &Matrix<f64>| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        invert(m)
                    };
                    shared.inverse_with(&counting).unwrap()
                })
            })
            .collect();

        let results: Vec<Matrix<f64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for inv in &results {
            assert_eq!(inv, &results[0]);
            assert!(approx_eq(&mat_mul(&a, inv), &eye(2), 1e-12));
        }
        assert_eq!(shared.stats(), (1, 7));
    }

    #[test]
    fn test_interleaved_writes_never_leave_stale_inverse() {
        let diag = |x: f64| from_vec2d(vec![vec![x, 0.0], vec![0.0, x]]);
        let shared = Arc::new(SyncCachedMatrix::new(diag(1.0)));

        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for k in 1..200 {
                    shared.set_value(diag(k as f64));
                }
            })
        };
        let reader = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.inverse().unwrap();
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();

        let cm = Arc::try_unwrap(shared).unwrap().into_inner();
        if let Some(inv) = cm.cached_inverse() {
            assert!(approx_eq(&mat_mul(cm.value(), inv), &eye(2), 1e-12));
        }
    }

    #[test]
    fn test_set_value_clears() {
        let shared = SyncCachedMatrix::new(eye::<f64>(2));
        shared.inverse().unwrap();
        assert!(shared.cached_inverse().is_some());
        shared.set_value(eye(3));
        assert!(shared.cached_inverse().is_none());
        assert_eq!(shared.value(), eye(3));
    }
}
