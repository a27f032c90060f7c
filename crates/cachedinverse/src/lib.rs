//! Memoized matrix inversion
//!
//! This crate holds a matrix together with a lazily computed inverse:
//! - `CachedMatrix`: owns one matrix and its cached inverse; replacing the
//!   matrix drops the cache
//! - `compute_or_fetch_inverse`: returns the cached inverse or computes and
//!   stores it
//! - `SyncCachedMatrix`: the same behind a single lock for shared use
//! - `Invert` / `GaussJordan`: the pluggable inversion routine and its default
//!
//! # Example
//!
//! ```
//! use cachedinverse::{from_col_major, from_vec2d, CachedMatrix};
//!
//! let a = from_col_major(2, 2, vec![-1.0, -2.0, 1.0, 1.0]);
//! let mut cm = CachedMatrix::new(a);
//!
//! // Computed on the first request, served from the cache afterwards
//! let inv = cm.inverse().unwrap();
//! assert_eq!(inv, from_vec2d(vec![vec![1.0, -1.0], vec![2.0, -1.0]]));
//! assert_eq!(cm.inverse().unwrap(), inv);
//! assert_eq!(cm.num_cache_hits(), 1);
//! ```

pub mod cached_matrix;
pub mod error;
pub mod inverse;
pub mod matrix;
pub mod scalar;
pub mod sync;

// Re-export main types
pub use cached_matrix::{compute_or_fetch_inverse, CachedMatrix};
pub use error::{InversionError, Result};
pub use inverse::{
    default_pivot_tol, invert, invert_with, set_default_pivot_tol, GaussJordan, Invert,
    InvertOptions,
};
pub use matrix::{approx_eq, eye, from_col_major, from_vec2d, mat_mul, zeros, Matrix};
pub use scalar::Scalar;
pub use sync::SyncCachedMatrix;
