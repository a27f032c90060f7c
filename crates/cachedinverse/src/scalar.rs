//! Scalar element types accepted by [`Matrix`](crate::Matrix) and the inverters.

use num_complex::{Complex32, Complex64};
use num_traits::{Float, One, Zero};
use std::fmt::Debug;

/// Element type of an invertible matrix.
///
/// Covers the field operations needed by Gauss-Jordan elimination plus the
/// magnitude queries used for pivot selection. Implemented for `f64`, `f32`,
/// `Complex64` and `Complex32`.
pub trait Scalar:
    Clone
    + Copy
    + Debug
    + PartialEq
    + Zero
    + One
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + Default
    + Send
    + Sync
    + 'static
{
    /// Square of the absolute value (for complex numbers, |z|^2).
    fn abs_sq(self) -> f64;

    /// Absolute value as f64.
    fn abs_val(self) -> f64 {
        self.abs_sq().sqrt()
    }

    /// Create from f64 value.
    fn from_f64(val: f64) -> Self;

    /// True if every component is neither NaN nor infinite.
    fn is_finite(self) -> bool;
}

impl Scalar for f64 {
    #[inline]
    fn abs_sq(self) -> f64 {
        self * self
    }

    #[inline]
    fn abs_val(self) -> f64 {
        Float::abs(self)
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val
    }

    #[inline]
    fn is_finite(self) -> bool {
        Float::is_finite(self)
    }
}

impl Scalar for f32 {
    #[inline]
    fn abs_sq(self) -> f64 {
        let x = self as f64;
        x * x
    }

    #[inline]
    fn abs_val(self) -> f64 {
        Float::abs(self) as f64
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn is_finite(self) -> bool {
        Float::is_finite(self)
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn abs_sq(self) -> f64 {
        self.norm_sqr()
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex64::new(val, 0.0)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Scalar for Complex32 {
    #[inline]
    fn abs_sq(self) -> f64 {
        let (re, im) = (self.re as f64, self.im as f64);
        re * re + im * im
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.norm() as f64
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex32::new(val as f32, 0.0)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// Macro to generate f64 and Complex64 test variants from a generic test function.
///
/// # Example
///
/// ```ignore
/// fn test_roundtrip_generic<T: Scalar>() {
///     // test implementation
/// }
///
/// cachedinverse::scalar_tests!(test_roundtrip, test_roundtrip_generic);
/// // Generates:
/// // #[test] fn test_roundtrip_f64() { test_roundtrip_generic::<f64>(); }
/// // #[test] fn test_roundtrip_c64() { test_roundtrip_generic::<Complex64>(); }
/// ```
#[macro_export]
macro_rules! scalar_tests {
    ($name:ident, $test_fn:ident) => {
        paste::paste! {
            #[test]
            fn [<$name _f64>]() {
                $test_fn::<f64>();
            }

            #[test]
            fn [<$name _c64>]() {
                $test_fn::<num_complex::Complex64>();
            }
        }
    };
}
