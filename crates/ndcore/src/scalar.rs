//! Scalar trait for tensor element types.

use num_traits::Float;
use std::fmt::Debug;

/// Trait for scalar types supported by ndcore.
///
/// This wraps `num_traits::Float` with the extra bounds required for tensor
/// operations. Only real floating types are elements; `f64` is the default.
pub trait Scalar: Float + Debug + Default + Send + Sync + 'static {
    /// Convert an axis position or element count into the element type.
    fn from_usize(n: usize) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

impl Scalar for f32 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f32
    }
}
