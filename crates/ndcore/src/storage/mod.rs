//! Storage for tensor data.
//!
//! Storage is always a flat vector; shape and strides come from the
//! [`Tensor`](crate::Tensor) wrapper.

mod dense;

pub use dense::Dense;
