//! Tensor operations.
//!
//! Operations follow a two-level hierarchy:
//!
//! ```text
//! Level 1: Allocating API (permutedims, add, clip, ...)
//!     → validate arguments
//!     → allocate output
//!     → run the kernel
//!
//! Level 2: Into API (permutedims_into, add_into, clip_into, ...)
//!     → validate arguments and the caller-owned output shape
//!     → run the kernel (or dispatch to a backend)
//! ```
//!
//! Nothing is written to an output tensor unless every check passed.

mod arithmetic;
mod broadcast;
mod permutedims;
mod reduce;
mod reshape;
mod slice;

pub use arithmetic::{
    abs, abs_into, add, add_into, clip, clip_into, div, div_into, exp, exp_into, mul, mul_into,
    neg, neg_into, pow, pow_into, sub, sub_into,
};
pub use broadcast::{
    Operand, apply_binary, apply_binary_into, apply_unary, apply_unary_into,
    broadcast_result_shape,
};
pub use permutedims::{inverse_permutation, permutedims, permutedims_into, swap_axes, transpose};
pub use reduce::{Axes, argmax, argmin, max, max_along, mean, min, min_along, sum};
pub use reshape::{INFER, reshape, resolve_shape};
pub use slice::{SliceArg, SliceRange, Traversal, slice};
