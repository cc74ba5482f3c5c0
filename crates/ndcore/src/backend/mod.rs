//! Backend abstraction for tensor operations.
//!
//! # Backends
//!
//! - `GenericBackend`: loop-based implementation over row-major offsets
//!   (always available)

mod generic;
mod permutation;

pub use generic::GenericBackend;
pub use permutation::PermutationBackend;
