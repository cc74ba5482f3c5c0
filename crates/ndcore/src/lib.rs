//! ndcore - dense n-dimensional arrays
//!
//! This crate provides a rectangular, row-major tensor of real floats with
//! reshaping, axis permutation, slicing, broadcasting arithmetic, reductions
//! and einsum contraction.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Allocating API (operations / contract modules)
//!     → reshape, transpose, slice, add, sum, einsum, ...
//!
//! Level 2: Into API
//!     → permutedims_into, add_into, clip_into, ... (caller-owned output)
//!
//! Level 3: Backend implementation (backend module)
//!     → GenericBackend (plain loops over row-major offsets)
//! ```
//!
//! # Example
//!
//! ```
//! use ndcore::Tensor;
//! use ndcore::operations::{add, sum};
//!
//! // Create a 2x3 zero-initialized tensor
//! let mut t: Tensor = Tensor::zeros(&[2, 3]);
//!
//! // Set and get elements
//! t.set(&[0, 1], 5.0).unwrap();
//! assert_eq!(t.get(&[0, 1]).unwrap(), 5.0);
//!
//! // Create from data (row-major order)
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let t2 = Tensor::from_vec(data, &[2, 3]).unwrap();
//!
//! let total = sum(&add(&t, &t2).unwrap(), 0).unwrap();
//! assert_eq!(total.data(), &[5.0, 12.0, 9.0]);
//! ```

pub mod backend;
pub mod contract;
pub mod creation;
pub mod error;
pub mod operations;
pub mod scalar;
pub mod shape;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use contract::{einsum, einsum_labels};
pub use creation::Nested;
pub use error::{ErrorKind, TensorError};
pub use operations::{Axes, Operand, SliceArg, SliceRange};
pub use scalar::Scalar;
pub use storage::Dense;
pub use tensor::{Tensor, TensorIndex};
