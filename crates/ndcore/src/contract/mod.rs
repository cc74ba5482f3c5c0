//! Index-named tensor contraction (einsum).
//!
//! Every axis of every operand is given an index name. Names shared between
//! axes are bound to one size; names listed in the output become result
//! axes, and every other name is summed over.
//!
//! # Implementations
//!
//! - `parse`: textual subscripts (`"i,j; j,k -> i,k"`)
//! - `properties`: name unification and loop planning
//! - `naive`: loop-based evaluation
//!
//! # Example
//!
//! ```
//! use ndcore::{Tensor, einsum};
//!
//! // Matrix multiplication: C[i,k] = A[i,j] * B[j,k]
//! let a = Tensor::<f64>::ones(&[2, 3]);
//! let b = Tensor::<f64>::ones(&[3, 4]);
//!
//! let c = einsum("i,j; j,k -> i,k", &[&a, &b]).unwrap();
//! assert_eq!(c.shape(), &[2, 4]);
//! assert_eq!(c.get(&[0, 0]).unwrap(), 3.0);
//! ```

mod naive;
mod parse;
mod properties;

pub use naive::{einsum, einsum_labels};
pub use parse::Subscripts;
pub use properties::EinsumProperties;
