//! Permutation backend trait.

use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Backend trait for tensor permutation operations.
///
/// Callers validate shapes and the permutation before dispatching here.
pub trait PermutationBackend {
    /// Permute tensor dimensions into `dest`.
    ///
    /// # Arguments
    ///
    /// * `dest` - Output tensor (must have permuted shape)
    /// * `src` - Input tensor
    /// * `perm` - Permutation of dimensions. `perm[i]` gives the source dimension
    ///   for the i-th dimension of the result.
    fn permute_into<ElT: Scalar>(dest: &mut Tensor<ElT>, src: &Tensor<ElT>, perm: &[usize]);
}
