//! Axis permutation: transpose and swap-axes.
//!
//! ```text
//! transpose(tensor, axes)              # default: reversed axis order
//!     → permutedims(tensor, perm)
//!         → validate permutation
//!         → allocate output with permuted shape
//!         → permutedims_into(output, tensor, perm)
//!
//! permutedims_into(dest, src, perm)    # writes into caller-owned output
//!     → dispatch to backend (GenericBackend by default)
//! ```

use crate::backend::{GenericBackend, PermutationBackend};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Permute the axes of a tensor, returning a new tensor.
///
/// `perm[i]` gives the source axis for the i-th axis of the result, so the
/// result satisfies `out[idx] == tensor[j]` where `j[perm[i]] == idx[i]`.
///
/// # Errors
///
/// Returns `TensorError::InvalidPermutation` if `perm` is not a permutation
/// of `0..ndim`.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::permutedims;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let t2 = permutedims(&t, &[1, 0]).unwrap();
/// assert_eq!(t2.shape(), &[3, 2]);
/// assert_eq!(t.get(&[1, 2]).unwrap(), t2.get(&[2, 1]).unwrap());
/// ```
pub fn permutedims<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    perm: &[usize],
) -> Result<Tensor<ElT>, TensorError> {
    validate_permutation(perm, tensor.ndim())?;

    let new_shape: Vec<usize> = perm.iter().map(|&p| tensor.shape()[p]).collect();
    let mut result = Tensor::zeros(&new_shape);
    GenericBackend::permute_into(&mut result, tensor, perm);

    Ok(result)
}

/// Permute tensor axes into an existing output tensor.
///
/// # Errors
///
/// Returns `TensorError::InvalidPermutation` for a bad `perm` and
/// `TensorError::OutputShapeMismatch` if `dest` does not have the permuted
/// shape. `dest` is untouched on error.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::permutedims_into;
///
/// let src = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let mut dest = Tensor::zeros(&[3, 2]);
///
/// permutedims_into(&mut dest, &src, &[1, 0]).unwrap();
/// assert_eq!(src.get(&[1, 2]).unwrap(), dest.get(&[2, 1]).unwrap());
/// ```
pub fn permutedims_into<ElT: Scalar>(
    dest: &mut Tensor<ElT>,
    src: &Tensor<ElT>,
    perm: &[usize],
) -> Result<(), TensorError> {
    validate_permutation(perm, src.ndim())?;
    let expected: Vec<usize> = perm.iter().map(|&p| src.shape()[p]).collect();
    if dest.shape() != expected.as_slice() {
        return Err(TensorError::OutputShapeMismatch {
            expected,
            actual: dest.shape().to_vec(),
        });
    }
    GenericBackend::permute_into(dest, src, perm);
    Ok(())
}

/// Transpose a tensor.
///
/// With `axes == None` the axis order is reversed; otherwise `axes` must be
/// a permutation of `0..ndim` (see [`permutedims`]).
pub fn transpose<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axes: Option<&[usize]>,
) -> Result<Tensor<ElT>, TensorError> {
    match axes {
        Some(perm) => permutedims(tensor, perm),
        None => {
            let reversed: Vec<usize> = (0..tensor.ndim()).rev().collect();
            permutedims(tensor, &reversed)
        }
    }
}

/// Exchange two axes of a tensor.
///
/// # Errors
///
/// Returns `TensorError::InvalidAxis` if either axis is out of range.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::swap_axes;
///
/// let t = Tensor::from_vec((1..=8).map(f64::from).collect(), &[2, 2, 2]).unwrap();
/// let s = swap_axes(&t, 1, 2).unwrap();
/// assert_eq!(s.get(&[0, 0, 1]).unwrap(), t.get(&[0, 1, 0]).unwrap());
/// ```
pub fn swap_axes<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axis1: usize,
    axis2: usize,
) -> Result<Tensor<ElT>, TensorError> {
    let ndim = tensor.ndim();
    for axis in [axis1, axis2] {
        if axis >= ndim {
            return Err(TensorError::InvalidAxis { axis, ndim });
        }
    }
    let mut perm: Vec<usize> = (0..ndim).collect();
    perm.swap(axis1, axis2);
    permutedims(tensor, &perm)
}

/// Inverse of a permutation: `inverse[perm[i]] == i`.
pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Validate that perm is a valid permutation of 0..ndim.
fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };
    if perm.len() != ndim {
        return Err(invalid());
    }

    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }

    Ok(())
}
