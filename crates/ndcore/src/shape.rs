//! Shape algebra.
//!
//! Pure functions over shape descriptors. A shape is a slice of per-axis
//! lengths; by convention the product of an empty shape is 0, so an empty
//! shape describes a tensor with no elements.

use crate::error::TensorError;

/// Number of elements described by `shape`.
///
/// Unlike the mathematical identity, the empty shape has product 0.
///
/// # Examples
///
/// ```
/// use ndcore::shape::shape_product;
///
/// assert_eq!(shape_product(&[2, 3, 4]), 24);
/// assert_eq!(shape_product(&[2, 0]), 0);
/// assert_eq!(shape_product(&[]), 0);
/// ```
#[inline]
pub fn shape_product(shape: &[usize]) -> usize {
    if shape.is_empty() {
        return 0;
    }
    shape.iter().product()
}

/// Check that every entry of a signed shape is a non-negative length.
pub fn is_valid_shape(shape: &[isize]) -> bool {
    shape.iter().all(|&n| n >= 0)
}

/// Check that `old` can be reshaped into `new`.
///
/// Both shapes must be valid and describe the same number of elements.
pub fn is_reshapable(old: &[isize], new: &[isize]) -> bool {
    if !is_valid_shape(old) || !is_valid_shape(new) {
        return false;
    }
    signed_product(old) == signed_product(new)
}

fn signed_product(shape: &[isize]) -> usize {
    if shape.is_empty() {
        return 0;
    }
    shape.iter().map(|&n| n as usize).product()
}

/// Left-pad `shape` with length-1 axes until it has `rank` axes.
///
/// Shapes that already have at least `rank` axes are returned unchanged.
pub fn promote_rank(shape: &[usize], rank: usize) -> Vec<usize> {
    let pad = rank.saturating_sub(shape.len());
    let mut promoted = vec![1; pad];
    promoted.extend_from_slice(shape);
    promoted
}

/// Broadcast two shapes of equal rank.
///
/// At every axis the lengths must be equal or one of them must be 1, and the
/// result takes the other length. A length-1 axis against a length-0 axis
/// therefore yields 0, not `max(1, 0)`: replicating one element zero times
/// leaves nothing.
///
/// # Errors
///
/// Returns `TensorError::RankMismatch` if the ranks differ and
/// `TensorError::BroadcastMismatch` if an axis is incompatible.
///
/// # Examples
///
/// ```
/// use ndcore::shape::broadcast_shape;
///
/// assert_eq!(broadcast_shape(&[2, 1, 4], &[1, 3, 4]).unwrap(), vec![2, 3, 4]);
/// assert_eq!(broadcast_shape(&[1, 3], &[0, 1]).unwrap(), vec![0, 3]);
/// assert!(broadcast_shape(&[2, 3], &[3, 3]).is_err());
/// ```
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Result<Vec<usize>, TensorError> {
    if a.len() != b.len() {
        return Err(TensorError::RankMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    a.iter()
        .zip(b.iter())
        .map(|(&da, &db)| {
            if da == db || db == 1 {
                Ok(da)
            } else if da == 1 {
                Ok(db)
            } else {
                Err(TensorError::BroadcastMismatch {
                    lhs: a.to_vec(),
                    rhs: b.to_vec(),
                })
            }
        })
        .collect()
}
