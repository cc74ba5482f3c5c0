//! Reshape with placeholder inference.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::shape::{is_reshapable, is_valid_shape, shape_product};
use crate::tensor::Tensor;

/// Placeholder entry in a reshape target, inferred from the other entries.
pub const INFER: isize = -1;

/// Resolve a reshape target against a source of `size` elements.
///
/// # Errors
///
/// - `TensorError::MultiplePlaceholders` if more than one entry is [`INFER`]
/// - `TensorError::InvalidShape` if any other entry is negative
/// - `TensorError::ShapeMismatch` if the inferred entry is not integral or
///   the element counts differ
pub fn resolve_shape(source: &[usize], target: &[isize]) -> Result<Vec<usize>, TensorError> {
    let placeholders = target.iter().filter(|&&n| n == INFER).count();
    if placeholders > 1 {
        return Err(TensorError::MultiplePlaceholders {
            shape: target.to_vec(),
        });
    }
    if target.iter().any(|&n| n < 0 && n != INFER) {
        return Err(TensorError::InvalidShape {
            shape: target.to_vec(),
        });
    }

    let size = shape_product(source);
    let mut resolved: Vec<isize> = target.to_vec();
    if let Some(pos) = target.iter().position(|&n| n == INFER) {
        let known: usize = target
            .iter()
            .filter(|&&n| n != INFER)
            .map(|&n| n as usize)
            .product();
        if known == 0 || size % known != 0 {
            return Err(TensorError::ShapeMismatch {
                expected: size,
                actual: known,
            });
        }
        resolved[pos] = (size / known) as isize;
    }

    let source_signed: Vec<isize> = source.iter().map(|&n| n as isize).collect();
    if !is_valid_shape(&resolved) || !is_reshapable(&source_signed, &resolved) {
        let resolved_size = if resolved.is_empty() {
            0
        } else {
            resolved.iter().map(|&n| n as usize).product()
        };
        return Err(TensorError::ShapeMismatch {
            expected: size,
            actual: resolved_size,
        });
    }
    Ok(resolved.into_iter().map(|n| n as usize).collect())
}

/// Reshape a tensor, returning a copy with the new shape.
///
/// The flat buffer order is preserved exactly.
///
/// # Example
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::reshape;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let r = reshape(&t, &[3, 2]).unwrap();
/// assert_eq!(r.get(&[1, 1]).unwrap(), 4.0);
/// assert_eq!(r.data(), t.data());
/// ```
pub fn reshape<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    new_shape: &[isize],
) -> Result<Tensor<ElT>, TensorError> {
    let shape = resolve_shape(tensor.shape(), new_shape)?;
    Tensor::from_vec(tensor.data().to_vec(), &shape)
}
