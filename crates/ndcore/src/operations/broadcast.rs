//! Broadcasting element-wise apply.
//!
//! Every arithmetic operator is built on [`apply_unary`] and [`apply_binary`]
//! (and their `_into` variants, which write into a caller-owned output).
//!
//! Broadcasting rule: bare numbers act as tensors of all-ones shape. Tensors
//! of lower rank are promoted by prepending length-1 axes. At every axis the
//! lengths must then be equal, or one of them must be 1, in which case that
//! operand is replicated along the axis.
//!
//! A tensor of the empty shape `[]` holds no elements, so it is lifted with
//! length 0 on every axis instead: it only broadcasts against shapes whose
//! lengths are 0 or 1, and the result is then empty.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::shape::{broadcast_shape, promote_rank};
use crate::strides::{compute_strides, enumerate_indices};
use crate::tensor::Tensor;

/// Argument of an element-wise operation: a bare number or a tensor.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, ElT: Scalar = f64> {
    Scalar(ElT),
    Tensor(&'a Tensor<ElT>),
}

impl<'a, ElT: Scalar> From<&'a Tensor<ElT>> for Operand<'a, ElT> {
    fn from(tensor: &'a Tensor<ElT>) -> Self {
        Operand::Tensor(tensor)
    }
}

impl From<f64> for Operand<'_, f64> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<f32> for Operand<'_, f32> {
    fn from(value: f32) -> Self {
        Operand::Scalar(value)
    }
}

impl<ElT: Scalar> Operand<'_, ElT> {
    /// Shape this operand takes on its own: `[1]` for a bare number.
    pub fn shape(&self) -> &[usize] {
        match self {
            Operand::Scalar(_) => &[1],
            Operand::Tensor(t) => t.shape(),
        }
    }
}

/// Operand lifted to the result rank, read through broadcast strides.
enum Lifted<'a, ElT: Scalar> {
    Scalar(ElT),
    Strided { data: &'a [ElT], strides: Vec<usize> },
}

impl<'a, ElT: Scalar> Lifted<'a, ElT> {
    fn new(operand: &Operand<'a, ElT>, rank: usize) -> Self {
        match *operand {
            Operand::Scalar(value) => Lifted::Scalar(value),
            Operand::Tensor(t) => {
                let shape = lift_shape(t, rank);
                let strides = compute_strides(&shape)
                    .into_iter()
                    .zip(shape.iter())
                    .map(|(stride, &len)| if len == 1 { 0 } else { stride })
                    .collect();
                Lifted::Strided {
                    data: t.data(),
                    strides,
                }
            }
        }
    }

    #[inline]
    fn at(&self, index: &[usize]) -> ElT {
        match self {
            Lifted::Scalar(value) => *value,
            Lifted::Strided { data, strides } => {
                let offset: usize = index.iter().zip(strides.iter()).map(|(&i, &s)| i * s).sum();
                data[offset]
            }
        }
    }
}

/// Shape of a tensor operand seen at the result rank.
fn lift_shape<ElT: Scalar>(tensor: &Tensor<ElT>, rank: usize) -> Vec<usize> {
    if tensor.ndim() == 0 {
        vec![0; rank]
    } else {
        promote_rank(tensor.shape(), rank)
    }
}

/// Result shape of a binary element-wise operation.
///
/// # Errors
///
/// Returns `TensorError::BroadcastMismatch` if the shapes are incompatible.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::{Operand, broadcast_result_shape};
///
/// let a: Tensor = Tensor::zeros(&[2, 3]);
/// let c: Tensor = Tensor::zeros(&[3]);
/// let shape = broadcast_result_shape(&Operand::from(&a), &Operand::from(&c)).unwrap();
/// assert_eq!(shape, vec![2, 3]);
/// ```
pub fn broadcast_result_shape<ElT: Scalar>(
    a: &Operand<'_, ElT>,
    b: &Operand<'_, ElT>,
) -> Result<Vec<usize>, TensorError> {
    match (a, b) {
        (Operand::Scalar(_), Operand::Scalar(_)) => Ok(vec![1]),
        (Operand::Tensor(t), Operand::Scalar(_)) | (Operand::Scalar(_), Operand::Tensor(t)) => {
            Ok(t.shape().to_vec())
        }
        (Operand::Tensor(x), Operand::Tensor(y)) => {
            let rank = x.ndim().max(y.ndim());
            if x.ndim() != y.ndim() {
                log::trace!(
                    "broadcast: promoting shapes {:?} and {:?} to rank {}",
                    x.shape(),
                    y.shape(),
                    rank
                );
            }
            let xs = lift_shape(x, rank);
            let ys = lift_shape(y, rank);
            broadcast_shape(&xs, &ys).map_err(|_| TensorError::BroadcastMismatch {
                lhs: x.shape().to_vec(),
                rhs: y.shape().to_vec(),
            })
        }
    }
}

fn check_output<ElT: Scalar>(out: &Tensor<ElT>, expected: &[usize]) -> Result<(), TensorError> {
    if out.shape() != expected {
        return Err(TensorError::OutputShapeMismatch {
            expected: expected.to_vec(),
            actual: out.shape().to_vec(),
        });
    }
    Ok(())
}

/// Apply `f` element-wise to one operand, returning a new tensor.
///
/// A bare number produces a tensor of shape `[1]`.
///
/// # Example
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::apply_unary;
///
/// let t = Tensor::from_vec(vec![1.0, 4.0, 9.0], &[3]).unwrap();
/// let r = apply_unary(&t, |x: f64| x.sqrt());
/// assert_eq!(r.data(), &[1.0, 2.0, 3.0]);
/// ```
pub fn apply_unary<'a, ElT, A, F>(a: A, f: F) -> Tensor<ElT>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
    F: Fn(ElT) -> ElT,
{
    match a.into() {
        Operand::Scalar(value) => Tensor::scalar(f(value)),
        Operand::Tensor(t) => {
            let mut out = Tensor::zeros(t.shape());
            unary_kernel(t.data(), out.data_mut(), &f);
            out
        }
    }
}

/// Apply `f` element-wise to one operand, writing into `out`.
///
/// # Errors
///
/// Returns `TensorError::OutputShapeMismatch` if `out` does not have the
/// operand's shape. `out` is untouched on error.
pub fn apply_unary_into<'a, ElT, A, F>(a: A, out: &mut Tensor<ElT>, f: F) -> Result<(), TensorError>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
    F: Fn(ElT) -> ElT,
{
    let a = a.into();
    check_output(out, a.shape())?;
    match a {
        Operand::Scalar(value) => out.data_mut()[0] = f(value),
        Operand::Tensor(t) => unary_kernel(t.data(), out.data_mut(), &f),
    }
    Ok(())
}

fn unary_kernel<ElT: Scalar, F: Fn(ElT) -> ElT>(src: &[ElT], dest: &mut [ElT], f: &F) {
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d = f(s);
    }
}

/// Combine two operands element-wise with broadcasting.
///
/// # Errors
///
/// Returns `TensorError::BroadcastMismatch` if the shapes are incompatible.
///
/// # Example
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::apply_binary;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let col = Tensor::from_vec(vec![10.0, 20.0], &[2, 1]).unwrap();
/// let r = apply_binary(&a, &col, |x, y| x + y).unwrap();
/// assert_eq!(r.data(), &[11.0, 12.0, 13.0, 24.0, 25.0, 26.0]);
/// ```
pub fn apply_binary<'a, 'b, ElT, A, B, F>(a: A, b: B, f: F) -> Result<Tensor<ElT>, TensorError>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
    B: Into<Operand<'b, ElT>>,
    F: Fn(ElT, ElT) -> ElT,
{
    let (a, b) = (a.into(), b.into());
    let shape = broadcast_result_shape(&a, &b)?;
    let mut out = Tensor::zeros(&shape);
    binary_kernel(&a, &b, &mut out, &f);
    Ok(out)
}

/// Combine two operands element-wise with broadcasting, writing into `out`.
///
/// # Errors
///
/// Returns `TensorError::BroadcastMismatch` if the operands are incompatible
/// and `TensorError::OutputShapeMismatch` if `out` does not have the
/// broadcast shape. `out` is untouched on error.
pub fn apply_binary_into<'a, 'b, ElT, A, B, F>(
    a: A,
    b: B,
    out: &mut Tensor<ElT>,
    f: F,
) -> Result<(), TensorError>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
    B: Into<Operand<'b, ElT>>,
    F: Fn(ElT, ElT) -> ElT,
{
    let (a, b) = (a.into(), b.into());
    let shape = broadcast_result_shape(&a, &b)?;
    check_output(out, &shape)?;
    binary_kernel(&a, &b, out, &f);
    Ok(())
}

fn binary_kernel<ElT, F>(a: &Operand<'_, ElT>, b: &Operand<'_, ElT>, out: &mut Tensor<ElT>, f: &F)
where
    ElT: Scalar,
    F: Fn(ElT, ElT) -> ElT,
{
    let rank = out.ndim();
    let lhs = Lifted::new(a, rank);
    let rhs = Lifted::new(b, rank);
    let shape = out.shape().to_vec();
    let dest = out.data_mut();
    for (linear, idx) in enumerate_indices(&shape).enumerate() {
        dest[linear] = f(lhs.at(&idx), rhs.at(&idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn a23() -> Tensor {
        Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap()
    }

    #[test]
    fn test_operand_shape() {
        let t = a23();
        assert_eq!(Operand::from(2.0_f64).shape(), &[1]);
        assert_eq!(Operand::from(&t).shape(), &[2, 3]);
    }

    #[test]
    fn test_binary_same_shape() {
        let b = Tensor::from_vec(vec![2.0, 1.0, 3.0, 3.0, 4.0, 0.0], &[2, 3]).unwrap();
        let r = apply_binary(&a23(), &b, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.data(), &[3.0, 3.0, 6.0, 7.0, 9.0, 6.0]);
    }

    #[test]
    fn test_binary_scalars() {
        let r = apply_binary(10.0_f64, 21.0, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[1]);
        assert_eq!(r.item().unwrap(), 31.0);
    }

    #[test]
    fn test_binary_scalar_and_tensor() {
        let r = apply_binary(&a23(), 1.0, |x, y| x + y).unwrap();
        assert_eq!(r.data(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let r = apply_binary(1.0, &a23(), |x, y| x - y).unwrap();
        assert_eq!(r.data(), &[0.0, -1.0, -2.0, -3.0, -4.0, -5.0]);
    }

    #[test]
    fn test_binary_column_broadcast() {
        let c = Tensor::from_vec(vec![1.0, 2.0], &[2, 1]).unwrap();
        let r = apply_binary(&a23(), &c, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.get(&[0, 0]).unwrap(), 2.0);
        assert_eq!(r.get(&[1, 1]).unwrap(), 7.0);
    }

    #[test]
    fn test_binary_both_sides_broadcast() {
        let col = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3, 1]).unwrap();
        let row = Tensor::from_vec(vec![10.0, 20.0], &[1, 2]).unwrap();
        let r = apply_binary(&col, &row, |x, y| x * y).unwrap();
        assert_eq!(r.shape(), &[3, 2]);
        assert_eq!(r.data(), &[10.0, 20.0, 20.0, 40.0, 30.0, 60.0]);
    }

    #[test]
    fn test_binary_rank_promotion() {
        let row = Tensor::from_vec(vec![10.0, 20.0, 30.0], &[3]).unwrap();
        let r = apply_binary(&a23(), &row, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.data(), &[11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);

        let bad = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let err = apply_binary(&a23(), &bad, |x, y| x + y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_binary_incompatible() {
        let b: Tensor = Tensor::zeros(&[3, 2]);
        let err = apply_binary(&a23(), &b, |x, y| x + y).unwrap_err();
        assert!(matches!(err, TensorError::BroadcastMismatch { .. }));
    }

    #[test]
    fn test_binary_into() {
        let c = Tensor::from_vec(vec![1.0, 2.0], &[2, 1]).unwrap();
        let expected = apply_binary(&a23(), &c, |x, y| x + y).unwrap();
        let mut out = Tensor::zeros(&[2, 3]);
        apply_binary_into(&a23(), &c, &mut out, |x, y| x + y).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_binary_into_wrong_shape_untouched() {
        let mut out = Tensor::full(&[3, 2], -1.0);
        let err = apply_binary_into(&a23(), 1.0, &mut out, |x, y| x + y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert!(out.data().iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_unary() {
        let r = apply_unary(&a23(), |x| -x);
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.data(), &[-1.0, -2.0, -3.0, -4.0, -5.0, -6.0]);

        let s = apply_unary(3.0_f64, |x| x * 2.0);
        assert_eq!(s.shape(), &[1]);
        assert_eq!(s.item().unwrap(), 6.0);
    }

    #[test]
    fn test_unary_into() {
        let mut out: Tensor = Tensor::zeros(&[2, 3]);
        apply_unary_into(&a23(), &mut out, |x| x * x).unwrap();
        assert_eq!(out.data(), &[1.0, 4.0, 9.0, 16.0, 25.0, 36.0]);

        let mut wrong: Tensor = Tensor::zeros(&[6]);
        assert!(apply_unary_into(&a23(), &mut wrong, |x| x).is_err());
    }

    #[test]
    fn test_empty_operands() {
        let e: Tensor = Tensor::zeros(&[0, 3]);
        let r = apply_binary(&e, 1.0, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[0, 3]);
        let row: Tensor = Tensor::zeros(&[1, 3]);
        let r = apply_binary(&e, &row, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[0, 3]);
    }

    #[test]
    fn test_empty_shape_operand() {
        let none: Tensor = Tensor::zeros(&[]);

        let err = apply_binary(&a23(), &none, |x, y| x + y).unwrap_err();
        assert!(matches!(err, TensorError::BroadcastMismatch { .. }));
        let err = apply_binary(&none, &a23(), |x, y| x + y).unwrap_err();
        assert!(matches!(err, TensorError::BroadcastMismatch { .. }));

        let one = Tensor::from_vec(vec![4.0], &[1, 1]).unwrap();
        let r = apply_binary(&one, &none, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[0, 0]);
        assert!(r.is_empty());

        let r = apply_binary(&none, &none, |x, y| x + y).unwrap();
        assert_eq!(r.shape(), &[] as &[usize]);
        assert!(r.is_empty());

        let r = apply_binary(&none, 2.0_f64, |x, y| x * y).unwrap();
        assert!(r.is_empty());
        assert!(apply_unary(&none, |x| x + 1.0).is_empty());
    }

    #[test]
    fn test_empty_shape_operand_into() {
        let none: Tensor = Tensor::zeros(&[]);
        let mut out = Tensor::full(&[2, 3], 7.0);
        assert!(apply_binary_into(&a23(), &none, &mut out, |x, y| x + y).is_err());
        assert!(out.data().iter().all(|&x| x == 7.0));

        let mut empty: Tensor = Tensor::zeros(&[0]);
        apply_binary_into(1.0_f64, &none, &mut empty, |x, y| x + y).unwrap_err();
        let mut same: Tensor = Tensor::zeros(&[]);
        apply_binary_into(1.0_f64, &none, &mut same, |x, y| x + y).unwrap();
        assert!(same.is_empty());
    }
}
