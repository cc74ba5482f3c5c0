//! Reductions over axis subsets.
//!
//! ```text
//! sum / mean / min_along / max_along (tensor, axes)
//!     → resolve axes (range + uniqueness)
//!     → no axes:  identity copy
//!     → all axes: shape [1] holding the fold of the whole buffer
//!     → else:     fold every source element into the cell addressed by its
//!                 remaining sub-index
//!
//! argmin / argmax (tensor, axis)
//!     → scan each fibre along `axis`, first extremum wins
//! ```

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::shape::shape_product;
use crate::strides::{cartesian_to_linear, compute_strides, enumerate_indices};
use crate::tensor::Tensor;

/// Axis selector for reductions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Axes {
    /// Reduce over every axis.
    #[default]
    All,
    /// Reduce over the listed axes; an empty list reduces nothing.
    List(Vec<usize>),
}

impl From<usize> for Axes {
    fn from(axis: usize) -> Self {
        Axes::List(vec![axis])
    }
}

impl<const N: usize> From<[usize; N]> for Axes {
    fn from(axes: [usize; N]) -> Self {
        Axes::List(axes.to_vec())
    }
}

impl From<&[usize]> for Axes {
    fn from(axes: &[usize]) -> Self {
        Axes::List(axes.to_vec())
    }
}

impl From<Vec<usize>> for Axes {
    fn from(axes: Vec<usize>) -> Self {
        Axes::List(axes)
    }
}

/// How a resolved axis selection reduces a particular tensor.
enum Plan {
    Identity,
    Whole,
    Partial { reduced: Vec<bool> },
}

impl Axes {
    fn plan(&self, ndim: usize) -> Result<Plan, TensorError> {
        let list = match self {
            Axes::All => return Ok(Plan::Whole),
            Axes::List(list) => list,
        };
        let mut reduced = vec![false; ndim];
        for &axis in list {
            if axis >= ndim {
                return Err(TensorError::InvalidAxis { axis, ndim });
            }
            if reduced[axis] {
                return Err(TensorError::DuplicateAxis { axis });
            }
            reduced[axis] = true;
        }
        Ok(if list.is_empty() {
            Plan::Identity
        } else if list.len() == ndim {
            Plan::Whole
        } else {
            Plan::Partial { reduced }
        })
    }
}

/// Fold every element into its result cell, starting each cell at `init`.
fn fold<ElT, F>(tensor: &Tensor<ElT>, plan: &Plan, init: ElT, f: F) -> Tensor<ElT>
where
    ElT: Scalar,
    F: Fn(ElT, ElT) -> ElT,
{
    match plan {
        Plan::Identity => tensor.clone(),
        Plan::Whole => Tensor::scalar(tensor.data().iter().fold(init, |acc, &x| f(acc, x))),
        Plan::Partial { reduced } => {
            let kept: Vec<usize> = kept_shape(tensor.shape(), reduced);
            let kept_strides = compute_strides(&kept);
            // Stride of each source axis in the result; reduced axes collapse.
            let mut scattered = vec![0usize; reduced.len()];
            let mut k = 0;
            for (axis, &is_reduced) in reduced.iter().enumerate() {
                if !is_reduced {
                    scattered[axis] = kept_strides[k];
                    k += 1;
                }
            }

            let mut out = Tensor::full(&kept, init);
            let src = tensor.data();
            let dest = out.data_mut();
            for (linear, idx) in enumerate_indices(tensor.shape()).enumerate() {
                let cell = cartesian_to_linear(&idx, &scattered);
                dest[cell] = f(dest[cell], src[linear]);
            }
            out
        }
    }
}

fn kept_shape(shape: &[usize], reduced: &[bool]) -> Vec<usize> {
    shape
        .iter()
        .zip(reduced.iter())
        .filter(|&(_, &r)| !r)
        .map(|(&len, _)| len)
        .collect()
}

fn result_size(tensor: &Tensor<impl Scalar>, plan: &Plan) -> usize {
    match plan {
        Plan::Identity => tensor.size(),
        Plan::Whole => 1,
        Plan::Partial { reduced } => shape_product(&kept_shape(tensor.shape(), reduced)),
    }
}

/// Sum over the selected axes.
///
/// Reducing every axis yields a tensor of shape `[1]`; otherwise the result
/// keeps the remaining axes in their original order.
///
/// # Errors
///
/// Returns `TensorError::InvalidAxis` or `TensorError::DuplicateAxis` for a
/// bad axis list.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::{Axes, sum};
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// assert_eq!(sum(&t, Axes::All).unwrap().item().unwrap(), 21.0);
/// assert_eq!(sum(&t, 0).unwrap().data(), &[5.0, 7.0, 9.0]);
/// assert_eq!(sum(&t, 1).unwrap().data(), &[6.0, 15.0]);
/// ```
pub fn sum<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axes: impl Into<Axes>,
) -> Result<Tensor<ElT>, TensorError> {
    let plan = axes.into().plan(tensor.ndim())?;
    Ok(fold(tensor, &plan, ElT::zero(), |acc, x| acc + x))
}

/// Arithmetic mean over the selected axes.
///
/// Each cell of the sum is divided by the number of source elements folded
/// into it. An empty source returns the (empty) sum undivided.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::mean;
///
/// let t = Tensor::from_vec((1..=12).map(f64::from).collect(), &[3, 4]).unwrap();
/// assert_eq!(mean(&t, 1).unwrap().data(), &[2.5, 6.5, 10.5]);
/// ```
pub fn mean<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axes: impl Into<Axes>,
) -> Result<Tensor<ElT>, TensorError> {
    let plan = axes.into().plan(tensor.ndim())?;
    let total = fold(tensor, &plan, ElT::zero(), |acc, x| acc + x);
    if tensor.is_empty() {
        return Ok(total);
    }
    let count = ElT::from_usize(tensor.size() / result_size(tensor, &plan));
    let mut out = total;
    for x in out.data_mut() {
        *x = *x / count;
    }
    Ok(out)
}

fn min_step<ElT: Scalar>(acc: ElT, x: ElT) -> ElT {
    if acc.is_nan() || !(x.is_nan() || x < acc) {
        acc
    } else {
        x
    }
}

fn max_step<ElT: Scalar>(acc: ElT, x: ElT) -> ElT {
    if acc.is_nan() || !(x.is_nan() || x > acc) {
        acc
    } else {
        x
    }
}

fn extremum<ElT, F>(
    tensor: &Tensor<ElT>,
    axes: Axes,
    op: &'static str,
    init: ElT,
    step: F,
) -> Result<Tensor<ElT>, TensorError>
where
    ElT: Scalar,
    F: Fn(ElT, ElT) -> ElT,
{
    let plan = axes.plan(tensor.ndim())?;
    if tensor.is_empty() && result_size(tensor, &plan) > 0 {
        return Err(TensorError::EmptyReduction { op });
    }
    Ok(fold(tensor, &plan, init, step))
}

/// Smallest element, as a tensor of shape `[1]`.
///
/// A NaN element makes the result NaN.
///
/// # Errors
///
/// Returns `TensorError::EmptyReduction` for a tensor without elements.
pub fn min<ElT: Scalar>(tensor: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    min_along(tensor, Axes::All)
}

/// Largest element, as a tensor of shape `[1]`.
///
/// # Errors
///
/// Returns `TensorError::EmptyReduction` for a tensor without elements.
pub fn max<ElT: Scalar>(tensor: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    max_along(tensor, Axes::All)
}

/// Minimum over the selected axes, with the shape rules of [`sum`].
///
/// # Errors
///
/// Axis errors as for [`sum`]; `TensorError::EmptyReduction` when a result
/// cell would have no source elements.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::min_along;
///
/// let t = Tensor::from_vec(vec![2.0, 1.0, 3.0, 4.0, 2.0, 1.0], &[2, 3]).unwrap();
/// assert_eq!(min_along(&t, 0).unwrap().data(), &[2.0, 1.0, 1.0]);
/// ```
pub fn min_along<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axes: impl Into<Axes>,
) -> Result<Tensor<ElT>, TensorError> {
    extremum(tensor, axes.into(), "min", ElT::infinity(), min_step)
}

/// Maximum over the selected axes, with the shape rules of [`sum`].
///
/// # Errors
///
/// As for [`min_along`].
pub fn max_along<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    axes: impl Into<Axes>,
) -> Result<Tensor<ElT>, TensorError> {
    extremum(tensor, axes.into(), "max", ElT::neg_infinity(), max_step)
}

/// Scan every fibre along `axis`, storing the winning position as a value.
fn arg_extremum<ElT, F>(
    tensor: &Tensor<ElT>,
    axis: usize,
    op: &'static str,
    better: F,
) -> Result<Tensor<ElT>, TensorError>
where
    ElT: Scalar,
    F: Fn(ElT, ElT) -> bool,
{
    let ndim = tensor.ndim();
    if axis >= ndim {
        return Err(TensorError::InvalidAxis { axis, ndim });
    }
    let len = tensor.shape()[axis];
    if len == 0 {
        return Err(TensorError::EmptyReduction { op });
    }

    let mut outer = tensor.shape().to_vec();
    outer[axis] = 1;
    let mut kept: Vec<usize> = outer.clone();
    kept.remove(axis);
    if kept.is_empty() {
        kept.push(1);
    }

    let src = tensor.data();
    let stride = tensor.strides()[axis];
    let mut out = Tensor::zeros(&kept);
    let dest = out.data_mut();
    // `outer` has the same row-major order as the result shape.
    for (cell, idx) in enumerate_indices(&outer).enumerate() {
        let base = cartesian_to_linear(&idx, tensor.strides());
        let mut best = 0;
        let mut best_value = src[base];
        for k in 1..len {
            if best_value.is_nan() {
                break;
            }
            let value = src[base + k * stride];
            if value.is_nan() || better(value, best_value) {
                best = k;
                best_value = value;
            }
        }
        dest[cell] = ElT::from_usize(best);
    }
    Ok(out)
}

/// Position of the smallest element along `axis`.
///
/// The result drops `axis` from the shape (`[1]` if nothing is left). Ties go
/// to the first position; the first NaN wins outright.
///
/// # Errors
///
/// Returns `TensorError::InvalidAxis` for an out-of-range axis and
/// `TensorError::EmptyReduction` if the axis has length zero.
///
/// # Examples
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::argmin;
///
/// let t = Tensor::from_vec(vec![2.0, 1.0, 3.0, 4.0, 2.0, 1.0], &[2, 3]).unwrap();
/// assert_eq!(argmin(&t, 0).unwrap().data(), &[0.0, 0.0, 1.0]);
/// assert_eq!(argmin(&t, 1).unwrap().data(), &[1.0, 2.0]);
/// ```
pub fn argmin<ElT: Scalar>(tensor: &Tensor<ElT>, axis: usize) -> Result<Tensor<ElT>, TensorError> {
    arg_extremum(tensor, axis, "argmin", |x, best| x < best)
}

/// Position of the largest element along `axis`; see [`argmin`].
pub fn argmax<ElT: Scalar>(tensor: &Tensor<ElT>, axis: usize) -> Result<Tensor<ElT>, TensorError> {
    arg_extremum(tensor, axis, "argmax", |x, best| x > best)
}
