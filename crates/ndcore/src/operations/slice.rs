//! Tensor slicing operations.
//!
//! Each source axis receives a [`SliceArg`]: a single index (the axis is
//! dropped from the result), a [`SliceRange`], the full-axis wildcard
//! [`SliceArg::All`], or [`SliceArg::NewAxis`], which inserts a length-1 axis
//! without consuming a source axis. Axes left unspecified at the end take the
//! full range.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::enumerate_indices;
use crate::tensor::Tensor;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A `(start, end, step)` range with optional bounds.
///
/// Negative `start`/`end` count from the end of the axis. Missing bounds
/// select from the first (or, for a negative step, the last) element to the
/// end of the axis in the direction of travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceRange {
    pub start: Option<isize>,
    pub end: Option<isize>,
    pub step: Option<isize>,
}

impl SliceRange {
    /// The range selecting every element of an axis.
    pub const FULL: SliceRange = SliceRange {
        start: None,
        end: None,
        step: None,
    };

    /// Range `start..end` with step 1.
    pub fn new(start: isize, end: isize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            step: None,
        }
    }

    /// Range from `start` to the end of the axis.
    pub fn from_start(start: isize) -> Self {
        Self {
            start: Some(start),
            ..Self::FULL
        }
    }

    /// Range from the beginning of the axis up to `end`.
    pub fn until(end: isize) -> Self {
        Self {
            end: Some(end),
            ..Self::FULL
        }
    }

    /// Replace the step.
    pub fn with_step(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Resolve the range against an axis of length `len`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidRange` if the step is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::operations::SliceRange;
    ///
    /// let t = SliceRange::new(1, 4).with_step(2).resolve(6).unwrap();
    /// assert_eq!(t.positions().collect::<Vec<_>>(), vec![1, 3]);
    ///
    /// let rev = SliceRange::FULL.with_step(-1).resolve(3).unwrap();
    /// assert_eq!(rev.positions().collect::<Vec<_>>(), vec![2, 1, 0]);
    /// ```
    pub fn resolve(&self, len: usize) -> Result<Traversal, TensorError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(TensorError::InvalidRange);
        }
        let n = len as isize;
        // Bounds of the clipped positions, in the direction of travel.
        let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
        let clip = |bound: isize| {
            let bound = if bound < 0 { bound + n } else { bound };
            bound.clamp(lower, upper)
        };

        let start = match self.start {
            Some(s) => clip(s),
            None if step > 0 => lower,
            None => upper,
        };
        let end = match self.end {
            Some(e) => clip(e),
            None if step > 0 => upper,
            None => lower,
        };

        // Both bounds lie in [-1, len], so the span cannot overflow.
        let span = if step > 0 { end - start } else { start - end };
        let len = if span > 0 {
            (span as usize - 1) / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(Traversal {
            start: start.max(0) as usize,
            step,
            len,
        })
    }
}

/// The resolved positions visited along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    start: usize,
    step: isize,
    len: usize,
}

impl Traversal {
    /// Number of positions visited.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no position is visited.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Source position of the `k`-th visited element.
    ///
    /// `k` must be less than [`len`](Traversal::len).
    #[inline]
    pub fn position(&self, k: usize) -> usize {
        debug_assert!(k < self.len);
        let offset = k * self.step.unsigned_abs();
        if self.step > 0 {
            self.start + offset
        } else {
            self.start - offset
        }
    }

    /// All visited positions in order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |k| self.position(k))
    }

    fn is_identity(&self, axis_len: usize) -> bool {
        self.start == 0 && self.step == 1 && self.len == axis_len
    }
}

/// Per-axis slice specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceArg {
    /// Select one position; the axis is removed from the result.
    Index(isize),
    /// Select a range of positions.
    Range(SliceRange),
    /// Select the whole axis.
    All,
    /// Insert a new length-1 axis.
    NewAxis,
}

impl From<isize> for SliceArg {
    fn from(index: isize) -> Self {
        SliceArg::Index(index)
    }
}

impl From<SliceRange> for SliceArg {
    fn from(range: SliceRange) -> Self {
        SliceArg::Range(range)
    }
}

impl From<Range<isize>> for SliceArg {
    fn from(range: Range<isize>) -> Self {
        SliceArg::Range(SliceRange::new(range.start, range.end))
    }
}

impl From<RangeFrom<isize>> for SliceArg {
    fn from(range: RangeFrom<isize>) -> Self {
        SliceArg::Range(SliceRange::from_start(range.start))
    }
}

impl From<RangeTo<isize>> for SliceArg {
    fn from(range: RangeTo<isize>) -> Self {
        SliceArg::Range(SliceRange::until(range.end))
    }
}

impl From<RangeFull> for SliceArg {
    fn from(_: RangeFull) -> Self {
        SliceArg::All
    }
}

fn resolve_index(index: isize, len: usize) -> Result<Traversal, TensorError> {
    let n = len as isize;
    let resolved = if index < 0 { index + n } else { index };
    if resolved < 0 || resolved >= n {
        return Err(TensorError::IndexOutOfBounds {
            index,
            dim_size: len,
        });
    }
    Ok(Traversal {
        start: resolved as usize,
        step: 1,
        len: 1,
    })
}

/// Extract a sub-tensor.
///
/// This creates a copy of the selected data (not a view). Integer indices
/// drop their axis, `NewAxis` entries insert length-1 axes at their position,
/// and missing trailing axes are taken whole. A result with every axis
/// dropped has shape `[1]`. A source of the empty shape `[]` has no elements
/// and is returned unchanged.
///
/// # Errors
///
/// - `TensorError::TooManySliceArgs` if more axes are addressed than exist
/// - `TensorError::IndexOutOfBounds` for an integer index outside its axis
/// - `TensorError::InvalidRange` for a zero step
///
/// # Example
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::{SliceArg, SliceRange, slice};
///
/// let data = vec![
///     1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
///     7.0, 8.0, 9.0, 0.0, 1.0, 2.0,
///     3.0, 4.0, 5.0, 6.0, 7.0, 8.0,
///     9.0, 0.0, 1.0, 2.0, 3.0, 4.0,
/// ];
/// let t = Tensor::from_vec(data, &[4, 6]).unwrap();
/// let s = slice(&t, &[
///     SliceArg::Range(SliceRange::new(1, 3)),
///     SliceArg::Range(SliceRange::new(1, 4).with_step(2)),
/// ]).unwrap();
/// assert_eq!(s.shape(), &[2, 2]);
/// assert_eq!(s.data(), &[8.0, 0.0, 4.0, 6.0]);
/// ```
pub fn slice<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    args: &[SliceArg],
) -> Result<Tensor<ElT>, TensorError> {
    let shape = tensor.shape();
    let ndim = tensor.ndim();

    let consumed = args
        .iter()
        .filter(|arg| !matches!(arg, SliceArg::NewAxis))
        .count();
    if consumed > ndim {
        return Err(TensorError::TooManySliceArgs {
            given: consumed,
            ndim,
        });
    }

    if ndim == 0 {
        // Nothing to select, and a new length-1 axis would need an element.
        return Ok(tensor.clone());
    }

    // Resolve every specifier before touching any data.
    let mut traversals = Vec::with_capacity(ndim);
    let mut new_shape = Vec::with_capacity(args.len() + ndim - consumed);
    for arg in args {
        let axis = traversals.len();
        match arg {
            SliceArg::NewAxis => new_shape.push(1),
            SliceArg::Index(index) => traversals.push(resolve_index(*index, shape[axis])?),
            SliceArg::Range(range) => {
                let traversal = range.resolve(shape[axis])?;
                new_shape.push(traversal.len());
                traversals.push(traversal);
            }
            SliceArg::All => {
                let traversal = SliceRange::FULL.resolve(shape[axis])?;
                new_shape.push(traversal.len());
                traversals.push(traversal);
            }
        }
    }
    for &len in &shape[traversals.len()..] {
        let traversal = SliceRange::FULL.resolve(len)?;
        new_shape.push(traversal.len());
        traversals.push(traversal);
    }

    let identity = traversals
        .iter()
        .zip(shape.iter())
        .all(|(t, &len)| t.is_identity(len));
    let data = if identity {
        log::trace!("slice: every axis taken whole, copying buffer");
        tensor.data().to_vec()
    } else {
        gather(tensor, &traversals)
    };

    if new_shape.is_empty() && data.len() == 1 {
        new_shape.push(1);
    }
    Tensor::from_vec(data, &new_shape)
}

/// Copy the cross product of per-axis traversals in row-major order.
fn gather<ElT: Scalar>(tensor: &Tensor<ElT>, traversals: &[Traversal]) -> Vec<ElT> {
    let counts: Vec<usize> = traversals.iter().map(Traversal::len).collect();
    let strides = tensor.strides();
    let src = tensor.data();

    enumerate_indices(&counts)
        .map(|idx| {
            let offset: usize = idx
                .iter()
                .zip(traversals.iter())
                .zip(strides.iter())
                .map(|((&k, traversal), &stride)| traversal.position(k) * stride)
                .sum();
            src[offset]
        })
        .collect()
}
