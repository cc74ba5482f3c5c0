//! Constructors from nested literals and integer ranges.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// A nested sequence of values, one nesting level per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<ElT> {
    Scalar(ElT),
    List(Vec<Nested<ElT>>),
}

impl<ElT: Scalar> From<Vec<ElT>> for Nested<ElT> {
    fn from(values: Vec<ElT>) -> Self {
        Nested::List(values.into_iter().map(Nested::Scalar).collect())
    }
}

impl<ElT: Scalar> From<Vec<Vec<ElT>>> for Nested<ElT> {
    fn from(rows: Vec<Vec<ElT>>) -> Self {
        Nested::List(rows.into_iter().map(Nested::from).collect())
    }
}

impl<ElT: Scalar> From<Vec<Vec<Vec<ElT>>>> for Nested<ElT> {
    fn from(planes: Vec<Vec<Vec<ElT>>>) -> Self {
        Nested::List(planes.into_iter().map(Nested::from).collect())
    }
}

impl<ElT: Scalar> Nested<ElT> {
    /// Shape of the nesting, failing on ragged levels.
    fn shape(&self) -> Result<Vec<usize>, TensorError> {
        match self {
            Nested::Scalar(_) => Ok(Vec::new()),
            Nested::List(items) => {
                let Some(first) = items.first() else {
                    return Ok(vec![0]);
                };
                let inner = first.shape()?;
                for item in &items[1..] {
                    let other = item.shape()?;
                    if other != inner {
                        return Err(TensorError::invalid_argument(format!(
                            "ragged nesting: sibling shapes {inner:?} and {other:?}"
                        )));
                    }
                }
                let mut shape = Vec::with_capacity(inner.len() + 1);
                shape.push(items.len());
                shape.extend(inner);
                Ok(shape)
            }
        }
    }

    fn flatten_into(self, out: &mut Vec<ElT>) {
        match self {
            Nested::Scalar(value) => out.push(value),
            Nested::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl<ElT: Scalar> Tensor<ElT> {
    /// Build a tensor from nested sequences, inferring the shape.
    ///
    /// A bare value gives shape `[1]`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidArgument` if sibling sequences differ in
    /// length or depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t: Tensor = Tensor::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert_eq!(t.get(&[1, 0]).unwrap(), 4.0);
    ///
    /// let ragged = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0, 7.0]]);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_nested(nested: impl Into<Nested<ElT>>) -> Result<Self, TensorError> {
        let nested = nested.into();
        let mut shape = nested.shape()?;
        if shape.is_empty() {
            shape.push(1);
        }
        let mut data = Vec::with_capacity(shape.iter().product());
        nested.flatten_into(&mut data);
        Self::from_vec(data, &shape)
    }

    /// One-dimensional tensor holding `range(start, end, step)`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidRange` if `step` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t: Tensor = Tensor::arange(0, 24, 1).unwrap().reshape(&[4, 6]).unwrap();
    /// assert_eq!(t.get(&[1, 2]).unwrap(), 8.0);
    /// ```
    pub fn arange(start: i64, end: i64, step: i64) -> Result<Self, TensorError> {
        let values = range(start, end, step)?
            .into_iter()
            .map(|n| {
                num_traits::cast::<i64, ElT>(n).ok_or_else(|| {
                    TensorError::invalid_argument(format!("{n} is not representable"))
                })
            })
            .collect::<Result<Vec<ElT>, _>>()?;
        let len = values.len();
        Self::from_vec(values, &[len])
    }
}

/// Integers from `start` towards `end` (exclusive) in increments of `step`.
///
/// A negative `step` counts down. An empty sequence is returned when `end`
/// lies behind `start` in the direction of travel.
///
/// # Errors
///
/// Returns `TensorError::InvalidRange` if `step` is zero.
///
/// # Examples
///
/// ```
/// use ndcore::creation::range;
///
/// assert_eq!(range(0, 5, 1).unwrap(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(range(5, 0, -2).unwrap(), vec![5, 3, 1]);
/// assert!(range(0, 5, 0).is_err());
/// ```
pub fn range(start: i64, end: i64, step: i64) -> Result<Vec<i64>, TensorError> {
    if step == 0 {
        return Err(TensorError::InvalidRange);
    }
    let mut values = Vec::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        values.push(i);
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(values)
}
