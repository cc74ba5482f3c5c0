//! N-dimensional dense tensor type.
//!
//! A tensor is a flat [`Dense`] buffer addressed through a shape. The buffer
//! is laid out in row-major order and always holds exactly
//! `shape_product(shape)` elements.

use crate::error::TensorError;
use crate::operations::{self, SliceArg};
use crate::scalar::Scalar;
use crate::shape::shape_product;
use crate::storage::Dense;
use crate::strides::{MultiIndex, cartesian_to_linear, compute_strides};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dense n-dimensional tensor.
///
/// The shape is fixed at construction. Element values can be changed in place
/// through [`set`](Tensor::set), [`update`](Tensor::update) and
/// [`data_mut`](Tensor::data_mut); every shape-changing operation returns a
/// new tensor with its own buffer.
///
/// With the `serde` feature, deserialization goes through
/// [`from_vec`](Tensor::from_vec): a buffer whose length disagrees with the
/// shape, or strides other than the row-major ones, are rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TensorRepr<ElT>"))]
pub struct Tensor<ElT: Scalar = f64> {
    storage: Dense<ElT>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Unchecked wire form of a [`Tensor`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TensorRepr<ElT: Scalar> {
    storage: Dense<ElT>,
    shape: Vec<usize>,
    #[serde(default)]
    strides: Option<Vec<usize>>,
}

#[cfg(feature = "serde")]
impl<ElT: Scalar> TryFrom<TensorRepr<ElT>> for Tensor<ElT> {
    type Error = TensorError;

    fn try_from(repr: TensorRepr<ElT>) -> Result<Self, TensorError> {
        let tensor = Tensor::from_vec(repr.storage.into_vec(), &repr.shape)?;
        match repr.strides {
            Some(strides) if strides != tensor.strides => {
                Err(TensorError::invalid_argument(format!(
                    "strides {strides:?} do not match row-major strides {:?} of shape {:?}",
                    tensor.strides, tensor.shape
                )))
            }
            _ => Ok(tensor),
        }
    }
}

/// Anything that can address a single element of a tensor.
///
/// Implemented for multi-indices (`&[usize]`, `[usize; N]`, `Vec<usize>`,
/// [`MultiIndex`]), whose length must equal the rank; for a bare `usize`, which
/// is shorthand for the one-element multi-index `[i]` and addresses offset
/// `i * strides[0]`; and for `()`, which addresses the first element.
pub trait TensorIndex {
    /// Resolve to a flat offset into a buffer of `len` elements.
    fn to_linear(&self, shape: &[usize], strides: &[usize], len: usize)
    -> Result<usize, TensorError>;
}

impl TensorIndex for [usize] {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        _len: usize,
    ) -> Result<usize, TensorError> {
        if self.len() != shape.len() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: shape.len(),
                actual: self.len(),
            });
        }
        for (&idx, &dim) in self.iter().zip(shape.iter()) {
            if idx >= dim {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx as isize,
                    dim_size: dim,
                });
            }
        }
        Ok(cartesian_to_linear(self, strides))
    }
}

impl<const N: usize> TensorIndex for [usize; N] {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        self.as_slice().to_linear(shape, strides, len)
    }
}

impl TensorIndex for Vec<usize> {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        self.as_slice().to_linear(shape, strides, len)
    }
}

impl TensorIndex for MultiIndex {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        self.as_slice().to_linear(shape, strides, len)
    }
}

impl TensorIndex for usize {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        let out_of_bounds = TensorError::IndexOutOfBounds {
            index: *self as isize,
            dim_size: shape.first().copied().unwrap_or(0),
        };
        let Some(&stride) = strides.first() else {
            return Err(out_of_bounds);
        };
        match self.checked_mul(stride) {
            Some(linear) if linear < len => Ok(linear),
            _ => Err(out_of_bounds),
        }
    }
}

impl TensorIndex for () {
    fn to_linear(
        &self,
        _shape: &[usize],
        _strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        if len == 0 {
            return Err(TensorError::IndexOutOfBounds {
                index: 0,
                dim_size: 0,
            });
        }
        Ok(0)
    }
}

impl<T: TensorIndex + ?Sized> TensorIndex for &T {
    fn to_linear(
        &self,
        shape: &[usize],
        strides: &[usize],
        len: usize,
    ) -> Result<usize, TensorError> {
        (**self).to_linear(shape, strides, len)
    }
}

impl<ElT: Scalar> Tensor<ElT> {
    /// Create a new tensor with the given shape, zero-initialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t: Tensor = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.size(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, ElT::zero())
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, ElT::one())
    }

    /// Create a tensor with every element set to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t = Tensor::full(&[3, 3], 2.0);
    /// assert_eq!(t.get(&[1, 0]).unwrap(), 2.0);
    /// assert_eq!(t.get(&[2, 2]).unwrap(), 2.0);
    /// ```
    pub fn full(shape: &[usize], value: ElT) -> Self {
        Self {
            storage: Dense::filled(shape_product(shape), value),
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Create a single-element tensor of shape `[1]`.
    pub fn scalar(value: ElT) -> Self {
        Self::full(&[1], value)
    }

    /// Create tensor from data and shape.
    ///
    /// Data is expected to be in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[0, 1]).unwrap(), 2.0); // Row-major: [0,1] is second element
    /// assert_eq!(t.get(&[1, 0]).unwrap(), 4.0);
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        let expected_len = shape_product(shape);
        if data.len() != expected_len {
            return Err(TensorError::ShapeMismatch {
                expected: expected_len,
                actual: data.len(),
            });
        }
        Ok(Self {
            storage: Dense::from_vec(data),
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        })
    }

    /// Get the shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the rank (number of dimensions).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Check if tensor is empty (has zero elements).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Get underlying data as slice.
    #[inline]
    pub fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    /// Get underlying data as mutable slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }

    /// Consume the tensor and return its flat buffer.
    pub fn into_vec(self) -> Vec<ElT> {
        self.storage.into_vec()
    }

    fn linear_index<I: TensorIndex>(&self, index: I) -> Result<usize, TensorError> {
        index.to_linear(&self.shape, &self.strides, self.storage.len())
    }

    /// Get an element.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::WrongNumberOfIndices` if a multi-index has the
    /// wrong length and `TensorError::IndexOutOfBounds` if it addresses a
    /// position outside the tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], &[2, 2, 2]).unwrap();
    /// assert_eq!(t.get(&[1, 1, 0]).unwrap(), 7.0);
    /// assert!(t.get(&[2, 0, 0]).is_err());
    ///
    /// let v = Tensor::from_vec(vec![4.0, 5.0], &[2]).unwrap();
    /// assert_eq!(v.get(1).unwrap(), 5.0);
    /// ```
    pub fn get<I: TensorIndex>(&self, index: I) -> Result<ElT, TensorError> {
        let linear = self.linear_index(index)?;
        Ok(self.storage[linear])
    }

    /// Set an element.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Tensor::get); nothing is written on error.
    pub fn set<I: TensorIndex>(&mut self, index: I, value: ElT) -> Result<(), TensorError> {
        let linear = self.linear_index(index)?;
        self.storage[linear] = value;
        Ok(())
    }

    /// Read-modify-write a single element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let mut t: Tensor = Tensor::ones(&[2, 2]);
    /// t.update(&[0, 1], |x| x + 41.0).unwrap();
    /// assert_eq!(t.get(&[0, 1]).unwrap(), 42.0);
    /// ```
    pub fn update<I, F>(&mut self, index: I, f: F) -> Result<(), TensorError>
    where
        I: TensorIndex,
        F: FnOnce(ElT) -> ElT,
    {
        let linear = self.linear_index(index)?;
        let slot = &mut self.storage[linear];
        *slot = f(*slot);
        Ok(())
    }

    /// The single element of a one-element tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidArgument` unless the tensor holds exactly
    /// one element.
    pub fn item(&self) -> Result<ElT, TensorError> {
        match self.data() {
            [value] => Ok(*value),
            data => Err(TensorError::invalid_argument(format!(
                "item() needs a single-element tensor, got {} elements",
                data.len()
            ))),
        }
    }

    /// Fill all elements with a value.
    pub fn fill(&mut self, value: ElT) {
        for x in self.storage.as_mut_slice() {
            *x = value;
        }
    }

    /// Reshape into a new shape, copying the buffer.
    ///
    /// At most one entry may be `-1`; it is inferred from the others.
    ///
    /// # Errors
    ///
    /// See [`operations::reshape`].
    ///
    /// # Example
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.reshape(&[-1, 2]).unwrap().shape(), &[3, 2]);
    /// assert!(t.reshape(&[3, 4]).is_err());
    /// ```
    pub fn reshape(&self, new_shape: &[isize]) -> Result<Self, TensorError> {
        operations::reshape(self, new_shape)
    }

    /// Permute the axes of the tensor.
    ///
    /// `axes[i]` gives the source axis for the i-th axis of the result. With
    /// `None` the axis order is reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]).unwrap();
    /// let tt = t.transpose(None).unwrap();
    /// assert_eq!(tt.shape(), &[2, 3]);
    /// assert_eq!(t.get(&[2, 0]).unwrap(), tt.get(&[0, 2]).unwrap());
    /// ```
    pub fn transpose(&self, axes: Option<&[usize]>) -> Result<Self, TensorError> {
        operations::transpose(self, axes)
    }

    /// Exchange two axes.
    pub fn swap_axes(&self, axis1: usize, axis2: usize) -> Result<Self, TensorError> {
        operations::swap_axes(self, axis1, axis2)
    }

    /// Extract a sub-tensor; see [`operations::slice`].
    pub fn slice(&self, args: &[SliceArg]) -> Result<Self, TensorError> {
        operations::slice(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.size(), 6);
        assert_eq!(t.strides(), &[3, 1]);
        assert!(t.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zeros_f32() {
        let t: Tensor<f32> = Tensor::zeros(&[4]);
        assert_eq!(t.data(), &[0.0f32; 4]);
    }

    #[test]
    fn test_size_of_large_shape() {
        let t: Tensor = Tensor::zeros(&[2, 3, 4, 5]);
        assert_eq!(t.size(), 120);
    }

    #[test]
    fn test_from_vec() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();

        // Row-major order: last axis fastest
        assert_eq!(t.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.get(&[0, 1]).unwrap(), 2.0);
        assert_eq!(t.get(&[0, 2]).unwrap(), 3.0);
        assert_eq!(t.get(&[1, 0]).unwrap(), 4.0);
        assert_eq!(t.get(&[1, 1]).unwrap(), 5.0);
        assert_eq!(t.get(&[1, 2]).unwrap(), 6.0);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let result = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[2, 3]);
        assert_eq!(
            result.unwrap_err(),
            TensorError::ShapeMismatch {
                expected: 6,
                actual: 3
            }
        );
    }

    #[test]
    fn test_empty_shape_is_empty() {
        let t: Tensor = Tensor::zeros(&[]);
        assert_eq!(t.size(), 0);
        assert!(t.is_empty());
        assert!(Tensor::<f64>::from_vec(vec![1.0], &[]).is_err());
        assert!(Tensor::<f64>::from_vec(vec![], &[]).is_ok());
    }

    #[test]
    fn test_zero_length_axis() {
        let t: Tensor = Tensor::zeros(&[3, 0]);
        assert!(t.is_empty());
        assert!(t.get(&[0, 0]).is_err());
        assert!(t.get(()).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        assert!(matches!(
            t.get(&[2, 0]),
            Err(TensorError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            t.get(&[0, 3]),
            Err(TensorError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            t.get(&[0, 0, 0]),
            Err(TensorError::WrongNumberOfIndices { .. })
        ));
    }

    #[test]
    fn test_scalar_shorthand() {
        let v = Tensor::from_vec(vec![10.0, 20.0, 30.0], &[3]).unwrap();
        assert_eq!(v.get(0).unwrap(), 10.0);
        assert_eq!(v.get(2).unwrap(), 30.0);
        assert!(v.get(3).is_err());

        let s = Tensor::scalar(21.0);
        assert_eq!(s.get(()).unwrap(), 21.0);
        assert_eq!(s.get(0).unwrap(), 21.0);
        assert!(s.get(1).is_err());

        // On a matrix the shorthand addresses the first element of a row.
        let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(m.get(1).unwrap(), 4.0);
        assert!(m.get(2).is_err());
    }

    #[test]
    fn test_set_get() {
        let mut t = Tensor::from_vec((1..=8).map(f64::from).collect(), &[2, 2, 2]).unwrap();
        assert_eq!(t.get(&[1, 1, 0]).unwrap(), 7.0);
        t.set(&[1, 1, 0], -1.0).unwrap();
        assert_eq!(t.get(&[1, 1, 0]).unwrap(), -1.0);
        assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, -1.0, 8.0]);
    }

    #[test]
    fn test_set_out_of_bounds_leaves_data() {
        let mut t: Tensor = Tensor::zeros(&[2, 2]);
        assert!(t.set(&[0, 2], 1.0).is_err());
        assert!(t.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_update() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        t.update(1, |x| x * 10.0).unwrap();
        assert_eq!(t.data(), &[1.0, 20.0, 3.0]);
        assert!(t.update(5, |x| x).is_err());
    }

    #[test]
    fn test_item() {
        assert_eq!(Tensor::scalar(3.5).item().unwrap(), 3.5);
        let t: Tensor = Tensor::zeros(&[2]);
        assert!(t.item().is_err());
    }

    #[test]
    fn test_fill_and_ones() {
        let mut t: Tensor<f64> = Tensor::ones(&[2, 3]);
        assert!(t.data().iter().all(|&x| x == 1.0));
        t.fill(5.0);
        assert!(t.data().iter().all(|&x| x == 5.0));
    }

    #[test]
    fn test_into_vec() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        t.data_mut()[0] = 9.0;
        assert_eq!(t.into_vec(), vec![9.0, 2.0]);
    }
}
