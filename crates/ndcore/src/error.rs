//! Error types for ndcore.

use thiserror::Error;

/// Errors that can occur in tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Two shapes cannot be broadcast against each other.
    #[error("shapes {lhs:?} and {rhs:?} cannot be broadcast together")]
    BroadcastMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Caller-provided output tensor has the wrong shape.
    #[error("output shape {actual:?} does not match result shape {expected:?}")]
    OutputShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Operation requires specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// An einsum index name is bound to two different sizes.
    #[error("index '{label}' has size {expected} but operand {operand} gives {actual}")]
    DimensionMismatch {
        label: String,
        expected: usize,
        actual: usize,
        operand: usize,
    },

    /// Shape with a negative entry.
    #[error("invalid shape {shape:?}")]
    InvalidShape { shape: Vec<isize> },

    /// More than one inferred (`-1`) entry in a reshape target.
    #[error("reshape target {shape:?} has more than one inferred dimension")]
    MultiplePlaceholders { shape: Vec<isize> },

    /// Axis argument out of range.
    #[error("axis {axis} is out of range for tensor with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },

    /// Axis listed twice in an axis selector.
    #[error("axis {axis} appears more than once")]
    DuplicateAxis { axis: usize },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// More slice specifiers than source axes.
    #[error("{given} slice arguments given for tensor with {ndim} dimensions")]
    TooManySliceArgs { given: usize, ndim: usize },

    /// Zero step in a range.
    #[error("range step must be non-zero")]
    InvalidRange,

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: isize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Reduction over zero elements that has no identity.
    #[error("cannot compute {op} of an empty tensor")]
    EmptyReduction { op: &'static str },

    /// Malformed input that fits no other category.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Coarse classification of a [`TensorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ShapeMismatch,
    InvalidShape,
    InvalidAxis,
    InvalidRange,
    IndexOutOfBounds,
    InvalidArgument,
}

impl TensorError {
    /// The category this error belongs to.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcore::{ErrorKind, Tensor};
    ///
    /// let err = Tensor::<f64>::from_vec(vec![1.0, 2.0], &[3]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShapeMismatch { .. }
            | Self::BroadcastMismatch { .. }
            | Self::OutputShapeMismatch { .. }
            | Self::RankMismatch { .. }
            | Self::DimensionMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::InvalidShape { .. } | Self::MultiplePlaceholders { .. } => {
                ErrorKind::InvalidShape
            }
            Self::InvalidAxis { .. }
            | Self::DuplicateAxis { .. }
            | Self::InvalidPermutation { .. }
            | Self::TooManySliceArgs { .. } => ErrorKind::InvalidAxis,
            Self::InvalidRange => ErrorKind::InvalidRange,
            Self::IndexOutOfBounds { .. } | Self::WrongNumberOfIndices { .. } => {
                ErrorKind::IndexOutOfBounds
            }
            Self::EmptyReduction { .. } | Self::InvalidArgument { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = TensorError::DimensionMismatch {
            label: "j".into(),
            expected: 3,
            actual: 2,
            operand: 1,
        };
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            TensorError::MultiplePlaceholders { shape: vec![-1, -1] }.kind(),
            ErrorKind::InvalidShape
        );
        assert_eq!(
            TensorError::TooManySliceArgs { given: 3, ndim: 2 }.kind(),
            ErrorKind::InvalidAxis
        );
        assert_eq!(TensorError::InvalidRange.kind(), ErrorKind::InvalidRange);
        assert_eq!(
            TensorError::WrongNumberOfIndices {
                expected: 2,
                actual: 1
            }
            .kind(),
            ErrorKind::IndexOutOfBounds
        );
        assert_eq!(
            TensorError::EmptyReduction { op: "min" }.kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_display() {
        let err = TensorError::InvalidAxis { axis: 3, ndim: 2 };
        assert_eq!(
            err.to_string(),
            "axis 3 is out of range for tensor with 2 dimensions"
        );
    }
}
