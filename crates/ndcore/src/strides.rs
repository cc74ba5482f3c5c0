//! Stride computation and multi-index enumeration.
//!
//! Uses row-major (C) order: the last axis varies fastest.

use smallvec::SmallVec;

/// A multi-index: one position per axis.
///
/// Stored inline for tensors of rank 8 or less.
pub type MultiIndex = SmallVec<[usize; 8]>;

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2], returns strides [d1*d2, d2, 1].
///
/// # Examples
///
/// ```
/// use ndcore::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), Vec::<usize>::new());
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;

    for (s, &dim) in strides.iter_mut().zip(shape.iter()).rev() {
        *s = stride;
        stride *= dim;
    }

    strides
}

/// Convert cartesian indices to a linear offset.
///
/// # Arguments
///
/// * `indices` - Cartesian indices for each dimension
/// * `strides` - Strides for each dimension
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear offset to cartesian indices using row-major order.
///
/// Repeatedly divides by the trailing extents, last axis first.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> MultiIndex {
    let mut indices: MultiIndex = SmallVec::from_elem(0, shape.len());

    for (idx, &dim) in indices.iter_mut().zip(shape.iter()).rev() {
        if dim == 0 {
            continue;
        }
        *idx = linear % dim;
        linear /= dim;
    }

    indices
}

/// Iterator over every multi-index of a shape in row-major order.
///
/// The iterator is a cursor over `shape`: it holds the next index to yield
/// and advances it like an odometer, last axis first. It is finite, and a
/// fresh one can be obtained at any time from [`enumerate_indices`] or by
/// cloning.
#[derive(Debug, Clone)]
pub struct IndexIter {
    shape: MultiIndex,
    current: MultiIndex,
    remaining: usize,
}

impl IndexIter {
    /// Create a cursor positioned at the first multi-index of `shape`.
    pub fn new(shape: &[usize]) -> Self {
        let remaining = if shape.is_empty() {
            0
        } else {
            shape.iter().product()
        };
        Self {
            shape: shape.iter().copied().collect(),
            current: SmallVec::from_elem(0, shape.len()),
            remaining,
        }
    }

    fn advance(&mut self) {
        for (idx, &dim) in self.current.iter_mut().zip(self.shape.iter()).rev() {
            *idx += 1;
            if *idx < dim {
                return;
            }
            *idx = 0;
        }
    }
}

impl Iterator for IndexIter {
    type Item = MultiIndex;

    fn next(&mut self) -> Option<MultiIndex> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IndexIter {}

/// Enumerate all multi-indices of `shape` in row-major order.
///
/// Yields nothing for the empty shape or any shape with a zero-length axis.
///
/// # Examples
///
/// ```
/// use ndcore::strides::enumerate_indices;
///
/// let all: Vec<Vec<usize>> = enumerate_indices(&[2, 2]).map(|i| i.to_vec()).collect();
/// assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
pub fn enumerate_indices(shape: &[usize]) -> IndexIter {
    IndexIter::new(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_strides_3d() {
        assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
    }

    #[test]
    fn test_compute_strides_2d() {
        assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
    }

    #[test]
    fn test_compute_strides_with_zero() {
        assert_eq!(compute_strides(&[2, 0, 3]), vec![0, 3, 1]);
    }

    #[test]
    fn test_cartesian_to_linear() {
        let strides = compute_strides(&[3, 4, 5]);
        // index [i, j, k] -> 20*i + 5*j + k
        assert_eq!(cartesian_to_linear(&[0, 0, 0], &strides), 0);
        assert_eq!(cartesian_to_linear(&[0, 0, 1], &strides), 1);
        assert_eq!(cartesian_to_linear(&[0, 1, 0], &strides), 5);
        assert_eq!(cartesian_to_linear(&[1, 0, 0], &strides), 20);
        assert_eq!(cartesian_to_linear(&[2, 3, 4], &strides), 59);
    }

    #[test]
    fn test_linear_to_cartesian() {
        let shape = [3, 4, 5];
        assert_eq!(linear_to_cartesian(0, &shape).as_slice(), &[0, 0, 0]);
        assert_eq!(linear_to_cartesian(1, &shape).as_slice(), &[0, 0, 1]);
        assert_eq!(linear_to_cartesian(5, &shape).as_slice(), &[0, 1, 0]);
        assert_eq!(linear_to_cartesian(20, &shape).as_slice(), &[1, 0, 0]);
        assert_eq!(linear_to_cartesian(59, &shape).as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn test_roundtrip() {
        let shape = [3, 4, 5];
        let strides = compute_strides(&shape);
        for linear in 0..60 {
            let cartesian = linear_to_cartesian(linear, &shape);
            assert_eq!(cartesian_to_linear(&cartesian, &strides), linear);
        }
    }

    #[test]
    fn test_enumerate_order_matches_linear() {
        let shape = [2, 3, 2];
        let strides = compute_strides(&shape);
        let offsets: Vec<usize> = enumerate_indices(&shape)
            .map(|idx| cartesian_to_linear(&idx, &strides))
            .collect();
        assert_eq!(offsets, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_enumerate_empty() {
        assert_eq!(enumerate_indices(&[]).count(), 0);
        assert_eq!(enumerate_indices(&[3, 0, 2]).count(), 0);
        assert!(enumerate_indices(&[0]).next().is_none());
    }

    #[test]
    fn test_enumerate_restartable() {
        let iter = enumerate_indices(&[2, 3]);
        let first: Vec<MultiIndex> = iter.clone().collect();
        let second: Vec<MultiIndex> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_enumerate_size_hint() {
        let mut iter = enumerate_indices(&[2, 2]);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }
}
