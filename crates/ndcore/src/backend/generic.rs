//! Generic (loop-based) backend implementation.

use crate::backend::PermutationBackend;
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, enumerate_indices};
use crate::tensor::Tensor;

/// Generic backend using plain loops over the source in row-major order.
///
/// This backend is always available and serves as a fallback.
pub struct GenericBackend;

impl PermutationBackend for GenericBackend {
    fn permute_into<ElT: Scalar>(dest: &mut Tensor<ElT>, src: &Tensor<ElT>, perm: &[usize]) {
        // Stride in dest of each source axis: dest axis i reads source axis perm[i].
        let mut scattered = vec![0usize; perm.len()];
        for (&p, &stride) in perm.iter().zip(dest.strides().iter()) {
            scattered[p] = stride;
        }

        let src_data = src.data();
        let dest_data = dest.data_mut();
        // Source multi-indices come out in buffer order, so the source offset
        // is just the enumeration counter.
        for (linear_old, old_indices) in enumerate_indices(src.shape()).enumerate() {
            let linear_new = cartesian_to_linear(&old_indices, &scattered);
            dest_data[linear_new] = src_data[linear_old];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_permute_transpose() {
        let src = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let mut dest: Tensor = Tensor::zeros(&[3, 2]);

        GenericBackend::permute_into(&mut dest, &src, &[1, 0]);

        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(src.get(&[i, j]).unwrap(), dest.get(&[j, i]).unwrap());
            }
        }
    }

    #[test]
    fn test_generic_permute_3d() {
        let mut src: Tensor = Tensor::zeros(&[2, 3, 4]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    src.set(&[i, j, k], (i * 100 + j * 10 + k) as f64).unwrap();
                }
            }
        }

        // Permute [0,1,2] -> [2,0,1]: shape 2x3x4 -> 4x2x3
        let mut dest: Tensor = Tensor::zeros(&[4, 2, 3]);
        GenericBackend::permute_into(&mut dest, &src, &[2, 0, 1]);

        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(src.get(&[i, j, k]).unwrap(), dest.get(&[k, i, j]).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_generic_permute_empty() {
        let src: Tensor = Tensor::zeros(&[0, 3]);
        let mut dest: Tensor = Tensor::zeros(&[3, 0]);
        GenericBackend::permute_into(&mut dest, &src, &[1, 0]);
        assert!(dest.is_empty());
    }
}
