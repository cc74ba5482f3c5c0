//! Loop-based einsum evaluation.

use crate::contract::parse::Subscripts;
use crate::contract::properties::EinsumProperties;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, enumerate_indices};
use crate::tensor::Tensor;

/// Evaluate an einsum given as a subscript string.
///
/// Operands are separated by `;`, index names by `,`, and the output follows
/// `->`. Without `->` the output consists of the names that occur exactly
/// once, in order of first appearance. An empty output sums everything into
/// a tensor of shape `[1]`.
///
/// # Errors
///
/// Parse errors and planning errors, see [`Subscripts::parse`] and
/// [`EinsumProperties::compute`].
///
/// # Examples
///
/// ```
/// use ndcore::{Tensor, einsum};
///
/// // Matrix multiplication: C[i,k] = A[i,j] * B[j,k]
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let b = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3, 1]).unwrap();
///
/// let c = einsum("i,j; j,k -> i,k", &[&a, &b]).unwrap();
/// assert_eq!(c.shape(), &[2, 1]);
/// assert_eq!(c.data(), &[14.0, 32.0]);
/// ```
pub fn einsum<ElT: Scalar>(
    subscripts: &str,
    operands: &[&Tensor<ElT>],
) -> Result<Tensor<ElT>, TensorError> {
    let parsed = Subscripts::parse(subscripts)?;
    let inputs = parsed.input_labels();
    let input_refs: Vec<&[&str]> = inputs.iter().map(Vec::as_slice).collect();
    einsum_labels(&input_refs, &parsed.output_labels(), operands)
}

/// Evaluate an einsum given as per-operand index name lists.
///
/// # Arguments
///
/// * `inputs` - Index names for each operand, one per axis
/// * `output` - Index names of the result, in result axis order
/// * `operands` - The tensors, in the same order as `inputs`
///
/// # Errors
///
/// See [`EinsumProperties::compute`].
///
/// # Examples
///
/// ```
/// use ndcore::{Tensor, einsum_labels};
///
/// let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let trace = einsum_labels(&[&["i", "i"]], &[], &[&m]).unwrap();
/// assert_eq!(trace.item().unwrap(), 5.0);
/// ```
pub fn einsum_labels<ElT: Scalar>(
    inputs: &[&[&str]],
    output: &[&str],
    operands: &[&Tensor<ElT>],
) -> Result<Tensor<ElT>, TensorError> {
    let shapes: Vec<&[usize]> = operands.iter().map(|t| t.shape()).collect();
    let props = EinsumProperties::compute(inputs, output, &shapes)?;

    log::debug!(
        "einsum: {} operands, output {:?} {:?}, contracting {:?}, {} iterations",
        operands.len(),
        &props.labels[..props.num_output],
        props.output_shape,
        props.contracted_labels(),
        props.iterations()
    );

    let mut result = Tensor::zeros(&props.output_shape);
    contract_loop(&props, operands, result.data_mut());
    Ok(result)
}

/// Multiply-accumulate over the planned loop nest into `out`.
fn contract_loop<ElT: Scalar>(props: &EinsumProperties, operands: &[&Tensor<ElT>], out: &mut [ElT]) {
    // An operand without elements contributes no terms.
    if operands.iter().any(|t| t.is_empty()) {
        return;
    }

    let product_at = |idx: &[usize]| {
        operands
            .iter()
            .zip(props.operand_strides.iter())
            .fold(ElT::one(), |acc, (t, strides)| {
                acc * t.data()[cartesian_to_linear(idx, strides)]
            })
    };

    if props.dims.is_empty() {
        out[0] = product_at(&[]);
        return;
    }

    for idx in enumerate_indices(&props.dims) {
        let cell = cartesian_to_linear(&idx, &props.output_strides);
        out[cell] = out[cell] + product_at(&idx);
    }
}
