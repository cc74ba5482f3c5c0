//! Einsum planning.
//!
//! This module provides the `EinsumProperties` struct, which checks an einsum
//! request against the operand shapes and lays out the single loop nest that
//! evaluates it.
//!
//! # Design
//!
//! Every distinct index name becomes one loop position. Output names come
//! first (in output order), followed by the contracted names (in order of
//! first appearance). For every operand the planner folds its row-major
//! strides onto these loop positions; an operand that repeats a name (a trace)
//! gets the sum of the repeated axes' strides at that position.

use crate::error::TensorError;
use crate::strides::compute_strides;

/// Loop layout computed for one einsum evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EinsumProperties {
    /// Index names in loop order: output names, then contracted names.
    pub labels: Vec<String>,

    /// Size of each loop position.
    pub dims: Vec<usize>,

    /// Number of leading loop positions that belong to the output.
    pub num_output: usize,

    /// Result shape (`[1]` when every name is contracted).
    pub output_shape: Vec<usize>,

    /// Per operand, the buffer stride of each loop position.
    pub operand_strides: Vec<Vec<usize>>,

    /// Buffer stride of each loop position in the result; zero for
    /// contracted positions.
    pub output_strides: Vec<usize>,
}

impl EinsumProperties {
    /// Unify index names with operand shapes and plan the loop nest.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Index names for each operand, one per axis
    /// * `output` - Index names of the result
    /// * `shapes` - Shape of each operand
    ///
    /// # Errors
    ///
    /// - `TensorError::InvalidArgument` if no operands are given, the name
    ///   lists and shapes differ in count, or an output name is unknown or
    ///   repeated
    /// - `TensorError::RankMismatch` if an operand's name list does not match
    ///   its rank
    /// - `TensorError::DimensionMismatch` if one name is bound to two sizes
    ///
    /// # Example
    ///
    /// ```
    /// use ndcore::contract::EinsumProperties;
    ///
    /// // Matrix multiplication: C[i,k] = A[i,j] * B[j,k]
    /// let props = EinsumProperties::compute(
    ///     &[&["i", "j"], &["j", "k"]],
    ///     &["i", "k"],
    ///     &[&[2, 3], &[3, 4]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(props.labels, vec!["i", "k", "j"]);
    /// assert_eq!(props.dims, vec![2, 4, 3]);
    /// assert_eq!(props.output_shape, vec![2, 4]);
    /// assert_eq!(props.contracted_labels(), &["j".to_string()]);
    /// ```
    pub fn compute(
        inputs: &[&[&str]],
        output: &[&str],
        shapes: &[&[usize]],
    ) -> Result<Self, TensorError> {
        if inputs.is_empty() {
            return Err(TensorError::invalid_argument("einsum needs at least one operand"));
        }
        if inputs.len() != shapes.len() {
            return Err(TensorError::invalid_argument(format!(
                "{} subscript lists given for {} operands",
                inputs.len(),
                shapes.len()
            )));
        }

        // Unify names with sizes in order of first appearance.
        let mut seen: Vec<(&str, usize)> = Vec::new();
        for (operand, (names, shape)) in inputs.iter().zip(shapes.iter()).enumerate() {
            if names.len() != shape.len() {
                return Err(TensorError::RankMismatch {
                    expected: shape.len(),
                    actual: names.len(),
                });
            }
            for (&name, &size) in names.iter().zip(shape.iter()) {
                match seen.iter().find(|&&(label, _)| label == name) {
                    Some(&(_, expected)) if expected != size => {
                        return Err(TensorError::DimensionMismatch {
                            label: name.to_string(),
                            expected,
                            actual: size,
                            operand,
                        });
                    }
                    Some(_) => {}
                    None => seen.push((name, size)),
                }
            }
        }

        for (i, &name) in output.iter().enumerate() {
            if !seen.iter().any(|&(label, _)| label == name) {
                return Err(TensorError::invalid_argument(format!(
                    "output index '{name}' does not appear in any operand"
                )));
            }
            if output[..i].contains(&name) {
                return Err(TensorError::invalid_argument(format!(
                    "output index '{name}' appears more than once"
                )));
            }
        }

        let size_of = |name: &str| {
            seen.iter()
                .find(|&&(label, _)| label == name)
                .map_or(0, |&(_, size)| size)
        };
        let mut labels: Vec<&str> = output.to_vec();
        labels.extend(
            seen.iter()
                .map(|&(label, _)| label)
                .filter(|label| !output.contains(label)),
        );
        let dims: Vec<usize> = labels.iter().map(|&name| size_of(name)).collect();

        let operand_strides = inputs
            .iter()
            .zip(shapes.iter())
            .map(|(names, shape)| {
                let mut folded = vec![0usize; labels.len()];
                for (&name, stride) in names.iter().zip(compute_strides(shape)) {
                    if let Some(pos) = labels.iter().position(|&label| label == name) {
                        folded[pos] += stride;
                    }
                }
                folded
            })
            .collect();

        let num_output = output.len();
        let mut output_strides = compute_strides(&dims[..num_output]);
        output_strides.resize(labels.len(), 0);
        let output_shape = if num_output == 0 {
            vec![1]
        } else {
            dims[..num_output].to_vec()
        };

        Ok(Self {
            labels: labels.into_iter().map(str::to_string).collect(),
            dims,
            num_output,
            output_shape,
            operand_strides,
            output_strides,
        })
    }

    /// Names summed over.
    pub fn contracted_labels(&self) -> &[String] {
        &self.labels[self.num_output..]
    }

    /// Number of multiply-accumulate steps the loop nest performs.
    pub fn iterations(&self) -> usize {
        self.dims.iter().product()
    }
}
