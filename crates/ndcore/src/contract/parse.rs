//! Textual einsum subscripts.
//!
//! Format: operands separated by `;`, index names within an operand by `,`,
//! output after `->`. Names may be longer than one character and surrounding
//! whitespace is ignored, so `"i, j; j, k -> i, k"` is matrix multiplication.

use crate::error::TensorError;
use std::str::FromStr;

/// Parsed einsum subscripts: one name list per operand plus the output list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscripts {
    pub inputs: Vec<Vec<String>>,
    pub output: Vec<String>,
}

impl Subscripts {
    /// Parse a subscript string.
    ///
    /// Without `->` the output is implicit: the names that occur exactly once
    /// across all operands, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidArgument` for more than one `->`, an empty
    /// operand list or an empty index name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndcore::contract::Subscripts;
    ///
    /// let s = Subscripts::parse("i,j; j,k -> i,k").unwrap();
    /// assert_eq!(s.inputs, vec![vec!["i", "j"], vec!["j", "k"]]);
    /// assert_eq!(s.output, vec!["i", "k"]);
    ///
    /// let implicit = Subscripts::parse("i,j; j,k").unwrap();
    /// assert_eq!(implicit.output, vec!["i", "k"]);
    /// ```
    pub fn parse(subscripts: &str) -> Result<Self, TensorError> {
        let parts: Vec<&str> = subscripts.split("->").collect();
        if parts.len() > 2 {
            return Err(TensorError::invalid_argument(format!(
                "subscripts '{subscripts}' contain more than one '->'"
            )));
        }

        let input_str = parts[0].trim();
        if input_str.is_empty() {
            return Err(TensorError::invalid_argument("no operand subscripts given"));
        }
        let inputs = input_str
            .split(';')
            .map(parse_names)
            .collect::<Result<Vec<_>, _>>()?;

        let output = match parts.get(1) {
            Some(out) => parse_names(out)?,
            None => implicit_output(&inputs),
        };

        Ok(Self { inputs, output })
    }

    /// Borrow the operand name lists as string slices.
    pub fn input_labels(&self) -> Vec<Vec<&str>> {
        self.inputs
            .iter()
            .map(|names| names.iter().map(String::as_str).collect())
            .collect()
    }

    /// Borrow the output name list as string slices.
    pub fn output_labels(&self) -> Vec<&str> {
        self.output.iter().map(String::as_str).collect()
    }
}

impl FromStr for Subscripts {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split one comma-separated name list; blank input is an empty list.
fn parse_names(list: &str) -> Result<Vec<String>, TensorError> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(TensorError::invalid_argument(format!(
                    "empty index name in '{list}'"
                )))
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}

fn implicit_output(inputs: &[Vec<String>]) -> Vec<String> {
    let mut order: Vec<&String> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for name in inputs.iter().flatten() {
        match order.iter().position(|&seen| seen == name) {
            Some(pos) => counts[pos] += 1,
            None => {
                order.push(name);
                counts.push(1);
            }
        }
    }
    order
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count == 1)
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matmul() {
        let s = Subscripts::parse("i,j; j,k -> i,k").unwrap();
        assert_eq!(s.inputs.len(), 2);
        assert_eq!(s.input_labels(), vec![vec!["i", "j"], vec!["j", "k"]]);
        assert_eq!(s.output_labels(), vec!["i", "k"]);
    }

    #[test]
    fn test_parse_multichar_names_and_whitespace() {
        let s: Subscripts = "  row , col1 ;col1,  col2->row,col2 ".parse().unwrap();
        assert_eq!(s.inputs[0], vec!["row", "col1"]);
        assert_eq!(s.inputs[1], vec!["col1", "col2"]);
        assert_eq!(s.output, vec!["row", "col2"]);
    }

    #[test]
    fn test_parse_empty_output() {
        let s = Subscripts::parse("i1,i2 ->").unwrap();
        assert_eq!(s.inputs, vec![vec!["i1", "i2"]]);
        assert!(s.output.is_empty());
    }

    #[test]
    fn test_implicit_output() {
        // Trace: every name repeated, nothing left.
        assert!(Subscripts::parse("i,i").unwrap().output.is_empty());
        // Names occurring once keep first-appearance order.
        let s = Subscripts::parse("k,j; j,i").unwrap();
        assert_eq!(s.output, vec!["k", "i"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Subscripts::parse("i->j->k").is_err());
        assert!(Subscripts::parse("  -> i").is_err());
        assert!(Subscripts::parse("i,,j -> i").is_err());
    }
}
