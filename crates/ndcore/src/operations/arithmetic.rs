//! Arithmetic operators with broadcasting.
//!
//! Each operator comes in an allocating form and an `_into` form writing into
//! a caller-owned output of exactly the result shape. Division by zero follows
//! IEEE float rules and never fails.

use crate::error::TensorError;
use crate::operations::broadcast::{
    Operand, apply_binary, apply_binary_into, apply_unary, apply_unary_into,
};
use crate::scalar::Scalar;
use crate::tensor::Tensor;

macro_rules! binary_operator {
    ($(#[$doc:meta])* $name:ident, $name_into:ident, $op:expr) => {
        $(#[$doc])*
        pub fn $name<'a, 'b, ElT, A, B>(a: A, b: B) -> Result<Tensor<ElT>, TensorError>
        where
            ElT: Scalar,
            A: Into<Operand<'a, ElT>>,
            B: Into<Operand<'b, ElT>>,
        {
            apply_binary(a, b, $op)
        }

        #[doc = concat!("[`", stringify!($name), "`] writing into `out`, which must have the broadcast shape.")]
        pub fn $name_into<'a, 'b, ElT, A, B>(
            a: A,
            b: B,
            out: &mut Tensor<ElT>,
        ) -> Result<(), TensorError>
        where
            ElT: Scalar,
            A: Into<Operand<'a, ElT>>,
            B: Into<Operand<'b, ElT>>,
        {
            apply_binary_into(a, b, out, $op)
        }
    };
}

macro_rules! unary_operator {
    ($(#[$doc:meta])* $name:ident, $name_into:ident, $op:expr) => {
        $(#[$doc])*
        pub fn $name<'a, ElT, A>(a: A) -> Tensor<ElT>
        where
            ElT: Scalar,
            A: Into<Operand<'a, ElT>>,
        {
            apply_unary(a, $op)
        }

        #[doc = concat!("[`", stringify!($name), "`] writing into `out`, which must have the operand's shape.")]
        pub fn $name_into<'a, ElT, A>(a: A, out: &mut Tensor<ElT>) -> Result<(), TensorError>
        where
            ElT: Scalar,
            A: Into<Operand<'a, ElT>>,
        {
            apply_unary_into(a, out, $op)
        }
    };
}

binary_operator!(
    /// Element-wise sum.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcore::operations::add;
    ///
    /// let r = add(10.0_f64, 21.0).unwrap();
    /// assert_eq!(r.shape(), &[1]);
    /// assert_eq!(r.item().unwrap(), 31.0);
    /// ```
    add,
    add_into,
    |x: ElT, y: ElT| x + y
);

binary_operator!(
    /// Element-wise difference `a - b`.
    sub,
    sub_into,
    |x: ElT, y: ElT| x - y
);

binary_operator!(
    /// Element-wise product.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcore::Tensor;
    /// use ndcore::operations::mul;
    ///
    /// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let col = Tensor::from_vec(vec![10.0, 100.0], &[2, 1]).unwrap();
    /// assert_eq!(mul(&a, &col).unwrap().data(), &[10.0, 20.0, 300.0, 400.0]);
    /// ```
    mul,
    mul_into,
    |x: ElT, y: ElT| x * y
);

binary_operator!(
    /// Element-wise quotient `a / b`.
    div,
    div_into,
    |x: ElT, y: ElT| x / y
);

binary_operator!(
    /// Element-wise power `a ^ b`.
    pow,
    pow_into,
    |x: ElT, y: ElT| x.powf(y)
);

unary_operator!(
    /// Element-wise negation.
    neg,
    neg_into,
    |x: ElT| -x
);

unary_operator!(
    /// Element-wise natural exponential.
    exp,
    exp_into,
    |x: ElT| x.exp()
);

unary_operator!(
    /// Element-wise absolute value.
    abs,
    abs_into,
    |x: ElT| x.abs()
);

fn clamp<ElT: Scalar>(x: ElT, min: ElT, max: ElT) -> ElT {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Clamp every element into `[min, max]`, bounds inclusive.
///
/// NaN elements stay NaN.
///
/// # Example
///
/// ```
/// use ndcore::Tensor;
/// use ndcore::operations::clip;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 5.0, 3.0, 10.0], &[2, 3]).unwrap();
/// let c = clip(&a, 2.0, 5.0);
/// assert_eq!(c.data(), &[2.0, 2.0, 3.0, 5.0, 3.0, 5.0]);
/// ```
pub fn clip<'a, ElT, A>(a: A, min: ElT, max: ElT) -> Tensor<ElT>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
{
    apply_unary(a, |x| clamp(x, min, max))
}

/// [`clip`] writing into `out`, which must have the operand's shape.
pub fn clip_into<'a, ElT, A>(
    a: A,
    min: ElT,
    max: ElT,
    out: &mut Tensor<ElT>,
) -> Result<(), TensorError>
where
    ElT: Scalar,
    A: Into<Operand<'a, ElT>>,
{
    apply_unary_into(a, out, |x| clamp(x, min, max))
}
