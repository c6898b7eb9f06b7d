//! Algebraic structures that matrix entries can live in.
//!
//! The entry operations are provided by the ring itself rather than by the element type.
//! For example, [FloatField](float::FloatField) has elements of type `f64` and
//! [RationalField](rational::RationalField) has elements of type [Rational](rational::Rational).
//! Reduction to echelon form only needs the [Field] operations.

pub mod float;
pub mod rational;

use std::fmt::{self, Debug, Display};

use crate::printer::PrintOptions;

pub trait Ring: Clone + Copy + PartialEq + Debug + Display {
    type Element: Clone + PartialEq + Debug + Display;

    /// Compute `a -= b * c`.
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn zero() -> Self::Element;
    fn one(&self) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;

    /// Return `false` for elements that cannot take part in arithmetic,
    /// such as a floating-point NaN.
    fn is_finite(_a: &Self::Element) -> bool {
        true
    }

    /// Write `element` to `f` using the print options `opts`.
    fn format<W: fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        f: &mut W,
    ) -> fmt::Result;
}

pub trait Field: Ring {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Return true iff `a` should be treated as zero when selecting a pivot.
    /// Exact fields ignore the tolerance.
    fn is_negligible(&self, a: &Self::Element, _tolerance: f64) -> bool {
        Self::is_zero(a)
    }
}
