use std::fmt::{self, Display, Formatter};

use crate::printer::PrintOptions;

use super::{Field, Ring};

/// The field of double-precision floating-point numbers.
///
/// Arithmetic follows IEEE-754 without fused operations, so that
/// `sub_mul_assign` rounds exactly like `a -= b * c`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatField;

impl FloatField {
    pub fn new() -> FloatField {
        FloatField
    }
}

impl Display for FloatField {
    fn fmt(&self, _: &mut Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Ring for FloatField {
    type Element = f64;

    #[inline(always)]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= b * c;
    }

    #[inline(always)]
    fn zero() -> Self::Element {
        0.
    }

    #[inline(always)]
    fn one(&self) -> Self::Element {
        1.
    }

    #[inline(always)]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0.
    }

    #[inline(always)]
    fn is_finite(a: &Self::Element) -> bool {
        a.is_finite()
    }

    fn format<W: fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        f: &mut W,
    ) -> fmt::Result {
        // avoid printing -0 for entries that were eliminated
        let e = if *element == 0. { 0. } else { *element };
        if let Some(p) = opts.precision {
            f.write_fmt(format_args!("{:.*}", p, e))
        } else {
            f.write_fmt(format_args!("{}", e))
        }
    }
}

impl Field for FloatField {
    #[inline(always)]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a / b
    }

    #[inline(always)]
    fn is_negligible(&self, a: &Self::Element, tolerance: f64) -> bool {
        a.abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_mul_is_not_fused() {
        let f = FloatField::new();
        let (b, c) = (0.1, 3.);
        let mut a = 0.3;
        f.sub_mul_assign(&mut a, &b, &c);
        assert_eq!(a, 0.3 - 0.1 * 3.);
    }

    #[test]
    fn negligible() {
        let f = FloatField::new();
        assert!(f.is_negligible(&0., 0.));
        assert!(!f.is_negligible(&1e-300, 0.));
        assert!(f.is_negligible(&-1e-13, 1e-12));
        assert!(!FloatField::is_finite(&f64::NAN));
        assert!(!FloatField::is_finite(&f64::NEG_INFINITY));
    }

    #[test]
    fn format() {
        let f = FloatField::new();
        let mut s = String::new();
        f.format(&-0., &PrintOptions::default(), &mut s).unwrap();
        f.format(&1.5, &PrintOptions::default(), &mut s).unwrap();
        f.format(
            &2.,
            &PrintOptions {
                precision: Some(2),
                ..PrintOptions::default()
            },
            &mut s,
        )
        .unwrap();
        assert_eq!(s, "01.52.00");
    }
}
