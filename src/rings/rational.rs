use std::fmt::{self, Display, Formatter};

use rug::{Integer, Rational as ArbitraryPrecisionRational};

use crate::{printer::PrintOptions, utils};

use super::{Field, Ring};

/// The field of exact rational numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }
}

/// A rational number. Every value is kept in canonical form: the fraction is reduced,
/// the denominator is positive and the value is stored as `Natural` whenever
/// both numerator and denominator fit in an `i64`. As a result, equality is structural.
#[derive(Clone, PartialEq, Debug)]
pub enum Rational {
    Natural(i64, i64),
    Large(ArbitraryPrecisionRational),
}

impl Rational {
    /// Create the fraction `num/den`. Panics if `den` is zero.
    pub fn new(num: i64, den: i64) -> Rational {
        Rational::from_i128(num as i128, den as i128)
    }

    fn from_i128(num: i128, den: i128) -> Rational {
        if den == 0 {
            panic!("Zero denominator in fraction {}/{}", num, den);
        }

        let g = utils::gcd_signed_i128(num, den) as i128;
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = -num;
            den = -den;
        }

        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(n), Ok(d)) => Rational::Natural(n, d),
            _ => Rational::Large(ArbitraryPrecisionRational::from((
                Integer::from(num),
                Integer::from(den),
            ))),
        }
    }

    fn from_large(r: ArbitraryPrecisionRational) -> Rational {
        match (r.numer().to_i64(), r.denom().to_i64()) {
            (Some(n), Some(d)) => Rational::Natural(n, d),
            _ => Rational::Large(r),
        }
    }

    fn to_large(&self) -> ArbitraryPrecisionRational {
        match self {
            Rational::Natural(n, d) => ArbitraryPrecisionRational::from((*n, *d)),
            Rational::Large(r) => r.clone(),
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::Natural(value, 1)
    }
}

impl From<(i64, i64)> for Rational {
    fn from((num, den): (i64, i64)) -> Self {
        Rational::new(num, den)
    }
}

impl From<&Rational> for f64 {
    fn from(value: &Rational) -> Self {
        match value {
            Rational::Natural(n, d) => *n as f64 / *d as f64,
            Rational::Large(r) => r.to_f64(),
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Rational::Natural(n, d) => {
                if *d == 1 {
                    f.write_fmt(format_args!("{}", n))
                } else {
                    f.write_fmt(format_args!("{}/{}", n, d))
                }
            }
            Rational::Large(r) => r.fmt(f),
        }
    }
}

impl Display for RationalField {
    fn fmt(&self, _: &mut Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

// Products of two i64 values always fit in an i128, so only the final difference can overflow.
impl RationalField {
    fn sub(&self, a: &Rational, b: &Rational) -> Rational {
        if let (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) = (a, b) {
            let (n1, d1, n2, d2) = (*n1 as i128, *d1 as i128, *n2 as i128, *d2 as i128);
            if let Some(num) = (n1 * d2).checked_sub(n2 * d1) {
                return Rational::from_i128(num, d1 * d2);
            }
        }

        Rational::from_large(a.to_large() - b.to_large())
    }

    fn mul(&self, a: &Rational, b: &Rational) -> Rational {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => Rational::from_i128(
                *n1 as i128 * *n2 as i128,
                *d1 as i128 * *d2 as i128,
            ),
            _ => Rational::from_large(a.to_large() * b.to_large()),
        }
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn zero() -> Self::Element {
        Rational::Natural(0, 1)
    }

    fn one(&self) -> Self::Element {
        Rational::Natural(1, 1)
    }

    fn is_zero(a: &Self::Element) -> bool {
        match a {
            Rational::Natural(n, _) => *n == 0,
            Rational::Large(r) => *r.numer() == 0,
        }
    }

    fn format<W: fmt::Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        f: &mut W,
    ) -> fmt::Result {
        f.write_fmt(format_args!("{}", element))
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(b) {
            panic!("Division by zero: {} / 0", a);
        }

        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => Rational::from_i128(
                *n1 as i128 * *d2 as i128,
                *d1 as i128 * *n2 as i128,
            ),
            _ => Rational::from_large(a.to_large() / b.to_large()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(Rational::new(2, -4), Rational::Natural(-1, 2));
        assert_eq!(Rational::new(0, -7), Rational::Natural(0, 1));
        assert_eq!(Rational::from((6, 3)), Rational::from(2));
        assert_eq!(
            Rational::new(i64::MIN, -1),
            Rational::Large(ArbitraryPrecisionRational::from((
                -Integer::from(i64::MIN),
                Integer::from(1)
            )))
        );
    }

    #[test]
    fn arithmetic() {
        let q = RationalField::new();
        let (a, b) = (Rational::new(1, 6), Rational::new(3, 4));
        assert_eq!(q.sub(&a, &b), Rational::new(-7, 12));
        assert_eq!(q.mul(&a, &b), Rational::new(1, 8));
        assert_eq!(q.div(&a, &b), Rational::new(2, 9));
        assert_eq!(
            q.div(&Rational::from(1), &Rational::new(-3, 5)),
            Rational::new(-5, 3)
        );

        let mut c = Rational::from(1);
        q.sub_mul_assign(&mut c, &a, &b);
        assert_eq!(c, Rational::new(7, 8));
        assert!(RationalField::is_zero(&q.sub(&a, &a)));
    }

    #[test]
    fn large_round_trip() {
        let q = RationalField::new();
        let a = Rational::from(i64::MAX);
        let b = q.mul(&a, &a);
        assert!(matches!(b, Rational::Large(_)));

        let c = q.div(&b, &a);
        assert_eq!(c, a);

        let d = q.sub(&b, &b);
        assert_eq!(d, Rational::Natural(0, 1));
    }

    #[test]
    #[should_panic]
    fn division_by_zero() {
        let q = RationalField::new();
        q.div(&Rational::from(1), &Rational::from(0));
    }

    #[test]
    fn display() {
        assert_eq!(Rational::new(-3, 6).to_string(), "-1/2");
        assert_eq!(Rational::from(4).to_string(), "4");
        assert_eq!(f64::from(&Rational::new(1, 4)), 0.25);
    }
}
