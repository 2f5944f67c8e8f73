use std::{cmp::Ordering, fmt::Display};

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, utils::check_domain},
    util::num::i64_to_u32_checked,
};

/// Largest bit length of an exact integer built by [`Number::pow`].
pub const MAX_EXACT_BITS: u64 = 1 << 20;

/// Largest argument of [`Number::factorial`]. `10000!` has 35660 digits.
pub const MAX_FACTORIAL: i64 = 10_000;

/// Numeric payload of a `Node::Number` leaf.
///
/// Integer arithmetic is exact: results that overflow `i64` are promoted to
/// `Big` transparently, and `Big` results that fit back into an `i64` are
/// demoted again so that structurally equal values always share one
/// representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// An arbitrary-precision integer that does not fit in an `i64`.
    Big(BigInt),
    /// A double precision floating-point number.
    Real(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(OrderedFloat(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::normalize(value)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Big(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{:?}", r.into_inner()),
        }
    }
}

/// Operand pair after promotion to a common representation.
enum Promoted {
    Small(i64, i64),
    Big(BigInt, BigInt),
    Real(f64, f64),
}

impl Number {
    /// Demotes a big integer to `Integer` whenever it fits.
    ///
    /// # Example
    /// ```
    /// use kelvin::node::number::Number;
    /// use num_bigint::BigInt;
    ///
    /// assert_eq!(Number::normalize(BigInt::from(42)), Number::Integer(42));
    /// ```
    #[must_use]
    pub fn normalize(value: BigInt) -> Self {
        value.to_i64().map_or(Self::Big(value), Self::Integer)
    }

    /// Returns `true` for `Integer` and `Big` values.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Big(_))
    }

    /// Returns `true` if the value is numerically zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 0,
            Self::Big(n) => n.is_zero(),
            Self::Real(r) => r.into_inner() == 0.0,
        }
    }

    /// Returns `true` if the value is numerically one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 1,
            Self::Big(n) => n.is_one(),
            Self::Real(r) => r.into_inner() == 1.0,
        }
    }

    /// Returns `true` if the value is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(n) => *n < 0,
            Self::Big(n) => n.is_negative(),
            Self::Real(r) => r.into_inner() < 0.0,
        }
    }

    /// Lossy projection to `f64`. Big integers beyond the `f64` range become
    /// infinite.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => *n as f64,
            Self::Big(n) => n.to_f64().unwrap_or(if n.is_negative() {
                                                     f64::NEG_INFINITY
                                                 } else {
                                                     f64::INFINITY
                                                 }),
            Self::Real(r) => r.into_inner(),
        }
    }

    /// Converts to `BigInt`, or `None` for reals.
    #[must_use]
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Self::Integer(n) => Some(BigInt::from(*n)),
            Self::Big(n) => Some(n.clone()),
            Self::Real(_) => None,
        }
    }

    fn promote(&self, other: &Self) -> Promoted {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Promoted::Small(*a, *b),
            (Self::Real(_), _) | (_, Self::Real(_)) => Promoted::Real(self.to_f64(), other.to_f64()),
            _ => match (self.to_bigint(), other.to_bigint()) {
                (Some(a), Some(b)) => Promoted::Big(a, b),
                _ => Promoted::Real(self.to_f64(), other.to_f64()),
            },
        }
    }

    /// Exact addition with overflow promotion.
    ///
    /// # Example
    /// ```
    /// use kelvin::node::number::Number;
    ///
    /// let sum = Number::Integer(i64::MAX).add(&Number::Integer(1));
    /// assert!(matches!(sum, Number::Big(_)));
    /// ```
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        match self.promote(other) {
            Promoted::Small(a, b) => {
                a.checked_add(b)
                 .map_or_else(|| Self::normalize(BigInt::from(a) + b), Self::Integer)
            },
            Promoted::Big(a, b) => Self::normalize(a + b),
            Promoted::Real(a, b) => Self::from(a + b),
        }
    }

    /// Exact subtraction with overflow promotion.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Exact multiplication with overflow promotion.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        match self.promote(other) {
            Promoted::Small(a, b) => {
                a.checked_mul(b)
                 .map_or_else(|| Self::normalize(BigInt::from(a) * b), Self::Integer)
            },
            Promoted::Big(a, b) => Self::normalize(a * b),
            Promoted::Real(a, b) => Self::from(a * b),
        }
    }

    /// Arithmetic negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        match self {
            Self::Integer(n) => n.checked_neg()
                                 .map_or_else(|| Self::normalize(-BigInt::from(*n)), Self::Integer),
            Self::Big(n) => Self::normalize(-n),
            Self::Real(r) => Self::from(-r.into_inner()),
        }
    }

    /// Division. Integer operands stay exact when the divisor divides the
    /// dividend, otherwise the quotient is real.
    ///
    /// # Errors
    /// `DivisionByZero` if `other` is zero.
    pub fn div(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(match self.promote(other) {
            Promoted::Small(a, b) if a.checked_rem(b) == Some(0) => {
                a.checked_div(b)
                 .map_or_else(|| Self::normalize(BigInt::from(a) / b), Self::Integer)
            },
            Promoted::Big(a, b) if (&a % &b).is_zero() => Self::normalize(a / b),
            _ => Self::from(self.to_f64() / other.to_f64()),
        })
    }

    /// Remainder with the sign of the dividend.
    ///
    /// # Errors
    /// `DivisionByZero` if `other` is zero.
    pub fn rem(&self, other: &Self) -> EvalResult<Self> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(match self.promote(other) {
            Promoted::Small(a, b) => a.checked_rem(b)
                                      .map_or_else(|| Self::normalize(BigInt::from(a) % b),
                                                   Self::Integer),
            Promoted::Big(a, b) => Self::normalize(a % b),
            Promoted::Real(a, b) => Self::from(a % b),
        })
    }

    /// Exponentiation. An integer base raised to a non-negative integer
    /// exponent that fits in `u32` is computed exactly, as long as the result
    /// stays within [`MAX_EXACT_BITS`].
    ///
    /// # Errors
    /// `DivisionByZero` when zero is raised to a negative power, and
    /// `DomainError` when an exact result would exceed [`MAX_EXACT_BITS`].
    ///
    /// # Example
    /// ```
    /// use kelvin::node::number::Number;
    ///
    /// let big = Number::Integer(2).pow(&Number::Integer(100)).unwrap();
    /// assert_eq!(big.to_string(), "1267650600228229401496703205376");
    /// assert!(Number::Integer(2).pow(&Number::Integer(i64::from(u32::MAX))).is_err());
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn pow(&self, exponent: &Self) -> EvalResult<Self> {
        if self.is_zero() && exponent.is_negative() {
            return Err(RuntimeError::DivisionByZero);
        }
        if let (Some(base), Self::Integer(e)) = (self.to_bigint(), exponent)
           && let Ok(e) = i64_to_u32_checked(*e)
        {
            // A base of magnitude 0 or 1 never grows.
            let width = base.bits().saturating_sub(1);
            if width > 0 {
                check_domain(f64::from(e), 0.0, (MAX_EXACT_BITS / width) as f64)?;
            }
            return Ok(Self::normalize(base.pow(e)));
        }
        Ok(Self::from(self.to_f64().powf(exponent.to_f64())))
    }

    /// Exact factorial of a non-negative integer.
    ///
    /// # Errors
    /// `DomainError` for negative or non-integer input, and for input above
    /// [`MAX_FACTORIAL`].
    ///
    /// # Example
    /// ```
    /// use kelvin::node::number::Number;
    ///
    /// let f = Number::Integer(25).factorial().unwrap();
    /// assert_eq!(f.to_string(), "15511210043330985984000000");
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn factorial(&self) -> EvalResult<Self> {
        let upper = MAX_FACTORIAL as f64;
        let Self::Integer(n) = *self else {
            return Err(RuntimeError::DomainError { value: self.to_f64(),
                                                   lower: 0.0,
                                                   upper, });
        };
        check_domain(n as f64, 0.0, upper)?;
        let product = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
        Ok(Self::normalize(product))
    }

    /// Numeric comparison. Exact for integers, IEEE ordering otherwise;
    /// `None` only when a `NaN` is involved.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match self.promote(other) {
            Promoted::Small(a, b) => Some(a.cmp(&b)),
            Promoted::Big(a, b) => Some(a.cmp(&b)),
            Promoted::Real(a, b) => a.partial_cmp(&b),
        }
    }
}
