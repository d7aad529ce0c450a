//! Arbitrary precision numbers
//!
//! A `Number` is an exact reduced fraction of dashu integers together with a
//! sticky state: NaN, signed infinity and booleans are explicit variants, and
//! the approximation flag survives every arithmetic operation that touches an
//! approximate operand. Division by zero never fails; it yields NaN.

use crate::bigint;
use crate::rational::Rational;
use crate::state::{NumericState, Sign};
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use thiserror::Error;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),
}

/// Fractional digits shown for approximations when no precision is requested
pub const DEFAULT_DISPLAY_DECIMALS: usize = 12;

/// More trailing decimal zeros than this earn a cached scientific form
const EXPONENT_THRESHOLD: usize = 6;

/// `mantissa × base^exponent`, cached for display and logarithm shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExponentRepresentation {
    pub mantissa: Rational,
    pub base: u32,
    pub exponent: i64,
}

impl ExponentRepresentation {
    pub fn detect(value: &Rational) -> Option<Self> {
        let zeros = bigint::trailing_decimal_zeros(value.numerator());
        if zeros > EXPONENT_THRESHOLD {
            let mantissa = Rational::new(
                value.numerator() / bigint::pow10(zeros),
                value.denominator().clone(),
            )?;
            return Some(Self { mantissa, base: 10, exponent: zeros as i64 });
        }
        let zeros = bigint::trailing_decimal_zeros(value.denominator());
        if zeros > EXPONENT_THRESHOLD {
            let mantissa = Rational::new(
                value.numerator().clone(),
                value.denominator() / bigint::pow10(zeros),
            )?;
            return Some(Self { mantissa, base: 10, exponent: -(zeros as i64) });
        }
        None
    }

    pub fn value(&self) -> Rational {
        let scale = Rational::from_integer(IBig::from(self.base))
            .pow(self.exponent)
            .unwrap_or_else(Rational::zero);
        self.mantissa.mul(&scale)
    }
}

/// Exact rational with sticky computed state
#[derive(Debug, Clone)]
pub struct Number {
    state: NumericState<Rational>,
    approximation: bool,
    exponent: Option<ExponentRepresentation>,
}

/// Arithmetic view of a number: booleans read as 1 and 0.
enum Operand<'a> {
    Finite(Cow<'a, Rational>),
    Infinite(Sign),
    NaN,
}

impl Number {
    // ========== Construction ==========

    pub fn new(numerator: IBig, denominator: IBig) -> Self {
        Rational::new(numerator, denominator)
            .map(Self::from_rational)
            .unwrap_or_else(Self::nan)
    }

    pub fn from_rational(value: Rational) -> Self {
        Self::from_state(NumericState::Finite(value), false)
    }

    pub fn from_integer(value: IBig) -> Self {
        Self::from_rational(Rational::from_integer(value))
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_rational(Rational::from_i64(value))
    }

    /// `n / d`; a zero denominator gives NaN.
    pub fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self::new(IBig::from(numerator), IBig::from(denominator))
    }

    fn from_state(state: NumericState<Rational>, approximation: bool) -> Self {
        Self { state, approximation, exponent: None }
    }

    pub fn zero() -> Self {
        Self::from_rational(Rational::zero())
    }

    pub fn one() -> Self {
        Self::from_rational(Rational::one())
    }

    pub fn nan() -> Self {
        Self::from_state(NumericState::NaN, false)
    }

    pub fn infinity(sign: Sign) -> Self {
        Self::from_state(NumericState::Infinity(sign), false)
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_state(NumericState::Boolean(value), false)
    }

    pub fn with_approximation(mut self, approximation: bool) -> Self {
        self.approximation = approximation;
        self
    }

    /// Mark as the product of a series or iteration.
    pub fn approximate(self) -> Self {
        self.with_approximation(true)
    }

    /// Cache the scientific form when the value has one.
    pub fn with_exponent_representation(mut self) -> Self {
        self.exponent = self.rational().and_then(ExponentRepresentation::detect);
        self
    }

    // ========== Queries ==========

    pub fn state(&self) -> &NumericState<Rational> {
        &self.state
    }

    pub fn is_nan(&self) -> bool {
        self.state.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.state.is_infinite()
    }

    pub fn is_boolean(&self) -> bool {
        self.state.is_boolean()
    }

    /// Finite rational or boolean.
    pub fn is_finite(&self) -> bool {
        matches!(self.state, NumericState::Finite(_) | NumericState::Boolean(_))
    }

    pub fn is_approximation(&self) -> bool {
        self.approximation
    }

    pub fn is_zero(&self) -> bool {
        self.to_rational().is_some_and(|r| r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        self.to_rational().is_some_and(|r| r.is_one())
    }

    pub fn is_integer(&self) -> bool {
        self.to_rational().is_some_and(|r| r.is_integer())
    }

    pub fn is_negative(&self) -> bool {
        match &self.state {
            NumericState::Finite(r) => r.is_negative(),
            NumericState::Infinity(sign) => sign.is_negative(),
            _ => false,
        }
    }

    pub fn is_positive(&self) -> bool {
        match &self.state {
            NumericState::Finite(r) => r.is_positive(),
            NumericState::Infinity(sign) => !sign.is_negative(),
            NumericState::Boolean(b) => *b,
            NumericState::NaN => false,
        }
    }

    /// The stored fraction of a finite value.
    pub fn rational(&self) -> Option<&Rational> {
        self.state.finite()
    }

    /// The value as a fraction, reading booleans as 1 and 0.
    pub fn to_rational(&self) -> Option<Cow<'_, Rational>> {
        match self.operand() {
            Operand::Finite(r) => Some(r),
            _ => None,
        }
    }

    /// Truth value of a boolean, `1` or `0`.
    pub fn as_logical(&self) -> Option<bool> {
        match &self.state {
            NumericState::Boolean(b) => Some(*b),
            NumericState::Finite(r) if r.is_zero() => Some(false),
            NumericState::Finite(r) if r.is_one() => Some(true),
            _ => None,
        }
    }

    /// The integer value, when the number is an integer.
    pub fn to_integer(&self) -> Option<IBig> {
        self.to_rational()
            .filter(|r| r.is_integer())
            .map(|r| r.numerator().clone())
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.to_rational().and_then(|r| r.to_i64())
    }

    pub fn to_f64(&self) -> f64 {
        match self.operand() {
            Operand::Finite(r) => r.to_f64(),
            Operand::Infinite(Sign::Positive) => f64::INFINITY,
            Operand::Infinite(Sign::Negative) => f64::NEG_INFINITY,
            Operand::NaN => f64::NAN,
        }
    }

    /// Cached scientific form, or one detected on demand.
    pub fn exponent_representation(&self) -> Option<ExponentRepresentation> {
        self.exponent
            .clone()
            .or_else(|| self.rational().and_then(ExponentRepresentation::detect))
    }

    fn operand(&self) -> Operand<'_> {
        match &self.state {
            NumericState::Finite(r) => Operand::Finite(Cow::Borrowed(r)),
            NumericState::Boolean(b) => {
                Operand::Finite(Cow::Owned(Rational::from_i64(i64::from(*b))))
            }
            NumericState::Infinity(sign) => Operand::Infinite(*sign),
            NumericState::NaN => Operand::NaN,
        }
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        let state = match (self.operand(), other.operand()) {
            (Operand::NaN, _) | (_, Operand::NaN) => NumericState::NaN,
            (Operand::Infinite(a), Operand::Infinite(b)) => {
                if a == b {
                    NumericState::Infinity(a)
                } else {
                    NumericState::NaN
                }
            }
            (Operand::Infinite(s), _) | (_, Operand::Infinite(s)) => NumericState::Infinity(s),
            (Operand::Finite(a), Operand::Finite(b)) => NumericState::Finite(a.add(&b)),
        };
        Self::from_state(state, self.approximation || other.approximation)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        let state = match (self.operand(), other.operand()) {
            (Operand::NaN, _) | (_, Operand::NaN) => NumericState::NaN,
            (Operand::Infinite(a), Operand::Infinite(b)) => NumericState::Infinity(a * b),
            (Operand::Infinite(s), Operand::Finite(x)) | (Operand::Finite(x), Operand::Infinite(s)) => {
                if x.is_zero() {
                    NumericState::NaN
                } else {
                    NumericState::Infinity(s * Sign::of(x.is_negative()))
                }
            }
            (Operand::Finite(a), Operand::Finite(b)) => NumericState::Finite(a.mul(&b)),
        };
        Self::from_state(state, self.approximation || other.approximation)
    }

    /// Division; a zero divisor yields NaN.
    pub fn div(&self, other: &Self) -> Self {
        let state = match (self.operand(), other.operand()) {
            (Operand::NaN, _) | (_, Operand::NaN) => NumericState::NaN,
            (_, Operand::Finite(b)) if b.is_zero() => NumericState::NaN,
            (Operand::Infinite(_), Operand::Infinite(_)) => NumericState::NaN,
            (Operand::Infinite(s), Operand::Finite(b)) => {
                NumericState::Infinity(s * Sign::of(b.is_negative()))
            }
            (Operand::Finite(_), Operand::Infinite(_)) => NumericState::Finite(Rational::zero()),
            (Operand::Finite(a), Operand::Finite(b)) => a
                .checked_div(&b)
                .map(NumericState::Finite)
                .unwrap_or(NumericState::NaN),
        };
        Self::from_state(state, self.approximation || other.approximation)
    }

    /// Negation. Zero stays the canonical zero.
    pub fn neg(&self) -> Self {
        match self.operand() {
            Operand::NaN => Self::nan(),
            Operand::Infinite(s) => Self::from_state(NumericState::Infinity(-s), self.approximation),
            Operand::Finite(r) if r.is_zero() => Self::zero(),
            Operand::Finite(r) => Self::from_state(NumericState::Finite(r.neg()), self.approximation),
        }
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.map_finite(|r| r.clone())
        }
    }

    pub fn recip(&self) -> Self {
        Self::one().div(self)
    }

    /// Exact power by a machine integer. `0^0` and negative powers of zero
    /// are NaN.
    pub fn powi(&self, exponent: i64) -> Self {
        let state = match self.operand() {
            Operand::NaN => NumericState::NaN,
            Operand::Infinite(s) => match exponent.cmp(&0) {
                Ordering::Greater if exponent % 2 == 1 => NumericState::Infinity(s),
                Ordering::Greater => NumericState::Infinity(Sign::Positive),
                Ordering::Less => NumericState::Finite(Rational::zero()),
                Ordering::Equal => NumericState::NaN,
            },
            Operand::Finite(r) if r.is_zero() && exponent <= 0 => NumericState::NaN,
            Operand::Finite(r) => r
                .pow(exponent)
                .map(NumericState::Finite)
                .unwrap_or(NumericState::NaN),
        };
        Self::from_state(state, self.approximation)
    }

    pub fn floor(&self) -> Self {
        self.map_finite(|r| Rational::from_integer(r.floor()))
    }

    pub fn ceil(&self) -> Self {
        self.map_finite(|r| Rational::from_integer(r.ceil()))
    }

    pub fn trunc(&self) -> Self {
        self.map_finite(|r| Rational::from_integer(r.trunc()))
    }

    /// `self - n·floor(self/n)`; the result takes the sign of `n`.
    pub fn modulo(&self, n: &Self) -> Self {
        let quotient = self.div(n).floor();
        self.sub(&n.mul(&quotient))
    }

    pub fn round_to_decimals(&self, digits: usize) -> Self {
        self.map_finite(|r| r.round_to_decimals(digits))
    }

    /// Apply `f` to the fraction of a finite value (booleans read as 1/0),
    /// passing other states through.
    fn map_finite(&self, f: impl FnOnce(&Rational) -> Rational) -> Self {
        match self.operand() {
            Operand::Finite(r) => Self::from_state(NumericState::Finite(f(&r)), self.approximation),
            _ => Self::from_state(self.state.clone(), self.approximation),
        }
    }

    // ========== Formatting ==========

    /// Truncated decimal digits and whether they are the complete expansion.
    pub fn decimal_expansion(&self, digits: usize) -> (String, bool) {
        match &self.state {
            NumericState::Finite(r) => r.decimal_expansion(digits),
            NumericState::Boolean(b) => (u8::from(*b).to_string(), true),
            NumericState::NaN => ("NaN".to_string(), false),
            NumericState::Infinity(Sign::Positive) => ("∞".to_string(), false),
            NumericState::Infinity(Sign::Negative) => ("-∞".to_string(), false),
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

macro_rules! forward_binary_op {
    ($op:ident, $method:ident) => {
        impl std::ops::$op<&Number> for &Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                Number::$method(self, rhs)
            }
        }

        impl std::ops::$op for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                Number::$method(&self, &rhs)
            }
        }
    };
}

forward_binary_op!(Add, add);
forward_binary_op!(Sub, sub);
forward_binary_op!(Mul, mul);
forward_binary_op!(Div, div);

impl std::ops::Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::neg(self)
    }
}

impl std::ops::Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::neg(&self)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Self::from_rational(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42", "NaN", "∞", "true"
    fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        match s {
            "NaN" => return Ok(Self::nan()),
            "∞" | "+∞" | "inf" => return Ok(Self::infinity(Sign::Positive)),
            "-∞" | "-inf" => return Ok(Self::infinity(Sign::Negative)),
            "true" => return Ok(Self::boolean(true)),
            "false" => return Ok(Self::boolean(false)),
            _ => {}
        }
        Rational::parse(s)
            .map(|r| Self::from_rational(r).with_exponent_representation())
            .ok_or_else(|| NumberError::ParseError(s.to_string()))
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            NumericState::Boolean(b) => write!(f, "{}", b),
            NumericState::Finite(r) if !self.approximation && f.precision().is_none() => {
                write!(f, "{}", r)
            }
            _ => {
                let digits = f.precision().unwrap_or(DEFAULT_DISPLAY_DECIMALS);
                write!(f, "{}", self.decimal_expansion(digits).0)
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Numeric equality: approximation flags and cached forms are ignored, NaN
/// equals nothing.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.operand(), other.operand()) {
            (Operand::NaN, _) | (_, Operand::NaN) => None,
            (Operand::Infinite(a), Operand::Infinite(b)) => {
                Some(a.is_negative().cmp(&b.is_negative()).reverse())
            }
            (Operand::Infinite(s), _) => {
                Some(if s.is_negative() { Ordering::Less } else { Ordering::Greater })
            }
            (_, Operand::Infinite(s)) => {
                Some(if s.is_negative() { Ordering::Greater } else { Ordering::Less })
            }
            (Operand::Finite(a), Operand::Finite(b)) => Some(a.cmp(&b)),
        }
    }
}
