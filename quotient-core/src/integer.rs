//! Integer values for the discrete domain
//!
//! Same sticky states as `Number`, wrapping a single dashu integer instead of
//! a fraction. Division is floor division.

use crate::bigint;
use crate::number::Number;
use crate::state::{NumericState, Sign};
use dashu_int::IBig;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Integer {
    state: NumericState<IBig>,
    approximation: bool,
}

impl Integer {
    pub fn new(value: IBig) -> Self {
        Self { state: NumericState::Finite(value), approximation: false }
    }

    pub fn nan() -> Self {
        Self { state: NumericState::NaN, approximation: false }
    }

    pub fn infinity(sign: Sign) -> Self {
        Self { state: NumericState::Infinity(sign), approximation: false }
    }

    pub fn boolean(value: bool) -> Self {
        Self { state: NumericState::Boolean(value), approximation: false }
    }

    pub fn with_approximation(mut self, approximation: bool) -> Self {
        self.approximation = approximation;
        self
    }

    /// Floor of a rational. Dropping a fractional part marks the result
    /// approximate.
    pub fn from_number(number: &Number) -> Self {
        let approximation = number.is_approximation();
        match number.state() {
            NumericState::Finite(r) => {
                Self::new(r.floor()).with_approximation(approximation || !r.is_integer())
            }
            NumericState::Boolean(b) => Self::boolean(*b).with_approximation(approximation),
            NumericState::Infinity(sign) => Self::infinity(*sign).with_approximation(approximation),
            NumericState::NaN => Self::nan(),
        }
    }

    pub fn to_number(&self) -> Number {
        let number = match &self.state {
            NumericState::Finite(v) => Number::from_integer(v.clone()),
            NumericState::Boolean(b) => Number::boolean(*b),
            NumericState::Infinity(sign) => Number::infinity(*sign),
            NumericState::NaN => Number::nan(),
        };
        number.with_approximation(self.approximation)
    }

    pub fn state(&self) -> &NumericState<IBig> {
        &self.state
    }

    pub fn value(&self) -> Option<&IBig> {
        self.state.finite()
    }

    pub fn is_nan(&self) -> bool {
        self.state.is_nan()
    }

    pub fn is_approximation(&self) -> bool {
        self.approximation
    }

    fn operand(&self) -> Option<IBig> {
        match &self.state {
            NumericState::Finite(v) => Some(v.clone()),
            NumericState::Boolean(b) => Some(IBig::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Apply `f` to two finite operands; anything else is NaN.
    fn combine(&self, other: &Self, f: impl FnOnce(IBig, IBig) -> Option<IBig>) -> Self {
        let result = match (self.operand(), other.operand()) {
            (Some(a), Some(b)) => f(a, b).map(Self::new).unwrap_or_else(Self::nan),
            _ => Self::nan(),
        };
        result.with_approximation(self.approximation || other.approximation)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.operand().is_none() || other.operand().is_none() {
            return Self::from_number(&self.to_number().add(&other.to_number()));
        }
        self.combine(other, |a, b| Some(a + b))
    }

    pub fn sub(&self, other: &Self) -> Self {
        if self.operand().is_none() || other.operand().is_none() {
            return Self::from_number(&self.to_number().sub(&other.to_number()));
        }
        self.combine(other, |a, b| Some(a - b))
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.operand().is_none() || other.operand().is_none() {
            return Self::from_number(&self.to_number().mul(&other.to_number()));
        }
        self.combine(other, |a, b| Some(a * b))
    }

    /// Floor division; a zero divisor yields NaN.
    pub fn div(&self, other: &Self) -> Self {
        Self::from_number(&self.to_number().div(&other.to_number()).floor())
            .with_approximation(self.approximation || other.approximation)
    }

    /// Remainder with the sign of the divisor; zero divisor yields NaN.
    pub fn rem(&self, other: &Self) -> Self {
        self.combine(other, |a, b| {
            if b.is_zero() {
                return None;
            }
            let r = &a % &b;
            if !r.is_zero() && bigint::is_negative(&r) != bigint::is_negative(&b) {
                Some(r + b)
            } else {
                Some(r)
            }
        })
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            NumericState::Finite(v) => write!(f, "{}", v),
            NumericState::Boolean(b) => write!(f, "{}", b),
            NumericState::NaN => write!(f, "NaN"),
            NumericState::Infinity(Sign::Positive) => write!(f, "∞"),
            NumericState::Infinity(Sign::Negative) => write!(f, "-∞"),
        }
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_number().partial_cmp(&other.to_number())
    }
}
