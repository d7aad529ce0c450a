//! Sticky numeric states shared by rationals and integers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn of(negative: bool) -> Self {
        if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }
}

impl std::ops::Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

impl std::ops::Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        Sign::of(self != rhs)
    }
}

/// What a numeric value currently is.
///
/// Finite values carry their payload; the other states are mutually
/// exclusive, so a value can never be both NaN and boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericState<T> {
    Finite(T),
    NaN,
    Infinity(Sign),
    /// A truth value; arithmetic treats it as 1 or 0.
    Boolean(bool),
}

impl<T> NumericState<T> {
    pub fn is_nan(&self) -> bool {
        matches!(self, NumericState::NaN)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, NumericState::Infinity(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, NumericState::Boolean(_))
    }

    pub fn finite(&self) -> Option<&T> {
        match self {
            NumericState::Finite(v) => Some(v),
            _ => None,
        }
    }
}
