//! Results of an evaluation
//!
//! A value is a rational number, a discrete-domain integer, or a prime
//! factorization. All three describe themselves as text and compare by value.

use crate::{Factorization, Integer, Number};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(Number),
    Integer(Integer),
    Factorization(Factorization),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_factorization(&self) -> Option<&Factorization> {
        match self {
            Value::Factorization(f) => Some(f),
            _ => None,
        }
    }

    /// Numeric view: integers widen to rationals, factorizations have none.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(n.clone()),
            Value::Integer(i) => Some(i.to_number()),
            Value::Factorization(_) => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        match self {
            Value::Number(n) => n.is_nan(),
            Value::Integer(i) => i.is_nan(),
            Value::Factorization(f) => !f.is_complete(),
        }
    }

    pub fn is_approximation(&self) -> bool {
        match self {
            Value::Number(n) => n.is_approximation(),
            Value::Integer(i) => i.is_approximation(),
            Value::Factorization(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Integer(_) => "Integer",
            Value::Factorization(_) => "Factorization",
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Value equality across numeric variants; factorizations compare by
    /// their factored integer.
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Factorization(a), Value::Factorization(b)) => {
                a.value() == b.value() && a.factors() == b.factors()
            }
            (Value::Factorization(_), _) | (_, Value::Factorization(_)) => false,
            _ => self.to_number() == other.to_number(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => std::fmt::Display::fmt(n, f),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Factorization(x) => write!(f, "{}", x),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Integer> for Value {
    fn from(i: Integer) -> Self {
        Value::Integer(i)
    }
}

impl From<Factorization> for Value {
    fn from(f: Factorization) -> Self {
        Value::Factorization(f)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from_i64(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Number(Number::boolean(b))
    }
}
