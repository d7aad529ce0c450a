//! Numeric algorithms over exact rationals
//!
//! A [`Computation`] pairs the evaluation parameters with the cancellation
//! token of one evaluation. Every algorithm polls the token inside its loops
//! and yields NaN once a cancel is observed. Domain problems (`ln(-1)`,
//! `0^0`) are NaN as well, never errors.
//!
//! Approximations are carried at [`EvaluationParameters::working_digits`]
//! digits. Internal helpers take an explicit digit count so callers can
//! request headroom for error amplification.

mod combinatorics;
mod number_theory;
mod power;
mod transcendental;

use crate::params::{AngleMode, EvaluationParameters};
use crate::series::{Expansion, TaylorSeries};
use quotient_core::{CancellationToken, IBig, Number, Rational};

#[derive(Debug, Clone, Copy)]
pub struct Computation<'a> {
    params: &'a EvaluationParameters,
    cancel: &'a CancellationToken,
}

impl<'a> Computation<'a> {
    pub fn new(params: &'a EvaluationParameters, cancel: &'a CancellationToken) -> Self {
        Self { params, cancel }
    }

    pub fn parameters(&self) -> &'a EvaluationParameters {
        self.params
    }

    pub fn cancel_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancel_requested()
    }

    /// Digits approximations are rounded to.
    pub fn digits(&self) -> usize {
        self.params.working_digits()
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.params.angle_mode
    }

    pub(crate) fn series(&self, expansion: Expansion, x: &Rational, digits: usize) -> Option<Rational> {
        TaylorSeries::new(expansion, digits).evaluate(x, self.cancel)
    }

    /// Wrap an approximated value; `None` (cancelled) becomes NaN.
    pub(crate) fn approximate(&self, value: Option<Rational>) -> Number {
        match value {
            Some(r) => Number::from_rational(r.round_to_decimals(self.digits())).approximate(),
            None => Number::nan(),
        }
    }
}

/// An exact integer result; `None` (cancelled) becomes NaN.
pub(crate) fn integer(value: Option<IBig>) -> Number {
    value.map(Number::from_integer).unwrap_or_else(Number::nan)
}

/// Exact rational value of a finite float, used to seed iterations.
pub(crate) fn rational_from_f64(value: f64) -> Option<Rational> {
    if !value.is_finite() {
        return None;
    }
    Rational::parse(&format!("{:e}", value))
}

/// Rough base-10 logarithm of a positive rational from its digit counts.
pub(crate) fn log10_estimate(value: &Rational) -> f64 {
    let f = value.to_f64();
    if f.is_finite() && f > 0.0 {
        return f.log10();
    }
    let num = quotient_core::bigint::decimal_digits(value.numerator()) as f64;
    let den = quotient_core::bigint::decimal_digits(value.denominator()) as f64;
    num - den
}

/// Extra digits needed to absorb a value of magnitude `10^log10`.
pub(crate) fn headroom(log10: f64) -> usize {
    if log10.is_finite() && log10 > 0.0 {
        log10.ceil() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_from_f64() {
        assert_eq!(rational_from_f64(0.5), Some(Rational::from_ratio(1, 2)));
        assert_eq!(rational_from_f64(1500.0), Some(Rational::from_i64(1500)));
        assert_eq!(rational_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_log10_estimate() {
        let big = Rational::from_integer(quotient_core::bigint::pow10(400));
        assert!((log10_estimate(&big) - 401.0).abs() < 1.5);
        assert!((log10_estimate(&Rational::from_i64(1000)) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_computation_yields_nan() {
        let params = EvaluationParameters::default();
        let cancel = CancellationToken::new();
        cancel.request_cancel();
        let c = Computation::new(&params, &cancel);
        assert!(c.approximate(None).is_nan());
        assert!(c.exp(&Number::one()).is_nan());
    }
}
