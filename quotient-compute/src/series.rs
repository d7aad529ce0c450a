//! Truncated power series
//!
//! Each expansion is summed term by term on exact rationals. Terms are
//! rounded a few digits below the target so the fractions stay small, and
//! summation stops once the remaining tail is provably below
//! `10^-(digits+1)`. The count heuristic `2·(|x|+1)·digits` is a hard cap.

use quotient_core::{CancellationToken, IBig, Rational};

/// Digits kept on each term beyond the requested ones
const TERM_GUARD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// `Σ (-1)^k x^(2k+1) / (2k+1)!`
    Sine,
    /// `Σ (-1)^(k+1) (x-1)^k / k`, for `1/2 ≤ x ≤ 1`
    NaturalLog,
    /// `Σ x^k / k!`
    Exponential,
    /// `Σ_{k≥1} x^k / k!`
    ExponentialMinusOne,
    /// Machin's formula `16·atan(1/5) - 4·atan(1/239)`; ignores `x`
    Pi,
}

#[derive(Debug, Clone)]
pub struct TaylorSeries {
    expansion: Expansion,
    digits: usize,
}

impl TaylorSeries {
    pub fn new(expansion: Expansion, digits: usize) -> Self {
        Self { expansion, digits }
    }

    /// Upper bound on the number of terms summed for `x`.
    pub fn iteration_bound(&self, x: &Rational) -> usize {
        let magnitude = x.abs().ceil().try_into().unwrap_or(usize::MAX / 4);
        let bound = 2usize
            .saturating_mul(magnitude.saturating_add(1))
            .saturating_mul(self.digits);
        bound.saturating_add(16)
    }

    /// Sum the series at `x`, rounded to the requested digits.
    ///
    /// `None` when cancelled, or when `x` lies outside the convergence range
    /// of the natural log expansion.
    pub fn evaluate(&self, x: &Rational, cancel: &CancellationToken) -> Option<Rational> {
        let sum = match self.expansion {
            Expansion::Sine => {
                let x_squared = x.mul(x);
                self.sum_terms(x.clone(), x, cancel, |k, term| {
                    let divisor = IBig::from((2 * k + 2) * (2 * k + 3));
                    term.mul(&x_squared).neg().div_int(&divisor)
                })?
            }
            Expansion::Exponential => self.sum_terms(Rational::one(), x, cancel, |k, term| {
                term.mul(x).div_int(&IBig::from(k + 1))
            })?,
            Expansion::ExponentialMinusOne => self.sum_terms(x.clone(), x, cancel, |k, term| {
                term.mul(x).div_int(&IBig::from(k + 2))
            })?,
            Expansion::NaturalLog => self.natural_log(x, cancel)?,
            Expansion::Pi => {
                let a = self.arctan_reciprocal(5, cancel)?;
                let b = self.arctan_reciprocal(239, cancel)?;
                a.mul_int(&IBig::from(16u8)).sub(&b.mul_int(&IBig::from(4u8)))
            }
        };
        Some(sum.round_to_decimals(self.digits))
    }

    fn tolerance(&self) -> Rational {
        Rational::new(IBig::ONE, quotient_core::bigint::pow10(self.digits + 1))
            .unwrap_or_else(Rational::zero)
    }

    fn round(&self, value: &Rational) -> Rational {
        value.round_to_decimals(self.digits + TERM_GUARD)
    }

    /// Sum terms produced by `next(k, term_k) = term_{k+1}`.
    ///
    /// Stopping is only allowed once `k ≥ 2|x|`, past which every ratio
    /// between consecutive terms is at most 1/2 and the tail is bounded by
    /// the last term.
    fn sum_terms(
        &self,
        first: Rational,
        x: &Rational,
        cancel: &CancellationToken,
        mut next: impl FnMut(usize, &Rational) -> Option<Rational>,
    ) -> Option<Rational> {
        let tolerance = self.tolerance();
        let min_terms: usize = x
            .abs()
            .mul_int(&IBig::from(2u8))
            .ceil()
            .try_into()
            .unwrap_or(usize::MAX);
        let bound = self.iteration_bound(x);

        let mut term = self.round(&first);
        let mut sum = Rational::zero();
        for k in 0..bound {
            if cancel.is_cancel_requested() {
                tracing::debug!(expansion = ?self.expansion, terms = k, "series cancelled");
                return None;
            }
            sum = sum.add(&term);
            if k >= min_terms && term.abs() < tolerance {
                break;
            }
            term = self.round(&next(k, &term)?);
        }
        Some(sum)
    }

    /// `ln x = -Σ (1-x)^k / k`, valid for `1/2 ≤ x ≤ 1`.
    fn natural_log(&self, x: &Rational, cancel: &CancellationToken) -> Option<Rational> {
        let half = Rational::from_ratio(1, 2);
        if *x < half || *x > Rational::one() {
            return None;
        }
        let v = Rational::one().sub(x);
        let tolerance = self.tolerance();
        let bound = self.iteration_bound(&Rational::one());

        let mut power = v.clone();
        let mut sum = Rational::zero();
        for k in 1..=bound {
            if cancel.is_cancel_requested() {
                tracing::debug!(terms = k, "log series cancelled");
                return None;
            }
            let term = power.div_int(&IBig::from(k))?;
            if term < tolerance {
                break;
            }
            sum = sum.add(&term);
            power = self.round(&power.mul(&v));
        }
        Some(sum.neg())
    }

    /// `atan(1/m) = Σ (-1)^k / ((2k+1)·m^(2k+1))`
    fn arctan_reciprocal(&self, m: u32, cancel: &CancellationToken) -> Option<Rational> {
        let m_squared = IBig::from(m * m);
        let tolerance = self.tolerance().div_int(&IBig::from(100u8))?;
        let bound = self.iteration_bound(&Rational::one());

        let mut power = Rational::new(IBig::ONE, IBig::from(m))?;
        let mut sum = Rational::zero();
        for k in 0..bound {
            if cancel.is_cancel_requested() {
                tracing::debug!(terms = k, "pi series cancelled");
                return None;
            }
            let term = self.round(&power.div_int(&IBig::from(2 * k + 1))?);
            if term < tolerance {
                break;
            }
            sum = if k % 2 == 0 { sum.add(&term) } else { sum.sub(&term) };
            power = self.round(&power.div_int(&m_squared)?);
        }
        Some(sum)
    }
}
