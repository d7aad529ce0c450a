//! Powers, roots and tetration

use super::{headroom, log10_estimate, rational_from_f64, Computation};
use crate::constants::{MAX_HALLEY_DEGREE, MAX_POWER_DIGITS, MAX_ROOT_ITERATIONS};
use quotient_core::bigint::{self, decimal_digits, pow10};
use quotient_core::{IBig, Number, NumericState, Rational};

/// Digits of `|value|^exponent`, roughly.
fn power_digits(value: &Rational, exponent: u64) -> u64 {
    let significant = |n: &IBig| {
        if bigint::abs(n) > IBig::ONE {
            decimal_digits(n) as u64
        } else {
            0
        }
    };
    let per_step = significant(value.numerator()) + significant(value.denominator());
    per_step.saturating_mul(exponent)
}

impl Computation<'_> {
    /// `base^exponent`.
    ///
    /// Integer exponents are exact. Rational exponents take an exact root
    /// when one exists and fall back to `exp(exponent·ln base)`. Negative
    /// bases only admit exponents with odd denominators.
    pub fn pow(&self, base: &Number, exponent: &Number) -> Number {
        if base.is_nan() || exponent.is_nan() {
            return Number::nan();
        }
        let approximation = base.is_approximation() || exponent.is_approximation();

        if let Some(e) = exponent.to_integer() {
            return self.pow_integer(base, &e).with_approximation(approximation);
        }
        let (Some(b), Some(p)) = (base.to_rational(), exponent.to_rational()) else {
            return Number::nan();
        };

        if b.is_zero() {
            return if p.is_positive() { Number::zero() } else { Number::nan() };
        }
        if b.is_negative() {
            if bigint::is_even(p.denominator()) {
                return Number::nan();
            }
            let magnitude = self.pow(&base.abs(), exponent);
            return if bigint::is_even(p.numerator()) { magnitude } else { magnitude.neg() };
        }

        if let Some(exact) = self.exact_rational_power(&b, &p) {
            return Number::from_rational(exact).with_approximation(approximation);
        }
        self.approximate(self.pow_rational(&b, &p))
    }

    fn pow_integer(&self, base: &Number, exponent: &IBig) -> Number {
        if let Ok(e) = i64::try_from(exponent.clone()) {
            if let Some(b) = base.rational() {
                if power_digits(b, e.unsigned_abs()) > MAX_POWER_DIGITS as u64 {
                    tracing::debug!(base = %b, exponent = e, "power too large");
                    return Number::nan();
                }
            }
            return base.powi(e);
        }
        // only 0, 1 and -1 survive exponents beyond i64
        match base.to_rational() {
            Some(b) if b.is_zero() && !bigint::is_negative(exponent) => Number::zero(),
            Some(b) if b.is_one() => Number::one(),
            Some(b) if b.abs().is_one() => {
                if bigint::is_even(exponent) {
                    Number::one()
                } else {
                    Number::from_i64(-1)
                }
            }
            _ => Number::nan(),
        }
    }

    /// `b^(p/q)` for positive `b` when `b` is a perfect `q`-th power.
    fn exact_rational_power(&self, b: &Rational, p: &Rational) -> Option<Rational> {
        let q = u32::try_from(p.denominator().clone()).ok()?;
        let numerator = bigint::exact_root(b.numerator(), q)?;
        let denominator = bigint::exact_root(b.denominator(), q)?;
        let root = Rational::new(numerator, denominator)?;
        let k = i64::try_from(p.numerator().clone()).ok()?;
        if power_digits(&root, k.unsigned_abs()) > MAX_POWER_DIGITS as u64 {
            return None;
        }
        root.pow(k)
    }

    /// `exp(p·ln b)` for positive `b`, with ln carried far enough that the
    /// magnitude of the result does not eat the requested digits.
    fn pow_rational(&self, b: &Rational, p: &Rational) -> Option<Rational> {
        let result_log10 = p.to_f64() * log10_estimate(b);
        let exponent_log10 = log10_estimate(&p.abs());
        let work = self.digits() + headroom(result_log10) + headroom(exponent_log10) + 2;
        let ln_b = self.ln_rational(b, work)?;
        self.exp_rational(&ln_b.mul(p), self.digits())
    }

    // ========== Roots ==========

    pub fn sqrt(&self, x: &Number) -> Number {
        self.root(x, 2)
    }

    pub fn cbrt(&self, x: &Number) -> Number {
        self.root(x, 3)
    }

    /// The real `n`-th root. Even roots of negatives are NaN; odd roots keep
    /// the sign. Perfect powers are exact.
    pub fn root(&self, x: &Number, n: u32) -> Number {
        if n == 0 {
            return Number::nan();
        }
        if n == 1 {
            return x.clone();
        }
        match x.state() {
            NumericState::NaN => return Number::nan(),
            NumericState::Infinity(sign) => {
                return if sign.is_negative() && n % 2 == 0 { Number::nan() } else { x.clone() };
            }
            _ => {}
        }
        let Some(r) = x.to_rational() else {
            return Number::nan();
        };
        if r.is_zero() {
            return Number::zero().with_approximation(x.is_approximation());
        }
        if r.is_negative() {
            if n % 2 == 0 {
                return Number::nan();
            }
            return self.root(&x.neg(), n).neg();
        }

        if let (Some(p), Some(q)) = (
            bigint::exact_root(r.numerator(), n),
            bigint::exact_root(r.denominator(), n),
        ) {
            return Number::new(p, q).with_approximation(x.is_approximation());
        }
        match self.root_rational(&r, n, self.digits()) {
            Some(y) => Number::from_rational(y).approximate(),
            None => Number::nan(),
        }
    }

    /// Positive `n`-th root of positive `x` to `digits` decimals.
    pub(crate) fn root_rational(&self, x: &Rational, n: u32, digits: usize) -> Option<Rational> {
        if n > MAX_HALLEY_DEGREE {
            let work = digits + 2;
            let ln_x = self.ln_rational(x, work + decimal_digits(&IBig::from(n)))?;
            return self.exp_rational(&ln_x.div_int(&IBig::from(n))?, digits);
        }
        self.halley(x, n, digits)
    }

    /// Halley's iteration on `f(y) = y^n - x`:
    /// `y' = y - 2·f·f' / (2·f'^2 - f·f'')` with `f' = n·y^(n-1)` and
    /// `f'' = n·(n-1)·y^(n-2)`.
    fn halley(&self, x: &Rational, n: u32, digits: usize) -> Option<Rational> {
        let tolerance = Rational::new(IBig::ONE, pow10(digits + 1))?;
        let n_big = IBig::from(n);
        let curvature = IBig::from(u64::from(n) * u64::from(n - 1));
        let two = IBig::from(2u8);
        let exponent = i64::from(n);

        let mut y = root_seed(x, n);
        for iteration in 0..MAX_ROOT_ITERATIONS {
            if self.is_cancelled() {
                tracing::debug!(iteration, "root iteration cancelled");
                return None;
            }
            if y.is_zero() {
                return Some(y);
            }
            let y_n2 = y.pow(exponent - 2)?;
            let y_n1 = y_n2.mul(&y);
            let f = y_n1.mul(&y).sub(x);
            if f.is_zero() {
                return Some(y);
            }
            let f1 = y_n1.mul_int(&n_big);
            let f2 = y_n2.mul_int(&curvature);
            let numerator = f.mul(&f1).mul_int(&two);
            let denominator = f1.mul(&f1).mul_int(&two).sub(&f.mul(&f2));
            let next = y.sub(&numerator.checked_div(&denominator)?).round_to_decimals(digits + 5);
            let converged = next.sub(&y).abs() < tolerance;
            y = next;
            if converged {
                break;
            }
        }
        Some(y.round_to_decimals(digits))
    }

    // ========== Tetration ==========

    /// `a ↑↑ height`, iterated from `a ↑↑ 0 = 1`. Stops early once the tower
    /// reaches a fixed point.
    pub fn tetration(&self, a: &Number, height: &IBig) -> Number {
        let Ok(height) = u64::try_from(height.clone()) else {
            return Number::nan();
        };
        let mut result = Number::one();
        for _ in 0..height {
            if self.is_cancelled() {
                tracing::debug!("tetration cancelled");
                return Number::nan();
            }
            let next = self.pow(a, &result);
            if next.is_nan() || next.is_infinite() || next == result {
                return next;
            }
            result = next;
        }
        result
    }

    // ========== Constants ==========

    pub fn sqrt2(&self) -> Number {
        self.sqrt(&Number::from_i64(2))
    }

    /// The golden ratio `(1 + √5) / 2`.
    pub fn phi(&self) -> Number {
        let digits = self.digits();
        let value = self
            .root_rational(&Rational::from_i64(5), 2, digits + 1)
            .and_then(|s| s.add(&Rational::one()).div_int(&IBig::from(2u8)));
        self.approximate(value)
    }
}

/// A starting point for the root iteration: the float root when it is
/// representable, otherwise a power of ten on the right side of the root.
fn root_seed(x: &Rational, n: u32) -> Rational {
    let estimate = x.to_f64().powf(1.0 / f64::from(n));
    if estimate.is_finite() && estimate > 0.0 {
        if let Some(seed) = rational_from_f64(estimate) {
            return seed;
        }
    }
    let scale = |digits: usize| pow10(digits.div_ceil(n as usize));
    if *x >= Rational::one() {
        Rational::from_integer(scale(decimal_digits(&x.ceil())))
    } else {
        let gap = decimal_digits(x.denominator()).saturating_sub(decimal_digits(x.numerator()));
        Rational::new(IBig::ONE, scale(gap.saturating_sub(1))).unwrap_or_else(Rational::one)
    }
}
