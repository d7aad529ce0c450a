//! Factorials, the gamma function and counting numbers
//!
//! The counting functions take arguments that have already been checked to
//! be nonnegative integers and only fail (NaN) when cancelled or when the
//! requested order is beyond [`MAX_RECURRENCE_ORDER`].

use super::{headroom, integer, log10_estimate, Computation};
use crate::constants::{
    BELL, BERNOULLI, MAX_POWER_DIGITS, MAX_RECURRENCE_ORDER, STIRLING_MIN_ARGUMENT, STIRLING_TAIL,
};
use quotient_core::bigint;
use quotient_core::{IBig, Number, NumericState, Rational, Sign};

const LN_10: f64 = std::f64::consts::LN_10;

fn to_usize(n: &IBig) -> Option<usize> {
    usize::try_from(n.clone()).ok()
}

fn recurrence_order(n: &IBig) -> Option<usize> {
    to_usize(n).filter(|&n| n <= MAX_RECURRENCE_ORDER)
}

/// Shift `m` so that `z + m` is large enough for the Stirling series to
/// reach `digits` decimals.
fn stirling_shift(z: f64, digits: usize) -> usize {
    let exponent = (digits as f64 + STIRLING_TAIL.log10()) / 21.0;
    let threshold = STIRLING_MIN_ARGUMENT.max(10f64.powf(exponent));
    if z >= threshold {
        0
    } else {
        (threshold - z).ceil() as usize
    }
}

/// `log10 Γ(z)` in floating point for `z ≥ 1`.
fn log10_gamma_estimate(z: f64) -> f64 {
    ((z - 0.5) * z.ln() - z + 0.5 * std::f64::consts::TAU.ln()) / LN_10
}

impl Computation<'_> {
    // ========== Factorials ==========

    /// `x!`: exact for nonnegative integers, `Γ(x+1)` otherwise. Negative
    /// integers are poles of gamma and give NaN.
    pub fn factorial(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(Sign::Negative) => return Number::nan(),
            NumericState::Infinity(Sign::Positive) => return x.clone(),
            _ => {}
        }
        if let Some(n) = x.to_integer() {
            if bigint::is_negative(&n) {
                return Number::nan();
            }
            return integer(self.factorial_int(&n)).with_approximation(x.is_approximation());
        }
        match x.to_rational() {
            Some(r) => self.gamma(&Number::from_rational(r.add(&Rational::one()))),
            None => Number::nan(),
        }
    }

    /// `n!` for `n ≥ 0`.
    pub(crate) fn factorial_int(&self, n: &IBig) -> Option<IBig> {
        self.descending_product(n, to_usize(n)?, 1)
    }

    /// `n·(n-2)·(n-4)···`, down to 1 or 2.
    pub fn factorial2(&self, n: &IBig) -> Number {
        let Some(count) = to_usize(n) else {
            return Number::nan();
        };
        integer(self.descending_product(n, count.div_ceil(2), 2))
    }

    /// `n·(n-step)···` over `count` factors.
    fn descending_product(&self, n: &IBig, count: usize, step: u8) -> Option<IBig> {
        let step = IBig::from(step);
        let mut result = IBig::ONE;
        let mut factor = n.clone();
        for _ in 0..count {
            if self.is_cancelled() {
                tracing::debug!("product cancelled");
                return None;
            }
            result = result * &factor;
            factor = factor - &step;
        }
        Some(result)
    }

    // ========== Gamma ==========

    /// `Γ(x)`; NaN at the poles `0, -1, -2, ...`.
    pub fn gamma(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(Sign::Negative) => return Number::nan(),
            NumericState::Infinity(Sign::Positive) => return x.clone(),
            _ => {}
        }
        if let Some(n) = x.to_integer() {
            if n <= IBig::ZERO {
                return Number::nan();
            }
            return self.factorial(&Number::from_integer(n - IBig::ONE));
        }
        match x.to_rational() {
            Some(z) => self.approximate(self.gamma_rational(&z, self.digits())),
            None => Number::nan(),
        }
    }

    /// `Γ(z)` for non-integer `z`: the Stirling series for `ln Γ` at
    /// `z + m`, then `Γ(z) = Γ(z+m) / (z·(z+1)···(z+m-1))`.
    pub(crate) fn gamma_rational(&self, z: &Rational, digits: usize) -> Option<Rational> {
        let z_f64 = z.to_f64();
        if !z_f64.is_finite() {
            return None;
        }
        let shift = stirling_shift(z_f64, digits);
        let log10_shifted = log10_gamma_estimate(z_f64 + shift as f64);
        let log10_product: f64 = (0..shift).map(|i| (z_f64 + i as f64).abs().log10()).sum();
        let log10_result = log10_shifted - log10_product;
        if log10_result > MAX_POWER_DIGITS as f64 {
            tracing::debug!(argument = %z, "gamma too large");
            return None;
        }

        let work = digits + 2 + headroom(log10_result) + headroom(-log10_product);
        let shift = stirling_shift(z_f64, work);
        let mut product = Rational::one();
        let mut term = z.clone();
        for _ in 0..shift {
            product = product.mul(&term);
            term = term.add(&Rational::one());
        }

        let ln_gamma = self.ln_gamma_stirling(&term, work)?;
        let gamma = self.exp_rational(&ln_gamma, work)?;
        gamma.checked_div(&product).map(|g| g.round_to_decimals(digits))
    }

    /// `ln Γ(z) ≈ (z-½)·ln z - z + ½·ln 2π + Σ B₂ₖ / (2k·(2k-1)·z^(2k-1))`
    fn ln_gamma_stirling(&self, z: &Rational, digits: usize) -> Option<Rational> {
        let half = Rational::from_ratio(1, 2);
        let ln_z = self.ln_rational(z, digits + headroom(log10_estimate(z)) + 1)?;
        let two_pi = self.pi_rational(digits + 2)?.mul_int(&IBig::from(2u8));
        let ln_two_pi = self.ln_rational(&two_pi, digits + 2)?;

        let mut sum = z.sub(&half).mul(&ln_z).sub(z).add(&ln_two_pi.mul(&half));
        let z_squared = z.mul(z);
        let mut power = z.clone();
        for (index, &(numerator, denominator)) in BERNOULLI.iter().enumerate() {
            if self.is_cancelled() {
                return None;
            }
            let two_k = 2 * (index as i64 + 1);
            let coefficient = Rational::from_ratio(numerator, denominator * two_k * (two_k - 1));
            sum = sum.add(&coefficient.checked_div(&power)?.round_to_decimals(digits + 5));
            power = power.mul(&z_squared);
        }
        Some(sum.round_to_decimals(digits + 1))
    }

    // ========== Binomials and Variations ==========

    /// `C(n, k)`; zero when `k > n`.
    pub fn binomial(&self, n: &IBig, k: &IBig) -> Number {
        integer(self.binomial_int(n, k))
    }

    pub(crate) fn binomial_int(&self, n: &IBig, k: &IBig) -> Option<IBig> {
        if k > n {
            return Some(IBig::ZERO);
        }
        let complement = n - k;
        let k = if complement < *k { complement } else { k.clone() };
        let base = n - &k;
        let mut result = IBig::ONE;
        for i in 1..=to_usize(&k)? {
            if self.is_cancelled() {
                tracing::debug!("binomial cancelled");
                return None;
            }
            let i = IBig::from(i);
            result = result * (&base + &i) / i;
        }
        Some(result)
    }

    /// `n! / (n-k)!`; zero when `k > n`.
    pub fn variations(&self, n: &IBig, k: &IBig) -> Number {
        if k > n {
            return Number::zero();
        }
        match to_usize(k) {
            Some(count) => integer(self.descending_product(n, count, 1)),
            None => Number::nan(),
        }
    }

    // ========== Stirling and Lah Numbers ==========

    /// Unsigned Stirling numbers of the first kind: permutations of `n`
    /// elements with `k` cycles.
    pub fn stirling_cycles(&self, n: &IBig, k: &IBig) -> Number {
        if n == k {
            return Number::one();
        }
        if *n == IBig::ZERO || *k == IBig::ZERO || k > n {
            return Number::zero();
        }
        if *k == n - IBig::ONE {
            return self.binomial(n, &IBig::from(2u8));
        }
        integer(self.triangle(n, k, |m, _| IBig::from(m - 1)))
    }

    /// Stirling numbers of the second kind: partitions of `n` elements into
    /// `k` nonempty sets.
    pub fn stirling_partitions(&self, n: &IBig, k: &IBig) -> Number {
        if n == k {
            return Number::one();
        }
        if *k == IBig::ZERO || k > n {
            return Number::zero();
        }
        if *k == IBig::ONE {
            return Number::one();
        }
        if *k == n - IBig::ONE {
            return self.binomial(n, &IBig::from(2u8));
        }
        integer(self.triangle(n, k, |_, j| IBig::from(j)))
    }

    /// Row by row evaluation of `T(m, j) = weight(m, j)·T(m-1, j) + T(m-1, j-1)`
    /// from `T(0, 0) = 1`.
    fn triangle(&self, n: &IBig, k: &IBig, weight: impl Fn(usize, usize) -> IBig) -> Option<IBig> {
        let (Some(n), Some(k)) = (recurrence_order(n), recurrence_order(k)) else {
            tracing::debug!("recurrence order too large");
            return None;
        };
        let mut row = vec![IBig::ZERO; k + 1];
        row[0] = IBig::ONE;
        for m in 1..=n {
            if self.is_cancelled() {
                tracing::debug!(row = m, "recurrence cancelled");
                return None;
            }
            for j in (1..=k.min(m)).rev() {
                row[j] = weight(m, j) * &row[j] + &row[j - 1];
            }
            row[0] = IBig::ZERO;
        }
        Some(std::mem::take(&mut row[k]))
    }

    /// Lah numbers: partitions of `n` elements into `k` nonempty ordered
    /// lists, `L(n, k) = L(n, k-1)·(n-k+1) / (k·(k-1))` from `L(n, 1) = n!`.
    pub fn lah(&self, n: &IBig, k: &IBig) -> Number {
        if n == k {
            return Number::one();
        }
        if *k == IBig::ZERO || k > n {
            return Number::zero();
        }
        if *k == n - IBig::ONE {
            return Number::from_integer(n * (n - IBig::ONE));
        }
        let Some(k) = to_usize(k) else {
            return Number::nan();
        };
        let Some(mut value) = self.factorial_int(n) else {
            return Number::nan();
        };
        for j in 2..=k {
            if self.is_cancelled() {
                return Number::nan();
            }
            let j_big = IBig::from(j);
            value = value * (n - &j_big + IBig::ONE) / (&j_big * (&j_big - IBig::ONE));
        }
        Number::from_integer(value)
    }

    // ========== Sequences ==========

    /// Bell numbers, `B(m) = Σ C(m-1, i)·B(i)` beyond the table.
    pub fn bell(&self, n: &IBig) -> Number {
        let Some(n) = recurrence_order(n) else {
            return Number::nan();
        };
        if let Some(&known) = BELL.get(n) {
            return Number::from_integer(IBig::from(known));
        }
        let mut sequence: Vec<IBig> = BELL.iter().map(|&b| IBig::from(b)).collect();
        for m in BELL.len()..=n {
            if self.is_cancelled() {
                tracing::debug!(index = m, "bell cancelled");
                return Number::nan();
            }
            let mut coefficient = IBig::ONE;
            let mut sum = IBig::ZERO;
            for (i, b) in sequence.iter().enumerate() {
                sum = sum + &coefficient * b;
                coefficient = coefficient * IBig::from(m - 1 - i) / IBig::from(i + 1);
            }
            sequence.push(sum);
        }
        sequence.pop().map(Number::from_integer).unwrap_or_else(Number::nan)
    }

    /// Catalan numbers, `C(2n, n) / (n + 1)`.
    pub fn catalan(&self, n: &IBig) -> Number {
        let doubled = n * IBig::from(2u8);
        integer(self.binomial_int(&doubled, n).map(|c| c / (n + IBig::ONE)))
    }
}

#[cfg(test)]
mod tests {
    use crate::computation::Computation;
    use crate::params::EvaluationParameters;
    use quotient_core::{CancellationToken, IBig, Number};

    fn run<T>(f: impl FnOnce(&Computation) -> T) -> T {
        let params = EvaluationParameters::default();
        let cancel = CancellationToken::new();
        f(&Computation::new(&params, &cancel))
    }

    fn big(n: i64) -> IBig {
        IBig::from(n)
    }

    fn int(n: Number) -> i64 {
        n.to_i64().unwrap()
    }

    #[test]
    fn test_factorial() {
        run(|c| {
            assert_eq!(int(c.factorial(&Number::from_i64(0))), 1);
            assert_eq!(int(c.factorial(&Number::from_i64(5))), 120);
            assert_eq!(int(c.factorial(&Number::from_i64(20))), 2_432_902_008_176_640_000);
            assert!(c.factorial(&Number::from_i64(-3)).is_nan());
            assert!(!c.factorial(&Number::from_i64(5)).is_approximation());
        });
    }

    #[test]
    fn test_factorial_of_fractions_uses_gamma() {
        run(|c| {
            let half = c.factorial(&Number::from_ratio(1, 2));
            assert!(half.is_approximation());
            assert_eq!(half.decimal_expansion(12).0, "0.886226925452");
            let minus_half = c.factorial(&Number::from_ratio(-1, 2));
            assert_eq!(minus_half.decimal_expansion(12).0, "1.772453850905");
            let larger = c.factorial(&Number::from_ratio(21, 2));
            assert_eq!(larger.decimal_expansion(9).0, "11899423.083962248");
            let negative = c.gamma(&Number::from_ratio(-3, 2));
            assert_eq!(negative.decimal_expansion(12).0, "2.363271801207");
            assert!(c.gamma(&Number::zero()).is_nan());
        });
    }

    #[test]
    fn test_double_factorial() {
        run(|c| {
            assert_eq!(int(c.factorial2(&big(9))), 945);
            assert_eq!(int(c.factorial2(&big(10))), 3840);
            assert_eq!(int(c.factorial2(&big(1))), 1);
        });
    }

    #[test]
    fn test_binomial_symmetry() {
        run(|c| {
            for n in 0..25 {
                for k in 0..=n {
                    assert_eq!(c.binomial(&big(n), &big(k)), c.binomial(&big(n), &big(n - k)));
                }
            }
            assert_eq!(int(c.binomial(&big(10), &big(3))), 120);
            assert_eq!(int(c.binomial(&big(3), &big(5))), 0);
        });
    }

    #[test]
    fn test_variations() {
        run(|c| {
            assert_eq!(int(c.variations(&big(5), &big(2))), 20);
            assert_eq!(int(c.variations(&big(5), &big(0))), 1);
            assert_eq!(int(c.variations(&big(2), &big(5))), 0);
        });
    }

    #[test]
    fn test_stirling_numbers() {
        run(|c| {
            assert_eq!(int(c.stirling_cycles(&big(5), &big(2))), 50);
            assert_eq!(int(c.stirling_cycles(&big(10), &big(3))), 1_172_700);
            assert_eq!(int(c.stirling_cycles(&big(6), &big(5))), 15);
            assert_eq!(int(c.stirling_cycles(&big(0), &big(0))), 1);
            assert_eq!(int(c.stirling_cycles(&big(4), &big(0))), 0);

            assert_eq!(int(c.stirling_partitions(&big(5), &big(2))), 15);
            assert_eq!(int(c.stirling_partitions(&big(10), &big(3))), 9330);
            assert_eq!(int(c.stirling_partitions(&big(6), &big(1))), 1);
            assert_eq!(int(c.stirling_partitions(&big(3), &big(4))), 0);
        });
    }

    #[test]
    fn test_lah_numbers() {
        run(|c| {
            assert_eq!(int(c.lah(&big(5), &big(1))), 120);
            assert_eq!(int(c.lah(&big(5), &big(2))), 240);
            assert_eq!(int(c.lah(&big(6), &big(3))), 1200);
            assert_eq!(int(c.lah(&big(4), &big(3))), 12);
            assert_eq!(int(c.lah(&big(0), &big(0))), 1);
            assert_eq!(int(c.lah(&big(3), &big(0))), 0);
        });
    }

    #[test]
    fn test_bell_and_catalan() {
        run(|c| {
            assert_eq!(int(c.bell(&big(5))), 52);
            assert_eq!(int(c.bell(&big(16))), 10_480_142_147);
            assert_eq!(int(c.bell(&big(20))), 51_724_158_235_372);
            assert_eq!(int(c.catalan(&big(0))), 1);
            assert_eq!(int(c.catalan(&big(10))), 16796);
        });
    }

    #[test]
    fn test_cancelled_counting_is_nan() {
        let params = EvaluationParameters::default();
        let cancel = CancellationToken::new();
        cancel.request_cancel();
        let c = Computation::new(&params, &cancel);
        assert!(c.factorial(&Number::from_i64(30)).is_nan());
        assert!(c.bell(&big(30)).is_nan());
        assert!(c.stirling_partitions(&big(30), &big(4)).is_nan());
    }
}
