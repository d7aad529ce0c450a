//! Fibonacci and Lucas numbers, primality and the arithmetic derivative

use super::{integer, Computation};
use crate::constants::FIBONACCI;
use quotient_core::bigint;
use quotient_core::{Factorization, IBig, Number, Rational};

impl Computation<'_> {
    // ========== Fibonacci ==========

    /// `F(n)`, with `F(-n) = (-1)^(n+1)·F(n)` for negative indices.
    pub fn fibonacci(&self, n: &IBig) -> Number {
        integer(self.fibonacci_int(n))
    }

    pub(crate) fn fibonacci_int(&self, n: &IBig) -> Option<IBig> {
        if bigint::is_negative(n) {
            let magnitude = bigint::abs(n);
            let f = self.fibonacci_int(&magnitude)?;
            return Some(if bigint::is_even(&magnitude) { -f } else { f });
        }
        if let Some(&known) = usize::try_from(n.clone()).ok().and_then(|i| FIBONACCI.get(i)) {
            return Some(IBig::from(known));
        }
        self.fibonacci_pair(n).map(|(f, _)| f)
    }

    /// `(F(n), F(n+1))` by fast doubling, walking the bits of `n` from the
    /// top: `F(2k) = F(k)·(2·F(k+1) - F(k))` and `F(2k+1) = F(k)² + F(k+1)²`.
    fn fibonacci_pair(&self, n: &IBig) -> Option<(IBig, IBig)> {
        let two = IBig::from(2u8);
        let mut odd_bits = Vec::new();
        let mut rest = n.clone();
        while rest > IBig::ZERO {
            odd_bits.push(!bigint::is_even(&rest));
            rest = rest / &two;
        }

        let (mut a, mut b) = (IBig::ZERO, IBig::ONE);
        for odd in odd_bits.into_iter().rev() {
            if self.is_cancelled() {
                tracing::debug!("fibonacci cancelled");
                return None;
            }
            let doubled = &a * (&b * &two - &a);
            let next = &a * &a + &b * &b;
            (a, b) = if odd { (next.clone(), doubled + next) } else { (doubled, next) };
        }
        Some((a, b))
    }

    /// Lucas numbers, `L(n) = F(n-1) + F(n+1)`.
    pub fn lucas(&self, n: &IBig) -> Number {
        let previous = self.fibonacci_int(&(n - IBig::ONE));
        let next = self.fibonacci_int(&(n + IBig::ONE));
        match (previous, next) {
            (Some(p), Some(q)) => Number::from_integer(p + q),
            _ => Number::nan(),
        }
    }

    // ========== Divisibility ==========

    /// Primality as a boolean; values below 2 are not prime.
    pub fn is_prime(&self, n: &IBig) -> Number {
        Number::boolean(*n > IBig::ONE && bigint::is_probable_prime(n))
    }

    pub fn gcd(&self, a: &IBig, b: &IBig) -> Number {
        Number::from_integer(bigint::gcd(a, b))
    }

    /// `base^exponent mod modulus`; NaN for a zero modulus or a negative
    /// exponent.
    pub fn mod_pow(&self, base: &IBig, exponent: &IBig, modulus: &IBig) -> Number {
        integer(bigint::mod_pow(base, exponent, modulus))
    }

    /// The signed prime-power decomposition of `n`. A cancelled run is
    /// marked incomplete.
    pub fn factor(&self, n: &IBig) -> Factorization {
        Factorization::of(n.clone(), self.cancel_token())
    }

    // ========== Arithmetic Derivative ==========

    /// `n' = n·Σ m/p` over the prime powers `p^m` of `n`, extended to
    /// fractions by the quotient rule and to negatives by `(-n)' = -n'`.
    pub fn derivative(&self, x: &Number) -> Number {
        let Some(r) = x.to_rational() else {
            return Number::nan();
        };
        let Some(p_prime) = self.derivative_int(r.numerator()) else {
            return Number::nan();
        };
        if r.is_integer() {
            return Number::from_integer(p_prime).with_approximation(x.is_approximation());
        }
        let Some(q_prime) = self.derivative_int(r.denominator()) else {
            return Number::nan();
        };
        let q = r.denominator();
        let numerator = p_prime * q - r.numerator() * q_prime;
        Number::new(numerator, q * q).with_approximation(x.is_approximation())
    }

    pub(crate) fn derivative_int(&self, n: &IBig) -> Option<IBig> {
        if bigint::is_negative(n) {
            return self.derivative_int(&bigint::abs(n)).map(|d| -d);
        }
        if *n <= IBig::ONE {
            return Some(IBig::ZERO);
        }
        if bigint::is_probable_prime(n) {
            return Some(IBig::ONE);
        }
        let factorization = self.factor(n);
        if !factorization.is_complete() {
            return None;
        }
        let sum = factorization
            .prime_powers()
            .try_fold(Rational::zero(), |sum, (p, m)| {
                Some(sum.add(&Rational::new(IBig::from(m), p.clone())?))
            })?;
        let derivative = sum.mul_int(n);
        derivative.is_integer().then(|| derivative.numerator().clone())
    }
}
