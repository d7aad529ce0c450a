//! Prime factorization by wheel trial division
//!
//! Candidates are 2, 3, 5, 7 and then every integer coprime to 210. A
//! cancelled run keeps the factors found so far and ends with a NaN factor.

use crate::bigint;
use crate::integer::Integer;
use crate::CancellationToken;
use dashu_int::IBig;
use serde::{Serialize, Serializer};

const SEED_PRIMES: [u32; 4] = [2, 3, 5, 7];

/// Gaps between consecutive residues coprime to 210, starting at 11.
const WHEEL: [u32; 48] = [
    2, 4, 2, 4, 6, 2, 6, 4, 2, 4, 6, 6, 2, 6, 4, 2, 6, 4, 6, 8, 4, 2, 4, 2,
    4, 8, 6, 4, 6, 2, 4, 6, 2, 6, 6, 4, 2, 4, 6, 2, 6, 4, 2, 4, 2, 10, 2, 10,
];

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub base: Integer,
    pub multiplicity: u32,
}

impl Factor {
    pub fn new(base: IBig, multiplicity: u32) -> Self {
        Self { base: Integer::new(base), multiplicity }
    }

    fn incomplete() -> Self {
        Self { base: Integer::nan(), multiplicity: 1 }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)?;
        if self.multiplicity != 1 {
            for digit in self.multiplicity.to_string().bytes() {
                write!(f, "{}", SUPERSCRIPTS[usize::from(digit - b'0')])?;
            }
        }
        Ok(())
    }
}

/// Signed prime-power decomposition of an integer
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    value: IBig,
    factors: Vec<Factor>,
}

impl Factorization {
    /// An unfactored value; call [`Factorization::factor`] to fill it in.
    pub fn new(value: IBig) -> Self {
        Self { value, factors: Vec::new() }
    }

    /// Factor `value` right away.
    pub fn of(value: IBig, cancel: &CancellationToken) -> Self {
        let mut factorization = Self::new(value);
        factorization.factor(cancel);
        factorization
    }

    pub fn value(&self) -> &IBig {
        &self.value
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// False when the run was cancelled before finishing.
    pub fn is_complete(&self) -> bool {
        !self.factors.iter().any(|f| f.base.is_nan())
    }

    /// Prime factors with multiplicity, skipping the sign and zero factors.
    pub fn prime_powers(&self) -> impl Iterator<Item = (&IBig, u32)> {
        self.factors.iter().filter_map(|f| match f.base.value() {
            Some(p) if *p > IBig::ONE => Some((p, f.multiplicity)),
            _ => None,
        })
    }

    pub fn factor(&mut self, cancel: &CancellationToken) {
        self.factors.clear();
        if self.value.is_zero() {
            self.factors.push(Factor::new(IBig::ZERO, 1));
            return;
        }
        if bigint::is_negative(&self.value) {
            self.factors.push(Factor::new(IBig::from(-1), 1));
        }

        let mut remaining = bigint::abs(&self.value);
        for p in SEED_PRIMES {
            if !self.divide_out(&mut remaining, &IBig::from(p), cancel) {
                return self.abort();
            }
        }

        let mut candidate = IBig::from(11u8);
        let mut spoke = 0;
        while &candidate * &candidate <= remaining {
            if !self.divide_out(&mut remaining, &candidate, cancel) {
                return self.abort();
            }
            candidate = candidate + IBig::from(WHEEL[spoke]);
            spoke = (spoke + 1) % WHEEL.len();
        }
        if remaining > IBig::ONE {
            self.factors.push(Factor::new(remaining, 1));
        }
    }

    /// Divide every power of `p` out of `remaining`. False once cancelled.
    fn divide_out(&mut self, remaining: &mut IBig, p: &IBig, cancel: &CancellationToken) -> bool {
        let mut multiplicity = 0;
        loop {
            if cancel.is_cancel_requested() {
                return false;
            }
            if !(&*remaining % p).is_zero() {
                break;
            }
            *remaining = &*remaining / p;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            self.factors.push(Factor::new(p.clone(), multiplicity));
        }
        true
    }

    fn abort(&mut self) {
        tracing::debug!(value = %self.value, found = self.factors.len(), "factorization cancelled");
        self.factors.push(Factor::incomplete());
    }
}

impl std::fmt::Display for Factorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "{}", self.value);
        }
        let parts: Vec<String> = self.factors.iter().map(|factor| factor.to_string()).collect();
        write!(f, "{}", parts.join(" × "))
    }
}

impl Serialize for Factorization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(n: i64) -> Factorization {
        Factorization::of(IBig::from(n), &CancellationToken::new())
    }

    #[test]
    fn test_description() {
        assert_eq!(factor(360).to_string(), "2³ × 3² × 5");
        assert_eq!(factor(-12).to_string(), "-1 × 2² × 3");
        assert_eq!(factor(0).to_string(), "0");
        assert_eq!(factor(1).to_string(), "1");
        assert_eq!(factor(97).to_string(), "97");
        assert_eq!(factor(1024).to_string(), "2¹⁰");
    }

    #[test]
    fn test_product_restores_magnitude() {
        for n in [2i64, 221, 9_699_690, 600_851_475_143, -1_001, 1_000_000_007 * 11] {
            let f = factor(n);
            assert!(f.is_complete());
            let product = f
                .prime_powers()
                .fold(IBig::ONE, |acc, (p, m)| acc * p.pow(m as usize));
            assert_eq!(product, bigint::abs(&IBig::from(n)), "{}", n);
            let signed = f.factors().first().and_then(|x| x.base.value()) == Some(&IBig::from(-1));
            assert_eq!(signed, n < 0);
        }
    }

    #[test]
    fn test_wheel_finds_large_primes() {
        // 211 and 223 straddle the first wheel turn
        assert_eq!(factor(211 * 223).to_string(), "211 × 223");
        assert_eq!(factor(209).to_string(), "11 × 19");
    }

    #[test]
    fn test_cancelled_factorization_is_marked() {
        let cancel = CancellationToken::new();
        cancel.request_cancel();
        let f = Factorization::of(IBig::from(360), &cancel);
        assert!(!f.is_complete());
        assert_eq!(f.factors().last().map(|x| x.base.is_nan()), Some(true));
        assert_eq!(f.to_string(), "NaN");
    }
}
