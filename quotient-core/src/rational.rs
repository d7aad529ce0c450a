//! Exact fractions of arbitrary precision integers
//!
//! A `Rational` is always stored in lowest terms with a positive denominator.
//! Every operation builds a fresh value; nothing is mutated in place.

use crate::bigint;
use dashu_int::IBig;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: IBig,
    denominator: IBig,
}

impl Rational {
    // ========== Construction ==========

    /// Reduce `numerator / denominator`. `None` when the denominator is zero.
    pub fn new(numerator: IBig, denominator: IBig) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let (mut numerator, mut denominator) = if bigint::is_negative(&denominator) {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let g = bigint::gcd(&numerator, &denominator);
        if !g.is_one() && !g.is_zero() {
            numerator = numerator / &g;
            denominator = denominator / &g;
        }
        Some(Self { numerator, denominator })
    }

    /// Trusted fast path: the caller guarantees `gcd == 1` and `denominator > 0`.
    pub fn new_reduced(numerator: IBig, denominator: IBig) -> Self {
        debug_assert!(!bigint::is_negative(&denominator) && !denominator.is_zero());
        debug_assert!(bigint::gcd(&numerator, &denominator).is_one());
        Self { numerator, denominator }
    }

    pub fn from_integer(value: IBig) -> Self {
        Self { numerator: value, denominator: IBig::ONE }
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_integer(IBig::from(value))
    }

    /// `n / d` for machine integers; zero denominators collapse to zero.
    pub fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self::new(IBig::from(numerator), IBig::from(denominator)).unwrap_or_else(Self::zero)
    }

    pub fn zero() -> Self {
        Self::from_integer(IBig::ZERO)
    }

    pub fn one() -> Self {
        Self::from_integer(IBig::ONE)
    }

    /// Parse `"12"`, `"-3.25"`, `".5"`, `"1.5e-3"` or `"7/8"` exactly.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some((num, den)) = text.split_once('/') {
            let num = Self::parse(num)?;
            let den = Self::parse(den)?;
            return num.checked_div(&den);
        }

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = body[pos + 1..].parse().ok()?;
                (&body[..pos], exp)
            }
            None => (body, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mut numerator = IBig::from_str_radix(&digits, 10).ok()?;
        if negative {
            numerator = -numerator;
        }
        let scale = exponent - frac_part.len() as i64;
        let magnitude = bigint::pow10(scale.unsigned_abs() as usize);
        if scale >= 0 {
            Some(Self::from_integer(numerator * magnitude))
        } else {
            Self::new(numerator, magnitude)
        }
    }

    // ========== Accessors ==========

    pub fn numerator(&self) -> &IBig {
        &self.numerator
    }

    pub fn denominator(&self) -> &IBig {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn is_negative(&self) -> bool {
        bigint::is_negative(&self.numerator)
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    /// The value as `i64` when it is an integer that fits.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.numerator.clone().try_into().ok()
    }

    /// Rough `f64` view, only good for seeding iterations.
    pub fn to_f64(&self) -> f64 {
        let (text, _) = self.decimal_expansion(20);
        text.parse().unwrap_or(f64::NAN)
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        if self.denominator == other.denominator {
            return Self::new(&self.numerator + &other.numerator, self.denominator.clone())
                .unwrap_or_else(Self::zero);
        }
        let numerator = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let denominator = &self.denominator * &other.denominator;
        Self::new(numerator, denominator).unwrap_or_else(Self::zero)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        let numerator = &self.numerator * &other.numerator;
        let denominator = &self.denominator * &other.denominator;
        Self::new(numerator, denominator).unwrap_or_else(Self::zero)
    }

    /// `None` when dividing by zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let numerator = &self.numerator * &other.denominator;
        let denominator = &self.denominator * &other.numerator;
        Self::new(numerator, denominator)
    }

    pub fn neg(&self) -> Self {
        Self::new_reduced(-&self.numerator, self.denominator.clone())
    }

    pub fn abs(&self) -> Self {
        Self::new_reduced(bigint::abs(&self.numerator), self.denominator.clone())
    }

    pub fn recip(&self) -> Option<Self> {
        Self::one().checked_div(self)
    }

    /// Integer power; `None` for a negative power of zero.
    pub fn pow(&self, exponent: i64) -> Option<Self> {
        let e = exponent.unsigned_abs() as usize;
        let raised = Self::new_reduced(self.numerator.pow(e), self.denominator.pow(e));
        if exponent < 0 {
            raised.recip()
        } else {
            Some(raised)
        }
    }

    pub fn mul_int(&self, factor: &IBig) -> Self {
        self.mul(&Self::from_integer(factor.clone()))
    }

    pub fn div_int(&self, divisor: &IBig) -> Option<Self> {
        self.checked_div(&Self::from_integer(divisor.clone()))
    }

    // ========== Rounding ==========

    /// Quotient rounded toward zero.
    pub fn trunc(&self) -> IBig {
        &self.numerator / &self.denominator
    }

    /// Greatest integer not above the value.
    pub fn floor(&self) -> IBig {
        let q = self.trunc();
        if self.is_negative() && !self.is_integer() {
            q - IBig::ONE
        } else {
            q
        }
    }

    /// Least integer not below the value.
    pub fn ceil(&self) -> IBig {
        let q = self.trunc();
        if self.is_positive() && !self.is_integer() {
            q + IBig::ONE
        } else {
            q
        }
    }

    /// Nearest multiple of `10^-digits`, halves away from zero.
    pub fn round_to_decimals(&self, digits: usize) -> Self {
        if self.is_integer() {
            return self.clone();
        }
        let scale = bigint::pow10(digits);
        let twice = &self.numerator * &scale * IBig::from(2u8);
        let adjusted = if self.is_negative() {
            twice - &self.denominator
        } else {
            twice + &self.denominator
        };
        let scaled = adjusted / (&self.denominator * IBig::from(2u8));
        Self::new(scaled, scale).unwrap_or_else(Self::zero)
    }

    // ========== Formatting ==========

    /// Decimal digits by long division, truncated after `digits` places.
    ///
    /// Trailing zeros are dropped. The flag is `true` when the expansion
    /// terminated within the requested digits.
    pub fn decimal_expansion(&self, digits: usize) -> (String, bool) {
        let magnitude = bigint::abs(&self.numerator);
        let integer = &magnitude / &self.denominator;
        let mut remainder = &magnitude % &self.denominator;
        let ten = IBig::from(10u8);

        let mut fraction = String::new();
        for _ in 0..digits {
            if remainder.is_zero() {
                break;
            }
            remainder = &remainder * &ten;
            let digit = &remainder / &self.denominator;
            remainder = &remainder % &self.denominator;
            fraction.push_str(&digit.to_string());
        }
        let exact = remainder.is_zero();
        let fraction = fraction.trim_end_matches('0');

        let mut text = String::new();
        if self.is_negative() && !(integer.is_zero() && fraction.is_empty()) {
            text.push('-');
        }
        text.push_str(&integer.to_string());
        if !fraction.is_empty() {
            text.push('.');
            text.push_str(fraction);
        }
        (text, exact)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
