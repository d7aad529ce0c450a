//! Exponentials, logarithms, circular and hyperbolic functions

use super::{headroom, log10_estimate, Computation};
use crate::constants::MAX_EXP_ARGUMENT;
use crate::params::AngleMode;
use crate::series::Expansion;
use quotient_core::bigint::{self, decimal_digits, pow10};
use quotient_core::{IBig, Number, NumericState, Rational, Sign};

const LOG10_E: f64 = std::f64::consts::LOG10_E;
const LOG10_2: f64 = std::f64::consts::LOG10_2;

/// Exact sines at `k·π/6`, where rational.
fn special_sine(k: &IBig) -> Option<Rational> {
    let index = i64::try_from(bigint::floor_mod(k, &IBig::from(12u8))).ok()?;
    match index {
        0 | 6 => Some(Rational::zero()),
        1 | 5 => Some(Rational::from_ratio(1, 2)),
        3 => Some(Rational::one()),
        7 | 11 => Some(Rational::from_ratio(-1, 2)),
        9 => Some(Rational::from_i64(-1)),
        _ => None,
    }
}

fn int(value: u32) -> IBig {
    IBig::from(value)
}

impl Computation<'_> {
    // ========== Exponential ==========

    pub fn exp(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN => return Number::nan(),
            NumericState::Infinity(Sign::Positive) => return x.clone(),
            NumericState::Infinity(Sign::Negative) => return Number::zero(),
            _ => {}
        }
        let Some(r) = x.to_rational() else {
            return Number::nan();
        };
        if r.is_zero() {
            return Number::one().with_approximation(x.is_approximation());
        }
        if r.abs() > Rational::from_i64(MAX_EXP_ARGUMENT) {
            tracing::debug!(argument = %r, "exp argument saturates");
            return if r.is_negative() {
                Number::zero().approximate()
            } else {
                Number::infinity(Sign::Positive).approximate()
            };
        }
        self.approximate(self.exp_rational(&r, self.digits()))
    }

    /// `e^x - 1`, accurate for small `x`.
    pub fn expm1(&self, x: &Number) -> Number {
        if let Some(r) = x.to_rational() {
            if r.is_zero() {
                return Number::zero().with_approximation(x.is_approximation());
            }
            if r.abs() <= Rational::from_ratio(1, 2) {
                let digits = self.digits();
                return self.approximate(self.series(Expansion::ExponentialMinusOne, &r, digits));
            }
        }
        self.exp(x).sub(&Number::one())
    }

    /// `e^x` to `digits` decimals: halve `x` below 1/2, sum the series and
    /// square back. Negative arguments go through the reciprocal.
    pub(crate) fn exp_rational(&self, x: &Rational, digits: usize) -> Option<Rational> {
        if x.is_zero() {
            return Some(Rational::one());
        }
        if x.is_negative() {
            let positive = self.exp_rational(&x.abs(), digits + 1)?;
            return positive.recip().map(|r| r.round_to_decimals(digits));
        }

        let half = Rational::from_ratio(1, 2);
        let two = int(2);
        let mut reduced = x.clone();
        let mut halvings = 0usize;
        while reduced > half {
            reduced = reduced.div_int(&two)?;
            halvings += 1;
        }

        let magnitude = x.to_f64() * LOG10_E;
        let work = digits + headroom(magnitude) + headroom(halvings as f64 * LOG10_2) + 2;
        let mut value = self.series(Expansion::Exponential, &reduced, work)?;
        for _ in 0..halvings {
            if self.is_cancelled() {
                return None;
            }
            value = value.mul(&value).round_to_decimals(work);
        }
        Some(value.round_to_decimals(digits))
    }

    // ========== Logarithms ==========

    pub fn ln(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(Sign::Negative) => return Number::nan(),
            NumericState::Infinity(Sign::Positive) => return x.clone(),
            _ => {}
        }
        let Some(r) = x.to_rational() else {
            return Number::nan();
        };
        if r.is_negative() {
            return Number::nan();
        }
        if r.is_zero() {
            return Number::infinity(Sign::Negative);
        }
        if r.is_one() {
            return Number::zero().with_approximation(x.is_approximation());
        }

        let digits = self.digits();
        // ln(m·b^c) = ln m + c·ln b
        if let Some(rep) = x.exponent_representation() {
            if rep.exponent != 0 && rep.mantissa.is_positive() {
                let work = digits + decimal_digits(&IBig::from(rep.exponent)) + 1;
                let value = self.ln_rational(&rep.mantissa, work).and_then(|ln_m| {
                    let ln_b = self.ln_rational(&Rational::from_integer(int(rep.base)), work)?;
                    Some(ln_m.add(&ln_b.mul_int(&IBig::from(rep.exponent))))
                });
                return self.approximate(value);
            }
        }
        self.approximate(self.ln_rational(&r, digits))
    }

    /// `log_base(x)`. Exact when `x` is an integer power of `base`.
    pub fn log(&self, base: &Number, x: &Number) -> Number {
        let approximation = base.is_approximation() || x.is_approximation();
        let (Some(b), Some(v)) = (base.to_rational(), x.to_rational()) else {
            if base.is_nan() || x.is_nan() {
                return Number::nan();
            }
            return self.ln(x).div(&self.ln(base));
        };
        if !b.is_positive() || b.is_one() || v.is_negative() {
            return Number::nan();
        }
        if v.is_zero() {
            return Number::infinity(Sign::of(*b > Rational::one()));
        }
        if let Some(k) = self.exact_log(&b, &v) {
            return Number::from_i64(k).with_approximation(approximation);
        }

        let ln_b_estimate = (log10_estimate(&b) / LOG10_E).abs();
        let ln_x_estimate = (log10_estimate(&v) / LOG10_E).abs();
        let work = self.digits()
            + headroom(-ln_b_estimate.log10())
            + headroom((ln_x_estimate / ln_b_estimate).log10())
            + 2;
        let value = self.ln_rational(&b, work).and_then(|ln_b| {
            let ln_x = self.ln_rational(&v, work)?;
            ln_x.checked_div(&ln_b)
        });
        self.approximate(value)
    }

    /// The integer `k` with `base^k == x`, if any.
    fn exact_log(&self, base: &Rational, x: &Rational) -> Option<i64> {
        if x.is_one() {
            return Some(0);
        }
        let one = Rational::one();
        let (base, mut sign) = if *base > one { (base.clone(), 1) } else { (base.recip()?, -1) };
        let target = if *x > one {
            x.clone()
        } else {
            sign = -sign;
            x.recip()?
        };

        let limit = 4 * (decimal_digits(target.numerator()) + decimal_digits(target.denominator()));
        let mut power = base.clone();
        let mut k = 1i64;
        while power < target {
            if self.is_cancelled() || k as usize > limit.max(64) {
                return None;
            }
            power = power.mul(&base);
            k += 1;
        }
        (power == target).then_some(sign * k)
    }

    /// Natural log of a positive rational to `digits` decimals.
    ///
    /// Values above one are reflected; the rest are doubled into `[1/2, 1]`
    /// and corrected by multiples of `ln 2`.
    pub(crate) fn ln_rational(&self, x: &Rational, digits: usize) -> Option<Rational> {
        if !x.is_positive() {
            return None;
        }
        if x.is_one() {
            return Some(Rational::zero());
        }
        let one = Rational::one();
        if *x > one {
            return self.ln_rational(&x.recip()?, digits).map(|r| r.neg());
        }

        let half = Rational::from_ratio(1, 2);
        let two = int(2);
        let mut y = x.clone();
        let mut doublings = 0usize;
        // 8^(g-1) stays below 10^(g-1) <= 1/x
        let gap = decimal_digits(x.denominator()).saturating_sub(decimal_digits(x.numerator()));
        if gap > 1 {
            doublings = 3 * (gap - 1);
            y = y.mul_int(&two.pow(doublings));
        }
        while y < half {
            if self.is_cancelled() {
                return None;
            }
            y = y.mul_int(&two);
            doublings += 1;
        }

        let work = digits + decimal_digits(&IBig::from(doublings)) + 2;
        let ln_y = self.series(Expansion::NaturalLog, &y, work)?;
        if doublings == 0 {
            return Some(ln_y.round_to_decimals(digits));
        }
        let ln2 = self.ln2_rational(work)?;
        let value = ln_y.sub(&ln2.mul_int(&IBig::from(doublings)));
        Some(value.round_to_decimals(digits))
    }

    pub(crate) fn ln2_rational(&self, digits: usize) -> Option<Rational> {
        self.series(Expansion::NaturalLog, &Rational::from_ratio(1, 2), digits)
            .map(|r| r.neg())
    }

    // ========== Constants ==========

    pub(crate) fn pi_rational(&self, digits: usize) -> Option<Rational> {
        self.series(Expansion::Pi, &Rational::zero(), digits)
    }

    pub fn pi(&self) -> Number {
        self.approximate(self.pi_rational(self.digits()))
    }

    pub fn tau(&self) -> Number {
        let digits = self.digits();
        self.approximate(self.pi_rational(digits + 1).map(|pi| pi.mul_int(&int(2))))
    }

    pub fn e(&self) -> Number {
        self.approximate(self.exp_rational(&Rational::one(), self.digits()))
    }

    pub fn ln2(&self) -> Number {
        self.approximate(self.ln2_rational(self.digits()))
    }

    pub fn ln10(&self) -> Number {
        self.approximate(self.ln_rational(&Rational::from_i64(10), self.digits()))
    }

    /// `1 / ln 2`
    pub fn log2e(&self) -> Number {
        let digits = self.digits();
        self.approximate(self.ln2_rational(digits + 2).and_then(|r| r.recip()))
    }

    /// `1 / ln 10`
    pub fn log10e(&self) -> Number {
        let digits = self.digits();
        let ln10 = self.ln_rational(&Rational::from_i64(10), digits + 2);
        self.approximate(ln10.and_then(|r| r.recip()))
    }

    // ========== Angles ==========

    /// Degrees to radians, `x·π/180`.
    pub fn to_radians(&self, x: &Number) -> Number {
        if x.is_zero() {
            return x.clone();
        }
        x.mul(&self.pi_scaled(x)).div(&Number::from_i64(180))
    }

    /// Radians to degrees, `x·180/π`.
    pub fn from_radians(&self, x: &Number) -> Number {
        if x.is_zero() {
            return x.clone();
        }
        x.mul(&Number::from_i64(180)).div(&self.pi_scaled(x))
    }

    /// π with enough digits to survive multiplication by `x`.
    fn pi_scaled(&self, x: &Number) -> Number {
        let extra = x
            .to_rational()
            .filter(|r| !r.is_zero())
            .map(|r| headroom(log10_estimate(&r.abs())))
            .unwrap_or(0);
        self.approximate(self.pi_rational(self.digits() + extra + 3))
    }

    /// An angle in the current mode, as exact-input radians.
    fn angle_radians(&self, angle: &Rational, digits: usize) -> Option<Rational> {
        match self.angle_mode() {
            AngleMode::Radians => Some(angle.clone()),
            AngleMode::Degrees => {
                let extra = if angle.is_zero() { 0 } else { headroom(log10_estimate(&angle.abs())) };
                let pi = self.pi_rational(digits + extra + 3)?;
                angle.mul(&pi).div_int(&int(180))
            }
        }
    }

    // ========== Circular ==========

    pub fn sin(&self, angle: &Number) -> Number {
        self.sine_family(angle, false)
    }

    /// `cos x = sin(π/2 - x)`
    pub fn cos(&self, angle: &Number) -> Number {
        self.sine_family(angle, true)
    }

    /// `sin/cos`; NaN where the cosine vanishes.
    pub fn tan(&self, angle: &Number) -> Number {
        let cos = self.cos(angle);
        if cos.is_zero() {
            return Number::nan();
        }
        self.sin(angle).div(&cos)
    }

    fn sine_family(&self, angle: &Number, complement: bool) -> Number {
        if !angle.is_finite() {
            return Number::nan();
        }
        let Some(r) = angle.to_rational() else {
            return Number::nan();
        };
        let digits = self.digits();
        // The sine of a nonzero exact rational is irrational, so only angles
        // carrying π may land on a special value.
        let snap = angle.is_approximation() || r.is_zero() || self.angle_mode() == AngleMode::Degrees;
        let value = self.angle_radians(&r, digits).and_then(|x| {
            let x = if complement {
                let extra = if x.is_zero() { 0 } else { headroom(log10_estimate(&x.abs())) };
                let pi = self.pi_rational(digits + extra + 3)?;
                pi.div_int(&int(2))?.sub(&x)
            } else {
                x
            };
            self.sine_rational(&x, digits, snap)
        });
        match value {
            Some((v, exact)) => {
                Number::from_rational(v).with_approximation(angle.is_approximation() || !exact)
            }
            None => Number::nan(),
        }
    }

    /// `sin x`, flagged true when the result is an exact special value.
    ///
    /// `x` is reduced modulo 2π. With `snap`, values within rounding of a
    /// multiple of π/6 take the exact sine there; the rest fold into
    /// `[0, π/2]` for the series.
    pub(crate) fn sine_rational(&self, x: &Rational, digits: usize, snap: bool) -> Option<(Rational, bool)> {
        if x.is_zero() {
            return Some((Rational::zero(), true));
        }
        if x.is_negative() {
            return self
                .sine_rational(&x.neg(), digits, snap)
                .map(|(value, exact)| (value.neg(), exact));
        }

        let work = digits + headroom(log10_estimate(x)) + 3;
        let pi = self.pi_rational(work)?;
        let tau = pi.mul_int(&int(2));
        let turns = x.checked_div(&tau)?.floor();
        let t = x.sub(&tau.mul_int(&turns));

        let sixths = t.checked_div(&pi.div_int(&int(6))?)?;
        let nearest = sixths.add(&Rational::from_ratio(1, 2)).floor();
        let distance = sixths.sub(&Rational::from_integer(nearest.clone())).abs();
        let tolerance = Rational::new(IBig::ONE, pow10(digits.saturating_sub(2)))?;
        if snap && distance < tolerance {
            if let Some(value) = special_sine(&nearest) {
                return Some((value, true));
            }
        }

        let (mut t, negative) = if t > pi { (t.sub(&pi), true) } else { (t, false) };
        let half_pi = pi.div_int(&int(2))?;
        if t > half_pi {
            t = pi.sub(&t);
        }
        let value = self.series(Expansion::Sine, &t, work)?;
        let value = if negative { value.neg() } else { value };
        Some((value.round_to_decimals(digits), false))
    }

    // ========== Hyperbolic ==========

    pub fn sinh(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(_) => return x.clone(),
            _ => {}
        }
        if x.is_zero() {
            return Number::zero().with_approximation(x.is_approximation());
        }
        let small = x.to_rational().is_some_and(|r| r.abs() <= Rational::from_ratio(1, 2));
        let difference = if small {
            self.expm1(x).sub(&self.expm1(&x.neg()))
        } else {
            self.exp(x).sub(&self.exp(&x.neg()))
        };
        difference.div(&Number::from_i64(2))
    }

    pub fn cosh(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN => return Number::nan(),
            NumericState::Infinity(_) => return Number::infinity(Sign::Positive),
            _ => {}
        }
        if x.is_zero() {
            return Number::one().with_approximation(x.is_approximation());
        }
        self.exp(x).add(&self.exp(&x.neg())).div(&Number::from_i64(2))
    }

    pub fn tanh(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN => return Number::nan(),
            NumericState::Infinity(sign) => return Number::from_i64(if sign.is_negative() { -1 } else { 1 }),
            _ => {}
        }
        self.sinh(x).div(&self.cosh(x))
    }

    /// `ln(x + √(x²+1))`, odd in `x`.
    pub fn asinh(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(_) => return x.clone(),
            _ => {}
        }
        if x.is_negative() {
            return self.asinh(&x.neg()).neg();
        }
        let squared = x.mul(x).add(&Number::one());
        self.ln(&x.add(&self.sqrt(&squared)))
    }

    /// `ln(x + √(x²-1))` for `x ≥ 1`.
    pub fn acosh(&self, x: &Number) -> Number {
        match x.state() {
            NumericState::NaN | NumericState::Infinity(Sign::Negative) => return Number::nan(),
            NumericState::Infinity(Sign::Positive) => return x.clone(),
            _ => {}
        }
        if *x < Number::one() {
            return Number::nan();
        }
        let squared = x.mul(x).sub(&Number::one());
        self.ln(&x.add(&self.sqrt(&squared)))
    }

    /// `½·ln((1+x)/(1-x))` for `|x| < 1`; infinite at ±1.
    pub fn atanh(&self, x: &Number) -> Number {
        if !x.is_finite() {
            return Number::nan();
        }
        let one = Number::one();
        if x.abs() > one {
            return Number::nan();
        }
        if x.abs() == one {
            return Number::infinity(Sign::of(x.is_negative()));
        }
        let ratio = one.add(x).div(&one.sub(x));
        self.ln(&ratio).div(&Number::from_i64(2))
    }

    /// `asinh(1/x)`
    pub fn acsch(&self, x: &Number) -> Number {
        if x.is_infinite() {
            return Number::zero();
        }
        if x.is_zero() {
            return Number::nan();
        }
        self.asinh(&x.recip())
    }

    /// `acosh(1/x)` for `0 < x ≤ 1`.
    pub fn asech(&self, x: &Number) -> Number {
        if !x.is_positive() || x.is_infinite() {
            return Number::nan();
        }
        self.acosh(&x.recip())
    }

    /// `½·ln((x+1)/(x-1))` for `|x| > 1`; infinite at ±1.
    pub fn acotanh(&self, x: &Number) -> Number {
        if x.is_infinite() {
            return Number::zero();
        }
        if x.is_zero() {
            return Number::nan();
        }
        self.atanh(&x.recip())
    }
}

#[cfg(test)]
mod tests {
    use crate::computation::Computation;
    use crate::params::{AngleMode, EvaluationParameters};
    use quotient_core::{CancellationToken, Number, Sign};

    fn with<T>(params: EvaluationParameters, f: impl FnOnce(&Computation) -> T) -> T {
        let cancel = CancellationToken::new();
        f(&Computation::new(&params, &cancel))
    }

    fn run<T>(f: impl FnOnce(&Computation) -> T) -> T {
        with(EvaluationParameters::default(), f)
    }

    fn n(s: &str) -> Number {
        s.parse().unwrap()
    }

    fn digits(x: &Number) -> String {
        x.decimal_expansion(12).0
    }

    #[test]
    fn test_exp_and_ln() {
        run(|c| {
            assert_eq!(digits(&c.e()), "2.718281828459");
            assert_eq!(digits(&c.exp(&n("10"))), "22026.465794806716");
            assert_eq!(digits(&c.exp(&n("-1"))), "0.367879441171");
            assert_eq!(digits(&c.ln(&n("2"))), "0.693147180559");
            assert_eq!(digits(&c.ln(&n("1/3"))), "-1.098612288668");
            assert_eq!(digits(&c.ln2()), "0.693147180559");
            assert_eq!(digits(&c.ln10()), "2.302585092994");
        });
    }

    #[test]
    fn test_ln_boundaries() {
        run(|c| {
            let one = c.ln(&Number::one());
            assert!(one.is_zero() && !one.is_approximation());
            assert_eq!(c.ln(&Number::zero()).to_string(), "-∞");
            assert!(c.ln(&n("-2")).is_nan());
            assert!(c.exp(&Number::infinity(Sign::Negative)).is_zero());
        });
    }

    #[test]
    fn test_ln_uses_scientific_form() {
        run(|c| {
            // 2e30: ln 2 + 30·ln 10
            assert_eq!(digits(&c.ln(&n("2e30"))), "69.770699970381");
        });
    }

    #[test]
    fn test_log_exact_powers() {
        run(|c| {
            let k = c.log(&n("10"), &n("1000"));
            assert_eq!(k, Number::from_i64(3));
            assert!(!k.is_approximation());
            assert_eq!(c.log(&n("2"), &n("1/8")), Number::from_i64(-3));
            assert_eq!(c.log(&n("1/2"), &n("4")), Number::from_i64(-2));
            assert_eq!(digits(&c.log(&n("10"), &n("2"))), "0.301029995663");
            assert!(c.log(&n("1"), &n("5")).is_nan());
            assert_eq!(c.log(&n("10"), &Number::zero()).to_string(), "-∞");
        });
    }

    #[test]
    fn test_sine_special_angles() {
        run(|c| {
            let pi = c.pi();
            assert_eq!(digits(&pi), "3.141592653589");
            assert!(c.sin(&pi).is_zero());
            let half = c.sin(&pi.div(&Number::from_i64(6)));
            assert_eq!(half.to_rational().unwrap().into_owned(), quotient_core::Rational::from_ratio(1, 2));
            let cos0 = c.cos(&Number::zero());
            assert_eq!(cos0, Number::one());
            assert!(!cos0.is_approximation());
        });
    }

    #[test]
    fn test_sine_is_odd() {
        run(|c| {
            let x = n("1");
            assert_eq!(digits(&c.sin(&x)), "0.841470984807");
            assert_eq!(c.sin(&x.neg()), c.sin(&x).neg());
            assert_eq!(digits(&c.sin(&n("-4"))), "0.756802495307");
            assert_eq!(digits(&c.cos(&n("2"))), "-0.416146836547");
            assert_eq!(digits(&c.tan(&n("1"))), "1.557407724654");
        });
    }

    #[test]
    fn test_exact_input_near_a_special_angle_stays_approximate() {
        run(|c| {
            let near_pi = n("3.14159265358979323846264338327950288");
            assert!(!near_pi.is_approximation());
            assert!(c.sin(&near_pi).is_approximation());
            assert!(c.cos(&near_pi).is_approximation());
            let near_sixth = n("0.52359877559829887307710723054658381");
            assert!(c.sin(&near_sixth).is_approximation());
            assert!(!c.cos(&Number::zero()).is_approximation());
        });
    }

    #[test]
    fn test_degrees_mode() {
        let params = EvaluationParameters::default().with_angle_mode(AngleMode::Degrees);
        with(params, |c| {
            assert_eq!(c.sin(&n("30")), Number::from_ratio(1, 2));
            assert_eq!(c.cos(&n("180")), Number::from_i64(-1));
            assert!(c.tan(&n("90")).is_nan());
            assert_eq!(digits(&c.sin(&n("45"))), "0.707106781186");
        });
    }

    #[test]
    fn test_radian_conversions() {
        run(|c| {
            assert_eq!(digits(&c.to_radians(&n("180"))), "3.141592653589");
            assert_eq!(digits(&c.from_radians(&Number::one())), "57.295779513082");
        });
    }

    #[test]
    fn test_hyperbolic() {
        run(|c| {
            assert_eq!(digits(&c.sinh(&n("1"))), "1.175201193643");
            assert_eq!(digits(&c.cosh(&n("1"))), "1.543080634815");
            assert_eq!(digits(&c.tanh(&n("1/2"))), "0.46211715726");
            assert_eq!(digits(&c.sinh(&n("1/10"))), "0.100166750019");
            assert_eq!(digits(&c.asinh(&n("1"))), "0.881373587019");
            assert_eq!(digits(&c.acosh(&n("2"))), "1.316957896924");
            assert_eq!(digits(&c.atanh(&n("1/2"))), "0.549306144334");
            assert_eq!(digits(&c.acotanh(&n("2"))), "0.549306144334");
            assert!(c.acosh(&n("1/2")).is_nan());
            assert_eq!(c.atanh(&Number::one()).to_string(), "∞");
        });
    }
}
