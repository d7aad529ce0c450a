//! Quotient Core - Fundamental types
//!
//! This crate provides the pure arithmetic layer:
//! - `Number`: exact rationals with sticky NaN/infinity/boolean/approximation state
//! - `Integer`: the discrete-domain counterpart wrapping one big integer
//! - `Factorization`: signed prime-power decompositions
//! - `Value`: the result of an evaluation
//! - `EvalError`: structured errors with source ranges
//! - `CancellationToken`: cooperative cancellation for long computations

pub mod bigint;
mod cancel;
mod error;
mod factorization;
mod integer;
mod number;
mod rational;
mod state;
mod value;

pub use cancel::CancellationToken;
pub use error::{codes, ErrorKind, EvalError};
pub use factorization::{Factor, Factorization};
pub use integer::Integer;
pub use number::{ExponentRepresentation, Number, NumberError, DEFAULT_DISPLAY_DECIMALS};
pub use rational::Rational;
pub use state::{NumericState, Sign};
pub use value::Value;

/// Re-export of the big integer type used throughout
pub use dashu_int::IBig;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{
        CancellationToken, ErrorKind, EvalError, Factorization, IBig, Integer, Number, Rational,
        Sign, Value,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        fn n(s: &str) -> Number {
            s.parse().unwrap()
        }

        #[test]
        fn test_from_str_forms() {
            assert_eq!(n("123").to_i64(), Some(123));
            assert_eq!(n("1/3").to_string(), "1/3");
            assert_eq!(n("3.25").to_string(), "13/4");
            assert_eq!(n("1.5e2").to_i64(), Some(150));
            assert!(n("NaN").is_nan());
            assert!(n("-∞").is_negative());
            assert_eq!(n("true").as_logical(), Some(true));
            assert!("1..2".parse::<Number>().is_err());
        }

        #[test]
        fn test_exact_sum() {
            let sum = n("1/3").add(&n("1/6"));
            assert_eq!(sum, Number::from_ratio(1, 2));
            assert!(!sum.is_approximation());
        }

        #[test]
        fn test_sticky_approximation() {
            let exact = Number::from_i64(3);
            let approx = Number::from_ratio(1, 7).approximate();
            for result in [
                exact.add(&approx),
                approx.sub(&exact),
                exact.mul(&approx),
                exact.div(&approx),
                &approx / &exact,
            ] {
                assert!(result.is_approximation());
            }
            assert!(!exact.add(&exact).is_approximation());
        }

        #[test]
        fn test_nan_absorption() {
            let x = Number::from_ratio(5, 3);
            let nan = Number::nan();
            assert!(nan.add(&x).is_nan());
            assert!(nan.mul(&x).is_nan());
            assert!(x.div(&Number::zero()).is_nan());
            assert!(Number::zero().div(&Number::zero()).is_nan());
        }

        #[test]
        fn test_infinity_rules() {
            let inf = Number::infinity(Sign::Positive);
            let neg_inf = Number::infinity(Sign::Negative);
            assert!(inf.add(&neg_inf).is_nan());
            assert!(Number::zero().mul(&inf).is_nan());
            assert_eq!(inf.mul(&inf).to_string(), "∞");
            assert_eq!(neg_inf.mul(&inf).to_string(), "-∞");
            assert!(Number::from_i64(1).div(&inf).is_zero());
            assert!(neg_inf < Number::from_i64(-1_000_000));
        }

        #[test]
        fn test_zero_power_zero_is_nan() {
            assert!(Number::zero().powi(0).is_nan());
            assert!(Number::zero().powi(-2).is_nan());
            assert_eq!(Number::from_ratio(2, 3).powi(3), Number::from_ratio(8, 27));
            assert_eq!(Number::from_i64(2).powi(-2), Number::from_ratio(1, 4));
        }

        #[test]
        fn test_negated_zero_is_canonical() {
            let z = Number::zero().approximate().neg();
            assert!(z.is_zero());
            assert!(!z.is_negative());
            assert_eq!(z.to_string(), "0");
        }

        #[test]
        fn test_booleans_are_numeric() {
            let t = Number::boolean(true);
            assert_eq!(t.add(&Number::one()), Number::from_i64(2));
            assert_eq!(t, Number::one());
            assert_eq!(Number::from_i64(0).as_logical(), Some(false));
            assert_eq!(Number::from_i64(2).as_logical(), None);
        }

        #[test]
        fn test_modulo_follows_divisor_sign() {
            let m = Number::from_i64(-7).modulo(&Number::from_i64(3));
            assert_eq!(m, Number::from_i64(2));
            let m = Number::from_i64(7).modulo(&Number::from_i64(-3));
            assert_eq!(m, Number::from_i64(-2));
            assert!(Number::from_i64(7).modulo(&Number::zero()).is_nan());
        }

        #[test]
        fn test_display() {
            assert_eq!(Number::from_ratio(-3, 4).to_string(), "-3/4");
            assert_eq!(Number::from_ratio(2, 3).approximate().to_string(), "0.666666666666");
            assert_eq!(format!("{:.3}", Number::from_ratio(1, 8)), "0.125");
            assert_eq!(Number::boolean(false).to_string(), "false");
            assert_eq!(Number::nan().to_string(), "NaN");
        }

        #[test]
        fn test_exponent_representation() {
            let big = n("2e10");
            let rep = big.exponent_representation().unwrap();
            assert_eq!(rep.mantissa, Rational::from_i64(2));
            assert_eq!(rep.exponent, 10);
            assert_eq!(rep.value(), Rational::from_i64(20_000_000_000));

            let small = n("3e-9");
            let rep = small.exponent_representation().unwrap();
            assert_eq!(rep.exponent, -9);
            assert!(n("1500").exponent_representation().is_none());
        }

        #[test]
        fn test_decimal_expansion() {
            let (text, exact) = Number::from_ratio(1, 4).decimal_expansion(12);
            assert_eq!((text.as_str(), exact), ("0.25", true));
            let (text, exact) = Number::from_ratio(1, 3).decimal_expansion(4);
            assert_eq!((text.as_str(), exact), ("0.3333", false));
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_cross_variant_equality() {
            let n = Value::Number(Number::from_i64(12));
            let i = Value::Integer(Integer::from(12));
            assert!(n.is_equal(&i));
            let f = Value::Factorization(Factorization::of(IBig::from(12), &CancellationToken::new()));
            assert!(!f.is_equal(&n));
            assert!(f.is_equal(&f.clone()));
        }

        #[test]
        fn test_serialize() {
            let v = Value::Number(Number::from_ratio(1, 2));
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, r#"{"type":"Number","value":"1/2"}"#);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_display_and_codes() {
            let err = EvalError::unknown_function("unknownFn", 0..9);
            assert_eq!(err.code(), codes::UNDEFINED_FUNC);
            assert_eq!(err.to_string(), "[UNDEFINED_FUNC] Unknown function 'unknownFn'");
            assert_eq!(
                ErrorKind::ArgumentNotLogicalValue.to_string(),
                "Argument(s) must be either true/1 or false/0"
            );
            assert!(ErrorKind::MissingCloseParenthesis.is_parse_error());
            assert!(!ErrorKind::DivideByZero.is_parse_error());
        }

        #[test]
        fn test_suggestion_is_shown() {
            let err = EvalError::new(ErrorKind::EmptyGroup, 3..5).with_suggestion("Remove '()'");
            assert_eq!(err.to_string(), "[PARSE_ERROR] Empty group (suggestion: Remove '()')");
        }
    }
}
