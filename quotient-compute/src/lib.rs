//! Quotient Compute - Numeric algorithms
//!
//! Everything here is built on the exact types of `quotient-core` and
//! nothing in core depends back on it:
//! - `EvaluationParameters`: decimals, angle mode and domain of one evaluation
//! - `TaylorSeries`: truncated sums for sine, log, exp and pi
//! - `Computation`: roots, powers, logarithms, trigonometry, combinatorics,
//!   number theory; every loop polls the evaluation's cancellation token

pub mod computation;
pub mod constants;
pub mod params;
pub mod series;

pub use computation::Computation;
pub use params::{AngleMode, Domain, EvaluationParameters, DEFAULT_DECIMALS, GUARD_DIGITS};
pub use series::{Expansion, TaylorSeries};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{AngleMode, Computation, Domain, EvaluationParameters};
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotient_core::{CancellationToken, IBig, Number};

    mod precision_tests {
        use super::*;

        #[test]
        fn test_more_decimals_give_more_digits() {
            let params = EvaluationParameters::new().with_decimals(30);
            let cancel = CancellationToken::new();
            let c = Computation::new(&params, &cancel);
            let root = c.sqrt(&Number::from_i64(2));
            assert_eq!(root.decimal_expansion(30).0, "1.414213562373095048801688724209");
        }

        #[test]
        fn test_working_digits_include_guard() {
            let params = EvaluationParameters::default();
            assert_eq!(params.working_digits(), DEFAULT_DECIMALS + GUARD_DIGITS);
        }
    }

    mod cancellation_tests {
        use super::*;

        #[test]
        fn test_cancel_observed_mid_computation() {
            let params = EvaluationParameters::default();
            let cancel = CancellationToken::new();
            let c = Computation::new(&params, &cancel);
            assert!(!c.sin(&Number::one()).is_nan());

            cancel.request_cancel();
            assert!(c.sin(&Number::one()).is_nan());
            assert!(c.fibonacci(&IBig::from(1000)).is_nan());
            assert!(c.ln(&Number::from_i64(3)).is_nan());

            cancel.clear_cancel();
            assert!(!c.ln(&Number::from_i64(3)).is_nan());
        }
    }
}
