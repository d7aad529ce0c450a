//! Quotient - exact rational expression evaluation
//!
//! ```text
//! let engine = Engine::with_standard_library();
//! engine.eval("1/3 + 1/6", &vars!{})  // 1/2, exact
//! ```

mod evaluation;
mod evaluator;
mod lexer;
mod parser;

pub use evaluation::{Evaluation, EvaluationStatus};
pub use evaluator::Evaluator;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;

pub use quotient_compute::{AngleMode, Domain, EvaluationParameters};
pub use quotient_core::{CancellationToken, ErrorKind, EvalError, Factorization, Integer, Number, Value};
pub use quotient_plugin::{Expression, FunctionMeta, PluginRegistry, MAX_DEPTH};

use std::collections::HashMap;
use std::sync::Arc;

/// Main Quotient engine
pub struct Engine {
    registry: Arc<PluginRegistry>,
    parameters: EvaluationParameters,
}

impl Engine {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            parameters: EvaluationParameters::default(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(quotient_std::standard_registry())
    }

    pub fn with_parameters(mut self, parameters: EvaluationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameters(&self) -> &EvaluationParameters {
        &self.parameters
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Evaluate an expression with the engine's parameters.
    pub fn eval(&self, expression: &str, substitutions: &HashMap<String, Value>) -> Result<Value, EvalError> {
        self.evaluation_with(expression, substitutions.clone()).evaluate()
    }

    /// A pending evaluation, e.g. to cancel it from another thread.
    pub fn evaluation(&self, expression: &str) -> Evaluation {
        self.evaluation_with(expression, HashMap::new())
    }

    pub fn evaluation_with(&self, expression: &str, substitutions: HashMap<String, Value>) -> Evaluation {
        Evaluation::new(self.registry.clone(), expression, substitutions, self.parameters.clone())
    }

    /// The tree an expression parses to, in prefix form.
    pub fn parse(&self, expression: &str) -> Result<Expression, EvalError> {
        parse(expression, self.parameters.domain)
    }

    pub fn help(&self, name: Option<&str>) -> serde_json::Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        self.registry.list_functions(category)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

/// Build a substitution map: `vars!{ x: 2i64, y: Number::from_ratio(1, 3) }`,
/// or with string keys for positional names: `vars!{ "1": 5i64 }`.
#[macro_export]
macro_rules! vars {
    {} => { std::collections::HashMap::<String, $crate::Value>::new() };
    { $($key:ident : $value:expr),* $(,)? } => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert(stringify!($key).to_string(), $crate::Value::from($value));
        )*
        map
    }};
    { $($key:literal : $value:expr),* $(,)? } => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), $crate::Value::from($value));
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_standard_library()
    }

    fn eval(expression: &str) -> Value {
        engine().eval(expression, &vars! {}).unwrap()
    }

    fn text(expression: &str) -> String {
        eval(expression).to_string()
    }

    fn error(expression: &str) -> EvalError {
        engine().eval(expression, &vars! {}).unwrap_err()
    }

    mod scenarios {
        use super::*;

        #[test]
        fn test_exact_fraction_sum() {
            let value = eval("1/3 + 1/6");
            assert_eq!(value.to_string(), "1/2");
            assert!(!value.is_approximation());
        }

        #[test]
        fn test_factorial() {
            let value = eval("5!");
            assert_eq!(value.to_string(), "120");
            assert!(!value.is_approximation());
        }

        #[test]
        fn test_square_root_is_approximate() {
            let value = eval("sqrt(2)");
            assert_eq!(value.to_string(), "1.414213562373");
            assert!(value.is_approximation());
        }

        #[test]
        fn test_factorization() {
            let value = eval("factor(360)");
            assert!(matches!(value, Value::Factorization(_)));
            assert_eq!(value.to_string(), "2³ × 3² × 5");
        }

        #[test]
        fn test_division_by_zero_is_nan() {
            assert!(eval("1/0").is_nan());
        }

        #[test]
        fn test_unknown_function() {
            let err = error("unknownFn(1)");
            assert_eq!(err.kind, ErrorKind::UnknownFunction("unknownFn".to_string()));
            assert_eq!(err.range, 0..9);
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn test_fibonacci_doubling_identity() {
            let engine = engine();
            for k in -12i64..=30 {
                let value = engine
                    .eval("F(2$k) == F($k) * (2F($k - 1) + F($k))", &vars! { k: k })
                    .unwrap();
                assert_eq!(value.to_string(), "true", "k = {}", k);
            }
        }

        #[test]
        fn test_binomial_symmetry() {
            let engine = engine();
            for n in 0i64..=14 {
                for k in 0..=n {
                    let value = engine.eval("C($n, $k) == C($n, $n - $k)", &vars! { n: n, k: k }).unwrap();
                    assert_eq!(value.to_string(), "true", "n = {}, k = {}", n, k);
                }
            }
        }

        #[test]
        fn test_sticky_approximation_through_operators() {
            for expression in ["1 + sqrt(2)", "sqrt(2) - 1", "3 * pi", "e / 2"] {
                assert!(eval(expression).is_approximation(), "{}", expression);
            }
            assert!(!eval("1/7 * 14").is_approximation());
        }

        #[test]
        fn test_nan_absorbs() {
            for expression in ["1/0 + 1", "(0/0) * 5", "sqrt(2) * (1/0)"] {
                assert!(eval(expression).is_nan(), "{}", expression);
            }
        }

        #[test]
        fn test_domain_issues_degrade_to_nan() {
            for expression in ["log(-1)", "ln(-1)", "1 + ln(-1)", "log2(-8) * 0", "acosh(1/2) - 1", "0^0 + 2"] {
                assert!(eval(expression).is_nan(), "{}", expression);
            }
        }
    }

    mod grammar {
        use super::*;

        #[test]
        fn test_operators() {
            assert_eq!(text("-2^2"), "-4");
            assert_eq!(text("2^3^2"), "512");
            assert_eq!(text("2**-1"), "1/2");
            assert_eq!(text("7 - 2 - 1"), "4");
            assert_eq!(text("6 & 3 | 8"), "10");
            assert_eq!(text("1 << 10"), "1024");
            assert_eq!(text("~0"), "-1");
            assert_eq!(text("7!!"), "105");
        }

        #[test]
        fn test_literals() {
            assert_eq!(text("0x10 + 0b11 + 0o7"), "26");
            assert_eq!(text("1½ + ½"), "2");
            assert_eq!(text("1.5e3"), "1500");
            assert_eq!(text("0.125"), "1/8");
        }

        #[test]
        fn test_implicit_multiplication() {
            assert_eq!(text("2pi"), "6.283185307179");
            assert_eq!(text("3(4)"), "12");
            assert_eq!(text("(1/2)(4)"), "2");
        }

        #[test]
        fn test_percent() {
            assert_eq!(text("200 + 10%"), "220");
            assert_eq!(text("200 - 10%"), "180");
            assert_eq!(text("50%"), "1/2");
            assert_eq!(text("200 * 10%"), "20");
        }

        #[test]
        fn test_logic() {
            assert_eq!(text("!true || 3 >= 3"), "true");
            assert_eq!(text("1/2 == 0.5 && 2 ≠ 3"), "true");
            assert_eq!(text("if(1 < 2, 10, 1/0)"), "10");
            assert_eq!(text("if(false, sqrt(-1), 7)"), "7");
        }

        #[test]
        fn test_modular_power() {
            assert_eq!(text("pow(2, 10, 1000)"), "24");
        }
    }

    mod substitutions {
        use super::*;

        #[test]
        fn test_named_and_positional() {
            let engine = engine();
            let value = engine.eval("$x + $y", &vars! { x: Number::from_ratio(1, 3), y: 1i64 }).unwrap();
            assert_eq!(value.to_string(), "4/3");

            let value = engine.eval("$1 * 2", &vars! { "1": 21i64 }).unwrap();
            assert_eq!(value.to_string(), "42");
        }

        #[test]
        fn test_factorization_substitution_reads_as_its_value() {
            let engine = engine();
            let previous = engine.eval("factor(12)", &vars! {}).unwrap();
            let mut vars = vars! {};
            vars.insert("1".to_string(), previous);
            assert_eq!(engine.eval("$1 + 1", &vars).unwrap().to_string(), "13");
        }

        #[test]
        fn test_bare_name_substitution() {
            let value = engine().eval("2radius", &vars! { radius: 5i64 }).unwrap();
            assert_eq!(value.to_string(), "10");
        }
    }

    mod errors {
        use super::*;

        fn kind_and_range(expression: &str) -> (ErrorKind, std::ops::Range<usize>) {
            let err = error(expression);
            (err.kind, err.range)
        }

        #[test]
        fn test_evaluation_errors_point_at_the_call() {
            assert_eq!(kind_and_range("1 + sqrt(-1)"), (ErrorKind::ArgumentNotPositive, 4..12));
            assert_eq!(kind_and_range("gcd(1.5, 2)"), (ErrorKind::ArgumentNotInteger, 0..11));
            assert_eq!(kind_and_range("l_and(2, 1)"), (ErrorKind::ArgumentNotLogicalValue, 0..11));
            assert_eq!(kind_and_range("sin()"), (ErrorKind::InvalidArguments, 0..5));
            assert_eq!(kind_and_range("csc(0)"), (ErrorKind::DivideByZero, 0..6));
            assert_eq!(kind_and_range("$nope"), (ErrorKind::UnknownVariable("nope".to_string()), 0..5));
        }

        #[test]
        fn test_parse_errors_abort_before_evaluation() {
            let err = error("factor(360) +");
            assert_eq!(err.kind, ErrorKind::MissingRightOperand("+".to_string()));
            assert!(err.kind.is_parse_error());
            assert_eq!(err.range, 12..13);
        }

        #[test]
        fn test_deep_nesting_is_an_error() {
            let parens = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
            assert_eq!(error(&parens).kind, ErrorKind::ExpressionTooDeep);
            let negations = format!("{}1", "-".repeat(5_000));
            assert_eq!(error(&negations).kind, ErrorKind::ExpressionTooDeep);
            let parens = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
            assert_eq!(text(&parens), "1");
        }

        #[test]
        fn test_error_display() {
            let err = error("foo");
            assert!(err.to_string().starts_with("[UNDEFINED_FUNC] Unknown function 'foo'"));
        }
    }

    mod parameters {
        use super::*;

        #[test]
        fn test_degrees() {
            let engine = engine().with_parameters(EvaluationParameters::default().with_angle_mode(AngleMode::Degrees));
            let value = engine.eval("cos(0) + tan(0)", &vars! {}).unwrap();
            assert_eq!(value.to_string(), "1");
            assert_eq!(engine.parameters().angle_mode, AngleMode::Degrees);
        }

        #[test]
        fn test_discrete_domain() {
            let engine = engine().with_parameters(EvaluationParameters::default().with_domain(Domain::Discrete));
            let value = engine.eval("7/2 + 1", &vars! {}).unwrap();
            assert!(matches!(value, Value::Integer(_)));
            assert_eq!(value.to_string(), "4");

            let err = engine.eval("2.5 * 2", &vars! {}).unwrap_err();
            assert_eq!(err.kind, ErrorKind::CannotParseNumber);
            assert_eq!(err.range, 0..3);
        }

        #[test]
        fn test_more_decimals() {
            let engine = engine().with_parameters(EvaluationParameters::default().with_decimals(30));
            let value = engine.eval("decimal(sqrt(2), 30)", &vars! {}).unwrap();
            assert_eq!(format!("{:.30}", value), "1.414213562373095048801688724209");
        }
    }

    mod cancellation {
        use super::*;

        #[test]
        fn test_cancelled_evaluation_is_nan() {
            let mut evaluation = engine().evaluation("bell(400) + catalan(400)");
            evaluation.cancel_token().request_cancel();
            assert!(evaluation.evaluate().unwrap().is_nan());
            assert!(matches!(evaluation.status(), EvaluationStatus::Succeeded(_)));
        }

        #[test]
        fn test_cancel_from_another_thread() {
            let mut evaluation = engine().evaluation("factor(2^128 + 1)");
            let token = evaluation.cancel_token();
            let handle = std::thread::spawn(move || evaluation.evaluate());
            token.request_cancel();
            // either finished first or stopped early; both are values
            assert!(handle.join().unwrap().is_ok());
        }
    }

    mod introspection {
        use super::*;

        #[test]
        fn test_list_and_help() {
            let engine = engine();
            let logic: Vec<&str> = engine.list_functions(Some("logic")).iter().map(|m| m.name).collect();
            assert!(logic.contains(&"l_if"));
            assert!(engine.list_functions(None).len() > 90);

            let help = engine.help(Some("choose"));
            assert_eq!(help["name"], "C");
            assert_eq!(help["category"], "combinatorics");
        }

        #[test]
        fn test_parse_shows_prefix_form() {
            let tree = engine().parse("2pi + 1").unwrap();
            assert_eq!(tree.to_string(), "add(implicitMultiply(2, pi), 1)");
        }
    }
}
