//! Quotient Standard Library
//!
//! Builtin functions grouped by category. Operators of the expression
//! grammar lower to calls of these functions, so an engine without the
//! standard library only understands literals and variables.

pub mod functions;

use quotient_plugin::PluginRegistry;

/// Load standard library into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    let registry = functions::all().fold(registry, |registry, f| registry.with_function(f));
    tracing::debug!(functions = registry.len(), "standard library loaded");
    registry
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    load_standard_library(PluginRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotient_plugin::prelude::*;

    /// Walks literal and call nodes against a registry.
    struct Walker<'a> {
        registry: &'a PluginRegistry,
        parameters: EvaluationParameters,
        cancel: CancellationToken,
    }

    impl Evaluate for Walker<'_> {
        fn evaluate(&self, expression: &Expression, parent: Option<&Expression>) -> Result<Value, EvalError> {
            match &expression.kind {
                ExpressionKind::Number(n) => Ok(Value::Number(n.clone())),
                ExpressionKind::Variable(name) => Err(EvalError::unknown_variable(name, expression.range.clone())),
                ExpressionKind::Function { name, name_range, .. } => {
                    let state =
                        EvaluationState::new(expression, parent, self, &self.parameters, &self.cancel);
                    self.registry.call_function(name, name_range.clone(), &state)
                }
            }
        }
    }

    fn num(value: i64) -> Expression {
        Expression::number(Number::from_i64(value), 0..1)
    }

    fn frac(numerator: i64, denominator: i64) -> Expression {
        Expression::number(Number::from_ratio(numerator, denominator), 0..1)
    }

    fn call(name: &str, arguments: Vec<Expression>) -> Expression {
        Expression::function(name, 0..name.len(), arguments, 0..20)
    }

    fn eval_with(parameters: EvaluationParameters, expression: &Expression) -> Result<Value, EvalError> {
        let registry = standard_registry();
        let walker = Walker { registry: &registry, parameters, cancel: CancellationToken::new() };
        walker.evaluate(expression, None)
    }

    fn eval(expression: &Expression) -> Result<Value, EvalError> {
        eval_with(EvaluationParameters::default(), expression)
    }

    fn number(expression: &Expression) -> Number {
        eval(expression).unwrap().to_number().unwrap()
    }

    fn text(expression: &Expression) -> String {
        eval(expression).unwrap().to_string()
    }

    fn kind(expression: &Expression) -> ErrorKind {
        eval(expression).unwrap_err().kind
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_every_name_is_registered_once() {
            let registry = standard_registry();
            let mut seen = std::collections::HashSet::new();
            for f in functions::all() {
                for name in f.meta().names() {
                    assert!(seen.insert(name), "duplicate name {}", name);
                    assert!(registry.contains(name));
                }
            }
            assert!(registry.len() >= 95);
        }

        #[test]
        fn test_lookup_is_case_sensitive() {
            let registry = standard_registry();
            assert_eq!(registry.get_function("C").unwrap().meta().name, "C");
            assert_eq!(registry.get_function("s").unwrap().meta().name, "s");
            assert_eq!(registry.get_function("S").unwrap().meta().name, "S");
            assert!(registry.get_function("Sin").is_none());
        }

        #[test]
        fn test_categories() {
            let registry = standard_registry();
            let categories = registry.categories();
            for category in ["aggregate", "arithmetic", "bitwise", "combinatorics", "constants", "logic", "powers", "trigonometry"] {
                assert!(categories.contains(&category), "missing {}", category);
            }
            assert!(registry.list_functions(Some("trigonometry")).iter().any(|m| m.name == "crd"));
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_exact_operations() {
            assert_eq!(number(&call("add", vec![frac(1, 3), frac(1, 6)])), Number::from_ratio(1, 2));
            assert_eq!(number(&call("subtract", vec![num(5), num(7)])).to_i64(), Some(-2));
            assert_eq!(number(&call("implicitMultiply", vec![num(6), frac(1, 4)])), Number::from_ratio(3, 2));
            assert!(number(&call("divide", vec![num(1), num(0)])).is_nan());
        }

        #[test]
        fn test_discrete_division_floors() {
            let discrete = EvaluationParameters::new().with_domain(Domain::Discrete);
            let value = eval_with(discrete, &call("divide", vec![num(-7), num(2)])).unwrap();
            assert_eq!(value.to_number().unwrap().to_i64(), Some(-4));
        }

        #[test]
        fn test_modulo_takes_divisor_sign() {
            assert_eq!(number(&call("mod", vec![num(7), num(3)])).to_i64(), Some(1));
            assert_eq!(number(&call("mod", vec![num(-7), num(3)])).to_i64(), Some(2));
            assert_eq!(number(&call("modulo", vec![num(7), num(-3)])).to_i64(), Some(-2));
        }

        #[test]
        fn test_percent_scales_the_left_operand() {
            let expression = call("add", vec![num(200), call("percent", vec![num(10)])]);
            assert_eq!(number(&expression).to_i64(), Some(220));
            let expression = call("subtract", vec![num(200), call("percent", vec![num(10)])]);
            assert_eq!(number(&expression).to_i64(), Some(180));
        }

        #[test]
        fn test_percent_alone_or_on_the_left() {
            assert_eq!(number(&call("percent", vec![num(50)])), Number::from_ratio(1, 2));
            let expression = call("add", vec![call("percent", vec![num(10)]), num(1)]);
            assert_eq!(number(&expression), Number::from_ratio(11, 10));
            let expression = call("multiply", vec![num(200), call("percent", vec![num(10)])]);
            assert_eq!(number(&expression).to_i64(), Some(20));
        }

        #[test]
        fn test_gcd_guards() {
            assert_eq!(number(&call("gcd", vec![num(84), num(36)])).to_i64(), Some(12));
            assert_eq!(kind(&call("gcd", vec![frac(1, 2), num(3)])), ErrorKind::ArgumentNotInteger);
            assert_eq!(kind(&call("gcd", vec![num(0), num(3)])), ErrorKind::ArgumentNotPositive);
        }

        #[test]
        fn test_rounding() {
            assert_eq!(number(&call("floor", vec![frac(-7, 2)])).to_i64(), Some(-4));
            assert_eq!(number(&call("ceil", vec![frac(-7, 2)])).to_i64(), Some(-3));
            assert_eq!(number(&call("trunc", vec![frac(-7, 2)])).to_i64(), Some(-3));
            assert_eq!(number(&call("abs", vec![frac(-3, 4)])), Number::from_ratio(3, 4));
        }

        #[test]
        fn test_arity_errors_cover_the_call() {
            let err = eval(&call("add", vec![num(1)])).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidArguments);
            assert_eq!(err.range, 0..20);
        }
    }

    mod combinatorics_tests {
        use super::*;

        #[test]
        fn test_factorials() {
            assert_eq!(text(&call("factorial", vec![num(5)])), "120");
            assert_eq!(number(&call("factorial2", vec![num(7)])).to_i64(), Some(105));
            assert_eq!(number(&call("factorial2", vec![num(8)])).to_i64(), Some(384));
            assert_eq!(kind(&call("factorial2", vec![num(0)])), ErrorKind::InvalidArguments);
            assert_eq!(kind(&call("factorial2", vec![frac(5, 2)])), ErrorKind::InvalidArguments);
            let half = number(&call("factorial", vec![frac(1, 2)]));
            assert!(half.is_approximation());
        }

        #[test]
        fn test_counting_numbers() {
            assert_eq!(number(&call("C", vec![num(5), num(2)])).to_i64(), Some(10));
            assert_eq!(number(&call("choose", vec![num(2), num(5)])).to_i64(), Some(0));
            assert_eq!(number(&call("P", vec![num(5), num(2)])).to_i64(), Some(20));
            assert_eq!(number(&call("s", vec![num(5), num(2)])).to_i64(), Some(50));
            assert_eq!(number(&call("S", vec![num(5), num(2)])).to_i64(), Some(15));
            assert_eq!(number(&call("lah", vec![num(5), num(2)])).to_i64(), Some(240));
            assert_eq!(number(&call("catalan", vec![num(10)])).to_i64(), Some(16796));
            assert_eq!(number(&call("B", vec![num(10)])).to_i64(), Some(115975));
        }

        #[test]
        fn test_counting_guards() {
            assert_eq!(kind(&call("C", vec![num(-5), num(2)])), ErrorKind::ArgumentNotPositive);
            assert_eq!(kind(&call("S", vec![num(5), frac(1, 2)])), ErrorKind::ArgumentNotInteger);
            assert_eq!(kind(&call("catalan", vec![num(-1)])), ErrorKind::ArgumentNotPositive);
            assert_eq!(kind(&call("fibonacci", vec![frac(1, 2)])), ErrorKind::ArgumentNotInteger);
        }

        #[test]
        fn test_sequences() {
            assert_eq!(text(&call("F", vec![num(100)])), "354224848179261915075");
            assert_eq!(number(&call("fibonacci", vec![num(-8)])).to_i64(), Some(-21));
            assert_eq!(number(&call("L", vec![num(10)])).to_i64(), Some(123));
        }

        #[test]
        fn test_primality() {
            assert_eq!(eval(&call("p", vec![num(97)])).unwrap(), Value::from(true));
            assert_eq!(eval(&call("prime", vec![num(91)])).unwrap(), Value::from(false));
            assert_eq!(eval(&call("prime", vec![frac(7, 2)])).unwrap(), Value::from(false));
        }

        #[test]
        fn test_factor_and_derivative() {
            let value = eval(&call("factor", vec![num(360)])).unwrap();
            assert_eq!(value.type_name(), "Factorization");
            assert_eq!(value.to_string(), "2³ × 3² × 5");
            assert_eq!(kind(&call("factor", vec![frac(1, 2)])), ErrorKind::ArgumentNotInteger);
            assert_eq!(number(&call("derivative", vec![num(360)])).to_i64(), Some(852));
            // a factorization feeds other functions as its value
            let doubled = call("multiply", vec![call("factor", vec![num(12)]), num(2)]);
            assert_eq!(number(&doubled).to_i64(), Some(24));
        }
    }

    mod powers_tests {
        use super::*;

        #[test]
        fn test_pow() {
            assert_eq!(number(&call("pow", vec![num(2), num(10)])).to_i64(), Some(1024));
            assert_eq!(number(&call("pow", vec![num(4), frac(1, 2)])).to_i64(), Some(2));
            assert!(number(&call("pow", vec![num(0), num(0)])).is_nan());
        }

        #[test]
        fn test_modular_pow() {
            assert_eq!(number(&call("pow", vec![num(4), num(13), num(497)])).to_i64(), Some(445));
            assert_eq!(kind(&call("pow", vec![num(4), frac(1, 2), num(497)])), ErrorKind::InvalidArguments);
            assert_eq!(kind(&call("pow", vec![num(4)])), ErrorKind::InvalidArguments);
        }

        #[test]
        fn test_tetration() {
            assert_eq!(number(&call("tetr", vec![num(2), num(4)])).to_i64(), Some(65536));
            assert_eq!(number(&call("tetration", vec![num(3), num(0)])).to_i64(), Some(1));
            assert_eq!(kind(&call("tetr", vec![num(-2), num(2)])), ErrorKind::InvalidArguments);
            assert_eq!(kind(&call("tetr", vec![num(2), num(-1)])), ErrorKind::InvalidArguments);
        }

        #[test]
        fn test_roots() {
            let root = number(&call("sqrt", vec![num(2)]));
            assert!(root.is_approximation());
            assert_eq!(root.decimal_expansion(12).0, "1.414213562373");
            assert_eq!(kind(&call("sqrt", vec![num(-4)])), ErrorKind::ArgumentNotPositive);
            assert_eq!(number(&call("cuberoot", vec![num(-27)])).to_i64(), Some(-3));
            assert_eq!(number(&call("nthroot", vec![num(5), num(32)])).to_i64(), Some(2));
            assert!(number(&call("nthroot", vec![num(3), num(0)])).is_zero());
            assert_eq!(kind(&call("nthroot", vec![frac(1, 2), num(4)])), ErrorKind::ArgumentNotInteger);
            assert_eq!(kind(&call("nthroot", vec![num(0), num(4)])), ErrorKind::ArgumentNotPositive);
        }

        #[test]
        fn test_logarithms() {
            assert_eq!(number(&call("log", vec![num(1000)])).to_i64(), Some(3));
            assert_eq!(number(&call("lg", vec![num(2), num(1024)])).to_i64(), Some(10));
            assert_eq!(number(&call("lb", vec![num(8)])).to_i64(), Some(3));
            assert_eq!(kind(&call("log", vec![frac(1, 2), num(8)])), ErrorKind::ArgumentNotInteger);
            assert!(number(&call("ln", vec![num(-1)])).is_nan());
            assert!(number(&call("log2", vec![num(-1)])).is_nan());
            assert!(number(&call("log", vec![num(-1)])).is_nan());
            assert!(number(&call("log", vec![num(2), num(-8)])).is_nan());
            let ln2 = number(&call("ln", vec![num(2)]));
            assert_eq!(ln2.decimal_expansion(12).0, "0.693147180559");
            assert!(number(&call("exp", vec![num(0)])).is_one());
        }
    }

    mod bitwise_tests {
        use super::*;

        #[test]
        fn test_operations() {
            assert_eq!(number(&call("and", vec![num(12), num(10)])).to_i64(), Some(8));
            assert_eq!(number(&call("or", vec![num(12), num(10)])).to_i64(), Some(14));
            assert_eq!(number(&call("xor", vec![num(12), num(10)])).to_i64(), Some(6));
            assert_eq!(number(&call("not", vec![num(5)])).to_i64(), Some(-6));
            assert_eq!(kind(&call("and", vec![frac(1, 2), num(1)])), ErrorKind::ArgumentNotInteger);
        }

        #[test]
        fn test_shifts() {
            assert_eq!(number(&call("lshift", vec![num(1), num(10)])).to_i64(), Some(1024));
            assert_eq!(number(&call("rshift", vec![num(1024), num(3)])).to_i64(), Some(128));
            assert_eq!(number(&call("rshift", vec![num(-5), num(1)])).to_i64(), Some(-3));
            assert_eq!(number(&call("lshift", vec![num(16), num(-2)])).to_i64(), Some(4));
        }
    }

    mod aggregate_tests {
        use super::*;

        #[test]
        fn test_sums_and_extremes() {
            assert_eq!(number(&call("sum", vec![num(1), num(2), num(3)])).to_i64(), Some(6));
            assert_eq!(number(&call("∏", vec![num(1), num(2), num(3), num(4)])).to_i64(), Some(24));
            assert_eq!(number(&call("count", vec![num(1), num(1), num(1)])).to_i64(), Some(3));
            assert_eq!(number(&call("min", vec![num(3), frac(1, 2), num(2)])), Number::from_ratio(1, 2));
            assert_eq!(number(&call("max", vec![num(3), frac(1, 2), num(2)])).to_i64(), Some(3));
            assert_eq!(number(&call("mean", vec![num(1), num(2), num(4)])), Number::from_ratio(7, 3));
            assert_eq!(kind(&call("sum", vec![])), ErrorKind::InvalidArguments);
        }

        #[test]
        fn test_median_sorts() {
            assert_eq!(number(&call("median", vec![num(5), num(1), num(3)])).to_i64(), Some(3));
            assert_eq!(number(&call("median", vec![num(4), num(1), num(3), num(2)])), Number::from_ratio(5, 2));
            assert_eq!(kind(&call("median", vec![num(1)])), ErrorKind::InvalidArguments);
        }

        #[test]
        fn test_stddev() {
            let values = [2, 4, 4, 4, 5, 5, 7, 9].into_iter().map(num).collect();
            assert_eq!(number(&call("stddev", values)).to_i64(), Some(2));
        }

        #[test]
        fn test_digits_and_decimal() {
            assert_eq!(number(&call("digits", vec![num(12345)])).to_i64(), Some(5));
            assert_eq!(number(&call("digits", vec![frac(-1, 4)])).to_i64(), Some(3));
            let third = number(&call("decimal", vec![frac(1, 3), num(5)]));
            assert_eq!(third, Number::from_ratio(33333, 100000));
            assert!(third.is_approximation());
            let quarter = number(&call("decimal", vec![frac(1, 4), num(5)]));
            assert!(!quarter.is_approximation());
            assert_eq!(kind(&call("decimal", vec![frac(1, 4), num(0)])), ErrorKind::ArgumentNotPositive);
        }
    }

    mod trig_tests {
        use super::*;

        fn degrees() -> EvaluationParameters {
            EvaluationParameters::new().with_angle_mode(AngleMode::Degrees)
        }

        fn in_degrees(expression: &Expression) -> Result<Value, EvalError> {
            eval_with(degrees(), expression)
        }

        #[test]
        fn test_special_angles_are_exact() {
            let sine = in_degrees(&call("sin", vec![num(30)])).unwrap().to_number().unwrap();
            assert_eq!(sine, Number::from_ratio(1, 2));
            assert!(!sine.is_approximation());
            let cosine = in_degrees(&call("cos", vec![num(60)])).unwrap().to_number().unwrap();
            assert_eq!(cosine, Number::from_ratio(1, 2));
        }

        #[test]
        fn test_reciprocals_of_zero_fail() {
            for name in ["csc", "cotan", "excsc"] {
                let err = in_degrees(&call(name, vec![num(180)])).unwrap_err();
                assert_eq!(err.kind, ErrorKind::DivideByZero, "{}", name);
            }
            for name in ["sec", "exsec"] {
                let err = in_degrees(&call(name, vec![num(90)])).unwrap_err();
                assert_eq!(err.kind, ErrorKind::DivideByZero, "{}", name);
            }
            assert_eq!(kind(&call("csch", vec![num(0)])), ErrorKind::DivideByZero);
            assert_eq!(kind(&call("cotanh", vec![num(0)])), ErrorKind::DivideByZero);
            for name in ["acsch", "asech", "acotanh"] {
                assert_eq!(kind(&call(name, vec![num(0)])), ErrorKind::DivideByZero, "{}", name);
            }
        }

        #[test]
        fn test_geometric_functions() {
            let versine = in_degrees(&call("versin", vec![num(60)])).unwrap();
            assert_eq!(versine.to_number().unwrap(), Number::from_ratio(1, 2));
            let haversine = in_degrees(&call("haversin", vec![num(60)])).unwrap();
            assert_eq!(haversine.to_number().unwrap(), Number::from_ratio(1, 4));
            let chord = in_degrees(&call("crd", vec![num(60)])).unwrap();
            assert_eq!(chord.to_number().unwrap().to_i64(), Some(1));
            let secant = in_degrees(&call("sec", vec![num(60)])).unwrap();
            assert_eq!(secant.to_number().unwrap().to_i64(), Some(2));
        }

        #[test]
        fn test_hyperbolic() {
            assert!(number(&call("sinh", vec![num(0)])).is_zero());
            assert!(number(&call("cosh", vec![num(0)])).is_one());
            let value = number(&call("asinh", vec![num(1)]));
            assert_eq!(value.decimal_expansion(12).0, "0.881373587019");
        }

        #[test]
        fn test_conversions() {
            let degrees = number(&call("rtod", vec![call("pi", vec![])]));
            assert_eq!(degrees.decimal_expansion(9).0, "180");
            let radians = number(&call("dtor", vec![num(180)]));
            assert_eq!(radians.decimal_expansion(12).0, "3.141592653589");
        }
    }

    mod constants_tests {
        use super::*;

        #[test]
        fn test_constants() {
            assert_eq!(eval(&call("yes", vec![])).unwrap(), Value::from(true));
            assert_eq!(eval(&call("no", vec![])).unwrap(), Value::from(false));
            assert_eq!(number(&call("π", vec![])).decimal_expansion(12).0, "3.141592653589");
            assert_eq!(number(&call("e", vec![])).decimal_expansion(12).0, "2.718281828459");
            assert_eq!(number(&call("phi", vec![])).decimal_expansion(12).0, "1.618033988749");
            assert_eq!(number(&call("ln2", vec![])).decimal_expansion(12).0, "0.693147180559");
            assert_eq!(kind(&call("pi", vec![num(1)])), ErrorKind::InvalidArguments);
        }
    }

    mod logic_tests {
        use super::*;

        fn t() -> Expression {
            call("true", vec![])
        }

        fn f() -> Expression {
            call("false", vec![])
        }

        fn truth(expression: &Expression) -> bool {
            number(expression).as_logical().unwrap()
        }

        #[test]
        fn test_connectives() {
            assert!(!truth(&call("l_and", vec![t(), f()])));
            assert!(truth(&call("l_or", vec![t(), f()])));
            assert!(truth(&call("l_not", vec![num(0)])));
            assert!(!truth(&call("l_impl", vec![t(), f()])));
            assert!(truth(&call("l_impl", vec![f(), f()])));
            assert!(truth(&call("l_eqv", vec![f(), f()])));
            assert_eq!(kind(&call("l_and", vec![num(2), t()])), ErrorKind::ArgumentNotLogicalValue);
        }

        #[test]
        fn test_comparisons() {
            assert!(truth(&call("l_lt", vec![frac(1, 3), frac(1, 2)])));
            assert!(truth(&call("l_gtoe", vec![num(2), num(2)])));
            assert!(truth(&call("l_eq", vec![frac(2, 4), frac(1, 2)])));
            let nan = call("divide", vec![num(0), num(0)]);
            assert!(!truth(&call("l_eq", vec![nan.clone(), nan.clone()])));
            assert!(truth(&call("l_neq", vec![nan.clone(), nan])));
        }

        #[test]
        fn test_if_skips_the_other_branch() {
            // the untaken branch would fail with ArgumentNotPositive
            let failing = call("sqrt", vec![num(-1)]);
            let chosen = call("if", vec![t(), num(10), failing.clone()]);
            assert_eq!(number(&chosen).to_i64(), Some(10));
            let other = call("l_if", vec![f(), failing, num(20)]);
            assert_eq!(number(&other).to_i64(), Some(20));
            assert_eq!(kind(&call("if", vec![num(3), num(1), num(2)])), ErrorKind::ArgumentNotLogicalValue);
        }
    }
}
