//! Tree evaluator
//!
//! Walks an expression tree, dispatching every call through the registry.
//! Functions pull their own arguments back through [`Evaluate`], so lazy
//! builtins such as `if` only evaluate what they need. Trees deeper than
//! [`MAX_DEPTH`] are refused before any recursion.

use quotient_compute::{Domain, EvaluationParameters};
use quotient_core::{CancellationToken, ErrorKind, EvalError, Integer, Number, Value};
use quotient_plugin::{Evaluate, EvaluationState, Expression, ExpressionKind, PluginRegistry, MAX_DEPTH};
use std::collections::HashMap;

pub struct Evaluator<'a> {
    registry: &'a PluginRegistry,
    substitutions: &'a HashMap<String, Value>,
    parameters: &'a EvaluationParameters,
    cancel: &'a CancellationToken,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        registry: &'a PluginRegistry,
        substitutions: &'a HashMap<String, Value>,
        parameters: &'a EvaluationParameters,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self { registry, substitutions, parameters, cancel }
    }

    /// Results of the discrete domain are integers.
    fn in_domain(&self, value: Value) -> Value {
        match value {
            Value::Number(n) if self.parameters.domain == Domain::Discrete => {
                Value::Integer(Integer::from_number(&n))
            }
            other => other,
        }
    }
}

impl Evaluate for Evaluator<'_> {
    fn evaluate(&self, expression: &Expression, parent: Option<&Expression>) -> Result<Value, EvalError> {
        if self.cancel.is_cancel_requested() {
            return Ok(Value::Number(Number::nan()));
        }
        if expression.height() > MAX_DEPTH {
            return Err(EvalError::new(ErrorKind::ExpressionTooDeep, expression.range.clone()));
        }

        let value = match &expression.kind {
            ExpressionKind::Number(n) => Value::Number(n.clone()),
            ExpressionKind::Variable(name) => self
                .substitutions
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::unknown_variable(name, expression.range.clone()))?,
            ExpressionKind::Function { name, name_range, arguments } => {
                // A bare name that is no builtin may still be a substitution.
                let substitution = arguments
                    .is_empty()
                    .then(|| self.substitutions.get(name))
                    .flatten()
                    .filter(|_| !self.registry.contains(name));
                match substitution {
                    Some(value) => value.clone(),
                    None => {
                        let state =
                            EvaluationState::new(expression, parent, self, self.parameters, self.cancel);
                        self.registry.call_function(name, name_range.clone(), &state)?
                    }
                }
            }
        };

        Ok(self.in_domain(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(source: &str, substitutions: &HashMap<String, Value>, parameters: &EvaluationParameters) -> Result<Value, EvalError> {
        let registry = quotient_std::standard_registry();
        let cancel = CancellationToken::new();
        let tree = parse(source, parameters.domain)?;
        Evaluator::new(&registry, substitutions, parameters, &cancel).evaluate(&tree, None)
    }

    fn eval(source: &str) -> Result<Value, EvalError> {
        run(source, &HashMap::new(), &EvaluationParameters::default())
    }

    #[test]
    fn test_variables_come_from_substitutions() {
        let vars = HashMap::from([("x".to_string(), Value::from(Number::from_ratio(1, 2)))]);
        let value = run("$x * 4", &vars, &EvaluationParameters::default()).unwrap();
        assert_eq!(value.to_string(), "2");
    }

    #[test]
    fn test_unknown_variable_has_its_range() {
        let err = eval("1 + $y").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownVariable("y".to_string()));
        assert_eq!(err.range, 4..6);
    }

    #[test]
    fn test_bare_names_fall_back_to_substitutions() {
        let vars = HashMap::from([
            ("width".to_string(), Value::from(3i64)),
            ("pi".to_string(), Value::from(0i64)),
        ]);
        let value = run("2width", &vars, &EvaluationParameters::default()).unwrap();
        assert_eq!(value.to_string(), "6");
        // builtins win over substitutions
        let value = run("pi > 3", &vars, &EvaluationParameters::default()).unwrap();
        assert_eq!(value.to_string(), "true");
    }

    #[test]
    fn test_unknown_function_has_name_range() {
        let err = eval("2 * sinn(1)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFunction("sinn".to_string()));
        assert_eq!(err.range, 4..8);
        assert!(err.suggestion.unwrap().contains("sin"));
    }

    #[test]
    fn test_discrete_results_are_integers() {
        let parameters = EvaluationParameters::default().with_domain(Domain::Discrete);
        let value = run("7 / 2", &HashMap::new(), &parameters).unwrap();
        assert!(matches!(value, Value::Integer(_)));
        assert_eq!(value.to_string(), "3");
    }

    #[test]
    fn test_cancelled_evaluation_is_nan() {
        let registry = quotient_std::standard_registry();
        let cancel = CancellationToken::new();
        cancel.request_cancel();
        let tree = parse("1 + 2", Domain::Rational).unwrap();
        let parameters = EvaluationParameters::default();
        let vars = HashMap::new();
        let value = Evaluator::new(&registry, &vars, &parameters, &cancel).evaluate(&tree, None).unwrap();
        assert!(value.is_nan());
    }

    #[test]
    fn test_deepest_parsed_tree_evaluates() {
        let source = format!("{}1", "-".repeat(MAX_DEPTH));
        let value = eval(&source).unwrap();
        assert_eq!(value.to_string(), "1");
    }

    #[test]
    fn test_built_trees_past_the_limit_are_refused() {
        let mut tree = Expression::number(Number::one(), 0..1);
        for _ in 0..=MAX_DEPTH {
            tree = Expression::function("negate", 0..0, vec![tree], 0..1);
        }
        let registry = quotient_std::standard_registry();
        let cancel = CancellationToken::new();
        let parameters = EvaluationParameters::default();
        let vars = HashMap::new();
        let err = Evaluator::new(&registry, &vars, &parameters, &cancel).evaluate(&tree, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpressionTooDeep);
    }
}
