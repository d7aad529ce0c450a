//! Evaluation state handed to functions

use crate::{Evaluate, Expression};
use quotient_compute::{Computation, Domain, EvaluationParameters};
use quotient_core::{CancellationToken, ErrorKind, EvalError, IBig, Number, Value};
use std::ops::Range;

/// One function call in progress: the call node, its parent, and access to
/// the evaluator for the (still unevaluated) arguments.
pub struct EvaluationState<'a> {
    expression: &'a Expression,
    parent: Option<&'a Expression>,
    evaluator: &'a dyn Evaluate,
    parameters: &'a EvaluationParameters,
    cancel: &'a CancellationToken,
}

impl<'a> EvaluationState<'a> {
    pub fn new(
        expression: &'a Expression,
        parent: Option<&'a Expression>,
        evaluator: &'a dyn Evaluate,
        parameters: &'a EvaluationParameters,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self { expression, parent, evaluator, parameters, cancel }
    }

    pub fn expression(&self) -> &'a Expression {
        self.expression
    }

    pub fn parent(&self) -> Option<&'a Expression> {
        self.parent
    }

    pub fn range(&self) -> Range<usize> {
        self.expression.range.clone()
    }

    pub fn parameters(&self) -> &'a EvaluationParameters {
        self.parameters
    }

    pub fn cancel_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    pub fn computation(&self) -> Computation<'a> {
        Computation::new(self.parameters, self.cancel)
    }

    pub fn is_discrete(&self) -> bool {
        self.parameters.domain == Domain::Discrete
    }

    /// An error located at this call.
    pub fn error(&self, kind: ErrorKind) -> EvalError {
        EvalError::new(kind, self.range())
    }

    // ========== Arguments ==========

    pub fn argument_count(&self) -> usize {
        self.expression.arguments().len()
    }

    pub fn argument(&self, index: usize) -> Result<&'a Expression, EvalError> {
        self.expression
            .arguments()
            .get(index)
            .ok_or_else(|| self.error(ErrorKind::InvalidArguments))
    }

    pub fn evaluate(&self, index: usize) -> Result<Value, EvalError> {
        let argument = self.argument(index)?;
        self.evaluator.evaluate(argument, Some(self.expression))
    }

    /// Evaluate any node of the tree, e.g. a sibling of this call.
    pub fn evaluate_node(&self, expression: &Expression, parent: Option<&Expression>) -> Result<Value, EvalError> {
        self.evaluator.evaluate(expression, parent)
    }

    /// The argument as a number. A factorization stands for the integer it
    /// factors; an interrupted one reads as NaN.
    pub fn number(&self, index: usize) -> Result<Number, EvalError> {
        self.evaluate(index).map(Self::numeric)
    }

    pub fn numeric(value: Value) -> Number {
        match value {
            Value::Number(n) => n,
            Value::Integer(i) => i.to_number(),
            Value::Factorization(f) if f.is_complete() => Number::from_integer(f.value().clone()),
            Value::Factorization(_) => Number::nan(),
        }
    }

    /// Every argument, left to right.
    pub fn numbers(&self) -> Result<Vec<Number>, EvalError> {
        (0..self.argument_count()).map(|i| self.number(i)).collect()
    }

    /// An integer argument, else `ArgumentNotInteger`.
    pub fn integer(&self, index: usize) -> Result<IBig, EvalError> {
        self.number(index)?
            .to_integer()
            .ok_or_else(|| self.error(ErrorKind::ArgumentNotInteger))
    }

    /// A nonnegative integer argument.
    pub fn natural(&self, index: usize) -> Result<IBig, EvalError> {
        let n = self.integer(index)?;
        if n < IBig::ZERO {
            return Err(self.error(ErrorKind::ArgumentNotPositive));
        }
        Ok(n)
    }

    /// A strictly positive integer argument.
    pub fn positive_integer(&self, index: usize) -> Result<IBig, EvalError> {
        let n = self.integer(index)?;
        if n <= IBig::ZERO {
            return Err(self.error(ErrorKind::ArgumentNotPositive));
        }
        Ok(n)
    }

    /// A truth value: `true`, `false`, `1` or `0`.
    pub fn logical(&self, index: usize) -> Result<bool, EvalError> {
        self.number(index)?
            .as_logical()
            .ok_or_else(|| self.error(ErrorKind::ArgumentNotLogicalValue))
    }
}
