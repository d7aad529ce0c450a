//! One expression, evaluated once
//!
//! An [`Evaluation`] owns everything a run needs, including its own
//! cancellation token, so several evaluations can run side by side without
//! cancelling each other.

use crate::evaluator::Evaluator;
use crate::parser::parse;
use quotient_compute::EvaluationParameters;
use quotient_core::{CancellationToken, EvalError, Value};
use quotient_plugin::{Evaluate, PluginRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationStatus {
    Created,
    Evaluating,
    Succeeded(Value),
    Failed(EvalError),
}

impl EvaluationStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, EvaluationStatus::Succeeded(_) | EvaluationStatus::Failed(_))
    }
}

pub struct Evaluation {
    registry: Arc<PluginRegistry>,
    expression: String,
    substitutions: HashMap<String, Value>,
    parameters: EvaluationParameters,
    cancel: CancellationToken,
    status: EvaluationStatus,
}

impl Evaluation {
    pub fn new(
        registry: Arc<PluginRegistry>,
        expression: impl Into<String>,
        substitutions: HashMap<String, Value>,
        parameters: EvaluationParameters,
    ) -> Self {
        Self {
            registry,
            expression: expression.into(),
            substitutions,
            parameters,
            cancel: CancellationToken::new(),
            status: EvaluationStatus::Created,
        }
    }

    pub fn with_substitution(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.substitutions.insert(name.into(), value.into());
        self
    }

    pub fn with_parameters(mut self, parameters: EvaluationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn parameters(&self) -> &EvaluationParameters {
        &self.parameters
    }

    pub fn status(&self) -> &EvaluationStatus {
        &self.status
    }

    /// A handle that cancels this evaluation from another thread.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Parse and evaluate. A finished evaluation replays its outcome.
    pub fn evaluate(&mut self) -> Result<Value, EvalError> {
        match &self.status {
            EvaluationStatus::Succeeded(value) => return Ok(value.clone()),
            EvaluationStatus::Failed(error) => return Err(error.clone()),
            EvaluationStatus::Created | EvaluationStatus::Evaluating => {}
        }

        self.status = EvaluationStatus::Evaluating;
        debug!(expression = %self.expression, "evaluation started");
        let outcome = self.run();
        self.cancel.clear_cancel();

        self.status = match &outcome {
            Ok(value) => {
                debug!(expression = %self.expression, result = %value, "evaluation succeeded");
                EvaluationStatus::Succeeded(value.clone())
            }
            Err(error) => {
                debug!(expression = %self.expression, %error, "evaluation failed");
                EvaluationStatus::Failed(error.clone())
            }
        };
        outcome
    }

    fn run(&self) -> Result<Value, EvalError> {
        let tree = parse(&self.expression, self.parameters.domain).inspect_err(|error| {
            debug!(expression = %self.expression, %error, "parse failed");
        })?;
        Evaluator::new(&self.registry, &self.substitutions, &self.parameters, &self.cancel)
            .evaluate(&tree, None)
    }
}
