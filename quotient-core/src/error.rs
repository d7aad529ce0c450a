//! Structured evaluation errors
//!
//! Every error names what went wrong and where: `range` is a half-open span
//! of character offsets into the source expression. Numeric domain problems
//! are not errors; they surface as NaN values instead.

use crate::NumberError;
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_VAR: &str = "UNDEFINED_VAR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ErrorKind {
    #[error("Cannot parse number")]
    CannotParseNumber,
    #[error("Cannot parse hexadecimal number")]
    CannotParseHexNumber,
    #[error("Cannot parse octal number")]
    CannotParseOctalNumber,
    #[error("Cannot parse exponent")]
    CannotParseExponent,
    #[error("Cannot parse identifier")]
    CannotParseIdentifier,
    #[error("Cannot parse variable")]
    CannotParseVariable,
    #[error("Cannot parse operator '{0}'")]
    CannotParseOperator(String),
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("Missing opening parenthesis")]
    MissingOpenParenthesis,
    #[error("Missing closing parenthesis")]
    MissingCloseParenthesis,
    #[error("Empty function argument")]
    EmptyFunctionArgument,
    #[error("Empty group")]
    EmptyGroup,
    #[error("Invalid format")]
    InvalidFormat,
    #[error("Expression is nested too deeply")]
    ExpressionTooDeep,
    #[error("Missing left operand for '{0}'")]
    MissingLeftOperand(String),
    #[error("Missing right operand for '{0}'")]
    MissingRightOperand(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("Division by zero")]
    DivideByZero,
    #[error("Invalid arguments")]
    InvalidArguments,
    #[error("Argument(s) must be integer(s)")]
    ArgumentNotInteger,
    #[error("Argument(s) must be positive")]
    ArgumentNotPositive,
    #[error("Argument(s) must be either true/1 or false/0")]
    ArgumentNotLogicalValue,
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownFunction(_) => codes::UNDEFINED_FUNC,
            ErrorKind::UnknownVariable(_) => codes::UNDEFINED_VAR,
            ErrorKind::DivideByZero => codes::DIV_ZERO,
            ErrorKind::InvalidArguments => codes::ARG_COUNT,
            ErrorKind::ArgumentNotInteger
            | ErrorKind::ArgumentNotPositive
            | ErrorKind::ArgumentNotLogicalValue => codes::ARG_TYPE,
            ErrorKind::InternalError(_) => codes::INTERNAL,
            _ => codes::PARSE_ERROR,
        }
    }

    /// Raised before any evaluation happens.
    pub fn is_parse_error(&self) -> bool {
        self.code() == codes::PARSE_ERROR
    }
}

/// An error with the source span it refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalError {
    pub kind: ErrorKind,
    pub range: Range<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl EvalError {
    pub fn new(kind: ErrorKind, range: Range<usize>) -> Self {
        Self { kind, range, suggestion: None }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_function(name: &str, range: Range<usize>) -> Self {
        Self::new(ErrorKind::UnknownFunction(name.to_string()), range)
    }

    pub fn unknown_variable(name: &str, range: Range<usize>) -> Self {
        Self::new(ErrorKind::UnknownVariable(name.to_string()), range)
            .with_suggestion(format!("Provide a substitution for '{}'", name))
    }

    pub fn invalid_arguments(range: Range<usize>) -> Self {
        Self::new(ErrorKind::InvalidArguments, range)
    }

    pub fn internal(details: impl Into<String>, range: Range<usize>) -> Self {
        Self::new(ErrorKind::InternalError(details.into()), range)
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.kind)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<NumberError> for ErrorKind {
    fn from(_err: NumberError) -> Self {
        ErrorKind::CannotParseNumber
    }
}
