//! Plugin traits

use crate::{EvaluationState, Expression};
use quotient_core::{ErrorKind, EvalError, Value};
use serde::Serialize;

/// Number of arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Between(low, high) => (low..=high).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Between(low, high) => write!(f, "{}-{}", low, high),
            Arity::AtLeast(n) => write!(f, "{}+", n),
        }
    }
}

/// Metadata for a function plugin
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub arity: Arity,
    pub category: &'static str,
    pub examples: &'static [&'static str],
}

impl FunctionMeta {
    /// The canonical name followed by the aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Recursive evaluation of argument subtrees.
///
/// Functions receive their arguments unevaluated and decide which ones to
/// evaluate; `parent` is the call node the argument belongs to.
pub trait Evaluate {
    fn evaluate(&self, expression: &Expression, parent: Option<&Expression>) -> Result<Value, EvalError>;
}

/// Pure function plugin
pub trait FunctionPlugin: Send + Sync {
    fn meta(&self) -> FunctionMeta;
    fn call(&self, state: &EvaluationState) -> Result<Value, EvalError>;
}

pub type BuiltinFn = fn(&EvaluationState) -> Result<Value, EvalError>;

/// A function implemented by a plain fn pointer. Arity is checked before
/// the body runs.
#[derive(Clone, Copy)]
pub struct Builtin {
    meta: FunctionMeta,
    eval: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("meta", &self.meta).finish_non_exhaustive()
    }
}

impl Builtin {
    pub const fn new(meta: FunctionMeta, eval: BuiltinFn) -> Self {
        Self { meta, eval }
    }
}

impl FunctionPlugin for Builtin {
    fn meta(&self) -> FunctionMeta {
        self.meta
    }

    fn call(&self, state: &EvaluationState) -> Result<Value, EvalError> {
        if !self.meta.arity.accepts(state.argument_count()) {
            return Err(state.error(ErrorKind::InvalidArguments));
        }
        (self.eval)(state)
    }
}
