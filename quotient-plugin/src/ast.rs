//! Expression trees
//!
//! Every operator is lowered to a call of a named function, so a tree only
//! has three kinds of nodes. Each node remembers the source range it was
//! parsed from.

use quotient_core::Number;
use serde::Serialize;
use std::ops::Range;

/// Deepest nesting of calls a tree may have. Parsing and evaluation both
/// recurse once per level.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    /// Character offsets `[start, end)` into the source text
    pub range: Range<usize>,
    #[serde(skip)]
    height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExpressionKind {
    Number(Number),
    /// `$name` or `$1`
    Variable(String),
    Function {
        name: String,
        name_range: Range<usize>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn number(value: Number, range: Range<usize>) -> Self {
        Self { kind: ExpressionKind::Number(value), range, height: 0 }
    }

    pub fn variable(name: impl Into<String>, range: Range<usize>) -> Self {
        Self { kind: ExpressionKind::Variable(name.into()), range, height: 0 }
    }

    pub fn function(
        name: impl Into<String>,
        name_range: Range<usize>,
        arguments: Vec<Expression>,
        range: Range<usize>,
    ) -> Self {
        let height = arguments.iter().map(|a| a.height).max().map_or(0, |h| h + 1);
        Self {
            kind: ExpressionKind::Function { name: name.into(), name_range, arguments },
            range,
            height,
        }
    }

    /// A call produced by an operator: the operator token names the call.
    pub fn operator(name: &str, operator_range: Range<usize>, arguments: Vec<Expression>) -> Self {
        let start = arguments.iter().map(|a| a.range.start).chain([operator_range.start]).min();
        let end = arguments.iter().map(|a| a.range.end).chain([operator_range.end]).max();
        let range = start.unwrap_or(operator_range.start)..end.unwrap_or(operator_range.end);
        Self::function(name, operator_range, arguments, range)
    }

    /// Levels of calls below this node; leaves and bare names are 0.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn function_name(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[Expression] {
        match &self.kind {
            ExpressionKind::Function { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn is_call_to(&self, candidates: &[&str]) -> bool {
        self.function_name().is_some_and(|name| candidates.contains(&name))
    }
}

/// Prefix form, e.g. `add(1, multiply(2, $x))`.
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExpressionKind::Number(n) => write!(f, "{}", n),
            ExpressionKind::Variable(name) => write!(f, "${}", name),
            ExpressionKind::Function { name, arguments, .. } => {
                if arguments.is_empty() {
                    return write!(f, "{}", name);
                }
                let parts: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, parts.join(", "))
            }
        }
    }
}
