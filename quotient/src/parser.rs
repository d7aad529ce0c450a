//! Pratt parser
//!
//! Operators are lowered to calls of the builtins that implement them, so the
//! resulting tree only holds numbers, variables and calls. Binding powers,
//! loosest first:
//!
//! | operators                    | left | right |
//! |------------------------------|------|-------|
//! | `\|\|`                       | 1    | 2     |
//! | `&&`                         | 3    | 4     |
//! | `== != < > <= >= ≠ ≤ ≥`      | 5    | 6     |
//! | `\|`                         | 7    | 8     |
//! | `&`                          | 9    | 10    |
//! | `<< >>`                      | 11   | 12    |
//! | `+ - −`                      | 13   | 14    |
//! | `* / × ÷`, implicit          | 15   | 16    |
//! | prefix `- + ! ~ √`           |      | 17    |
//! | `^ **`                       | 20   | 19    |
//! | postfix `! !! %`             | 21   |       |
//!
//! Trees deeper than [`MAX_DEPTH`] are rejected, as is nesting that would
//! make the parser recurse further than that.

use crate::lexer::{tokenize, Token, TokenKind};
use quotient_compute::Domain;
use quotient_core::{ErrorKind, EvalError};
use quotient_plugin::{Expression, MAX_DEPTH};
use std::ops::Range;

const PREFIX_POWER: u8 = 17;
const POSTFIX_POWER: u8 = 21;
const IMPLICIT_POWER: (u8, u8) = (15, 16);

/// Left power, right power and the builtin an infix operator calls.
fn infix(op: &str) -> Option<(u8, u8, &'static str)> {
    let binding = match op {
        "||" => (1, 2, "l_or"),
        "&&" => (3, 4, "l_and"),
        "==" => (5, 6, "l_eq"),
        "!=" | "≠" => (5, 6, "l_neq"),
        "<" => (5, 6, "l_lt"),
        ">" => (5, 6, "l_gt"),
        "<=" | "≤" => (5, 6, "l_ltoe"),
        ">=" | "≥" => (5, 6, "l_gtoe"),
        "|" => (7, 8, "or"),
        "&" => (9, 10, "and"),
        "<<" => (11, 12, "lshift"),
        ">>" => (11, 12, "rshift"),
        "+" => (13, 14, "add"),
        "-" | "−" => (13, 14, "subtract"),
        "*" | "×" => (15, 16, "multiply"),
        "/" | "÷" => (15, 16, "divide"),
        "^" | "**" => (20, 19, "pow"),
        _ => return None,
    };
    Some(binding)
}

fn prefix(op: &str) -> Option<&'static str> {
    match op {
        "-" | "−" => Some("negate"),
        "!" => Some("l_not"),
        "~" => Some("not"),
        "√" => Some("sqrt"),
        _ => None,
    }
}

fn postfix(op: &str) -> Option<&'static str> {
    match op {
        "!" => Some("factorial"),
        "!!" => Some("factorial2"),
        "%" => Some("percent"),
        _ => None,
    }
}

/// Parse an expression into a tree of calls.
pub fn parse(source: &str, domain: Domain) -> Result<Expression, EvalError> {
    let tokens = tokenize(source, domain)?;
    let end = source.chars().count();
    Parser { tokens, pos: 0, end, depth: 0 }.parse_all()
}

/// A node built by the parser, unless it is too deep to evaluate.
fn bounded(node: Expression) -> Result<Expression, EvalError> {
    if node.height() > MAX_DEPTH {
        return Err(too_deep(node.range));
    }
    Ok(node)
}

fn too_deep(range: Range<usize>) -> EvalError {
    EvalError::new(ErrorKind::ExpressionTooDeep, range)
        .with_suggestion(format!("Nest at most {} levels", MAX_DEPTH))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Nested calls of `expression`
    depth: usize,
    /// Offset just past the last character
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_all(mut self) -> Result<Expression, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::new(ErrorKind::InvalidFormat, 0..self.end)
                .with_suggestion("Enter an expression"));
        }
        let expression = self.expression(0)?;
        match self.advance() {
            None => Ok(expression),
            Some(Token { kind: TokenKind::RParen, range }) => {
                Err(EvalError::new(ErrorKind::MissingOpenParenthesis, range))
            }
            Some(token) => Err(EvalError::new(ErrorKind::InvalidFormat, token.range)),
        }
    }

    /// Whether the next token can begin an operand.
    fn starts_operand(&self) -> bool {
        match self.peek_kind() {
            Some(TokenKind::Number(_) | TokenKind::Identifier(_))
            | Some(TokenKind::Variable(_) | TokenKind::LParen) => true,
            Some(TokenKind::Operator(op)) => prefix(op).is_some() || matches!(*op, "+" | "!!"),
            _ => false,
        }
    }

    /// Whether the next token begins an operand written right after another
    /// one, as in `2pi`, `3(4)` or `2√2`.
    fn starts_implicit_operand(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Number(_) | TokenKind::Identifier(_))
                | Some(TokenKind::Variable(_) | TokenKind::LParen)
                | Some(TokenKind::Operator("√"))
        )
    }

    fn expression(&mut self, min_power: u8) -> Result<Expression, EvalError> {
        if self.depth > MAX_DEPTH {
            return Err(too_deep(self.pos_range()));
        }
        self.depth += 1;
        let expression = self.climb(min_power);
        self.depth -= 1;
        expression
    }

    fn climb(&mut self, min_power: u8) -> Result<Expression, EvalError> {
        let mut lhs = self.prefix()?;

        loop {
            if let Some(Token { kind: TokenKind::Operator(op), range }) = self.peek() {
                let (op, range) = (*op, range.clone());
                if let Some(name) = postfix(op) {
                    if POSTFIX_POWER < min_power {
                        break;
                    }
                    self.pos += 1;
                    lhs = bounded(Expression::operator(name, range, vec![lhs]))?;
                    continue;
                }
                if let Some((left, right, name)) = infix(op) {
                    if left < min_power {
                        break;
                    }
                    self.pos += 1;
                    let rhs = self.operand(op, range.clone(), right)?;
                    lhs = bounded(Expression::operator(name, range, vec![lhs, rhs]))?;
                    continue;
                }
            }

            if !self.starts_implicit_operand() {
                break;
            }
            let (left, right) = IMPLICIT_POWER;
            if left < min_power {
                break;
            }
            let at = self.peek().map_or(self.end, |t| t.range.start);
            let rhs = self.expression(right)?;
            lhs = bounded(Expression::operator("implicitMultiply", at..at, vec![lhs, rhs]))?;
        }

        Ok(lhs)
    }

    /// The operand after an operator, or a missing-operand error at it.
    fn operand(&mut self, op: &str, op_range: Range<usize>, power: u8) -> Result<Expression, EvalError> {
        if !self.starts_operand() {
            return Err(EvalError::new(ErrorKind::MissingRightOperand(op.to_string()), op_range));
        }
        self.expression(power)
    }

    fn prefix(&mut self) -> Result<Expression, EvalError> {
        let Some(token) = self.advance() else {
            return Err(EvalError::new(ErrorKind::InvalidFormat, self.end..self.end));
        };

        match token.kind {
            TokenKind::Number(n) => Ok(Expression::number(n, token.range)),
            TokenKind::Variable(name) => Ok(Expression::variable(name, token.range)),
            TokenKind::Identifier(name) => self.call(name, token.range),
            TokenKind::LParen => self.group(token.range),
            TokenKind::RParen => Err(EvalError::new(ErrorKind::MissingOpenParenthesis, token.range)),
            TokenKind::Comma => Err(EvalError::new(ErrorKind::InvalidFormat, token.range)
                .with_suggestion("Commas only separate function arguments")),
            TokenKind::Operator(op) => {
                let range = token.range;
                match op {
                    "+" => {
                        let mut operand = self.operand(op, range.clone(), PREFIX_POWER)?;
                        operand.range = range.start..operand.range.end;
                        Ok(operand)
                    }
                    "!!" => {
                        let operand = self.operand(op, range.clone(), PREFIX_POWER)?;
                        let inner = Expression::operator("l_not", range.clone(), vec![operand]);
                        bounded(Expression::operator("l_not", range, vec![inner]))
                    }
                    _ => match prefix(op) {
                        Some(name) => {
                            let operand = self.operand(op, range.clone(), PREFIX_POWER)?;
                            bounded(Expression::operator(name, range, vec![operand]))
                        }
                        None => Err(EvalError::new(ErrorKind::MissingLeftOperand(op.to_string()), range)),
                    },
                }
            }
        }
    }

    /// `name` alone is a zero-argument call; `name(a, b, ...)` a call with
    /// arguments.
    fn call(&mut self, name: String, name_range: Range<usize>) -> Result<Expression, EvalError> {
        if self.peek_kind() != Some(&TokenKind::LParen) {
            return Ok(Expression::function(name, name_range.clone(), Vec::new(), name_range));
        }
        let open = self.pos_range();
        self.pos += 1;

        if let Some(Token { kind: TokenKind::RParen, range }) = self.peek() {
            let end = range.end;
            self.pos += 1;
            return Ok(Expression::function(name, name_range.clone(), Vec::new(), name_range.start..end));
        }

        let mut arguments = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(EvalError::new(ErrorKind::MissingCloseParenthesis, open.start..self.end));
                }
                Some(Token { kind: TokenKind::Comma | TokenKind::RParen, range }) => {
                    return Err(EvalError::new(ErrorKind::EmptyFunctionArgument, range.clone()));
                }
                Some(_) => {}
            }
            arguments.push(self.expression(0)?);

            match self.advance() {
                Some(Token { kind: TokenKind::Comma, .. }) => {}
                Some(Token { kind: TokenKind::RParen, range }) => {
                    let range = name_range.start..range.end;
                    return bounded(Expression::function(name, name_range, arguments, range));
                }
                Some(token) => return Err(EvalError::new(ErrorKind::InvalidFormat, token.range)),
                None => {
                    return Err(EvalError::new(ErrorKind::MissingCloseParenthesis, open.start..self.end));
                }
            }
        }
    }

    /// A parenthesized group; its range includes the parentheses.
    fn group(&mut self, open: Range<usize>) -> Result<Expression, EvalError> {
        if let Some(Token { kind: TokenKind::RParen, range }) = self.peek() {
            let range = open.start..range.end;
            return Err(EvalError::new(ErrorKind::EmptyGroup, range).with_suggestion("Remove '()'"));
        }
        if self.peek().is_none() {
            return Err(EvalError::new(ErrorKind::MissingCloseParenthesis, open.start..self.end));
        }

        let mut inner = self.expression(0)?;
        match self.advance() {
            Some(Token { kind: TokenKind::RParen, range }) => {
                inner.range = open.start..range.end;
                Ok(inner)
            }
            Some(Token { kind: TokenKind::Comma, range }) => Err(EvalError::new(ErrorKind::InvalidFormat, range)
                .with_suggestion("Commas only separate function arguments")),
            Some(token) => Err(EvalError::new(ErrorKind::InvalidFormat, token.range)),
            None => Err(EvalError::new(ErrorKind::MissingCloseParenthesis, open.start..self.end)),
        }
    }

    fn pos_range(&self) -> Range<usize> {
        self.peek().map_or(self.end..self.end, |t| t.range.clone())
    }
}
