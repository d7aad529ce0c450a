//! Expression tokenizer
//!
//! Splits source text into numbers, identifiers, `$variables`, operators and
//! punctuation. Token ranges are character offsets, so they line up with what
//! a user sees rather than with UTF-8 byte positions.

use quotient_compute::Domain;
use quotient_core::{ErrorKind, EvalError, IBig, Number};
use std::ops::Range;

/// Largest decimal exponent a literal may carry
const MAX_EXPONENT: u64 = 100_000;

/// Known operators, longest first so `**` wins over `*`
const OPERATORS: &[&str] = &[
    "**", "!!", "&&", "||", "==", "!=", "<=", ">=", "<<", ">>", "+", "-", "−", "*", "×", "/", "÷",
    "^", "!", "~", "√", "%", "&", "|", "<", ">", "≠", "≤", "≥",
];

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(Number),
    Identifier(String),
    /// `$name` or `$1`, without the sigil
    Variable(String),
    Operator(&'static str),
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// Tokenize an expression. Under the discrete domain only integer literals
/// are accepted.
pub fn tokenize(source: &str, domain: Domain) -> Result<Vec<Token>, EvalError> {
    Lexer { chars: source.chars().collect(), pos: 0, domain }.run()
}

/// Value of a unicode vulgar fraction character
pub fn vulgar_fraction(c: char) -> Option<Number> {
    let (numerator, denominator) = match c {
        '½' => (1, 2),
        '⅓' => (1, 3),
        '⅔' => (2, 3),
        '¼' => (1, 4),
        '¾' => (3, 4),
        '⅕' => (1, 5),
        '⅖' => (2, 5),
        '⅗' => (3, 5),
        '⅘' => (4, 5),
        '⅙' => (1, 6),
        '⅚' => (5, 6),
        '⅛' => (1, 8),
        '⅜' => (3, 8),
        '⅝' => (5, 8),
        '⅞' => (7, 8),
        _ => return None,
    };
    Some(Number::from_ratio(numerator, denominator))
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    (c.is_alphanumeric() && vulgar_fraction(c).is_none()) || c == '_' || c == '⁻'
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    domain: Domain,
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn looking_at(&self, text: &str) -> bool {
        text.chars().enumerate().all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn run(mut self) -> Result<Vec<Token>, EvalError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }
            let start = self.pos;
            let kind = match c {
                '0'..='9' | '.' => self.number()?,
                c if vulgar_fraction(c).is_some() => self.number()?,
                '$' => self.variable()?,
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                '∑' | '∏' => self.single(TokenKind::Identifier(c.to_string())),
                c if is_identifier_start(c) => {
                    TokenKind::Identifier(self.take_while(is_identifier_continue))
                }
                c => self.operator(c)?,
            };
            tokens.push(Token { kind, range: start..self.pos });
        }
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn number(&mut self) -> Result<TokenKind, EvalError> {
        let start = self.pos;
        if self.peek() == Some('0') {
            let radix = match self.peek_at(1) {
                Some('x' | 'X') => Some((16, ErrorKind::CannotParseHexNumber)),
                Some('o' | 'O') => Some((8, ErrorKind::CannotParseOctalNumber)),
                Some('b' | 'B') => Some((2, ErrorKind::CannotParseNumber)),
                _ => None,
            };
            if let Some((radix, kind)) = radix {
                return self.radix_number(radix, kind);
            }
        }

        let mut text = self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.pos += 1;
            text.push('.');
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
            if self.peek() == Some('.') {
                self.take_while(|c| c.is_ascii_digit() || c == '.');
                return Err(EvalError::new(ErrorKind::CannotParseNumber, start..self.pos));
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) && !text.is_empty() {
            text.push_str(&self.exponent()?);
        }

        let mut value = if text.is_empty() {
            Number::zero()
        } else {
            text.parse::<Number>()
                .map_err(|_| EvalError::new(ErrorKind::CannotParseNumber, start..self.pos))?
        };
        if let Some(fraction) = self.peek().and_then(vulgar_fraction) {
            self.pos += 1;
            if text.contains(['.', 'e']) {
                return Err(EvalError::new(ErrorKind::CannotParseNumber, start..self.pos));
            }
            value = value.add(&fraction);
        }

        if self.domain == Domain::Discrete && !value.is_integer() {
            return Err(EvalError::new(ErrorKind::CannotParseNumber, start..self.pos)
                .with_suggestion("Only integers are allowed in the discrete domain"));
        }
        Ok(TokenKind::Number(value))
    }

    /// `e5`, `e-3`, `E+2`. A bare `e` after digits is left for the
    /// identifier `e`, so `2e` reads as `2·e`.
    fn exponent(&mut self) -> Result<String, EvalError> {
        let signed = matches!(self.peek_at(1), Some('+' | '-'));
        let first_digit = self.peek_at(if signed { 2 } else { 1 });
        if !first_digit.is_some_and(|c| c.is_ascii_digit()) {
            if signed {
                return Err(EvalError::new(ErrorKind::CannotParseExponent, self.pos..self.pos + 2));
            }
            return Ok(String::new());
        }

        let start = self.pos;
        let mut text = String::from("e");
        self.pos += 1;
        if signed {
            text.extend(self.peek());
            self.pos += 1;
        }
        let digits = self.take_while(|c| c.is_ascii_digit());
        match digits.parse::<u64>() {
            Ok(magnitude) if magnitude <= MAX_EXPONENT => {
                text.push_str(&digits);
                Ok(text)
            }
            _ => Err(EvalError::new(ErrorKind::CannotParseExponent, start..self.pos)),
        }
    }

    fn radix_number(&mut self, radix: u32, kind: ErrorKind) -> Result<TokenKind, EvalError> {
        let start = self.pos;
        self.pos += 2;
        let digits = self.take_while(|c| c.is_ascii_alphanumeric());
        let value = IBig::from_str_radix(&digits, radix)
            .map_err(|_| EvalError::new(kind, start..self.pos))?;
        Ok(TokenKind::Number(Number::from_integer(value)))
    }

    fn variable(&mut self) -> Result<TokenKind, EvalError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.take_while(is_identifier_continue);
        if name.is_empty() {
            return Err(EvalError::new(ErrorKind::CannotParseVariable, start..self.pos)
                .with_suggestion("Write a name after '$', e.g. $x or $1"));
        }
        Ok(TokenKind::Variable(name))
    }

    fn operator(&mut self, c: char) -> Result<TokenKind, EvalError> {
        if let Some(op) = OPERATORS.iter().find(|op| self.looking_at(op)) {
            self.pos += op.chars().count();
            return Ok(TokenKind::Operator(*op));
        }

        let start = self.pos;
        self.pos += 1;
        let error = match c {
            '=' => EvalError::new(ErrorKind::CannotParseOperator("=".to_string()), start..self.pos)
                .with_suggestion("Use '==' to compare values"),
            c if c.is_ascii_punctuation() => {
                EvalError::new(ErrorKind::UnknownOperator(c.to_string()), start..self.pos)
            }
            _ => EvalError::new(ErrorKind::CannotParseIdentifier, start..self.pos),
        };
        Err(error)
    }
}
