//! Restricted arithmetic expression evaluator.
//!
//! # Responsibility
//! - Evaluate numeric expressions typed at the calculator prompt.
//!
//! # Invariants
//! - Only numbers, `+ - * / // % **` and parentheses are accepted. Names,
//!   calls and attribute access are rejected by the tokenizer.
//! - Evaluation never panics; every failure is a [`CalcError`].
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/' | '//' | '%') unary)*
//! unary := ('+' | '-') unary | power
//! power := atom ('**' unary)?
//! atom  := NUMBER | '(' expr ')'
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// Nesting limit for parentheses and unary chains.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Empty,
    UnexpectedChar { position: usize, found: char },
    UnexpectedToken { position: usize, found: String },
    UnexpectedEnd,
    TooDeep,
    DivisionByZero,
    NonFinite,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("expression is empty"),
            Self::UnexpectedChar { position, found } => {
                write!(f, "unexpected character `{found}` at position {position}")
            }
            Self::UnexpectedToken { position, found } => {
                write!(f, "unexpected `{found}` at position {position}")
            }
            Self::UnexpectedEnd => f.write_str("expression ended unexpectedly"),
            Self::TooDeep => write!(f, "expression nests deeper than {MAX_DEPTH} levels"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::NonFinite => f.write_str("result is not a finite number"),
        }
    }
}

impl Error for CalcError {}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::DoubleStar => f.write_str("**"),
            Self::Slash => f.write_str("/"),
            Self::DoubleSlash => f.write_str("//"),
            Self::Percent => f.write_str("%"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// Evaluates `expression` and returns its value.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((position, token)) = parser.peek() {
        return Err(CalcError::UnexpectedToken {
            position,
            found: token.to_string(),
        });
    }
    finite(value)
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, CalcError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        if ch.is_whitespace() {
            offset += ch.len_utf8();
            continue;
        }
        if let Some(found) = NUMBER_RE.find(rest) {
            let value = found
                .as_str()
                .parse::<f64>()
                .map_err(|_| CalcError::UnexpectedChar { position: offset, found: ch })?;
            tokens.push((offset, Token::Number(value)));
            offset += found.end();
            continue;
        }

        let (token, width) = match ch {
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '*' if rest.starts_with("**") => (Token::DoubleStar, 2),
            '*' => (Token::Star, 1),
            '/' if rest.starts_with("//") => (Token::DoubleSlash, 2),
            '/' => (Token::Slash, 1),
            '%' => (Token::Percent, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            other => {
                return Err(CalcError::UnexpectedChar {
                    position: offset,
                    found: other,
                })
            }
        };
        tokens.push((offset, token));
        offset += width;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, Token)> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<(usize, Token)> {
        let next = self.peek();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some((_, token @ (Token::Plus | Token::Minus))) = self.peek() {
            self.cursor += 1;
            let rhs = self.term()?;
            value = if token == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some((_, token)) = self.peek() {
            if !matches!(
                token,
                Token::Star | Token::Slash | Token::DoubleSlash | Token::Percent
            ) {
                break;
            }
            self.cursor += 1;
            let rhs = self.unary()?;
            value = match token {
                Token::Star => value * rhs,
                Token::Slash => nonzero(rhs).map(|rhs| value / rhs)?,
                Token::DoubleSlash => nonzero(rhs).map(|rhs| (value / rhs).floor())?,
                _ => nonzero(rhs).map(|rhs| value - rhs * (value / rhs).floor())?,
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some((_, Token::Minus)) => {
                self.cursor += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some((_, Token::Plus)) => {
                self.cursor += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if let Some((_, Token::DoubleStar)) = self.peek() {
            self.cursor += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return finite(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.advance() {
            Some((_, Token::Number(value))) => Ok(value),
            Some((_, Token::LParen)) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some((_, Token::RParen)) => Ok(value),
                    Some((position, token)) => Err(CalcError::UnexpectedToken {
                        position,
                        found: token.to_string(),
                    }),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some((position, token)) => Err(CalcError::UnexpectedToken {
                position,
                found: token.to_string(),
            }),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

fn nonzero(value: f64) -> Result<f64, CalcError> {
    if value == 0.0 {
        Err(CalcError::DivisionByZero)
    } else {
        Ok(value)
    }
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite)
    }
}
