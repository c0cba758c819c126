//! Parser for expression shorthands.
//!
//! Grammar:
//!
//! ```text
//! shorthand  := implicit | or
//! implicit   := cmp_op operand            (compares the value itself, e.g. "> 20")
//! or         := and ('||' and)*
//! and        := unary ('&&' unary)*
//! unary      := '!' unary | comparison
//! comparison := operand (cmp_op operand)?
//! operand    := '(' or ')' | number | string | true | false | null | path
//! path       := ident ('.' (ident | digits) | '[' (digits | string) ']')*
//! cmp_op     := '===' | '!==' | '==' | '!=' | '<=' | '>=' | '<' | '>'
//! ```
//!
//! Paths are read from the value under test, so `"calories > 50"` reads the
//! `calories` field and compares it with 50.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use ordo_core::{Error, Value};

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// `==` (loose)
    Eq,
    /// `!=` (loose)
    Ne,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    // longest spellings first so "===" is not read as "==" followed by "="
    const SPELLINGS: [(&'static str, CompareOp); 8] = [
        ("===", CompareOp::StrictEq),
        ("!==", CompareOp::StrictNe),
        ("==", CompareOp::Eq),
        ("!=", CompareOp::Ne),
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
    ];

    /// Returns the operator's source spelling.
    pub fn symbol(self) -> &'static str {
        Self::SPELLINGS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }
}

/// A parsed expression shorthand.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// The value under test
    Current,
    /// Property path read from the value under test
    Path(Vec<String>),
    /// Literal operand
    Literal(Value),
    /// Binary comparison
    Compare(Box<Expr>, CompareOp, Box<Expr>),
    /// Logical AND, yields the deciding operand
    And(Box<Expr>, Box<Expr>),
    /// Logical OR, yields the deciding operand
    Or(Box<Expr>, Box<Expr>),
    /// Logical NOT
    Not(Box<Expr>),
}

/// Error type for shorthand parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Attaches the source text and converts into the crate-wide error.
    pub fn into_error(self, input: &str) -> Error {
        Error::parse(input, self.message, self.position)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

/// Deepest nesting of `!` and parentheses accepted.
const MAX_DEPTH: usize = 256;

/// Parser state.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::new("Expression nested too deeply", self.pos));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::new(
                format!("Expected '{}', found '{}'", expected, c),
                self.pos,
            )),
            None => Err(ParseError::new(
                format!("Expected '{}', found end of input", expected),
                self.pos,
            )),
        }
    }

    fn compare_op(&mut self) -> Option<CompareOp> {
        self.skip_whitespace();
        CompareOp::SPELLINGS
            .iter()
            .find(|(spelling, _)| self.starts_with(spelling))
            .map(|(spelling, op)| {
                self.pos += spelling.len();
                *op
            })
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        loop {
            self.skip_whitespace();
            if !self.eat("||") {
                return Ok(left);
            }
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            if !self.eat("&&") {
                return Ok(left);
            }
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        if self.peek() == Some('!') && !self.starts_with("!=") {
            self.advance();
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;
        match self.compare_op() {
            Some(op) => {
                let right = self.parse_operand()?;
                Ok(Expr::Compare(Box::new(left), op, Box::new(right)))
            }
            None => Ok(left),
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                self.descend()?;
                let inner = self.parse_or()?;
                self.depth -= 1;
                self.expect(')')?;
                Ok(inner)
            }
            Some('\'') | Some('"') => {
                let s = self.parse_string_literal()?;
                Ok(Expr::Literal(Value::String(s)))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let n = self.parse_number()?;
                Ok(Expr::Literal(Value::Number(n)))
            }
            Some(c) if is_identifier_start(c) => self.parse_path_or_keyword(),
            Some(c) => Err(ParseError::new(format!("Unexpected '{}'", c), self.pos)),
            None => Err(ParseError::new("Expected operand, found end of input", self.pos)),
        }
    }

    fn parse_path_or_keyword(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_identifier()?;
        let keyword = match first.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "null" | "undefined" => Some(Value::Null),
            "NaN" => Some(Value::Number(f64::NAN)),
            "Infinity" => Some(Value::Number(f64::INFINITY)),
            _ => None,
        };
        if let Some(value) = keyword {
            return Ok(Expr::Literal(value));
        }

        let mut segments = vec![first];
        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    let segment = if self.peek().map_or(false, |c| c.is_ascii_digit()) {
                        self.parse_digits()
                    } else {
                        self.parse_identifier()?
                    };
                    segments.push(segment);
                }
                Some('[') => {
                    self.advance();
                    self.skip_whitespace();
                    let segment = match self.peek() {
                        Some('\'') | Some('"') => self.parse_string_literal()?,
                        Some(c) if c.is_ascii_digit() => self.parse_digits(),
                        _ => {
                            return Err(ParseError::new("Invalid bracket expression", self.pos));
                        }
                    };
                    self.expect(']')?;
                    segments.push(segment);
                }
                _ => break,
            }
        }
        Ok(Expr::Path(segments))
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        if !self.peek().map_or(false, is_identifier_start) {
            return Err(ParseError::new("Expected identifier", self.pos));
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_digits(&mut self) -> String {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.advance();
        }
        let mut digits = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        if digits == 0 {
            return Err(ParseError::new("Expected number", start));
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('-') | Some('+')) {
                self.advance();
            }
            if self.parse_digits().is_empty() {
                return Err(ParseError::new("Expected exponent digits", self.pos));
            }
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::new("Invalid number", start))
    }

    fn parse_string_literal(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(ParseError::new("Expected string literal", self.pos)),
        };
        self.advance();

        let mut out = String::new();
        while let Some(c) = self.peek() {
            self.advance();
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                let escaped = self
                    .peek()
                    .ok_or_else(|| ParseError::new("Unterminated string", start))?;
                self.advance();
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                out.push(c);
            }
        }
        Err(ParseError::new("Unterminated string", start))
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

impl Expr {
    /// Parses an expression shorthand.
    ///
    /// A shorthand that starts with a comparison operator compares the value
    /// under test itself; anything else is an expression over its properties.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new(input);
        let expr = match parser.compare_op() {
            Some(op) => {
                let right = parser.parse_operand()?;
                Expr::Compare(Box::new(Expr::Current), op, Box::new(right))
            }
            None => parser.parse_or()?,
        };

        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(expr),
            Some(c) => Err(ParseError::new(format!("Unexpected '{}'", c), parser.pos)),
        }
    }
}
