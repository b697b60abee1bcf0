//! Exact evaluation of unit scale factors.
//!
//! Factors such as `"1/0.45359237/9.80665"` are evaluated over big rationals
//! so that chained unit definitions do not accumulate rounding error. Only
//! decimal numbers, `+ - * /`, parentheses and blanks are accepted.

use crate::dim::error::UnitError;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use regex::Regex;

lazy_static! {
    static ref FACTOR_CHARS: Regex = Regex::new(r"^[0-9.+\-*/()\s]+$").unwrap();
    static ref DECIMAL: Regex =
        Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?$").unwrap();
}

/// Deepest nesting of parentheses and signs accepted
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(BigRational),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

/// Evaluate a factor expression to a positive exact rational
pub fn evaluate(expression: &str) -> Result<BigRational, UnitError> {
    if !FACTOR_CHARS.is_match(expression) {
        return Err(UnitError::factor(
            expression,
            "only digits, '.', '+', '-', '*', '/', parentheses and blanks are allowed",
        ));
    }

    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        expression,
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(UnitError::factor(expression, "unexpected trailing input"));
    }
    if !value.is_positive() {
        return Err(UnitError::factor(expression, "factor must be positive"));
    }
    Ok(value)
}

/// Read a decimal literal (optionally signed, optionally with an exponent)
/// as an exact rational: `"0.3048"` is exactly `381/1250`.
pub fn parse_decimal(text: &str) -> Result<BigRational, UnitError> {
    let caps = DECIMAL
        .captures(text.trim())
        .ok_or_else(|| UnitError::factor(text, "not a decimal number"))?;
    let whole = caps.get(2).map_or("", |m| m.as_str());
    let frac = caps.get(3).map_or("", |m| m.as_str());
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitError::factor(text, "not a decimal number"));
    }

    let digits = format!("{}{}", whole, frac);
    let numer: BigInt = digits
        .parse()
        .map_err(|_| UnitError::factor(text, "not a decimal number"))?;
    let mut exponent: i64 = -(frac.len() as i64);
    if let Some(e) = caps.get(4) {
        let e: i64 = e
            .as_str()
            .parse()
            .map_err(|_| UnitError::factor(text, "exponent out of range"))?;
        exponent += e;
    }
    if exponent.abs() > 4096 {
        return Err(UnitError::factor(text, "exponent out of range"));
    }

    let scale: BigInt = num_traits::pow(BigInt::from(10u32), exponent.unsigned_abs() as usize);
    let mut value = if exponent >= 0 {
        BigRational::from_integer(numer * scale)
    } else {
        BigRational::new(numer, scale)
    };
    if caps.get(1).map_or("", |m| m.as_str()) == "-" {
        value = -value;
    }
    Ok(value)
}

fn tokenize(expression: &str) -> Result<Vec<Token>, UnitError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            c if c.is_whitespace() => {}
            _ => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !(d.is_ascii_digit() || d == '.') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Number(parse_decimal(&expression[start..end])?));
                continue;
            }
        }
        chars.next();
    }
    Ok(tokens)
}

// expr   := term (('+' | '-') term)*
// term   := unary (('*' | '/') unary)*
// unary  := ('+' | '-') unary | atom
// atom   := number | '(' expr ')'
struct Parser<'t> {
    expression: &'t str,
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn error(&self, reason: &str) -> UnitError {
        UnitError::factor(self.expression, reason)
    }

    fn expr(&mut self) -> Result<BigRational, UnitError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<BigRational, UnitError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor.is_zero() {
                        return Err(self.error("division by zero"));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<BigRational, UnitError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<BigRational, UnitError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<BigRational, UnitError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n.clone()),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(self.error("unbalanced parentheses")),
                }
            }
            Some(_) => Err(self.error("expected a number or '('")),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}
