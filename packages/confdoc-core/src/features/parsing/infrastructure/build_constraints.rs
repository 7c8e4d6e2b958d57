//! `//go:build` constraint evaluation
//!
//! Files whose constraint is not satisfied by the configured tag set are not
//! part of the package, the same way `go list` leaves them out.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("unexpected token '{0}' in build constraint")]
    UnexpectedToken(String),

    #[error("unexpected end of build constraint")]
    UnexpectedEnd,

    #[error("invalid character '{0}' in build constraint")]
    InvalidChar(char),
}

/// Parsed build constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildConstraint {
    Tag(String),
    Not(Box<BuildConstraint>),
    And(Box<BuildConstraint>, Box<BuildConstraint>),
    Or(Box<BuildConstraint>, Box<BuildConstraint>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

impl BuildConstraint {
    pub fn parse(expr: &str) -> Result<Self, ConstraintError> {
        let tokens = tokenize(expr)?;
        let mut pos = 0;
        let parsed = parse_or(&tokens, &mut pos)?;
        match tokens.get(pos) {
            None => Ok(parsed),
            Some(tok) => Err(ConstraintError::UnexpectedToken(format!("{:?}", tok))),
        }
    }

    pub fn eval(&self, is_set: &impl Fn(&str) -> bool) -> bool {
        match self {
            BuildConstraint::Tag(tag) => is_set(tag),
            BuildConstraint::Not(inner) => !inner.eval(is_set),
            BuildConstraint::And(a, b) => a.eval(is_set) && b.eval(is_set),
            BuildConstraint::Or(a, b) => a.eval(is_set) || b.eval(is_set),
        }
    }
}

/// The `//go:build` expression of a file, if its header carries one.
///
/// Only the leading comment block (before the package clause) is considered.
pub fn find_go_build_line(source: &str) -> Option<&str> {
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(expr) = trimmed.strip_prefix("//go:build") {
            return Some(expr.trim());
        }
        if !trimmed.starts_with("//") {
            return None;
        }
    }
    None
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ConstraintError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '&' | '|' => {
                chars.next();
                if chars.next() != Some(c) {
                    return Err(ConstraintError::InvalidChar(c));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut tag = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        tag.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Tag(tag));
            }
            other => return Err(ConstraintError::InvalidChar(other)),
        }
    }

    Ok(tokens)
}

fn parse_or(tokens: &[Token], pos: &mut usize) -> Result<BuildConstraint, ConstraintError> {
    let mut left = parse_and(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::Or) {
        *pos += 1;
        let right = parse_and(tokens, pos)?;
        left = BuildConstraint::Or(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn parse_and(tokens: &[Token], pos: &mut usize) -> Result<BuildConstraint, ConstraintError> {
    let mut left = parse_unary(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::And) {
        *pos += 1;
        let right = parse_unary(tokens, pos)?;
        left = BuildConstraint::And(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn parse_unary(tokens: &[Token], pos: &mut usize) -> Result<BuildConstraint, ConstraintError> {
    let token = tokens.get(*pos).ok_or(ConstraintError::UnexpectedEnd)?;
    *pos += 1;
    match token {
        Token::Not => Ok(BuildConstraint::Not(Box::new(parse_unary(tokens, pos)?))),
        Token::LParen => {
            let inner = parse_or(tokens, pos)?;
            match tokens.get(*pos) {
                Some(Token::RParen) => {
                    *pos += 1;
                    Ok(inner)
                }
                Some(other) => Err(ConstraintError::UnexpectedToken(format!("{:?}", other))),
                None => Err(ConstraintError::UnexpectedEnd),
            }
        }
        Token::Tag(tag) => Ok(BuildConstraint::Tag(tag.clone())),
        other => Err(ConstraintError::UnexpectedToken(format!("{:?}", other))),
    }
}
