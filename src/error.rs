// ABOUTME: Error types for parse and evaluation failures

use crate::token::TokenKind;
use thiserror::Error;

/// A parse-time error. The parser accumulates these rather than stopping
/// at the first one; their `Display` form is exactly the contractual
/// message string tests depend on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
}

/// A runtime evaluation error, carried as a first-class `Object::Error`
/// value rather than raised as an exception.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: String,
        right: &'static str,
    },

    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator { op: String, operand: &'static str },

    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        op: String,
        right: &'static str,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("not a function: {0}")]
    NotAFunction(&'static str),
}

impl EvalError {
    /// Renders this error as the message stored inside an `Object::Error`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
