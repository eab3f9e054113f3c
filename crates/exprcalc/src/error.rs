//! Expression error types

use std::fmt;
use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Which side of a parenthesis pair is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenthesis {
    /// A `)` was found with no `(` before it
    Open,
    /// A `(` was never closed
    Close,
}

impl fmt::Display for Parenthesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parenthesis::Open => f.write_str("missing open `(`"),
            Parenthesis::Close => f.write_str("missing close `)`"),
        }
    }
}

/// Errors that can occur while compiling or evaluating an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Character outside the operand and operator alphabets
    #[error("Invalid character: {0}")]
    InvalidCharacter(String),

    /// Operand starting with a digit or `.` that is not a numeral
    #[error("Malformed number: {0}")]
    MalformedNumber(String),

    /// Operand touching a parenthesis with no operator in between
    #[error("Missing operator near {0}")]
    MissingOperator(String),

    /// Unbalanced parentheses
    #[error("Unmatched parenthesis: {0}")]
    UnmatchedParenthesis(Parenthesis),

    /// Variable absent from the supplied bindings
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// A postfix program that does not reduce to a single value
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error kinds, without payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    MalformedNumber,
    MissingOperator,
    UnmatchedParenthesis,
    UndefinedVariable,
    Internal,
}

impl ErrorKind {
    /// Whether this kind signals a broken engine invariant rather than bad input
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

impl ExprError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::InvalidCharacter(_) => ErrorKind::InvalidCharacter,
            ExprError::MalformedNumber(_) => ErrorKind::MalformedNumber,
            ExprError::MissingOperator(_) => ErrorKind::MissingOperator,
            ExprError::UnmatchedParenthesis(_) => ErrorKind::UnmatchedParenthesis,
            ExprError::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            ExprError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Create an internal error with a message
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        ExprError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ExprError::InvalidCharacter("[space]".into()).to_string(),
            "Invalid character: [space]"
        );
        assert_eq!(
            ExprError::UnmatchedParenthesis(Parenthesis::Close).to_string(),
            "Unmatched parenthesis: missing close `)`"
        );
        assert_eq!(
            ExprError::UndefinedVariable("x".into()).to_string(),
            "Undefined variable: x"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            ExprError::MissingOperator("x(".into()).kind(),
            ErrorKind::MissingOperator
        );
        assert!(ExprError::internal("underflow").kind().is_internal());
        assert!(!ErrorKind::UndefinedVariable.is_internal());
    }
}
