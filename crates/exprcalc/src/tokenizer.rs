//! Expression tokenizer
//!
//! Splits raw formula text into numbers, variable references and operators.
//! Operand characters accumulate until an operator (or the end of input)
//! flushes them as one token.

use crate::chars::{char_name, is_numeric_start, is_operator, is_valid_char};
use crate::error::{ExprError, ExprResult};
use crate::token::{Operator, Token};

/// Tokenize an expression
///
/// # Example
/// ```rust
/// use exprcalc::{tokenize, Operator, Token};
///
/// let tokens = tokenize("x*2").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Variable("x".into()),
///         Token::Operator(Operator::Multiply),
///         Token::Number(2.0),
///     ]
/// );
/// ```
pub fn tokenize(raw: &str) -> ExprResult<Vec<Token>> {
    let mut tokenizer = Tokenizer::new(raw);
    tokenizer.scan()?;
    let tokens = tokenizer.tokens;
    check_adjacency(&tokens)?;
    Ok(tokens)
}

struct Tokenizer<'a> {
    input: &'a str,
    /// Byte offset where the pending operand starts, if any
    pending: Option<usize>,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pending: None,
            tokens: Vec::new(),
        }
    }

    fn scan(&mut self) -> ExprResult<()> {
        for (pos, c) in self.input.char_indices() {
            if is_operator(c) {
                self.flush(pos)?;
                if let Some(op) = Operator::from_char(c) {
                    self.tokens.push(Token::Operator(op));
                }
            } else if is_valid_char(c) {
                if self.pending.is_none() {
                    self.pending = Some(pos);
                }
            } else {
                return Err(ExprError::InvalidCharacter(char_name(c)));
            }
        }

        self.flush(self.input.len())
    }

    /// Emit the pending operand ending at `end`, if there is one
    fn flush(&mut self, end: usize) -> ExprResult<()> {
        if let Some(start) = self.pending.take() {
            let text = &self.input[start..end];
            log::trace!("operand {:?}", text);
            self.tokens.push(parse_operand(text)?);
        }
        Ok(())
    }
}

/// Classify operand text as a number or a variable by its first character
pub fn parse_operand(text: &str) -> ExprResult<Token> {
    match text.chars().next() {
        Some(c) if is_numeric_start(c) => text
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ExprError::MalformedNumber(text.to_string())),
        _ => Ok(Token::Variable(text.to_string())),
    }
}

/// Reject operands touching parentheses with no operator in between
fn check_adjacency(tokens: &[Token]) -> ExprResult<()> {
    for (i, token) in tokens.iter().enumerate() {
        if token.is(Operator::OpenParen) && i > 0 {
            let last = &tokens[i - 1];
            if !last.is_operator() {
                return Err(ExprError::MissingOperator(format!("{}(", last)));
            }
        } else if token.is(Operator::CloseParen) {
            if let Some(next) = tokens.get(i + 1) {
                if !next.is_operator() {
                    return Err(ExprError::MissingOperator(format!("){}", next)));
                }
            }
        }
    }
    Ok(())
}
