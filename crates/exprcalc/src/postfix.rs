//! Infix to postfix conversion (shunting-yard)

use crate::error::{ExprError, ExprResult, Parenthesis};
use crate::token::{Operator, PostfixProgram, Token};
use crate::tokenizer::tokenize;

/// Precedence of an empty operator stack
const BOTTOM_PRECEDENCE: u8 = 1;

/// Convert a token sequence to a postfix program
///
/// Operators of equal precedence pop left to right, which makes `^`
/// left-associative: `2^3^2` compiles to `2 3 ^ 2 ^`.
pub fn to_postfix(tokens: &[Token]) -> ExprResult<PostfixProgram> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Operator> = Vec::new();

    for token in tokens {
        let op = match token {
            Token::Operator(op) => *op,
            operand => {
                output.push(operand.clone());
                continue;
            }
        };

        match op {
            Operator::OpenParen => stack.push(op),
            Operator::CloseParen => loop {
                match stack.pop() {
                    Some(Operator::OpenParen) => break,
                    Some(top) => output.push(Token::Operator(top)),
                    None => return Err(ExprError::UnmatchedParenthesis(Parenthesis::Open)),
                }
            },
            _ => {
                let p = op.precedence();
                if p > top_precedence(&stack) {
                    stack.push(op);
                } else {
                    while let Some(&top) = stack.last() {
                        if top.precedence() < p {
                            break;
                        }
                        stack.pop();
                        output.push(Token::Operator(top));
                    }
                    stack.push(op);
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Operator::OpenParen {
            return Err(ExprError::UnmatchedParenthesis(Parenthesis::Close));
        }
        output.push(Token::Operator(top));
    }

    Ok(PostfixProgram::new(output))
}

fn top_precedence(stack: &[Operator]) -> u8 {
    stack
        .last()
        .map_or(BOTTOM_PRECEDENCE, |op| op.precedence())
}

/// Tokenize and convert an expression, rendering the program as text
///
/// Braces are not unwrapped and no cache is consulted.
///
/// # Example
/// ```rust
/// use exprcalc::to_postfix_string;
///
/// assert_eq!(to_postfix_string("(a+b)*c").unwrap(), "a b + c *");
/// ```
pub fn to_postfix_string(expr: &str) -> ExprResult<String> {
    let tokens = tokenize(expr)?;
    Ok(to_postfix(&tokens)?.to_string())
}
