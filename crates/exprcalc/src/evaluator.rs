//! Postfix program evaluator
//!
//! A stack machine over `f64` values. Variables are resolved against a
//! caller-supplied [`VariableSource`] on every run.

use crate::error::{ExprError, ExprResult};
use crate::token::{Operator, PostfixProgram, Token};
use ahash::AHashMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Result of evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExprValue {
    Number(f64),
    /// Result of an empty expression
    Empty,
}

impl ExprValue {
    /// Get the numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExprValue::Number(n) => Some(*n),
            ExprValue::Empty => None,
        }
    }

    /// Check if this is the empty result
    pub fn is_empty(&self) -> bool {
        matches!(self, ExprValue::Empty)
    }
}

impl std::fmt::Display for ExprValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprValue::Number(n) => write!(f, "{}", n),
            ExprValue::Empty => Ok(()),
        }
    }
}

/// Variable bindings consulted during evaluation
pub trait VariableSource {
    /// Look up a variable by name
    fn get_var(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> VariableSource for HashMap<String, f64, S> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableSource for AHashMap<String, f64> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableSource for BTreeMap<String, f64> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<T: VariableSource + ?Sized> VariableSource for &T {
    fn get_var(&self, name: &str) -> Option<f64> {
        (**self).get_var(name)
    }
}

/// Bindings with no variables
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVars;

impl VariableSource for NoVars {
    fn get_var(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// Run a postfix program against the given bindings
///
/// Division by zero is not guarded and yields an infinite or NaN result.
pub fn run<V: VariableSource + ?Sized>(
    program: &PostfixProgram,
    vars: &V,
) -> ExprResult<ExprValue> {
    if program.is_empty() {
        return Ok(ExprValue::Empty);
    }

    let mut stack: Vec<f64> = Vec::with_capacity(program.len());

    for token in program.tokens() {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Variable(name) => {
                let value = vars
                    .get_var(name)
                    .ok_or_else(|| ExprError::UndefinedVariable(name.clone()))?;
                stack.push(value);
            }
            Token::Operator(op) => {
                // o1 was pushed last, so it is the right-hand operand
                let (o1, o2) = match (stack.pop(), stack.pop()) {
                    (Some(o1), Some(o2)) => (o1, o2),
                    _ => {
                        return Err(ExprError::internal(format!(
                            "stack underflow at operator '{}' in `{}`",
                            op, program
                        )))
                    }
                };
                stack.push(apply(*op, o1, o2)?);
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(ExprValue::Number(*result)),
        values => Err(ExprError::internal(format!(
            "{} values left on the stack after `{}`",
            values.len(),
            program
        ))),
    }
}

fn apply(op: Operator, o1: f64, o2: f64) -> ExprResult<f64> {
    Ok(match op {
        Operator::Add => o1 + o2,
        Operator::Subtract => o2 - o1,
        Operator::Multiply => o1 * o2,
        Operator::Divide => o2 / o1,
        Operator::Power => o2.powf(o1),
        Operator::OpenParen | Operator::CloseParen => {
            return Err(ExprError::internal(format!(
                "parenthesis '{}' in postfix program",
                op
            )))
        }
    })
}
