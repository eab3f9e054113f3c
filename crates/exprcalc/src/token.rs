//! Token and postfix program types

use std::fmt;

/// Operator symbols, parentheses included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    OpenParen,
    CloseParen,
}

impl Operator {
    /// Parse an operator from its symbol
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            '(' => Some(Operator::OpenParen),
            ')' => Some(Operator::CloseParen),
            _ => None,
        }
    }

    /// The operator's symbol
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
            Operator::OpenParen => '(',
            Operator::CloseParen => ')',
        }
    }

    /// Precedence level used by the shunting-yard conversion
    ///
    /// `^` shares a level with `*` and `/`, so it associates left.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::OpenParen | Operator::CloseParen => 1,
            Operator::Add | Operator::Subtract => 2,
            Operator::Multiply | Operator::Divide | Operator::Power => 3,
        }
    }

    /// Check if this is `(` or `)`
    pub fn is_paren(self) -> bool {
        matches!(self, Operator::OpenParen | Operator::CloseParen)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Variable reference, resolved at evaluation time
    Variable(String),
    /// Operator or parenthesis
    Operator(Operator),
}

impl Token {
    /// Check if this token is an operator (parentheses included)
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    /// Check if this token is the given operator
    pub fn is(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(o) if *o == op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A compiled expression in reverse Polish order
///
/// Only built by [`to_postfix`](crate::postfix::to_postfix), so it never
/// contains parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixProgram {
    tokens: Vec<Token>,
}

impl PostfixProgram {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens
            .iter()
            .any(|t| matches!(t, Token::Operator(op) if op.is_paren())));
        Self { tokens }
    }

    /// The program's tokens, in evaluation order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the program has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct variable names referenced, in order of first use
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if let Token::Variable(name) = token {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl fmt::Display for PostfixProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
