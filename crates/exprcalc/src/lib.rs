//! # exprcalc
//!
//! Arithmetic formula compiler and evaluator.
//!
//! This crate provides:
//! - Tokenizing (text → numbers, variables, operators)
//! - Shunting-yard conversion (tokens → postfix program)
//! - Stack-machine evaluation against variable bindings
//! - A thread-safe formula cache keyed by expression text
//!
//! Supported syntax is numeric literals, variable names (`[A-Za-z0-9_.]`),
//! the binary operators `+ - * / ^` and parentheses. There is no unary minus
//! and no whitespace. `^` shares precedence with `*` and `/` and associates
//! left, so `2^3^2` is 64.
//!
//! ## Example
//!
//! ```rust
//! use exprcalc::{ExprParser, ExprValue};
//! use std::collections::HashMap;
//!
//! let parser = ExprParser::new();
//! let vars = HashMap::from([("price".to_string(), 12.5), ("qty".to_string(), 4.0)]);
//!
//! let total = parser.evaluate("{price*qty-5}", &vars).unwrap();
//! assert_eq!(total, ExprValue::Number(45.0));
//! ```

pub mod cache;
pub mod chars;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod postfix;
pub mod token;
pub mod tokenizer;

pub use cache::{CacheStats, FormulaCache};
pub use error::{ErrorKind, ExprError, ExprResult, Parenthesis};
pub use evaluator::{run, ExprValue, NoVars, VariableSource};
pub use parser::{evaluate, EngineOptions, ExprParser};
pub use postfix::{to_postfix, to_postfix_string};
pub use token::{Operator, PostfixProgram, Token};
pub use tokenizer::tokenize;
