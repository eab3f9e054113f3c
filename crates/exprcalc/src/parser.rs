//! Expression engine entry point
//!
//! Ties the tokenizer, postfix converter and evaluator together behind a
//! formula cache.

use crate::cache::FormulaCache;
use crate::error::ExprResult;
use crate::evaluator::{run, ExprValue, VariableSource};
use crate::postfix::{to_postfix, to_postfix_string};
use crate::token::PostfixProgram;
use crate::tokenizer::tokenize;
use std::sync::{Arc, OnceLock};

/// Process-wide engine used by [`evaluate`]
static DEFAULT_PARSER: OnceLock<ExprParser> = OnceLock::new();

fn get_default_parser() -> &'static ExprParser {
    DEFAULT_PARSER.get_or_init(ExprParser::new)
}

/// Options for the expression engine
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Strip one pair of outer braces (`{x+1}`) before compiling
    pub unwrap_braces: bool,
    /// Store compiled programs in the formula cache
    pub use_cache: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            unwrap_braces: true,
            use_cache: true,
        }
    }
}

/// Compiles and evaluates arithmetic expressions
///
/// # Example
/// ```rust
/// use exprcalc::{ExprParser, ExprValue};
/// use std::collections::HashMap;
///
/// let parser = ExprParser::new();
/// let vars = HashMap::from([("x".to_string(), 2.0), ("y".to_string(), 3.0)]);
///
/// assert_eq!(parser.evaluate("x+y*2", &vars).unwrap(), ExprValue::Number(8.0));
/// assert_eq!(parser.evaluate("", &vars).unwrap(), ExprValue::Empty);
/// ```
#[derive(Debug)]
pub struct ExprParser {
    cache: Arc<FormulaCache>,
    options: EngineOptions,
}

impl ExprParser {
    /// Create an engine with its own cache and default options
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Create an engine with its own cache
    pub fn with_options(options: EngineOptions) -> Self {
        Self::with_cache(Arc::new(FormulaCache::new()), options)
    }

    /// Create an engine sharing an existing cache
    pub fn with_cache(cache: Arc<FormulaCache>, options: EngineOptions) -> Self {
        Self { cache, options }
    }

    /// The formula cache
    pub fn cache(&self) -> &Arc<FormulaCache> {
        &self.cache
    }

    /// The engine options
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Evaluate an expression against the given bindings
    ///
    /// An empty expression yields [`ExprValue::Empty`] without touching the
    /// cache.
    pub fn evaluate<V: VariableSource + ?Sized>(
        &self,
        expr: &str,
        vars: &V,
    ) -> ExprResult<ExprValue> {
        if expr.is_empty() {
            return Ok(ExprValue::Empty);
        }

        let program = self.compile(expr)?;
        run(&program, vars)
    }

    /// Compile an expression, going through the cache when enabled
    ///
    /// The cache key is `expr` as given, before any braces are stripped.
    pub fn compile(&self, expr: &str) -> ExprResult<Arc<PostfixProgram>> {
        let source = self.source_text(expr);
        if self.options.use_cache {
            self.cache.get_or_compile(expr, || compile_source(source))
        } else {
            compile_source(source).map(Arc::new)
        }
    }

    /// Render the postfix form of an expression, bypassing the cache
    pub fn to_postfix_string(&self, expr: &str) -> ExprResult<String> {
        to_postfix_string(expr)
    }

    fn source_text<'e>(&self, expr: &'e str) -> &'e str {
        if !self.options.unwrap_braces {
            return expr;
        }
        expr.strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(expr)
    }
}

impl Default for ExprParser {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_source(source: &str) -> ExprResult<PostfixProgram> {
    let tokens = tokenize(source)?;
    to_postfix(&tokens)
}

/// Evaluate an expression with the process-wide engine
///
/// # Example
/// ```rust
/// use exprcalc::{evaluate, ExprValue, NoVars};
///
/// assert_eq!(evaluate("(2+3)*4", &NoVars).unwrap(), ExprValue::Number(20.0));
/// ```
pub fn evaluate<V: VariableSource + ?Sized>(expr: &str, vars: &V) -> ExprResult<ExprValue> {
    get_default_parser().evaluate(expr, vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExprError;
    use crate::evaluator::NoVars;

    #[test]
    fn test_evaluate_uses_cache() {
        let parser = ExprParser::new();
        assert_eq!(
            parser.evaluate("2+3*4", &NoVars).unwrap(),
            ExprValue::Number(14.0)
        );
        assert_eq!(
            parser.evaluate("2+3*4", &NoVars).unwrap(),
            ExprValue::Number(14.0)
        );
        assert_eq!(parser.cache().compilations(), 1);
        assert_eq!(parser.cache().hits(), 1);
    }

    #[test]
    fn test_empty_skips_cache() {
        let parser = ExprParser::new();
        assert_eq!(parser.evaluate("", &NoVars).unwrap(), ExprValue::Empty);
        assert!(parser.cache().is_empty());
        assert_eq!(parser.cache().compilations(), 0);
    }

    #[test]
    fn test_braces() {
        let parser = ExprParser::new();
        assert_eq!(
            parser.evaluate("{2+2}", &NoVars).unwrap(),
            ExprValue::Number(4.0)
        );
        assert!(parser.cache().contains("{2+2}"));
        assert!(!parser.cache().contains("2+2"));

        // Only the outermost pair is stripped, and only when both are present
        assert_eq!(
            parser.evaluate("{2+2", &NoVars),
            Err(ExprError::InvalidCharacter("{".into()))
        );
        assert_eq!(parser.evaluate("{}", &NoVars).unwrap(), ExprValue::Empty);
    }

    #[test]
    fn test_braces_disabled() {
        let parser = ExprParser::with_options(EngineOptions {
            unwrap_braces: false,
            ..Default::default()
        });
        assert_eq!(
            parser.evaluate("{2+2}", &NoVars),
            Err(ExprError::InvalidCharacter("{".into()))
        );
    }

    #[test]
    fn test_cache_disabled() {
        let parser = ExprParser::with_options(EngineOptions {
            use_cache: false,
            ..Default::default()
        });
        parser.evaluate("1+1", &NoVars).unwrap();
        parser.evaluate("1+1", &NoVars).unwrap();
        assert!(parser.cache().is_empty());
        assert_eq!(parser.cache().compilations(), 0);
    }

    #[test]
    fn test_shared_cache() {
        let cache = Arc::new(FormulaCache::new());
        let a = ExprParser::with_cache(Arc::clone(&cache), EngineOptions::default());
        let b = ExprParser::with_cache(Arc::clone(&cache), EngineOptions::default());
        a.evaluate("6/3", &NoVars).unwrap();
        b.evaluate("6/3", &NoVars).unwrap();
        assert_eq!(cache.compilations(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_postfix_string_bypasses_cache() {
        let parser = ExprParser::new();
        assert_eq!(parser.to_postfix_string("a*(b+c)").unwrap(), "a b c + *");
        assert!(parser.cache().is_empty());
    }
}
