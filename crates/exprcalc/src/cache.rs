//! Formula cache
//!
//! Maps raw expression text to its compiled postfix program. Entries live as
//! long as the cache; there is no eviction.

use crate::error::ExprResult;
use crate::token::PostfixProgram;
use ahash::AHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached programs
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: usize,
    /// Compiler invocations, failed ones included
    pub compilations: usize,
}

/// Thread-safe cache of compiled programs, keyed by exact expression text
///
/// Two threads compiling the same new expression may both run the compiler;
/// the first insert wins and both get the stored program.
#[derive(Debug, Default)]
pub struct FormulaCache {
    programs: RwLock<AHashMap<String, Arc<PostfixProgram>>>,
    hits: AtomicUsize,
    compilations: AtomicUsize,
}

impl FormulaCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached program for `expr`, compiling and storing it on a miss
    ///
    /// A failed compilation is returned as-is and nothing is stored.
    pub fn get_or_compile<F>(&self, expr: &str, compile: F) -> ExprResult<Arc<PostfixProgram>>
    where
        F: FnOnce() -> ExprResult<PostfixProgram>,
    {
        if let Some(program) = self.get(expr) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("formula cache hit: {:?}", expr);
            return Ok(program);
        }

        self.compilations.fetch_add(1, Ordering::Relaxed);
        let program = match compile() {
            Ok(program) => Arc::new(program),
            Err(e) => {
                log::debug!("failed to compile {:?}: {}", expr, e);
                return Err(e);
            }
        };
        log::debug!("compiled {:?} into {} postfix tokens", expr, program.len());

        let mut programs = self
            .programs
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let stored = programs.entry(expr.to_string()).or_insert(program);
        Ok(Arc::clone(stored))
    }

    /// Look up a cached program without compiling
    pub fn get(&self, expr: &str) -> Option<Arc<PostfixProgram>> {
        self.programs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(expr)
            .cloned()
    }

    /// Check if `expr` has a cached program
    pub fn contains(&self, expr: &str) -> bool {
        self.programs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(expr)
    }

    /// Number of cached programs
    pub fn len(&self) -> usize {
        self.programs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache holds no programs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Compiler invocations
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits(),
            compilations: self.compilations(),
        }
    }
}
