//! Error types for the front end.
//!
//! Lexical and grammatical failures share one positioned error type,
//! [`SyntaxError`]; both abort the parse of the current program.
//! Coercion failure is deliberately not an error (it yields
//! `Primary::Null`, see the `coerce` module), leaving
//! [`ComparisonError`] as the only fallible path in the comparison
//! engine.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// A fatal lexical or syntax error carrying the source position of the
/// offending token.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub source_file: Option<Arc<str>>,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        line: usize,
        column: usize,
        source_file: Option<Arc<str>>,
    ) -> SyntaxError {
        SyntaxError {
            message: message.into(),
            line,
            column,
            source_file,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [L:{} C:{}]", self.message, self.line, self.column)?;
        if let Some(file) = &self.source_file {
            write!(f, " {}", file)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Errors from the comparison engine. Mismatched row-value arity is a
/// caller programming error, not a data-quality condition, so it is
/// surfaced instead of folding into `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("row value length does not match")]
    RowValueLengthMismatch,
}
