//! Common lexer module
//!
//! This module contains the shared interface and error type for lexer implementations.

use crate::lexing::ensure_source_ends_with_newline;
use crate::token::Token;
use thiserror::Error;

/// A lazy, finite, non-restartable sequence of tokens.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// Errors raised while building lexers or handling their output.
///
/// Tokenizing itself never fails: every line is classified as something. Grammar errors are
/// reported when a lexer is constructed, before any input is seen.
#[derive(Error, Debug)]
pub enum LexError {
    /// A grammar whose capture groups do not line up with its kind table
    #[error("Invalid grammar '{name}': {reason}")]
    Grammar { name: String, reason: String },

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Unknown lexer: {0}")]
    UnknownLexer(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for lexer implementations
///
/// Implementors must be pure: the same text always yields the same tokens, and no state
/// survives from one call to the next.
pub trait Lexer: Send + Sync {
    /// Short identifier used in logs and listings
    fn name(&self) -> &'static str;

    /// Tokenize `text` as-is. Offsets are relative to the start of `text`.
    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a>;

    /// Tokenize a whole source, appending the trailing newline line-based grammars expect.
    fn lex(&self, source: &str) -> Vec<Token> {
        let source = ensure_source_ends_with_newline(source);
        self.stream(&source).collect()
    }
}
