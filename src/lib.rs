//! # termlex
//!
//! Incremental tokenizers for terminal transcripts: interactive shell sessions, `git log`,
//! `git show` and `git status` output, and diffs.
//!
//! Every lexer turns a text into a lazy stream of `(offset, kind, text)` [tokens](token::Token).
//! The streams are gap free and ordered: concatenating the token texts gives back the input,
//! and offsets never decrease. Assigning colours to kinds is left to the consumer.
//!
//! ## Layout
//!
//! - [token]: the token type and the closed set of kinds.
//! - [lexing]: the shared machinery (lexer trait, line scanning, insertion merging).
//! - [lexers]: the lexers, with [ShellSessionLexer](lexers::ShellSessionLexer) at the core.
//! - [registry]: lookup of lexers by alias or file name.
//! - [config]: layered TOML configuration.
//! - [formats]: textual renderings of token streams.

pub mod config;
pub mod formats;
pub mod lexers;
pub mod lexing;
pub mod registry;
pub mod token;

pub use lexers::ShellSessionLexer;
pub use lexing::{LexError, Lexer};
pub use token::{Token, TokenKind};
