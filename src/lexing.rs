//! Lexing infrastructure
//!
//!     This module holds the pieces every lexer in [lexers](crate::lexers) is built from. None of
//!     it knows about prompts, diffs or git; it only knows about lines, offsets and tokens.
//!
//! The Pieces
//!
//!     1. [Lexer](common::Lexer): the capability interface. A lexer turns a text into a lazy,
//!        finite, one-shot [TokenStream](common::TokenStream). Lexers are immutable once built,
//!        so one instance can serve any number of concurrent invocations; all per-invocation
//!        state lives in the stream.
//!
//!     2. [LineScanner](lines::LineScanner): splits text into physical lines that keep their
//!        terminator and their absolute start offset. Lines are the unit of dispatch for every
//!        lexer here.
//!
//!     3. [Insertions](insertions::Insertions): the splice list used when a text is tokenized
//!        by one lexer but decorated by another. The decorations are recorded against relative
//!        positions of the accumulated text and merged back into the sub-lexer's output with
//!        [merge_insertions](insertions::merge_insertions).
//!
//! Source Preservation
//!
//!     Offsets must map back exactly onto the input. Every stage either emits a slice of the
//!     line it is looking at or shifts a sub-lexer's relative offsets by the absolute start of
//!     the slice it handed over. Nothing is ever dropped: text no rule recognises is emitted as
//!     output or error tokens, never skipped.

pub mod common;
pub mod insertions;
pub mod lines;

pub use common::{LexError, Lexer, TokenStream};
pub use insertions::{merge_insertions, Insertion, Insertions};
pub use lines::{Line, LineScanner};

/// Preprocesses source text to ensure it ends with a newline.
///
/// Line-oriented grammars (prompts, commit rows, status sections) expect every line to carry a
/// terminator. Returns the original string if it already ends with a newline, or empty string.
/// Otherwise, appends a newline.
pub fn ensure_source_ends_with_newline(source: &str) -> String {
    if !source.is_empty() && !source.ends_with('\n') {
        format!("{}\n", source)
    } else {
        source.to_string()
    }
}
