//! Lexers
//!
//! This module holds every lexer termlex ships. They all implement [Lexer](crate::lexing::Lexer)
//! and are line oriented: each physical line is classified on its own, with at most a little
//! state carried to the next one.
//!
//! The Lexers
//!
//!     - [shell_session]: console transcripts. Composes the others: prompt lines are decorated
//!       with the [prompt] grammar, commands go to the [command] lexer, output goes to the
//!       [diff] or [git_log] lexer when it looks like theirs.
//!     - [command]: shell command text, via logos.
//!     - [diff]: unified, context and normal diffs, via an ordered regex table.
//!     - [git_log]: `git log --graph --oneline` rows.
//!     - [git_status]: `git status`, a small section state machine.
//!     - [git_show]: `git show`, commit headers with their refs, then a diff.
//!
//!     [prompt] is not a lexer but the grammar of a primary prompt line.

pub mod command;
pub mod diff;
pub mod git_log;
pub mod git_show;
pub mod git_status;
pub mod prompt;
pub mod shell_session;

pub use command::CommandLexer;
pub use diff::DiffLexer;
pub use git_log::GitLogLexer;
pub use git_show::GitShowLexer;
pub use git_status::GitStatusLexer;
pub use prompt::{PromptGrammar, PromptMatch};
pub use shell_session::{SessionTokens, ShellSessionLexer};
