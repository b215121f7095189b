//! Token types shared by every lexer in the crate.
//!
//!     A token is an immutable `(offset, kind, text)` triple. The offset is the absolute byte
//!     position of `text` in the input handed to the lexer, and `text` is the exact substring
//!     found there. Every lexer in this crate guarantees that, for a single invocation,
//!     concatenating the `text` of all emitted tokens reproduces the input byte for byte, and
//!     that offsets never decrease. Consumers (style mappers, the CLI, tests) rely on this.
//!
//! Kinds
//!
//!     [TokenKind] is a closed set. It covers the prompt family produced by the session lexer,
//!     the generic output kinds, and everything the command, diff and git lexers produce. Each
//!     kind carries a short, stable tag (see [TokenKind::short_name]) used by the `tags` output
//!     format and by host tooling that maps kinds to styles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Prompt family
    PromptVirtualEnv,
    PromptUserHost,
    PromptDirectory,
    PromptGitBranch,
    /// Generic prompt decoration: separators, brackets and the terminator.
    PromptPunctuation,

    // Generic
    Whitespace,
    Text,
    /// Unclassified command output.
    Output,
    /// Bytes no rule of the producing lexer recognised.
    Error,

    // Command language
    Keyword,
    Builtin,
    Operator,
    Punctuation,
    StringSingle,
    StringDouble,
    StringBacktick,
    StringEscape,
    Variable,
    Comment,
    Number,

    // Diff
    DiffHeading,
    DiffSubheading,
    DiffInserted,
    DiffDeleted,
    DiffStrong,

    // Git log / status
    GitBranchLine,
    GitCommitHash,
    GitCommitDate,
    GitCommitMessage,
    GitCommitAuthor,
    GitRefs,
    GitUntracked,
    GitModified,
    GitStaged,

    // Git show
    GitShowHeader,
    GitRefRemoteHead,
    GitRefHead,
    GitRefTag,
    GitRefRemoteBranch,
    GitRefBranch,
}

impl TokenKind {
    /// Short tag for the kind, stable across releases.
    pub fn short_name(&self) -> &'static str {
        match self {
            TokenKind::PromptVirtualEnv => "gp-ve",
            TokenKind::PromptUserHost => "gp-uh",
            TokenKind::PromptDirectory => "gp-d",
            TokenKind::PromptGitBranch => "gp-gb",
            TokenKind::PromptPunctuation => "gp",
            TokenKind::Whitespace => "w",
            TokenKind::Text => "x",
            TokenKind::Output => "go",
            TokenKind::Error => "err",
            TokenKind::Keyword => "k",
            TokenKind::Builtin => "nb",
            TokenKind::Operator => "o",
            TokenKind::Punctuation => "p",
            TokenKind::StringSingle => "s1",
            TokenKind::StringDouble => "s2",
            TokenKind::StringBacktick => "sb",
            TokenKind::StringEscape => "se",
            TokenKind::Variable => "nv",
            TokenKind::Comment => "c1",
            TokenKind::Number => "m",
            TokenKind::DiffHeading => "gh",
            TokenKind::DiffSubheading => "gu",
            TokenKind::DiffInserted => "gi",
            TokenKind::DiffDeleted => "gd",
            TokenKind::DiffStrong => "gs",
            TokenKind::GitBranchLine => "git-bl",
            TokenKind::GitCommitHash => "git-ch",
            TokenKind::GitCommitDate => "git-cd",
            TokenKind::GitCommitMessage => "git-cm",
            TokenKind::GitCommitAuthor => "git-ca",
            TokenKind::GitRefs => "git-r",
            TokenKind::GitUntracked => "git-untr",
            TokenKind::GitModified => "git-mod",
            TokenKind::GitStaged => "git-stg",
            TokenKind::GitShowHeader => "git-show-h",
            TokenKind::GitRefRemoteHead => "git-rh",
            TokenKind::GitRefHead => "git-h",
            TokenKind::GitRefTag => "git-t",
            TokenKind::GitRefRemoteBranch => "git-rb",
            TokenKind::GitRefBranch => "git-b",
        }
    }

    /// Check if this kind belongs to the prompt family
    pub fn is_prompt(&self) -> bool {
        matches!(
            self,
            TokenKind::PromptVirtualEnv
                | TokenKind::PromptUserHost
                | TokenKind::PromptDirectory
                | TokenKind::PromptGitBranch
                | TokenKind::PromptPunctuation
        )
    }

    /// Check if this kind is produced by the git lexers
    pub fn is_git(&self) -> bool {
        matches!(
            self,
            TokenKind::GitBranchLine
                | TokenKind::GitCommitHash
                | TokenKind::GitCommitDate
                | TokenKind::GitCommitMessage
                | TokenKind::GitCommitAuthor
                | TokenKind::GitRefs
                | TokenKind::GitUntracked
                | TokenKind::GitModified
                | TokenKind::GitStaged
                | TokenKind::GitShowHeader
                | TokenKind::GitRefRemoteHead
                | TokenKind::GitRefHead
                | TokenKind::GitRefTag
                | TokenKind::GitRefRemoteBranch
                | TokenKind::GitRefBranch
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A classified, positioned substring of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub offset: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(offset: usize, kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            offset,
            kind,
            text: text.into(),
        }
    }

    /// Byte offset just past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Returns the same token moved `delta` bytes to the right.
    pub fn shifted(mut self, delta: usize) -> Self {
        self.offset += delta;
        self
    }
}

/// Strip offsets, keeping `(kind, text)` pairs. Handy for comparing streams in tests.
pub fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
}
