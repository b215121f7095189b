//! Command language lexer
//!
//!     Tokenizes shell command text (what a user typed after a prompt). The raw tokenization is
//!     done by logos; words are then classified as keyword, builtin, number or plain text from
//!     fixed tables plus any builtins added through [CommandConfig].
//!
//!     This is a lexer, not a parser: it does not track quoting across heredocs, nesting of
//!     `$(...)` or case arms. It only needs to be good enough to colour a transcript, and it
//!     must cover every byte, so input logos cannot match is emitted as [TokenKind::Error].

use crate::config::CommandConfig;
use crate::lexing::{Lexer, TokenStream};
use crate::token::{Token, TokenKind};
use logos::Logos;
use once_cell::sync::Lazy;
use std::collections::HashSet;

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "function", "select", "in", "time",
];

const BUILTINS: &[&str] = &[
    "alias", "bg", "bind", "break", "builtin", "caller", "cd", "command", "compgen",
    "complete", "continue", "declare", "dirs", "disown", "echo", "enable", "eval", "exec",
    "exit", "export", "false", "fc", "fg", "getopts", "hash", "help", "history", "jobs", "kill",
    "let", "local", "logout", "popd", "printf", "pushd", "pwd", "read", "readonly", "return",
    "set", "shift", "shopt", "source", "suspend", "test", "times", "trap", "true", "type",
    "typeset", "ulimit", "umask", "unalias", "unset", "wait",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());
static BUILTIN_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| BUILTINS.iter().copied().collect());

/// Raw shell tokens
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum ShellToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("\\\n")]
    LineContinuation,

    #[regex(r"\\[^\n]")]
    Escape,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[regex(r#""([^"\\]|\\[^\n]|\\\n)*""#)]
    DoubleQuoted,

    #[regex(r"`[^`]*`")]
    Backticked,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r"\$\{[^}\n]*\}")]
    #[regex(r"\$[0-9#?$!@*-]")]
    Variable,

    #[token("$(")]
    #[token("$((")]
    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token("[[")]
    #[token("]]")]
    Punctuation,

    #[token("&&")]
    #[token("||")]
    #[token("|")]
    #[token(";")]
    #[token(";;")]
    #[token("&")]
    #[token(">")]
    #[token(">>")]
    #[token("<")]
    #[token("<<")]
    #[token("&>")]
    #[token("!")]
    Operator,

    // Words may contain '#', '[' and ']' after their first character
    #[regex(r#"[^\s'"`$\\;&|<>(){}\[\]#!][^\s'"`$\\;&|<>(){}]*"#)]
    Word,
}

/// Lexer for shell command text.
#[derive(Debug, Clone)]
pub struct CommandLexer {
    extra_builtins: HashSet<String>,
}

impl CommandLexer {
    pub fn new() -> Self {
        CommandLexer {
            extra_builtins: HashSet::new(),
        }
    }

    /// Build a lexer honouring the dialect options of `config`.
    pub fn with_config(config: &CommandConfig) -> Self {
        CommandLexer {
            extra_builtins: config.extra_builtins.iter().cloned().collect(),
        }
    }

    fn classify_word(&self, word: &str) -> TokenKind {
        if KEYWORD_SET.contains(word) {
            TokenKind::Keyword
        } else if BUILTIN_SET.contains(word) || self.extra_builtins.contains(word) {
            TokenKind::Builtin
        } else if word.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::Number
        } else {
            TokenKind::Text
        }
    }

    fn kind_of(&self, token: ShellToken, slice: &str) -> TokenKind {
        match token {
            ShellToken::Whitespace => TokenKind::Whitespace,
            ShellToken::LineContinuation | ShellToken::Escape => TokenKind::StringEscape,
            ShellToken::Comment => TokenKind::Comment,
            ShellToken::SingleQuoted => TokenKind::StringSingle,
            ShellToken::DoubleQuoted => TokenKind::StringDouble,
            ShellToken::Backticked => TokenKind::StringBacktick,
            ShellToken::Variable => TokenKind::Variable,
            ShellToken::Punctuation => TokenKind::Punctuation,
            ShellToken::Operator => TokenKind::Operator,
            ShellToken::Word => self.classify_word(slice),
        }
    }
}

impl Default for CommandLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer for CommandLexer {
    fn name(&self) -> &'static str {
        "bash"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        let mut lexer = ShellToken::lexer(text);
        Box::new(std::iter::from_fn(move || {
            let result = lexer.next()?;
            let span = lexer.span();
            let slice = lexer.slice();
            let kind = match result {
                Ok(token) => self.kind_of(token, slice),
                Err(()) => TokenKind::Error,
            };
            Some(Token::new(span.start, kind, slice))
        }))
    }
}
