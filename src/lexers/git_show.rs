//! Git show lexer
//!
//!     Classifies `git show` / `git log` (full format) output. A `commit <hash>` line gets its
//!     ref decoration broken down (`HEAD`, `origin/HEAD`, tags, remote and local branches);
//!     from the first `diff ...` line on, everything is handed to the [DiffLexer]. Any other
//!     line is output.
//!
//!     The ref decoration is tokenized by logos. Bytes it does not recognise inside the
//!     decoration are emitted as output.

use crate::lexers::diff::DiffLexer;
use crate::lexing::{LexError, Lexer, Line, LineScanner, TokenStream};
use crate::token::{Token, TokenKind};
use logos::Logos;
use regex::Regex;

/// Tokens of a commit header's ref decoration, e.g. ` (HEAD -> main, origin/main, tag: v1)`
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum RefToken {
    #[regex(r" +")]
    Space,

    #[token("(")]
    #[token(")")]
    #[token("->")]
    #[token(",")]
    Delimiter,

    #[token("origin/HEAD")]
    RemoteHead,

    #[token("HEAD")]
    Head,

    #[regex(r"tag: [\w.-]+")]
    Tag,

    #[regex(r"origin/[\w/_-]+")]
    RemoteBranch,

    #[regex(r"[\w/_-]+")]
    Branch,
}

impl RefToken {
    fn kind(self) -> TokenKind {
        match self {
            RefToken::Space => TokenKind::Whitespace,
            RefToken::Delimiter => TokenKind::GitShowHeader,
            RefToken::RemoteHead => TokenKind::GitRefRemoteHead,
            RefToken::Head => TokenKind::GitRefHead,
            RefToken::Tag => TokenKind::GitRefTag,
            RefToken::RemoteBranch => TokenKind::GitRefRemoteBranch,
            RefToken::Branch => TokenKind::GitRefBranch,
        }
    }
}

/// Lexer for `git show` output.
#[derive(Debug, Clone)]
pub struct GitShowLexer {
    header: Regex,
    diff: DiffLexer,
}

impl GitShowLexer {
    pub fn new() -> Result<Self, LexError> {
        Ok(GitShowLexer {
            header: Regex::new(r"^commit [0-9a-f]+")?,
            diff: DiffLexer::new()?,
        })
    }

    fn lex_line(&self, in_diff: &mut bool, line: Line<'_>) -> Vec<Token> {
        if *in_diff || line.text.starts_with("diff ") {
            *in_diff = true;
            return self
                .diff
                .stream(line.text)
                .map(|token| token.shifted(line.offset))
                .collect();
        }

        let body = line.body();
        if body.is_empty() {
            return vec![Token::new(line.offset, TokenKind::Whitespace, line.text)];
        }

        let Some(header) = self.header.find(body) else {
            return vec![Token::new(line.offset, TokenKind::Output, line.text)];
        };

        let mut tokens = vec![Token::new(
            line.offset,
            TokenKind::GitShowHeader,
            header.as_str(),
        )];
        let decoration = &body[header.end()..];
        let base = line.offset + header.end();
        let mut lexer = RefToken::lexer(decoration);
        while let Some(result) = lexer.next() {
            let kind = result.map_or(TokenKind::Output, RefToken::kind);
            tokens.push(Token::new(base + lexer.span().start, kind, lexer.slice()));
        }

        let terminator = line.terminator();
        if !terminator.is_empty() {
            tokens.push(Token::new(
                line.offset + body.len(),
                TokenKind::Whitespace,
                terminator,
            ));
        }
        tokens
    }
}

impl Lexer for GitShowLexer {
    fn name(&self) -> &'static str {
        "git-show"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        let mut in_diff = false;
        Box::new(LineScanner::new(text).flat_map(move |line| self.lex_line(&mut in_diff, line)))
    }
}
