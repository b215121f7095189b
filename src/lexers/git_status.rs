//! Git status lexer
//!
//! A small state machine over the sections of `git status` output. Outside a section every line
//! is output; a section header switches into that section, where each entry line is split into
//! indentation, body and trailing whitespace and the body gets the section's kind. A blank line
//! closes the section. Input may end inside a section.

use crate::lexing::{Lexer, Line, LineScanner, TokenStream};
use crate::token::{Token, TokenKind};

/// Lexer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Untracked,
    Modified,
    Staged,
}

impl Section {
    fn from_header(body: &str) -> Option<Section> {
        match body.trim_start() {
            "Untracked files:" => Some(Section::Untracked),
            "Changes not staged for commit:" => Some(Section::Modified),
            "Changes to be committed:" => Some(Section::Staged),
            _ => None,
        }
    }

    fn entry_kind(&self) -> TokenKind {
        match self {
            Section::Root => TokenKind::Output,
            Section::Untracked => TokenKind::GitUntracked,
            Section::Modified => TokenKind::GitModified,
            Section::Staged => TokenKind::GitStaged,
        }
    }
}

/// Lexer for `git status` output.
#[derive(Debug, Clone, Default)]
pub struct GitStatusLexer;

impl GitStatusLexer {
    pub fn new() -> Self {
        GitStatusLexer
    }
}

/// An indented parenthesised hint such as `  (use "git add <file>..." to update)`
fn is_hint(body: &str) -> bool {
    let trimmed = body.trim_start();
    trimmed.len() < body.len() && trimmed.starts_with('(') && trimmed.ends_with(')')
}

fn lex_line(section: &mut Section, line: Line<'_>) -> Vec<Token> {
    let body = line.body();

    if *section == Section::Root {
        if let Some(next) = Section::from_header(body) {
            *section = next;
        }
        return vec![Token::new(line.offset, TokenKind::Output, line.text)];
    }

    if body.trim().is_empty() {
        *section = Section::Root;
        return vec![Token::new(line.offset, TokenKind::Whitespace, line.text)];
    }

    if is_hint(body) {
        return vec![Token::new(line.offset, TokenKind::Output, line.text)];
    }

    let content = line.text.trim_start();
    let indent = line.text.len() - content.len();
    let entry = content.trim_end();
    let mut tokens = Vec::with_capacity(3);
    if indent > 0 {
        tokens.push(Token::new(
            line.offset,
            TokenKind::Whitespace,
            &line.text[..indent],
        ));
    }
    tokens.push(Token::new(line.offset + indent, section.entry_kind(), entry));
    let trailing = &content[entry.len()..];
    if !trailing.is_empty() {
        tokens.push(Token::new(
            line.offset + indent + entry.len(),
            TokenKind::Whitespace,
            trailing,
        ));
    }
    tokens
}

impl Lexer for GitStatusLexer {
    fn name(&self) -> &'static str {
        "git-status"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        let mut section = Section::Root;
        Box::new(LineScanner::new(text).flat_map(move |line| lex_line(&mut section, line)))
    }
}
