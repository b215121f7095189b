//! Git log lexer
//!
//!     Classifies `git log --graph --oneline`-style rows such as
//!
//!         * 1a2b3c4 - (2 days ago) Fix parser - Alice (HEAD -> main)
//!         | * 5d6e7f8 - (3 days ago) Add tests - Bob
//!         |/
//!
//!     Each line is tried, in order, against:
//!         1. The full commit-row grammar (graph glyphs, asterisk, graph glyphs, hash, date,
//!            message, author, optional refs).
//!         2. A bare graph line (only `|`, `\`, `/` and spaces).
//!         3. Anything else: the whole line is output.
//!
//!     The row grammar is data: an ordered table of capture groups, each optionally mapped to
//!     a kind. Groups without a kind (the asterisk and the dash separators) are emitted as
//!     output. The table and the compiled pattern are checked against each other when the
//!     lexer is built, so a misaligned table fails at construction, never mid-stream.

use crate::lexing::{LexError, Lexer, Line, LineScanner, TokenStream};
use crate::token::{Token, TokenKind};
use regex::Regex;

const GRAPH: &str = r"([|\\/ ]*)";

/// Commit-row groups in column order. Every group must be a single capture group.
const COMMIT_ROW: &[(&str, Option<TokenKind>)] = &[
    (GRAPH, Some(TokenKind::GitBranchLine)),
    (r"(\*)", None),
    (GRAPH, Some(TokenKind::GitBranchLine)),
    (r"( +)", Some(TokenKind::Whitespace)),
    (r"([a-f0-9]+)", Some(TokenKind::GitCommitHash)),
    (r"( +)", Some(TokenKind::Whitespace)),
    (r"(-)", None),
    (r"( +)", Some(TokenKind::Whitespace)),
    (r"(\([0-9A-Za-zÀ-ÖØ-öø-ÿ ]+\))", Some(TokenKind::GitCommitDate)),
    (r"(\s+)", Some(TokenKind::Whitespace)),
    (
        r#"([0-9A-Za-zÀ-ÖØ-öø-ÿ .:_'"!?()\\/-]+)"#,
        Some(TokenKind::GitCommitMessage),
    ),
    (r"( +)", Some(TokenKind::Whitespace)),
    (r"(-)", None),
    (r"( +)", Some(TokenKind::Whitespace)),
    (r"([0-9A-Za-zÀ-ÖØ-öø-ÿ ]+?)", Some(TokenKind::GitCommitAuthor)),
    (r"( *)", Some(TokenKind::Whitespace)),
    (r"(\([\w ->,:]+\))?", Some(TokenKind::GitRefs)),
];

/// A compiled row grammar: one anchored pattern plus the kind of each capture group.
#[derive(Debug, Clone)]
struct RowGrammar {
    pattern: Regex,
    kinds: Vec<Option<TokenKind>>,
}

impl RowGrammar {
    fn compile(name: &str, groups: &[(&str, Option<TokenKind>)]) -> Result<Self, LexError> {
        let source: String = groups.iter().map(|(group, _)| *group).collect();
        let pattern = Regex::new(&format!("^{}$", source))?;
        let captured = pattern.captures_len() - 1;
        if captured != groups.len() {
            return Err(LexError::Grammar {
                name: name.to_string(),
                reason: format!(
                    "pattern has {} capture groups but the kind table has {} entries",
                    captured,
                    groups.len()
                ),
            });
        }
        Ok(RowGrammar {
            pattern,
            kinds: groups.iter().map(|(_, kind)| *kind).collect(),
        })
    }

    /// Tokens for `body` if the whole body matches, offsets shifted by `base`.
    fn tokens(&self, body: &str, base: usize) -> Option<Vec<Token>> {
        let captures = self.pattern.captures(body)?;
        let tokens = self
            .kinds
            .iter()
            .enumerate()
            .filter_map(|(idx, kind)| {
                let group = captures.get(idx + 1)?;
                if group.as_str().is_empty() {
                    return None;
                }
                Some(Token::new(
                    base + group.start(),
                    kind.unwrap_or(TokenKind::Output),
                    group.as_str(),
                ))
            })
            .collect();
        Some(tokens)
    }
}

/// Lexer for `git log --graph` output.
#[derive(Debug, Clone)]
pub struct GitLogLexer {
    row: RowGrammar,
    graph: Regex,
}

impl GitLogLexer {
    pub fn new() -> Result<Self, LexError> {
        Ok(GitLogLexer {
            row: RowGrammar::compile("git-log commit row", COMMIT_ROW)?,
            graph: Regex::new(&format!("^{}$", GRAPH))?,
        })
    }

    fn lex_line(&self, line: Line<'_>) -> Vec<Token> {
        let body = line.body();

        if let Some(mut tokens) = self.row.tokens(body, line.offset) {
            let terminator = line.terminator();
            if !terminator.is_empty() {
                tokens.push(Token::new(
                    line.offset + body.len(),
                    TokenKind::Whitespace,
                    terminator,
                ));
            }
            return tokens;
        }

        let kind = if self.graph.is_match(body) {
            TokenKind::GitBranchLine
        } else {
            TokenKind::Output
        };
        vec![Token::new(line.offset, kind, line.text)]
    }
}

impl Lexer for GitLogLexer {
    fn name(&self) -> &'static str {
        "git"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        Box::new(LineScanner::new(text).flat_map(move |line| self.lex_line(line)))
    }
}
