//! Prompt grammar
//!
//!     Recognises the primary prompt at the start of a console line:
//!
//!         (venv) [user@host:~/project (main)] $ command text
//!         ^^^^^^ ^^^^^^^^^ ^^^^^^^^^^ ^^^^^^ ^ ^ ^^^^^^^^^^^^^
//!         venv   user-host directory  branch    terminator / command
//!
//!     Everything is optional except the user-host, the separator (`:` or whitespace), the
//!     directory and the terminator (`$`, `#` or `%`). The match is anchored, greedy and
//!     confined to one line.
//!
//! Decoration
//!
//!     The part of the line before the command text is the decoration. It is handed out as an
//!     ordered list of `(kind, text)` segments that covers it exactly: recognised spans get
//!     their kind, and the filler between them (the separator, spaces before the branch or the
//!     terminator) is split into whitespace runs and prompt punctuation. Nothing is dropped.
//!
//!     When nothing but whitespace follows the terminator, that whitespace (including the line
//!     terminator) is folded into the terminator segment and the command text is empty, so a
//!     bare prompt renders as `$\n` rather than `$` followed by a lone newline.

use crate::lexing::LexError;
use crate::token::TokenKind;
use regex::Regex;
use std::ops::Range;

const PROMPT_PATTERN: &str = concat!(
    r"^(?:(?P<venv>\([^)\n]*\))[ \t]*)?",
    r"(?P<open>\[)?",
    r"(?P<user_host>[^\s@]+@\S+?)",
    r"(?P<sep>:|[ \t]+)",
    r"(?P<dir>[^\s\]]+)",
    r"(?:[ \t]+(?P<branch>\([^)\n]+\)))?",
    r"(?P<close>\])?",
    r"[ \t]*",
    r"(?P<term>[$#%])",
    r"(?P<command>[^\n]*\n?)$",
);

/// Named spans of the decoration, in line order, with the kind each one is emitted as.
/// `None` marks spans emitted as filler.
const DECORATION_GROUPS: &[(&str, Option<TokenKind>)] = &[
    ("venv", Some(TokenKind::PromptVirtualEnv)),
    ("open", Some(TokenKind::PromptPunctuation)),
    ("user_host", Some(TokenKind::PromptUserHost)),
    ("sep", None),
    ("dir", Some(TokenKind::PromptDirectory)),
    ("branch", Some(TokenKind::PromptGitBranch)),
    ("close", Some(TokenKind::PromptPunctuation)),
    ("term", Some(TokenKind::PromptPunctuation)),
];

/// Compiled prompt grammar.
#[derive(Debug, Clone)]
pub struct PromptGrammar {
    pattern: Regex,
}

impl PromptGrammar {
    pub fn new() -> Result<Self, LexError> {
        let pattern = Regex::new(PROMPT_PATTERN)?;
        let names: Vec<_> = pattern.capture_names().flatten().collect();
        for (group, _) in DECORATION_GROUPS {
            if !names.contains(group) {
                return Err(LexError::Grammar {
                    name: "prompt".to_string(),
                    reason: format!("missing capture group '{}'", group),
                });
            }
        }
        if !names.contains(&"command") {
            return Err(LexError::Grammar {
                name: "prompt".to_string(),
                reason: "missing capture group 'command'".to_string(),
            });
        }
        Ok(PromptGrammar { pattern })
    }

    /// Match a prompt at the start of `line` (terminator included).
    pub fn match_line<'a>(&self, line: &'a str) -> Option<PromptMatch<'a>> {
        let captures = self.pattern.captures(line)?;
        let span = |name: &str| captures.name(name).map(|m| m.range());

        let mut term = span("term")?;
        let mut command = span("command")?;
        if line[command.clone()].trim().is_empty() {
            term.end = command.end;
            command.start = command.end;
        }

        Some(PromptMatch {
            line,
            venv: span("venv"),
            open_bracket: span("open"),
            user_host: span("user_host")?,
            separator: span("sep")?,
            directory: span("dir")?,
            branch: span("branch"),
            close_bracket: span("close"),
            terminator: term,
            command,
        })
    }
}

/// A successful prompt match. All spans are byte ranges into the matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMatch<'a> {
    line: &'a str,
    pub venv: Option<Range<usize>>,
    pub open_bracket: Option<Range<usize>>,
    pub user_host: Range<usize>,
    pub separator: Range<usize>,
    pub directory: Range<usize>,
    pub branch: Option<Range<usize>>,
    pub close_bracket: Option<Range<usize>>,
    pub terminator: Range<usize>,
    pub command: Range<usize>,
}

impl<'a> PromptMatch<'a> {
    pub fn text(&self, span: &Range<usize>) -> &'a str {
        &self.line[span.clone()]
    }

    pub fn user_host_text(&self) -> &'a str {
        self.text(&self.user_host)
    }

    pub fn directory_text(&self) -> &'a str {
        self.text(&self.directory)
    }

    pub fn branch_text(&self) -> Option<&'a str> {
        self.branch.as_ref().map(|span| self.text(span))
    }

    pub fn venv_text(&self) -> Option<&'a str> {
        self.venv.as_ref().map(|span| self.text(span))
    }

    /// The command text: everything after the terminator, line terminator included.
    pub fn command_text(&self) -> &'a str {
        self.text(&self.command)
    }

    fn spans(&self) -> [(Option<&Range<usize>>, Option<TokenKind>); 8] {
        let kind = |idx: usize| DECORATION_GROUPS[idx].1;
        [
            (self.venv.as_ref(), kind(0)),
            (self.open_bracket.as_ref(), kind(1)),
            (Some(&self.user_host), kind(2)),
            (Some(&self.separator), kind(3)),
            (Some(&self.directory), kind(4)),
            (self.branch.as_ref(), kind(5)),
            (self.close_bracket.as_ref(), kind(6)),
            (Some(&self.terminator), kind(7)),
        ]
    }

    /// Ordered `(kind, text)` segments covering the line up to the command text.
    pub fn decoration(&self) -> Vec<(TokenKind, &'a str)> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for (span, kind) in self.spans() {
            let Some(span) = span else { continue };
            push_filler(&mut segments, &self.line[cursor..span.start]);
            match kind {
                Some(kind) => segments.push((kind, self.text(span))),
                None => push_filler(&mut segments, self.text(span)),
            }
            cursor = span.end;
        }
        push_filler(&mut segments, &self.line[cursor..self.command.start]);
        segments
    }
}

/// Split filler into whitespace runs and prompt punctuation.
fn push_filler<'a>(segments: &mut Vec<(TokenKind, &'a str)>, filler: &'a str) {
    let mut rest = filler;
    while let Some(first) = rest.chars().next() {
        let is_space = first.is_whitespace();
        let len = rest
            .find(|c: char| c.is_whitespace() != is_space)
            .unwrap_or(rest.len());
        let kind = if is_space {
            TokenKind::Whitespace
        } else {
            TokenKind::PromptPunctuation
        };
        segments.push((kind, &rest[..len]));
        rest = &rest[len..];
    }
}
