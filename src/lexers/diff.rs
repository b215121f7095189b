//! Diff lexer
//!
//!     Classifies unified, context and normal (ed-style) diff output one line at a time. Each
//!     line body is matched against an ordered rule table; the first rule that matches the
//!     whole body wins. The line terminator is always emitted as a separate whitespace token.
//!
//!     Order matters: context lines are recognised by their leading space before anything
//!     else, and a bare `---` separator is recognised before the `-` deletion rule.

use crate::lexing::{LexError, Lexer, Line, LineScanner, TokenStream};
use crate::token::{Token, TokenKind};
use regex::Regex;

/// Diff rules, tried in declaration order against the line body (terminator excluded).
const DIFF_RULES: &[(&str, TokenKind)] = &[
    (r"^(?:!.*|---)$", TokenKind::DiffStrong),
    (r"^(?:< |-).*$", TokenKind::DiffDeleted),
    (r"^(?:> |\+).*$", TokenKind::DiffInserted),
    (
        r"^(?:@.*|\d(?:,\d+)?(?:a|c|d)\d+(?:,\d+)?)$",
        TokenKind::DiffSubheading,
    ),
    (r"^(?:[Ii]ndex|diff).*$", TokenKind::DiffHeading),
    (r"^=.*$", TokenKind::DiffHeading),
];

/// Lexer for diff output.
#[derive(Debug, Clone)]
pub struct DiffLexer {
    rules: Vec<(Regex, TokenKind)>,
}

impl DiffLexer {
    pub fn new() -> Result<Self, LexError> {
        let rules = DIFF_RULES
            .iter()
            .map(|(pattern, kind)| Ok((Regex::new(pattern)?, *kind)))
            .collect::<Result<Vec<_>, LexError>>()?;
        Ok(DiffLexer { rules })
    }

    fn lex_line(&self, line: Line<'_>) -> Vec<Token> {
        let body = line.body();
        let mut tokens = Vec::with_capacity(3);

        if let Some(context) = body.strip_prefix(' ') {
            tokens.push(Token::new(line.offset, TokenKind::Whitespace, " "));
            if !context.is_empty() {
                tokens.push(Token::new(line.offset + 1, TokenKind::Text, context));
            }
        } else if !body.is_empty() {
            let kind = self
                .rules
                .iter()
                .find(|(regex, _)| regex.is_match(body))
                .map_or(TokenKind::Text, |(_, kind)| *kind);
            tokens.push(Token::new(line.offset, kind, body));
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

impl Lexer for DiffLexer {
    fn name(&self) -> &'static str {
        "diff"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        Box::new(LineScanner::new(text).flat_map(move |line| self.lex_line(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::kinds_and_text;

    fn lex(text: &str) -> Vec<Token> {
        DiffLexer::new().expect("diff rules compile").stream(text).collect()
    }

    #[test]
    fn test_unified_diff() {
        let source = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-old\n+new\n ctx\n";
        let tokens = lex(source);
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::DiffHeading, "diff --git a/x b/x"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffDeleted, "--- a/x"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffInserted, "+++ b/x"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffSubheading, "@@ -1 +1 @@"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffDeleted, "-old"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffInserted, "+new"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Text, "ctx"),
                (TokenKind::Whitespace, "\n"),
            ]
        );
    }

    #[test]
    fn test_normal_diff_and_separators() {
        let tokens = lex("2c2\n< a\n---\n> b\n");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::DiffSubheading, "2c2"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffDeleted, "< a"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffStrong, "---"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::DiffInserted, "> b"),
                (TokenKind::Whitespace, "\n"),
            ]
        );
    }

    #[test]
    fn test_offsets_and_unterminated_line() {
        let tokens = lex("Index: x\nplain");
        assert_eq!(tokens[0], Token::new(0, TokenKind::DiffHeading, "Index: x"));
        assert_eq!(tokens[1], Token::new(8, TokenKind::Whitespace, "\n"));
        assert_eq!(tokens[2], Token::new(9, TokenKind::Text, "plain"));
        assert_eq!(tokens.len(), 3);
    }
}
