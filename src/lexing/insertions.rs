//! Insertions
//!
//!     When a logical command is assembled from several physical lines, the prompt decoration
//!     and the command text are interleaved: `user@host:~$ echo \` then `> done`. The command
//!     lexer must see only `echo \` + `done`, otherwise it would try to make sense of the
//!     prompt. So the decoration is cut out and recorded here, keyed by the length the command
//!     buffer had when the decoration was seen. After the buffer is tokenized, the recorded
//!     fragments are spliced back in at those positions.
//!
//!     Recorded positions never decrease and never exceed the final buffer length, because
//!     they are taken from the growing buffer itself.
//!
//! Merging
//!
//!     [merge_insertions] walks the sub-lexer's tokens. Any insertion whose position falls
//!     inside a token splits it: the part before, the inserted fragments, then the part after,
//!     all with the same kind as the original token. Insertions at the same position come out
//!     in recording order, ahead of the token starting there. Insertions past the last token
//!     are appended. The offsets of the merged stream are recomputed from zero, so they index
//!     into the concatenation of buffer and decoration, which is exactly the original lines.

use crate::token::{Token, TokenKind};

/// A fragment to splice into a token stream at a position of the accumulated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub index: usize,
    pub kind: TokenKind,
    pub text: String,
}

/// Ordered list of pending insertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Insertions {
    entries: Vec<Insertion>,
}

impl Insertions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fragment at `index` of the accumulated text.
    pub fn push(&mut self, index: usize, kind: TokenKind, text: impl Into<String>) {
        debug_assert!(
            self.entries.last().map_or(true, |last| last.index <= index),
            "insertion positions must not decrease"
        );
        self.entries.push(Insertion {
            index,
            kind,
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Take all entries, leaving the list empty.
    pub fn take(&mut self) -> Vec<Insertion> {
        std::mem::take(&mut self.entries)
    }
}

/// Splice `insertions` into `tokens`, recomputing offsets from zero.
pub fn merge_insertions<I>(insertions: Vec<Insertion>, tokens: I) -> Vec<Token>
where
    I: IntoIterator<Item = Token>,
{
    let mut merged = Vec::new();
    let mut pending = insertions.into_iter().peekable();
    let mut pos = 0;

    let mut emit = |merged: &mut Vec<Token>, kind: TokenKind, text: &str| {
        merged.push(Token::new(pos, kind, text));
        pos += text.len();
    };

    for token in tokens {
        let end = token.end();
        let mut consumed = 0;
        while let Some(insertion) = pending.next_if(|ins| ins.index <= end) {
            let split = snap_to_boundary(
                &token.text,
                insertion.index.saturating_sub(token.offset).max(consumed),
            );
            if split > consumed {
                emit(&mut merged, token.kind, &token.text[consumed..split]);
                consumed = split;
            }
            emit(&mut merged, insertion.kind, insertion.text.as_str());
        }
        if consumed < token.text.len() {
            emit(&mut merged, token.kind, &token.text[consumed..]);
        }
    }

    for insertion in pending {
        emit(&mut merged, insertion.kind, insertion.text.as_str());
    }

    merged
}

fn snap_to_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::kinds_and_text;

    fn words(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for part in text.split_inclusive(' ') {
            tokens.push(Token::new(offset, TokenKind::Text, part));
            offset += part.len();
        }
        tokens
    }

    #[test]
    fn test_insertions_before_first_token() {
        let mut insertions = Insertions::new();
        insertions.push(0, TokenKind::PromptUserHost, "me@box");
        insertions.push(0, TokenKind::PromptPunctuation, "$");

        let merged = merge_insertions(insertions.take(), words("ls -la"));
        assert_eq!(
            kinds_and_text(&merged),
            vec![
                (TokenKind::PromptUserHost, "me@box"),
                (TokenKind::PromptPunctuation, "$"),
                (TokenKind::Text, "ls "),
                (TokenKind::Text, "-la"),
            ]
        );
        assert_eq!(merged[2].offset, 7);
        assert_eq!(merged[3].offset, 10);
        assert!(insertions.is_empty());
    }

    #[test]
    fn test_insertion_splits_token() {
        let tokens = vec![Token::new(0, TokenKind::StringDouble, "\"ab\ncd\"")];
        let insertions = vec![Insertion {
            index: 4,
            kind: TokenKind::PromptPunctuation,
            text: "> ".to_string(),
        }];

        let merged = merge_insertions(insertions, tokens);
        assert_eq!(
            kinds_and_text(&merged),
            vec![
                (TokenKind::StringDouble, "\"ab\n"),
                (TokenKind::PromptPunctuation, "> "),
                (TokenKind::StringDouble, "cd\""),
            ]
        );
        assert_eq!(merged[2].offset, 6);
    }

    #[test]
    fn test_trailing_insertions_without_tokens() {
        let insertions = vec![
            Insertion {
                index: 0,
                kind: TokenKind::PromptVirtualEnv,
                text: "(venv)".to_string(),
            },
            Insertion {
                index: 0,
                kind: TokenKind::Whitespace,
                text: String::new(),
            },
        ];

        let merged = merge_insertions(insertions, Vec::new());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], Token::new(6, TokenKind::Whitespace, ""));
    }

    #[test]
    fn test_insertion_at_token_boundary_precedes_next_token() {
        let mut insertions = Insertions::new();
        insertions.push(3, TokenKind::PromptPunctuation, "> ");

        let merged = merge_insertions(insertions.take(), words("ab cd"));
        assert_eq!(
            kinds_and_text(&merged),
            vec![
                (TokenKind::Text, "ab "),
                (TokenKind::PromptPunctuation, "> "),
                (TokenKind::Text, "cd"),
            ]
        );
    }
}
