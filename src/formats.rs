//! Output formats for token streams
//!
//!     - `tokens`: one `offset Kind "text"` line per token. The text is debug-escaped so that
//!       whitespace and line terminators stay visible.
//!     - `tags`: one `short-name "text"` line per token, using [TokenKind::short_name].
//!     - `json` / `yaml`: the token list as serde sees it.
//!
//!     [detokenize] goes the other way: it concatenates token texts, which for any lexer in this
//!     crate gives back the input.

use crate::lexing::LexError;
use crate::token::Token;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tokens,
    Tags,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Tokens,
        OutputFormat::Tags,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Tokens => "tokens",
            OutputFormat::Tags => "tags",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Render `tokens` in this format.
    pub fn serialize(&self, tokens: &[Token]) -> Result<String, LexError> {
        match self {
            OutputFormat::Tokens => Ok(render_lines(tokens, |token| {
                format!("{} {}", token.offset, token.kind)
            })),
            OutputFormat::Tags => Ok(render_lines(tokens, |token| {
                token.kind.short_name().to_string()
            })),
            OutputFormat::Json => serde_json::to_string_pretty(tokens)
                .map(|json| json + "\n")
                .map_err(|e| LexError::Serialize(e.to_string())),
            OutputFormat::Yaml => {
                serde_yaml::to_string(tokens).map_err(|e| LexError::Serialize(e.to_string()))
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| LexError::UnknownFormat(s.to_string()))
    }
}

fn render_lines(tokens: &[Token], label: impl Fn(&Token) -> String) -> String {
    let mut out = String::new();
    for token in tokens {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{} {:?}", label(token), token.text);
    }
    out
}

/// Concatenate the text of all tokens.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn sample() -> Vec<Token> {
        vec![
            Token::new(0, TokenKind::PromptUserHost, "me@box"),
            Token::new(6, TokenKind::PromptPunctuation, ":"),
            Token::new(7, TokenKind::PromptDirectory, "~"),
            Token::new(8, TokenKind::PromptPunctuation, "$\n"),
            Token::new(10, TokenKind::Output, "hi\n"),
        ]
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!("tokens".parse::<OutputFormat>().ok(), Some(OutputFormat::Tokens));
        assert_eq!("yaml".parse::<OutputFormat>().ok(), Some(OutputFormat::Yaml));
        match "xml".parse::<OutputFormat>() {
            Err(LexError::UnknownFormat(name)) => assert_eq!(name, "xml"),
            other => panic!("Expected UnknownFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_tokens_format() {
        let out = OutputFormat::Tokens.serialize(&sample()).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r###"
        0 PromptUserHost "me@box"
        6 PromptPunctuation ":"
        7 PromptDirectory "~"
        8 PromptPunctuation "$\n"
        10 Output "hi\n"
        "###);
    }

    #[test]
    fn test_tags_format() {
        let out = OutputFormat::Tags.serialize(&sample()).unwrap();
        assert_eq!(
            out,
            "gp-uh \"me@box\"\ngp \":\"\ngp-d \"~\"\ngp \"$\\n\"\ngo \"hi\\n\"\n"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let tokens = sample();
        let json = OutputFormat::Json.serialize(&tokens).unwrap();
        let back: Vec<Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
        assert!(json.contains("\"kind\": \"PromptUserHost\""));
    }

    #[test]
    fn test_yaml_mentions_kinds() {
        let yaml = OutputFormat::Yaml.serialize(&sample()).unwrap();
        assert!(yaml.contains("kind: PromptDirectory"));
    }

    #[test]
    fn test_detokenize() {
        assert_eq!(detokenize(&sample()), "me@box:~$\nhi\n");
        assert_eq!(detokenize(&[]), "");
    }
}
