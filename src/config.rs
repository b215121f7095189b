//! Configuration loader for termlex.
//!
//! `defaults/termlex.default.toml` is embedded into the crate so that the documented defaults
//! and the runtime behavior stay in sync. Applications layer user files and command-line
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`TermlexConfig`].

use crate::lexing::Lexer;
use crate::token::Token;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../defaults/termlex.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermlexConfig {
    pub lexer: LexerOptions,
    pub session: SessionConfig,
}

/// Options every lexer honours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    pub ensure_newline: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            ensure_newline: true,
        }
    }
}

impl LexerOptions {
    /// Tokenize `source` with `lexer`, applying these options.
    pub fn tokenize(&self, lexer: &dyn Lexer, source: &str) -> Vec<Token> {
        if self.ensure_newline {
            lexer.lex(source)
        } else {
            lexer.stream(source).collect()
        }
    }
}

/// Shell session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub secondary_prompt: String,
    pub bare_continuation: bool,
    pub command: CommandConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            secondary_prompt: crate::lexers::shell_session::DEFAULT_SECONDARY_PROMPT.to_string(),
            bare_continuation: false,
            command: CommandConfig::default(),
        }
    }
}

/// Dialect options passed through to the command lexer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub extra_builtins: Vec<String>,
}

/// Session settings given on the command line. They win over every file layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOverrides {
    pub secondary_prompt: Option<String>,
    /// Only a `true` value is applied; `false` leaves the file setting alone.
    pub bare_continuation: bool,
}

/// Layers the embedded defaults, user files and command-line overrides into a [`TermlexConfig`].
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_toml(path.as_ref(), true)
    }

    /// Layer a TOML file, skipping it when absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_toml(path.as_ref(), false)
    }

    fn layer_toml(mut self, path: &Path, required: bool) -> Self {
        debug!(path = %path.display(), required, "layering config file");
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply the command-line session settings on top of all files.
    pub fn with_session_overrides(
        mut self,
        overrides: &SessionOverrides,
    ) -> Result<Self, ConfigError> {
        if let Some(secondary) = &overrides.secondary_prompt {
            self.builder = self
                .builder
                .set_override("session.secondary_prompt", secondary.as_str())?;
        }
        if overrides.bare_continuation {
            self.builder = self.builder.set_override("session.bare_continuation", true)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Result<TermlexConfig, ConfigError> {
        let config: TermlexConfig = self.builder.build()?.try_deserialize()?;
        debug!(
            secondary_prompt = %config.session.secondary_prompt,
            bare_continuation = config.session.bare_continuation,
            ensure_newline = config.lexer.ensure_newline,
            "configuration loaded"
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<TermlexConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, TermlexConfig::default());
        assert!(config.lexer.ensure_newline);
        assert_eq!(config.session.secondary_prompt, "> ");
        assert!(!config.session.bare_continuation);
        assert!(config.session.command.extra_builtins.is_empty());
    }

    #[test]
    fn session_overrides_win_over_defaults() {
        let overrides = SessionOverrides {
            secondary_prompt: Some("... ".to_string()),
            bare_continuation: true,
        };
        let config = Loader::new()
            .with_session_overrides(&overrides)
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert!(config.session.bare_continuation);
        assert_eq!(config.session.secondary_prompt, "... ");
    }

    #[test]
    fn unset_overrides_keep_file_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(b"[session]\nbare_continuation = true\nsecondary_prompt = \"$> \"\n")
            .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .with_session_overrides(&SessionOverrides::default())
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert!(config.session.bare_continuation);
        assert_eq!(config.session.secondary_prompt, "$> ");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        let contents = concat!(
            "[session.command]\n",
            "extra_builtins = [\"git\", \"make\"]\n",
            "\n",
            "[lexer]\n",
            "ensure_newline = false\n",
        );
        file.write_all(contents.as_bytes()).expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.session.command.extra_builtins, vec!["git", "make"]);
        assert!(!config.lexer.ensure_newline);
        assert_eq!(config.session.secondary_prompt, "> ");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/termlex.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, TermlexConfig::default());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/termlex.toml").build();
        assert!(result.is_err());
    }
}
