//! Lexer registry for lexer discovery and selection
//!
//! This module provides a centralized registry for all available lexers. Each lexer is
//! registered with declarative metadata (aliases, filename patterns, mimetypes) and a factory
//! that builds it from the session configuration. The metadata carries no logic; it only lets
//! host tooling pick a lexer for a name or a file.

use crate::config::SessionConfig;
use crate::lexers::{
    CommandLexer, DiffLexer, GitLogLexer, GitShowLexer, GitStatusLexer, ShellSessionLexer,
};
use crate::lexing::{LexError, Lexer};
use serde::Serialize;
use std::collections::HashMap;

/// Builds a lexer from configuration.
pub type LexerFactory = fn(&SessionConfig) -> Result<Box<dyn Lexer>, LexError>;

/// Declarative metadata for a registered lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerInfo {
    /// Display name
    pub name: &'static str,
    /// Lookup names. The first alias is the canonical one.
    pub aliases: &'static [&'static str],
    /// Filename globs such as `*.sh-session`
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

impl LexerInfo {
    pub fn canonical_alias(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or(self.name)
    }

    /// Check whether any filename pattern matches `filename` (a bare name, not a path).
    pub fn matches_filename(&self, filename: &str) -> bool {
        self.filenames
            .iter()
            .any(|pattern| glob_matches(pattern, filename))
    }
}

/// Only `*`-prefixed patterns and exact names are used by the built-in lexers.
fn glob_matches(pattern: &str, filename: &str) -> bool {
    match pattern.strip_prefix('*') {
        Some(suffix) => filename.len() > suffix.len() && filename.ends_with(suffix),
        None => pattern == filename,
    }
}

struct Entry {
    info: LexerInfo,
    factory: LexerFactory,
}

/// Registry of lexers
///
/// # Examples
///
/// ```ignore
/// let registry = LexerRegistry::with_defaults();
/// let lexer = registry.create("console", &SessionConfig::default())?;
/// let tokens = lexer.lex("user@host:~$ ls\n");
/// ```
pub struct LexerRegistry {
    entries: Vec<Entry>,
    by_alias: HashMap<&'static str, usize>,
}

impl LexerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        LexerRegistry {
            entries: Vec::new(),
            by_alias: HashMap::new(),
        }
    }

    /// Register a lexer
    ///
    /// Aliases already registered are taken over by the new entry.
    pub fn register(&mut self, info: LexerInfo, factory: LexerFactory) {
        let idx = self.entries.len();
        for alias in info.aliases {
            self.by_alias.insert(*alias, idx);
        }
        self.entries.push(Entry { info, factory });
    }

    /// Get a lexer's metadata by alias
    pub fn get(&self, alias: &str) -> Result<&LexerInfo, LexError> {
        self.entry(alias).map(|entry| &entry.info)
    }

    /// Check if a lexer alias exists
    pub fn has(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias)
    }

    /// Build the lexer registered under `alias`
    pub fn create(&self, alias: &str, config: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
        let entry = self.entry(alias)?;
        (entry.factory)(config)
    }

    /// Find the first lexer whose filename patterns match the file name of `path`
    pub fn for_filename(&self, path: &str) -> Option<&LexerInfo> {
        let filename = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
        self.entries
            .iter()
            .map(|entry| &entry.info)
            .find(|info| info.matches_filename(filename))
    }

    /// List all registered lexers in registration order
    pub fn list(&self) -> Vec<&LexerInfo> {
        self.entries.iter().map(|entry| &entry.info).collect()
    }

    fn entry(&self, alias: &str) -> Result<&Entry, LexError> {
        self.by_alias
            .get(alias)
            .map(|idx| &self.entries[*idx])
            .ok_or_else(|| LexError::UnknownLexer(alias.to_string()))
    }

    /// Create a registry with the built-in lexers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            LexerInfo {
                name: "Shell Session",
                aliases: &["shell-session", "shell", "console"],
                filenames: &["*.sh-session", "*.shell-session"],
                mimetypes: &["application/x-shell-session", "application/x-sh-session"],
            },
            shell_session,
        );
        registry.register(
            LexerInfo {
                name: "Git Log",
                aliases: &["git", "git-log"],
                filenames: &["*.git"],
                mimetypes: &[],
            },
            git_log,
        );
        registry.register(
            LexerInfo {
                name: "Git Status",
                aliases: &["git-status"],
                filenames: &[],
                mimetypes: &[],
            },
            git_status,
        );
        registry.register(
            LexerInfo {
                name: "Git Show",
                aliases: &["git-show"],
                filenames: &[],
                mimetypes: &[],
            },
            git_show,
        );
        registry.register(
            LexerInfo {
                name: "Diff",
                aliases: &["diff", "udiff"],
                filenames: &["*.diff", "*.patch"],
                mimetypes: &["text/x-diff", "text/x-patch"],
            },
            diff,
        );
        registry.register(
            LexerInfo {
                name: "Bash",
                aliases: &["bash", "sh"],
                filenames: &["*.sh"],
                mimetypes: &["application/x-sh"],
            },
            command,
        );

        registry
    }
}

fn shell_session(config: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(ShellSessionLexer::with_config(config)?))
}

fn git_log(_: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(GitLogLexer::new()?))
}

fn git_status(_: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(GitStatusLexer::new()))
}

fn git_show(_: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(GitShowLexer::new()?))
}

fn diff(_: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(DiffLexer::new()?))
}

fn command(config: &SessionConfig) -> Result<Box<dyn Lexer>, LexError> {
    Ok(Box::new(CommandLexer::with_config(&config.command)))
}

impl Default for LexerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = LexerRegistry::new();
        assert!(registry.list().is_empty());
        assert!(!registry.has("shell"));
    }

    #[test]
    fn test_default_aliases() {
        let registry = LexerRegistry::with_defaults();
        for alias in [
            "shell-session",
            "shell",
            "console",
            "git",
            "git-log",
            "git-status",
            "git-show",
            "diff",
            "udiff",
            "bash",
            "sh",
        ] {
            assert!(registry.has(alias), "missing alias {}", alias);
        }
        assert_eq!(
            registry.get("console").map(|info| info.canonical_alias()).ok(),
            Some("shell-session")
        );
    }

    #[test]
    fn test_create_builds_named_lexer() {
        let registry = LexerRegistry::with_defaults();
        let config = SessionConfig::default();
        let cases = [
            ("console", "shell-session"),
            ("git", "git"),
            ("git-status", "git-status"),
            ("git-show", "git-show"),
            ("udiff", "diff"),
            ("sh", "bash"),
        ];
        for (alias, name) in cases {
            let lexer = registry.create(alias, &config).expect("lexer builds");
            assert_eq!(lexer.name(), name);
        }
    }

    #[test]
    fn test_unknown_alias() {
        let registry = LexerRegistry::with_defaults();
        match registry.get("cobol") {
            Err(LexError::UnknownLexer(name)) => assert_eq!(name, "cobol"),
            other => panic!("Expected UnknownLexer error, got {:?}", other),
        }
        assert!(registry.create("cobol", &SessionConfig::default()).is_err());
    }

    #[test]
    fn test_for_filename() {
        let registry = LexerRegistry::with_defaults();
        let alias = |path: &str| registry.for_filename(path).map(|info| info.canonical_alias());

        assert_eq!(alias("demo.sh-session"), Some("shell-session"));
        assert_eq!(alias("logs/history.shell-session"), Some("shell-session"));
        assert_eq!(alias("out.git"), Some("git"));
        assert_eq!(alias("fix.patch"), Some("diff"));
        assert_eq!(alias("install.sh"), Some("bash"));
        assert_eq!(alias("notes.txt"), None);
        assert_eq!(alias(".git"), None);
    }

    #[test]
    fn test_later_registration_takes_alias() {
        let mut registry = LexerRegistry::with_defaults();
        registry.register(
            LexerInfo {
                name: "Plain Diff",
                aliases: &["diff"],
                filenames: &[],
                mimetypes: &[],
            },
            diff,
        );
        assert_eq!(registry.get("diff").map(|info| info.name).ok(), Some("Plain Diff"));
        assert_eq!(registry.get("udiff").map(|info| info.name).ok(), Some("Diff"));
    }
}
