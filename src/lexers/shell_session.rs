//! Shell session lexer
//!
//!     Tokenizes a console transcript: prompts, the commands typed after them and whatever the
//!     commands printed. It is the only lexer here that composes others. Prompt lines are
//!     decorated by the [PromptGrammar], the command text is tokenized by a command lexer,
//!     and output is either passed through or handed to the diff or git lexer when it looks
//!     like their output.
//!
//! The Logical Command
//!
//!     A command may span several physical lines:
//!
//!         user@host:~$ cd /tmp && \
//!         > ls
//!
//!     The command lexer has to see `cd /tmp && \` + newline + `ls` as one text, or it would
//!     misread the line continuation. So the session keeps a logical command: a buffer of
//!     command text plus a list of [Insertions] holding the decoration (prompt segments,
//!     secondary prompt) cut out of the lines, keyed by the buffer length at the time. When
//!     the command is complete, the buffer is tokenized in one go, the decoration is merged
//!     back in and the result is shifted to the absolute offset of the first line.
//!
//! Per-line Dispatch
//!
//!     Each physical line is tried in order:
//!
//!         1. A prompt (with an optional venv marker): flushes any pending command and starts
//!            a new one. Embedded diff/git modes are reset.
//!         2. A continuation, when the buffer ends with a backslash and a line terminator. A
//!            leading secondary prompt is recorded as decoration.
//!         3. A bare continuation: a line starting with the secondary prompt, only when that
//!            mode is enabled.
//!         4. Anything else is output. The pending command is flushed first. Lines from a
//!            `diff ...` line on go to the diff lexer; output of a command starting with
//!            `git` goes to the git lexer; everything else is emitted whole as output.
//!
//!     At the end of the input the pending command is flushed.
//!
//! State
//!
//!     All state lives in [SessionTokens], created fresh for every call. The lexer itself is
//!     immutable, so a single instance can tokenize any number of transcripts concurrently.

use crate::config::SessionConfig;
use crate::lexers::command::CommandLexer;
use crate::lexers::diff::DiffLexer;
use crate::lexers::git_log::GitLogLexer;
use crate::lexers::prompt::PromptGrammar;
use crate::lexing::{
    merge_insertions, Insertions, LexError, Lexer, Line, LineScanner, TokenStream,
};
use crate::token::{Token, TokenKind};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace};

pub const DEFAULT_SECONDARY_PROMPT: &str = "> ";

/// Lexer for interactive shell transcripts.
pub struct ShellSessionLexer {
    prompt: PromptGrammar,
    command: Box<dyn Lexer>,
    diff: Box<dyn Lexer>,
    git: Box<dyn Lexer>,
    secondary_prompt: String,
    bare_continuation: bool,
}

impl ShellSessionLexer {
    pub fn new() -> Result<Self, LexError> {
        Self::with_config(&SessionConfig::default())
    }

    /// Build a session lexer from configuration. The command section is passed on to the
    /// embedded [CommandLexer].
    pub fn with_config(config: &SessionConfig) -> Result<Self, LexError> {
        Ok(ShellSessionLexer {
            prompt: PromptGrammar::new()?,
            command: Box::new(CommandLexer::with_config(&config.command)),
            diff: Box::new(DiffLexer::new()?),
            git: Box::new(GitLogLexer::new()?),
            secondary_prompt: config.secondary_prompt.clone(),
            bare_continuation: config.bare_continuation,
        })
    }

    /// Replace the lexer used for command text.
    pub fn with_command_lexer(mut self, lexer: impl Lexer + 'static) -> Self {
        self.command = Box::new(lexer);
        self
    }

    /// Set the secondary prompt literal. An empty literal disables secondary prompt matching.
    pub fn with_secondary_prompt(mut self, secondary_prompt: impl Into<String>) -> Self {
        self.secondary_prompt = secondary_prompt.into();
        self
    }

    pub fn with_bare_continuation(mut self, enabled: bool) -> Self {
        self.bare_continuation = enabled;
        self
    }

    /// Tokenize `text` lazily.
    pub fn tokens<'a>(&'a self, text: &'a str) -> SessionTokens<'a> {
        SessionTokens {
            lexer: self,
            lines: LineScanner::new(text),
            command: LogicalCommand::default(),
            diff_continuation: false,
            git_continuation: false,
            ready: VecDeque::new(),
            done: false,
        }
    }

    fn starts_with_secondary_prompt(&self, line: &str) -> bool {
        !self.secondary_prompt.is_empty() && line.starts_with(&self.secondary_prompt)
    }
}

impl fmt::Debug for ShellSessionLexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellSessionLexer")
            .field("command", &self.command.name())
            .field("diff", &self.diff.name())
            .field("git", &self.git.name())
            .field("secondary_prompt", &self.secondary_prompt)
            .field("bare_continuation", &self.bare_continuation)
            .finish()
    }
}

impl Lexer for ShellSessionLexer {
    fn name(&self) -> &'static str {
        "shell-session"
    }

    fn stream<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        Box::new(self.tokens(text))
    }
}

/// The command being assembled: text for the command lexer plus the decoration cut out of it.
#[derive(Debug, Default)]
struct LogicalCommand {
    buffer: String,
    insertions: Insertions,
    start: Option<usize>,
}

impl LogicalCommand {
    fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.insertions.is_empty()
    }

    /// The first thing recorded into an empty command fixes its absolute start.
    fn anchor(&mut self, offset: usize) {
        if self.start.is_none() {
            self.start = Some(offset);
        }
    }

    fn insert(&mut self, offset: usize, kind: TokenKind, text: &str) {
        self.anchor(offset);
        self.insertions.push(self.buffer.len(), kind, text);
    }

    fn append(&mut self, offset: usize, text: &str) {
        self.anchor(offset);
        self.buffer.push_str(text);
    }

    fn ends_with_line_continuation(&self) -> bool {
        self.buffer.ends_with("\\\n") || self.buffer.ends_with("\\\r\n")
    }

    fn is_git(&self) -> bool {
        self.buffer.trim_start().starts_with("git")
    }
}

/// Token iterator for one transcript. Created by [ShellSessionLexer::tokens].
pub struct SessionTokens<'a> {
    lexer: &'a ShellSessionLexer,
    lines: LineScanner<'a>,
    command: LogicalCommand,
    diff_continuation: bool,
    git_continuation: bool,
    ready: VecDeque<Token>,
    done: bool,
}

impl<'a> SessionTokens<'a> {
    fn dispatch(&mut self, line: Line<'a>) {
        let lexer = self.lexer;

        if let Some(prompt) = lexer.prompt.match_line(line.text) {
            // Consecutive prompt lines keep growing one logical command.
            trace!(offset = line.offset, "prompt line");
            self.diff_continuation = false;
            self.git_continuation = false;
            let mut position = line.offset;
            for (kind, text) in prompt.decoration() {
                self.command.insert(position, kind, text);
                position += text.len();
            }
            self.command.append(position, prompt.command_text());
            return;
        }

        if self.command.ends_with_line_continuation() {
            trace!(offset = line.offset, "continuation line");
            self.continue_command(line);
            return;
        }

        if lexer.bare_continuation && lexer.starts_with_secondary_prompt(line.text) {
            trace!(offset = line.offset, "bare continuation line");
            self.continue_command(line);
            return;
        }

        let was_git = self.command.is_git();
        self.flush();

        if self.diff_continuation || line.text.starts_with("diff ") {
            if !self.diff_continuation {
                debug!(offset = line.offset, "embedded diff block");
            }
            self.diff_continuation = true;
            self.delegate(lexer.diff.as_ref(), line);
        } else if self.git_continuation || was_git {
            if !self.git_continuation {
                debug!(offset = line.offset, "embedded git output");
            }
            self.git_continuation = true;
            self.delegate(lexer.git.as_ref(), line);
        } else {
            self.ready
                .push_back(Token::new(line.offset, TokenKind::Output, line.text));
        }
    }

    fn continue_command(&mut self, line: Line<'a>) {
        let lexer = self.lexer;
        let secondary = lexer.secondary_prompt.as_str();
        if lexer.starts_with_secondary_prompt(line.text) {
            self.command
                .insert(line.offset, TokenKind::PromptPunctuation, secondary);
            self.command
                .append(line.offset + secondary.len(), &line.text[secondary.len()..]);
        } else {
            self.command.append(line.offset, line.text);
        }
    }

    fn delegate(&mut self, lexer: &dyn Lexer, line: Line<'a>) {
        self.ready.extend(
            lexer
                .stream(line.text)
                .map(|token| token.shifted(line.offset)),
        );
    }

    /// Tokenize the pending command, merge its decoration back in and queue the result.
    fn flush(&mut self) {
        if self.command.is_empty() {
            return;
        }
        let LogicalCommand {
            buffer,
            mut insertions,
            start,
        } = std::mem::take(&mut self.command);
        let start = start.unwrap_or_default();
        debug!(
            offset = start,
            len = buffer.len(),
            insertions = insertions.len(),
            "flushing logical command"
        );
        let merged = merge_insertions(insertions.take(), self.lexer.command.stream(&buffer));
        self.ready
            .extend(merged.into_iter().map(|token| token.shifted(start)));
    }
}

impl<'a> Iterator for SessionTokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.ready.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(line) => self.dispatch(line),
                None => {
                    self.flush();
                    self.done = true;
                }
            }
        }
    }
}
