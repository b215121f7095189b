//! Prompt scenarios for the shell session lexer
//!
//! Each case is a single prompt line run through `Lexer::lex`, so a trailing newline is added
//! and folded into the terminator when no command follows.

use rstest::rstest;
use termlex::token::kinds_and_text;
use termlex::{Lexer, ShellSessionLexer, TokenKind};

use termlex::TokenKind::{
    Builtin, PromptDirectory as Dir, PromptGitBranch as Branch, PromptPunctuation as Punct,
    PromptUserHost as UserHost, PromptVirtualEnv as Venv, StringSingle, Whitespace as Ws,
};

fn lex(source: &str) -> Vec<(TokenKind, String)> {
    let lexer = ShellSessionLexer::new().expect("session lexer builds");
    let tokens = lexer.lex(source);
    kinds_and_text(&tokens)
        .into_iter()
        .map(|(kind, text)| (kind, text.to_string()))
        .collect()
}

fn owned(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    expected
        .iter()
        .map(|(kind, text)| (*kind, text.to_string()))
        .collect()
}

#[rstest]
#[case::bare("user@host:~$", &[
    (UserHost, "user@host"), (Punct, ":"), (Dir, "~"), (Punct, "$\n"),
])]
#[case::bare_with_space("user@host:~ $", &[
    (UserHost, "user@host"), (Punct, ":"), (Dir, "~"), (Ws, " "), (Punct, "$\n"),
])]
#[case::git_branch("user@host:~/project (main) $", &[
    (UserHost, "user@host"), (Punct, ":"), (Dir, "~/project"), (Ws, " "),
    (Branch, "(main)"), (Ws, " "), (Punct, "$\n"),
])]
#[case::virtualenv("(venv) user@host:~/project $", &[
    (Venv, "(venv)"), (Ws, " "), (UserHost, "user@host"), (Punct, ":"),
    (Dir, "~/project"), (Ws, " "), (Punct, "$\n"),
])]
#[case::virtualenv_and_git_branch("(venv) user@host:~/project (main) $", &[
    (Venv, "(venv)"), (Ws, " "), (UserHost, "user@host"), (Punct, ":"),
    (Dir, "~/project"), (Ws, " "), (Branch, "(main)"), (Ws, " "), (Punct, "$\n"),
])]
#[case::bracketed("[user@host:~/project] $", &[
    (Punct, "["), (UserHost, "user@host"), (Punct, ":"), (Dir, "~/project"),
    (Punct, "]"), (Ws, " "), (Punct, "$\n"),
])]
#[case::bracketed_with_git_branch("[user@host:~/project (main)] $", &[
    (Punct, "["), (UserHost, "user@host"), (Punct, ":"), (Dir, "~/project"), (Ws, " "),
    (Branch, "(main)"), (Punct, "]"), (Ws, " "), (Punct, "$\n"),
])]
#[case::bracketed_with_virtualenv("(venv) [user@host:~/project] $", &[
    (Venv, "(venv)"), (Ws, " "), (Punct, "["), (UserHost, "user@host"), (Punct, ":"),
    (Dir, "~/project"), (Punct, "]"), (Ws, " "), (Punct, "$\n"),
])]
#[case::root_prompt("root@box /etc #", &[
    (UserHost, "root@box"), (Ws, " "), (Dir, "/etc"), (Ws, " "), (Punct, "#\n"),
])]
#[case::zsh_prompt("me@mac ~ %", &[
    (UserHost, "me@mac"), (Ws, " "), (Dir, "~"), (Ws, " "), (Punct, "%\n"),
])]
fn test_prompt_decoration(#[case] source: &str, #[case] expected: &[(TokenKind, &str)]) {
    assert_eq!(lex(source), owned(expected));
}

#[test]
fn test_prompt_with_command() {
    let tokens = lex("(venv) user@host:~/project (main) $ echo 'Hello world!'\n");
    assert_eq!(
        tokens,
        owned(&[
            (Venv, "(venv)"),
            (Ws, " "),
            (UserHost, "user@host"),
            (Punct, ":"),
            (Dir, "~/project"),
            (Ws, " "),
            (Branch, "(main)"),
            (Ws, " "),
            (Punct, "$"),
            (Ws, " "),
            (Builtin, "echo"),
            (Ws, " "),
            (StringSingle, "'Hello world!'"),
            (Ws, "\n"),
        ])
    );
}

#[test]
fn test_prompt_command_and_output() {
    let tokens = lex("user@host:~$ echo 'Hello world!'\nHello world!\n");
    assert_eq!(
        tokens.last(),
        Some(&(TokenKind::Output, "Hello world!\n".to_string()))
    );
}

#[test]
fn test_backslash_continuation() {
    let tokens = lex("user@host:~$ echo \\\ncd /tmp\n");
    assert_eq!(
        tokens[4..],
        owned(&[
            (Ws, " "),
            (Builtin, "echo"),
            (Ws, " "),
            (TokenKind::StringEscape, "\\\n"),
            (Builtin, "cd"),
            (Ws, " "),
            (TokenKind::Text, "/tmp"),
            (Ws, "\n"),
        ])[..]
    );
}

#[test]
fn test_standalone_command_matches_session_tail() {
    let command = "for f in *.rs; do wc -l \"$f\"; done\n";
    let standalone: Vec<_> = termlex::lexers::CommandLexer::new()
        .stream(command)
        .map(|t| (t.kind, t.text))
        .collect();
    let session = lex(&format!("user@host:~/src $ {}", command));
    assert!(session.ends_with(&standalone));
}
