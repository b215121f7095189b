//! Command-line interface for termlex
//! This binary tokenizes console transcripts and git output and prints the token stream.
//!
//! Usage:
//!   termlex tokenize `<path>` [--lexer `<name>`] [--format `<format>`] [--config `<file>`]
//!                            [--secondary-prompt `<literal>`] [--bare-continuation]
//!   termlex list-lexers                                     - List the available lexers
//!
//! Set `RUST_LOG=termlex=debug` to see how lines are dispatched.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::process;
use termlex::config::{Loader, SessionOverrides};
use termlex::formats::OutputFormat;
use termlex::lexing::LexError;
use termlex::registry::LexerRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEXER: &str = "shell-session";

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = Command::new("termlex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize shell session transcripts and git output")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a file and print the tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the transcript")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lexer")
                        .long("lexer")
                        .short('l')
                        .help("Lexer alias (default: chosen by file name, else shell-session)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: tokens, tags, json or yaml")
                        .default_value("tokens"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("secondary-prompt")
                        .long("secondary-prompt")
                        .help("Continuation prompt literal (empty to disable)"),
                )
                .arg(
                    Arg::new("bare-continuation")
                        .long("bare-continuation")
                        .help("Treat lines starting with the secondary prompt as continuations")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-lexers").about("List available lexers"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => handle_tokenize_command(tokenize_matches),
        Some(("list-lexers", _)) => {
            handle_list_lexers_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Handle the tokenize command
fn handle_tokenize_command(matches: &ArgMatches) -> Result<(), LexError> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("tokens")
        .parse()?;

    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    let overrides = SessionOverrides {
        secondary_prompt: matches.get_one::<String>("secondary-prompt").cloned(),
        bare_continuation: matches.get_flag("bare-continuation"),
    };
    let config = loader.with_session_overrides(&overrides)?.build()?;

    let registry = LexerRegistry::with_defaults();
    let alias = match matches.get_one::<String>("lexer") {
        Some(alias) => alias.as_str(),
        None => registry
            .for_filename(path)
            .map(|info| info.canonical_alias())
            .unwrap_or(DEFAULT_LEXER),
    };
    let lexer = registry.create(alias, &config.session)?;
    tracing::debug!(lexer = lexer.name(), path, "tokenizing");

    let source = std::fs::read_to_string(path)?;
    let tokens = config.lexer.tokenize(lexer.as_ref(), &source);
    print!("{}", format.serialize(&tokens)?);
    Ok(())
}

/// Handle the list-lexers command
fn handle_list_lexers_command() {
    println!("Available lexers:\n");
    for info in LexerRegistry::with_defaults().list() {
        println!("  {}", info.aliases.join(", "));
        println!("    {}", info.name);
        if !info.filenames.is_empty() {
            println!("    files: {}", info.filenames.join(" "));
        }
    }
}
