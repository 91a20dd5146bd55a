mod build;
mod show;
mod spec_file;
mod tokenize;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compile regex token specs into a DFA and run the scanner it drives over input.
#[derive(Parser, Debug)]
#[command(name = "lexa", version, about)]
pub struct LexaArgs {
    /// Suppress diagnostic messages; only the subcommand's result is printed.
    #[arg(long, global = true)]
    pub no_log: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a token-spec file and report the resulting automaton's size.
    Build(BuildArgs),
    /// Compile a token-spec file and tokenize an input file against it.
    Tokenize(TokenizeArgs),
    /// Compile a token-spec file and print its NFA or DFA as a transition table.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to a token-spec file (one `name = pattern` per line).
    pub spec: PathBuf,
}

#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Path to a token-spec file (one `name = pattern` per line).
    pub spec: PathBuf,
    /// Path to the file to tokenize.
    pub input: PathBuf,
    /// Abort on the first lexical error instead of collecting all of them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to a token-spec file (one `name = pattern` per line).
    pub spec: PathBuf,
    #[arg(long, value_enum, default_value_t = AutomatonKind::Dfa)]
    pub automaton: AutomatonKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutomatonKind {
    Nfa,
    #[default]
    Dfa,
}

fn main() {
    let args = LexaArgs::parse();
    let output = |s: &str| println!("{s}");

    let result = match &args.command {
        Command::Build(a) => build::build(&args, a, output),
        Command::Tokenize(a) => tokenize::tokenize(&args, a, output),
        Command::Show(a) => show::show(&args, a, output),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
