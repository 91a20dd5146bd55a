use crate::spec_file;
use crate::{LexaArgs, TokenizeArgs};
use lexa::Generator;
use std::fs;

pub fn tokenize(
    main_args: &LexaArgs,
    args: &TokenizeArgs,
    mut output: impl FnMut(&str),
) -> Result<(), String> {
    let log = |s: &str| {
        if !main_args.no_log {
            println!("{s}")
        }
    };
    macro_rules! log {
        ($($t:tt)*) => (log(&format!($($t)*)))
    }
    macro_rules! output {
        ($($t:tt)*) => (output(&format!($($t)*)))
    }

    let spec = spec_file::load(&args.spec).map_err(|e| e.to_string())?;
    let mut gen = Generator::new();
    for (name, pattern) in &spec.entries {
        gen.add_token(name.as_str(), pattern.as_str());
    }
    gen.build().map_err(|e| e.to_string())?;
    log!("Compiled {} token(s) from {}", spec.entries.len(), args.spec.display());

    let input = fs::read_to_string(&args.input)
        .map_err(|e| format!("could not read {}: {e}", args.input.display()))?;

    if args.strict {
        let tokens = gen.tokenize_strict(&input).map_err(|e| e.to_string())?;
        for token in &tokens {
            output!(
                "{}:{}: {} {:?}",
                token.line,
                token.column,
                token.kind,
                token.lexeme
            );
        }
        return Ok(());
    }

    let outcome = gen.tokenize(&input).map_err(|e| e.to_string())?;
    for token in &outcome.tokens {
        output!(
            "{}:{}: {} {:?}",
            token.line,
            token.column,
            token.kind,
            token.lexeme
        );
    }
    for error in &outcome.errors {
        log!("{}:{}: {error}", error.line, error.column);
    }
    if !outcome.errors.is_empty() {
        return Err(format!("{} lexical error(s)", outcome.errors.len()));
    }
    Ok(())
}
