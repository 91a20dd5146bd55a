use crate::spec_file;
use crate::{AutomatonKind, LexaArgs, ShowArgs};
use lexa::Generator;

pub fn show(
    main_args: &LexaArgs,
    args: &ShowArgs,
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

    match args.automaton {
        AutomatonKind::Nfa => {
            let nfa = gen.nfa().expect("just built");
            output!("{}", nfa.to_table());
        }
        AutomatonKind::Dfa => {
            let dfa = gen.dfa().expect("just built");
            output!("{}", dfa.to_table());
        }
    }

    Ok(())
}
