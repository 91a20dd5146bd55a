use crate::spec_file;
use crate::{BuildArgs, LexaArgs};
use lexa::Generator;

pub fn build(
    main_args: &LexaArgs,
    args: &BuildArgs,
    #[allow(unused_variables, unused_mut)] mut output: impl FnMut(&str),
) -> Result<(), String> {
    #[allow(unused_variables)]
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
    log!("Loaded {} token spec(s) from {}", spec.entries.len(), args.spec.display());

    let mut gen = Generator::new();
    for (name, pattern) in &spec.entries {
        gen.add_token(name.as_str(), pattern.as_str());
    }
    gen.build().map_err(|e| e.to_string())?;

    let dfa = gen.dfa().expect("just built");
    output!(
        "OK: {} token(s) compiled into a DFA with {} state(s) over an alphabet of {} byte(s)",
        spec.entries.len(),
        dfa.states().len(),
        dfa.alphabet().len()
    );
    Ok(())
}
