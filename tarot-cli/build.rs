use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the conversion surface from src/main.rs. Build scripts can't
// access src/ modules, so the completion command is declared again here.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("tarot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting tarot decks between nested and tabular forms")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file or workbook directory")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::AnyPath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target format (json, workbook)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "tarot", &outdir)?;
    generate_to(Zsh, &mut cmd, "tarot", &outdir)?;
    generate_to(Fish, &mut cmd, "tarot", &outdir)?;

    Ok(())
}
