// Command-line interface for the tarot deck converter.
//
// This binary moves decks between the nested JSON document and the tabular
// workbook container, using the tarot-babel crate for all conversion logic.
// The CLI owns everything the library refuses to do: filesystem access,
// terminal output, process exit codes.
//
// Converting:
//
// The conversion needs a to and from pair. The from side is auto-detected
// (file extension via the format registry, directories are workbooks) and
// can be overridden with an explicit --from flag.
// Usage:
//  tarot <input> --to <format> [--from <format>] [--output <path>]  - Convert (default)
//  tarot convert <input> --to <format> ...                          - Same, explicit
//  tarot lint <workbook-dir>                                        - Check a workbook
//  tarot --list-formats                                             - List formats
//
// The workbook container on disk is a directory with one <Sheet>.csv per
// table plus a constraints.json sidecar. Sheet file names follow the
// [sheets] section of tarot.toml, so localized workbooks work unchanged.

use clap::{Arg, ArgAction, Command, ValueHint};
use std::fs;
use std::path::Path;
use std::process;

use tarot_babel::formats::{JsonFormat, SheetNames, WorkbookFormat};
use tarot_babel::schema::lint::lint;
use tarot_babel::schema::TableId;
use tarot_babel::{FormatRegistry, SerializedDeck, Sheet, Workbook};
use tarot_config::{Loader, TarotConfig};

fn build_cli() -> Command {
    Command::new("tarot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting tarot decks between nested and tabular forms")
        .long_about(
            "tarot converts deck files between the nested JSON document and the\n\
            tabular workbook container (a directory of CSV sheets plus an advisory\n\
            constraints.json sidecar).\n\n\
            Examples:\n  \
            tarot deck.json --to workbook -o deck.tables   # JSON to workbook\n  \
            tarot deck.tables --to json                    # Workbook to JSON (stdout)\n  \
            tarot lint deck.tables                         # Check a workbook",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tarot.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a deck between formats (default command)")
                .long_about(
                    "Convert decks between formats.\n\n\
                    Supported formats:\n  \
                    - json:     Nested deck document (.json)\n  \
                    - workbook: Tabular sheet container (directory of CSV files)\n\n\
                    The source format is auto-detected: files by extension,\n\
                    directories as workbooks. Text output goes to stdout by\n\
                    default; workbook output always needs --output <dir>.\n\n\
                    Examples:\n  \
                    tarot convert deck.json --to workbook -o deck.tables\n  \
                    tarot convert deck.tables --to json -o deck.json\n  \
                    tarot deck.json --to workbook -o deck.tables   # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file or workbook directory")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::AnyPath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output path (defaults to stdout for text formats)")
                        .value_hint(ValueHint::AnyPath),
                ),
        )
        .subcommand(
            Command::new("lint")
                .about("Check a workbook against the constraint model")
                .long_about(
                    "Decode a workbook directory and report every row that drifted\n\
                    from the constraint model: broken card references, values outside\n\
                    the enumerations, out-of-range coordinates, missing or duplicated\n\
                    meaning rows.\n\n\
                    Findings are advisory; conversion never blocks on them. The exit\n\
                    code is 1 when any finding is reported.",
                )
                .arg(
                    Arg::new("input")
                        .help("Workbook directory")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                ),
        )
}

fn main() {
    init_tracing();

    // Try to parse args. If no subcommand is provided, inject "convert".
    let args: Vec<String> = std::env::args().collect();
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(error) => {
            // A bare input path means the default command was omitted.
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "lint"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(matches) => matches,
                    Err(second_error) => second_error.exit(),
                }
            } else {
                error.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, to, output, &config);
        }
        Some(("lint", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_lint_command(input, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_cli_config(path: Option<&str>) -> TarotConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("tarot.toml"),
    };
    match loader.build() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error loading configuration: {error}");
            process::exit(1);
        }
    }
}

/// Build a registry whose formats carry the configured knobs.
fn registry_for(config: &TarotConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(if config.convert.json.pretty {
        JsonFormat::new()
    } else {
        JsonFormat::compact()
    });

    let mut workbook = WorkbookFormat::with_names(SheetNames::from(&config.sheets));
    if !config.convert.workbook.write_constraints {
        workbook = workbook.without_constraints();
    }
    registry.register(workbook);
    registry
}

fn handle_list_formats() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:");
    for name in registry.list_formats() {
        let format = registry.get(&name).expect("listed formats exist");
        println!("  {:<10} {}", name, format.description());
    }
}

fn handle_convert_command(
    input: &str,
    from: Option<&str>,
    to: &str,
    output: Option<&str>,
    config: &TarotConfig,
) {
    let registry = registry_for(config);
    let names = SheetNames::from(&config.sheets);

    let from = match from {
        Some(format) => format.to_string(),
        None => detect_input_format(&registry, input),
    };

    let source = read_input(input, &from, &names);
    let deck = registry.parse(&source, &from).unwrap_or_else(|error| {
        eprintln!("Error parsing '{input}': {error}");
        process::exit(1);
    });
    let serialized = registry.serialize(&deck, to).unwrap_or_else(|error| {
        eprintln!("Error serializing to '{to}': {error}");
        process::exit(1);
    });
    write_output(serialized, output);
}

fn detect_input_format(registry: &FormatRegistry, input: &str) -> String {
    if Path::new(input).is_dir() {
        return "workbook".to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from path '{input}'");
            eprintln!("Please specify --from explicitly");
            process::exit(1);
        }
    }
}

fn read_input(input: &str, from: &str, names: &SheetNames) -> SerializedDeck {
    if from == "workbook" {
        SerializedDeck::Sheets(read_workbook_dir(Path::new(input), names))
    } else {
        let text = fs::read_to_string(input).unwrap_or_else(|error| {
            eprintln!("Error reading file '{input}': {error}");
            process::exit(1);
        });
        SerializedDeck::Text(text)
    }
}

/// Read a workbook directory: one <Sheet>.csv per table, configured name
/// first, canonical identifier as fallback. Absent sheets are simply absent.
fn read_workbook_dir(dir: &Path, names: &SheetNames) -> Workbook {
    let mut sheets = Vec::new();
    for id in TableId::ALL {
        let candidates = [
            dir.join(format!("{}.csv", names.for_table(id))),
            dir.join(format!("{}.csv", id.name())),
        ];
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path).unwrap_or_else(|error| {
                eprintln!("Error reading sheet '{}': {error}", path.display());
                process::exit(1);
            });
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(id.name())
                .to_string();
            sheets.push(Sheet { name, content });
            break;
        }
    }
    if sheets.is_empty() {
        eprintln!("Error: no sheets found in '{}'", dir.display());
        process::exit(1);
    }
    Workbook {
        sheets,
        constraints: None,
    }
}

fn write_output(serialized: SerializedDeck, output: Option<&str>) {
    match serialized {
        SerializedDeck::Text(text) => match output {
            Some(path) => fs::write(path, text).unwrap_or_else(|error| {
                eprintln!("Error writing '{path}': {error}");
                process::exit(1);
            }),
            None => println!("{text}"),
        },
        SerializedDeck::Sheets(workbook) => {
            let Some(dir) = output else {
                eprintln!("Error: workbook output needs --output <dir> (sheets cannot go to stdout)");
                process::exit(1);
            };
            write_workbook_dir(Path::new(dir), &workbook);
        }
    }
}

fn write_workbook_dir(dir: &Path, workbook: &Workbook) {
    fs::create_dir_all(dir).unwrap_or_else(|error| {
        eprintln!("Error creating directory '{}': {error}", dir.display());
        process::exit(1);
    });
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        fs::write(&path, &sheet.content).unwrap_or_else(|error| {
            eprintln!("Error writing sheet '{}': {error}", path.display());
            process::exit(1);
        });
    }
    if let Some(manifest) = &workbook.constraints {
        let path = dir.join("constraints.json");
        fs::write(&path, manifest).unwrap_or_else(|error| {
            eprintln!("Error writing manifest '{}': {error}", path.display());
            process::exit(1);
        });
    }
}

fn handle_lint_command(input: &str, config: &TarotConfig) {
    let names = SheetNames::from(&config.sheets);
    let workbook = read_workbook_dir(Path::new(input), &names);
    let format = WorkbookFormat::with_names(names);
    let tables = format.read_tables(&workbook).unwrap_or_else(|error| {
        eprintln!("Error reading workbook '{input}': {error}");
        process::exit(1);
    });

    let violations = lint(&tables);
    if violations.is_empty() {
        println!("OK: no constraint violations");
        return;
    }
    for violation in &violations {
        println!("{violation}");
    }
    process::exit(1);
}
