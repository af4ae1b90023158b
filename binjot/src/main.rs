//! jot command-line JSON validator.
//!
//! Usage: jot [OPTIONS] [FILE]
//!
//! Options:
//!   --relaxed                   Enable every syntax relaxation
//!   --allow-infinity-and-nan    Accept Infinity, -Infinity, and NaN
//!   --allow-plus-sign           Accept a leading + on numbers
//!   --allow-single-quotes       Accept single-quoted strings
//!   --allow-leading-dot         Accept numbers starting with .
//!   -h, --help                  Print help
//!   -V, --version               Print version

use std::process;

use libjot::{parse_with_options, ParseOptions, Source};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut options = ParseOptions::default_options();
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("jot {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--relaxed" => {
                options = ParseOptions::relaxed_options();
            }
            "--allow-infinity-and-nan" => {
                options.allow_infinity_and_nan = true;
            }
            "--allow-plus-sign" => {
                options.allow_explicit_plus_sign_in_mantissa = true;
            }
            "--allow-single-quotes" => {
                options.allow_single_quote_strings = true;
            }
            "--allow-leading-dot" => {
                options.allow_number_to_start_with_dot = true;
            }
            "-" => {
                // Explicit stdin; input_path stays None.
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(2);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(2);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let source = match input_path {
        Some(path) => Source::load_file(path),
        None => Source::load_stdin(),
    };
    let source = match source {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    match parse_with_options(&source, options) {
        Ok(_) => {
            if let Some(path) = input_path {
                println!("{}: ok", path);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "jot - JSON validator with precise error locations

USAGE:
    jot [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided, or when FILE is -)

OPTIONS:
    --relaxed                   Enable every syntax relaxation below

    --allow-infinity-and-nan    Accept the Infinity, -Infinity, and NaN
                                number literals

    --allow-plus-sign           Accept an explicit leading + on numbers

    --allow-single-quotes       Accept single-quoted strings

    --allow-leading-dot         Accept numbers that start with . and no
                                integer digits

    -h, --help                  Print help

    -V, --version               Print version

Validation stops at the first syntax error, printed to stderr as
file:line:column: message with 1-based, tab-expanded columns. Exit status
is 0 when the input parses and 1 otherwise.

EXAMPLES:
    # Validate a file strictly (RFC 8259)
    jot config.json

    # Validate from stdin
    cat config.json | jot

    # Accept the relaxed grammar
    jot --relaxed generated.json

    # Accept only single-quoted strings on top of strict JSON
    jot --allow-single-quotes legacy.json
"
    );
}
