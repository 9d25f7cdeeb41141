//! Command-line interface for flatrow
//! This binary maps delimited flat-text files (CSV, tab-delimited) into
//! key-value records.
//!
//! Usage:
//!   flatrow convert `<path>` [--header] [--skip-rows `<n>`] [--output `<enc>`]  - Map a file to records
//!   flatrow columns `<path>` [--header] [--skip-rows `<n>`]                   - Resolve and print column names

use clap::{Arg, ArgAction, ArgMatches, Command};

use flatrow::flat::pipeline::{ErrorPolicy, StreamRunner};
use flatrow::flat::settings::{FlatrowConfig, Loader};

fn main() {
    let matches = Command::new("flatrow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for mapping delimited flat-text files into records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Map a file's lines to records")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1),
                )
                .args(input_args())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output encoding ('jsonl', 'json', or 'yaml')")
                        .default_value("jsonl"),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .action(ArgAction::SetTrue)
                        .help("Report bad rows on stderr and continue"),
                ),
        )
        .subcommand(
            Command::new("columns")
                .about("Resolve and print the column names of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1),
                )
                .args(input_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert(sub_matches),
        Some(("columns", sub_matches)) => handle_columns(sub_matches),
        _ => unreachable!(),
    }
}

/// Input and mapping options shared by every subcommand.
fn input_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .help("TOML configuration file layered over the built-in defaults"),
        Arg::new("format")
            .long("format")
            .short('f')
            .help("Input dialect ('csv' or 'delimited')"),
        Arg::new("delimiter")
            .long("delimiter")
            .short('d')
            .help("Field delimiter override"),
        Arg::new("list-delimiter")
            .long("list-delimiter")
            .help("Separator for multi-value fields"),
        Arg::new("header")
            .long("header")
            .action(ArgAction::SetTrue)
            .help("Treat the first row (after skips) as a header"),
        Arg::new("skip-rows")
            .long("skip-rows")
            .value_parser(clap::value_parser!(u64))
            .help("Number of leading rows to discard"),
        Arg::new("columns")
            .long("columns")
            .help("Comma-separated explicit column names"),
    ]
}

/// Layer CLI flags over the defaults (and an optional user file).
fn load_config(matches: &ArgMatches) -> Result<FlatrowConfig, Box<dyn std::error::Error>> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("input.format", format.as_str())?;
    }
    if let Some(delimiter) = matches.get_one::<String>("delimiter") {
        loader = loader.set_override("input.delimiter", delimiter.as_str())?;
    }
    if let Some(list_delimiter) = matches.get_one::<String>("list-delimiter") {
        loader = loader.set_override("mapping.list_delimiter", list_delimiter.as_str())?;
    }
    if matches.get_flag("header") {
        loader = loader.set_override("mapping.has_header_row", true)?;
    }
    if let Some(skip_rows) = matches.get_one::<u64>("skip-rows") {
        loader = loader.set_override("mapping.max_skip_header_rows", *skip_rows as i64)?;
    }
    if let Some(columns) = matches.get_one::<String>("columns") {
        let columns: Vec<String> = columns.split(',').map(str::to_string).collect();
        loader = loader.set_override("mapping.columns", columns)?;
    }
    Ok(loader.build()?)
}

fn setup(matches: &ArgMatches) -> (flatrow::flat::mapping::RowMapper, String) {
    let path = matches.get_one::<String>("path").unwrap();
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let mapper = config.build_mapper().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    (mapper, source)
}

/// Handle the convert command
fn handle_convert(matches: &ArgMatches) {
    let output = matches.get_one::<String>("output").unwrap();
    let (mut mapper, source) = setup(matches);

    let policy = if matches.get_flag("keep-going") {
        ErrorPolicy::SkipRow
    } else {
        ErrorPolicy::Fail
    };
    let stream = StreamRunner::new(policy)
        .run(&mut mapper, source.lines())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    for failure in &stream.failures {
        eprintln!("line {}: {}", failure.line_number, failure.error);
    }

    match output.as_str() {
        "jsonl" => {
            for record in &stream.records {
                let line = serde_json::to_string(record).unwrap_or_else(|e| {
                    eprintln!("Serialization error: {}", e);
                    std::process::exit(1);
                });
                println!("{}", line);
            }
        }
        "json" => {
            let text = serde_json::to_string_pretty(&stream.records).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", text);
        }
        "yaml" => {
            let text = serde_yaml::to_string(&stream.records).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            print!("{}", text);
        }
        other => {
            eprintln!("Unknown output encoding: {}", other);
            std::process::exit(1);
        }
    }
}

/// Handle the columns command
fn handle_columns(matches: &ArgMatches) {
    let (mut mapper, source) = setup(matches);

    mapper.reset();
    for line in source.lines() {
        if mapper.column_names().is_some() {
            break;
        }
        if let Err(e) = mapper.process_row(line) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match mapper.column_names() {
        Some(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        None => {
            eprintln!("No rows to derive column names from");
            std::process::exit(1);
        }
    }
}
