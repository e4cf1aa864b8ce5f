//! Command-line interface for legis
//! Converts plain-text legal instruments into Akoma Ntoso XML and back.
//!
//! Usage:
//!   legis convert `<path>` [--from `<format>`] [--to `<format>`] [--rule `<rule>`]  - Convert a file
//!   legis unparse `<path>`                                                    - Akoma Ntoso back to text
//!   legis list-formats                                                        - List registered formats
//!   legis list-rules                                                          - List grammar entry rules
//!
//! `--config <file>` and `-v` are accepted by every subcommand. Without `--config`, a
//! `legis.toml` in the working directory is picked up when present.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use legis_babel::formats::akn::{
    serialize_document, serialize_node, serialize_preface, serialize_schedules,
};
use legis_babel::{unparse, AknFormat, FormatRegistry, JsonFormat, TextFormat, TextSerializer};
use legis_config::{LegisConfig, Loader};
use legis_parser::{assign_fragment, Document, EntryRule, Fragment, Node, NodeKind};
use tracing_subscriber::EnvFilter;

const LOCAL_CONFIG: &str = "legis.toml";

fn main() {
    let matches = cli().get_matches();

    let filter = match matches.get_count("verbose") {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&matches) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("legis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts plain-text legal instruments to Akoma Ntoso XML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more; repeat for more detail (-v, -vv, -vvv)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document between formats")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .short('f')
                        .help("Input format (default: guessed from the extension, else 'text')"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Output format")
                        .default_value("akn"),
                )
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .short('r')
                        .help("Grammar entry rule for text input (see list-rules)")
                        .default_value("act"),
                )
                .arg(
                    Arg::new("generation-date")
                        .long("generation-date")
                        .help("Manifestation date stamped on XML output, YYYY-MM-DD (default: today)")
                        .value_parser(parse_date),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("unparse")
                .about("Render Akoma Ntoso XML back into escaped plain text")
                .arg(
                    Arg::new("path")
                        .help("Path to the XML file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available formats"))
        .subcommand(Command::new("list-rules").about("List grammar entry rules"))
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches),
        Some(("unparse", unparse_matches)) => handle_unparse_command(unparse_matches),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        Some(("list-rules", _)) => {
            handle_list_rules_command();
            Ok(())
        }
        _ => unreachable!("clap enforces a subcommand"),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<LegisConfig> {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    loader.build().context("loading configuration")
}

fn read_input(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {path}"))
}

fn write_output(output: &str, target: Option<&String>) -> anyhow::Result<()> {
    match target {
        Some(path) => fs::write(path, output).with_context(|| format!("writing {path}")),
        None => {
            if output.ends_with('\n') {
                print!("{output}");
            } else {
                println!("{output}");
            }
            Ok(())
        }
    }
}

/// Formats configured from `config`, with the manifestation stamped `generation_date`.
fn registry(config: &LegisConfig, generation_date: NaiveDate) -> anyhow::Result<FormatRegistry> {
    let mut registry = FormatRegistry::new();
    registry.register(AknFormat::new(config.identity(), generation_date));
    registry.register(JsonFormat);
    registry.register(
        TextFormat::new(config.parser()?).with_id_prefix(config.output.id_prefix.clone()),
    );
    Ok(registry)
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .context("missing input path")?;
    let to = matches.get_one::<String>("to").context("missing --to")?;
    let rule: EntryRule = matches
        .get_one::<String>("rule")
        .context("missing --rule")?
        .parse()?;
    let generation_date = matches
        .get_one::<NaiveDate>("generation-date")
        .copied()
        .or(config.output.generation_date)
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let registry = registry(&config, generation_date)?;
    let from = match matches.get_one::<String>("from") {
        Some(from) => from.clone(),
        None => Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| registry.for_extension(ext))
            .map_or_else(|| "text".to_string(), |format| format.name().to_string()),
    };
    tracing::info!(%path, %from, %to, %rule, %generation_date, "converting");

    let source = read_input(path)?;
    let output = if rule == EntryRule::Act {
        registry.convert(&source, &from, to)?
    } else {
        if from != "text" {
            bail!("--rule {rule} only applies to text input, not '{from}'");
        }
        let parser = config.parser()?;
        let fragment = assign_fragment(parser.parse(&source, rule)?, &config.output.id_prefix);
        render_fragment(fragment, to, &config, generation_date)?
    };
    write_output(&output, matches.get_one::<String>("output"))
}

/// Renders the result of a partial parse, which the registry formats cannot take.
fn render_fragment(
    fragment: Fragment,
    to: &str,
    config: &LegisConfig,
    generation_date: NaiveDate,
) -> anyhow::Result<String> {
    let output = match (to, fragment) {
        ("json", fragment) => serde_json::to_string_pretty(&fragment)?,
        ("akn", Fragment::Act(document)) => {
            serialize_document(&document, &config.identity(), generation_date)?
        }
        ("akn", Fragment::Node(node)) => serialize_node(&node)?,
        ("akn", Fragment::Preface(preface)) => serialize_preface(&preface),
        ("akn", Fragment::Schedules(schedules)) => {
            serialize_schedules(&schedules, &config.identity(), generation_date)?
        }
        ("text", fragment) => {
            let document = match fragment {
                Fragment::Act(document) => document,
                Fragment::Node(node) => Document::new(node),
                Fragment::Preface(preface) => Document {
                    preface: Some(preface),
                    ..Document::new(Node::new(NodeKind::Body))
                },
                Fragment::Schedules(schedules) => Document {
                    schedules: Some(schedules),
                    ..Document::new(Node::new(NodeKind::Body))
                },
            };
            let jurisdiction = config.jurisdiction()?;
            TextSerializer::new(&jurisdiction).serialize_document(&document)
        }
        (other, _) => bail!("Format '{other}' not found"),
    };
    Ok(output)
}

/// Handle the unparse command
fn handle_unparse_command(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .context("missing input path")?;
    let xml = read_input(path)?;
    let text = unparse(&xml, &config.jurisdiction()?)?;
    write_output(&text, None)
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut capabilities = Vec::new();
        if format.supports_parsing() {
            capabilities.push("parse");
        }
        if format.supports_serialization() {
            capabilities.push("serialize");
        }
        println!("  {} ({})", name, capabilities.join(", "));
        println!("    {}", format.description());
        println!("    extensions: {}", format.file_extensions().join(", "));
        println!();
    }
}

/// Handle the list-rules command
fn handle_list_rules_command() {
    for rule in EntryRule::ALL {
        println!("{rule}");
    }
}
