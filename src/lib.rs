pub mod cli;
pub mod collector;
pub mod column;
pub mod grammar;
pub mod guess;
pub mod ingest;
pub mod problems;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};

use crate::cli::{Cli, Commands};
use crate::collector::Collector;
use crate::column::{ColumnType, DirectiveList};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("coltype", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Guess(args) => handle_guess(&args),
        Commands::Parse(args) => handle_parse(&args),
    }
}

fn handle_guess(args: &cli::GuessArgs) -> Result<()> {
    info!(
        "Guessing column types for '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(args.delimiter)
    );
    let mut reader = ingest::open_reader(&args.input, args.delimiter)?;
    let list = ingest::probe(&mut reader, args.sample_rows)
        .with_context(|| format!("Guessing column types from {:?}", args.input))?;
    for column in &list.columns {
        println!("{}: {}", column.name, column.directive);
    }
    if let Some(path) = &args.output {
        list.save(path)
            .with_context(|| format!("Writing directive list to {path:?}"))?;
        info!(
            "Directive list for {} column(s) written to {:?}",
            list.columns.len(),
            path
        );
    }
    Ok(())
}

fn handle_parse(args: &cli::ParseArgs) -> Result<()> {
    info!(
        "Parsing '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(args.delimiter)
    );
    let mut reader = ingest::open_reader(&args.input, args.delimiter)?;
    let headers = reader
        .headers()
        .context("Reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    let list = match (&args.types, &args.meta) {
        (Some(_), Some(_)) => bail!("--types and --meta are mutually exclusive"),
        (Some(spec), None) => DirectiveList::parse_spec(spec, &headers)?,
        (None, Some(path)) => {
            DirectiveList::load(path).with_context(|| format!("Loading directives from {path:?}"))?
        }
        (None, None) => DirectiveList::guess_all(&headers),
    };

    let table = ingest::read_table(&mut reader, &list.directives(), args.sample_rows)
        .with_context(|| format!("Parsing {:?}", args.input))?;

    let failure_counts = problems::count_by_column(&table.problems, table.collectors.len());
    println!("rows: {}", table.row_count);
    for ((name, collector), failures) in table
        .headers
        .iter()
        .zip(&table.collectors)
        .zip(&failure_counts)
    {
        let missing = match collector.type_tag() {
            ColumnType::Skip => "-".to_string(),
            _ => count_missing(collector, table.row_count).to_string(),
        };
        println!(
            "{}: {} (missing: {}, failed: {})",
            name,
            collector.type_tag(),
            missing,
            failures
        );
    }

    if !table.problems.is_empty() {
        warn!("{} parse problem(s)", table.problems.len());
        for problem in table.problems.iter().take(args.max_problems) {
            warn!("{problem}");
        }
        if table.problems.len() > args.max_problems {
            warn!("... and {} more", table.problems.len() - args.max_problems);
        }
    }
    Ok(())
}

fn count_missing(collector: &Collector, rows: usize) -> usize {
    (0..rows).filter(|&i| collector.is_missing(i)).count()
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
