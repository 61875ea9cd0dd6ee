use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Guess and collect typed columns from delimited text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Guess a column type for every column and print or save the result
    Guess(GuessArgs),
    /// Parse a file into typed columns and report per-cell failures
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct GuessArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Optional destination for the guessed directive list (YAML)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Number of rows to sample when guessing (0 means full scan)
    #[arg(long, default_value_t = 1000)]
    pub sample_rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter, default_value = ",")]
    pub delimiter: u8,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input CSV file to parse
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Per-column directives: `integer,guess,skip` or compact codes `i?_`
    #[arg(short = 't', long = "types")]
    pub types: Option<String>,
    /// Directive list file (YAML) produced by `guess -o`
    #[arg(short = 'm', long = "meta")]
    pub meta: Option<PathBuf>,
    /// Number of rows buffered to resolve `guess` directives (0 buffers all)
    #[arg(long, default_value_t = 1000)]
    pub sample_rows: usize,
    /// Maximum number of parse problems to print individually
    #[arg(long, default_value_t = 20)]
    pub max_problems: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter, default_value = ",")]
    pub delimiter: u8,
}

pub(crate) fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "," => Ok(b','),
        ";" => Ok(b';'),
        "|" => Ok(b'|'),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        other if other.len() == 1 && other.is_ascii() => Ok(other.as_bytes()[0]),
        other => Err(format!("Unsupported delimiter '{other}'")),
    }
}
