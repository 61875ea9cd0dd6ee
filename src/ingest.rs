//! Streaming ingestion: wires the CSV tokenizer to typed collectors.
//!
//! The tokenizer (the `csv` crate) produces raw string cells; this module
//! routes each cell to its column's collector, grows the collectors as the
//! row count grows, and records per-cell parse failures as [`Problem`]s.
//! When a directive asks for guessing, a sample prefix of rows is buffered
//! first, the guesser picks a concrete type per column, and the buffered
//! rows are replayed through the freshly created collectors.

use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result, ensure};
use csv::StringRecord;
use log::{debug, warn};

use crate::{
    collector::{self, Collector, ParseOutcome},
    column::{ColumnType, Directive, DirectiveList},
    guess,
    problems::Problem,
};

/// Raw spellings the tokenizer maps to the missing sentinel.
pub const MISSING_TOKENS: &[&str] = &["", "NA"];

/// Applies the missing-token set: `None` is the process-wide sentinel every
/// predicate and collector recognizes.
pub fn as_field(raw: &str) -> Option<&str> {
    if MISSING_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw)
    }
}

/// Everything one parsing session produces. Collectors are exclusively
/// owned by the session and handed over whole.
#[derive(Debug)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub collectors: Vec<Collector>,
    pub problems: Vec<Problem>,
    pub row_count: usize,
}

impl ParsedTable {
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.collectors.iter().map(Collector::type_tag).collect()
    }
}

pub fn open_reader(path: &Path, delimiter: u8) -> Result<csv::Reader<File>> {
    let file = File::open(path).with_context(|| format!("Opening CSV file {path:?}"))?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file))
}

/// Samples up to `sample_rows` rows (0 means the whole file) and guesses a
/// concrete type for every column.
pub fn probe<R: Read>(reader: &mut csv::Reader<R>, sample_rows: usize) -> Result<DirectiveList> {
    let headers = read_headers(reader)?;
    let sample = read_sample(reader, sample_rows)?;
    let mut list = DirectiveList::guess_all(&headers);
    for (index, column) in list.columns.iter_mut().enumerate() {
        let tokens = column_tokens(&sample, index);
        let guessed = guess::guess_type_of(&tokens);
        debug!(
            "Column {} '{}' guessed as {} from {} sampled cell(s)",
            index + 1,
            column.name,
            guessed,
            tokens.len()
        );
        column.directive = Directive::typed(guessed);
    }
    Ok(list)
}

/// Parses the whole stream into one collector per directive.
///
/// `Guess` directives are resolved from a buffered prefix of `sample_rows`
/// rows (0 means buffer everything) before any collector is created; the
/// buffered rows are then replayed so every row passes through exactly one
/// collector per column, in increasing row order.
pub fn read_table<R: Read>(
    reader: &mut csv::Reader<R>,
    directives: &[Directive],
    sample_rows: usize,
) -> Result<ParsedTable> {
    let headers = read_headers(reader)?;
    ensure!(
        directives.len() == headers.len(),
        "Directive list names {} column(s) but the file contains {}",
        directives.len(),
        headers.len()
    );

    let needs_guess = directives.iter().any(Directive::is_guess);
    let buffered = if needs_guess {
        read_sample(reader, sample_rows)?
    } else {
        Vec::new()
    };

    let resolved = resolve_directives(directives, &buffered);
    let mut collectors = collector::create_all(&resolved)?;
    let mut problems = Vec::new();
    let mut row = 0usize;

    for record in &buffered {
        store_record(&mut collectors, record, row, &mut problems)?;
        row += 1;
    }
    for result in reader.records() {
        let record = result.with_context(|| format!("Reading CSV record {}", row + 1))?;
        store_record(&mut collectors, &record, row, &mut problems)?;
        row += 1;
    }

    if !problems.is_empty() {
        warn!("{} cell(s) failed to parse", problems.len());
    }
    Ok(ParsedTable {
        headers,
        collectors,
        problems,
        row_count: row,
    })
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    let headers = reader.headers().context("Reading CSV headers")?;
    Ok(headers.iter().map(|h| h.to_string()).collect())
}

fn read_sample<R: Read>(
    reader: &mut csv::Reader<R>,
    sample_rows: usize,
) -> Result<Vec<StringRecord>> {
    let mut sample = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("Reading CSV record {}", sample.len() + 1))?;
        sample.push(record);
        if sample_rows > 0 && sample.len() >= sample_rows {
            break;
        }
    }
    Ok(sample)
}

fn column_tokens(sample: &[StringRecord], index: usize) -> Vec<Option<String>> {
    sample
        .iter()
        .map(|record| {
            record
                .get(index)
                .and_then(as_field)
                .map(|token| token.to_string())
        })
        .collect()
}

fn resolve_directives(directives: &[Directive], sample: &[StringRecord]) -> Vec<Directive> {
    directives
        .iter()
        .enumerate()
        .map(|(index, directive)| {
            if directive.is_guess() {
                let tokens = column_tokens(sample, index);
                let guessed = guess::guess_type_of(&tokens);
                debug!("Column {} resolved to {} by guessing", index + 1, guessed);
                Directive::typed(guessed)
            } else {
                directive.clone()
            }
        })
        .collect()
}

/// Routes one record's cells into the collectors, growing every store to
/// the new row count first. Cells absent from a short (ragged) record are
/// treated as missing.
fn store_record(
    collectors: &mut [Collector],
    record: &StringRecord,
    row: usize,
    problems: &mut Vec<Problem>,
) -> Result<()> {
    collector::resize_all(collectors, row + 1)?;
    for (column, coll) in collectors.iter_mut().enumerate() {
        let field = record.get(column).and_then(as_field);
        if coll.parse_and_store(row, field) == ParseOutcome::Failed {
            problems.push(Problem {
                row,
                column,
                token: field.unwrap_or_default().to_string(),
                expected: coll.type_tag(),
            });
        }
    }
    Ok(())
}
