//! Typed per-column value stores and their factory.
//!
//! A [`Collector`] accumulates one column's parsed values as rows stream in.
//! The five kinds form a closed sum type; the factory matches exhaustively,
//! so adding a kind is a compile-checked change. Each non-skip variant owns
//! a `Vec<Option<T>>` where `None` marks a missing cell, whether the input
//! was absent or failed its grammar.

use thiserror::Error;

use crate::{
    column::{ColumnType, Directive},
    grammar,
};

/// Fatal conditions. Per-cell grammar failures are not errors at this level;
/// they surface as [`ParseOutcome::Failed`] and leave the slot missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectorError {
    /// An unrecognized directive, or a `guess` directive that was never
    /// resolved to a concrete type. A configuration error, not a data error:
    /// collector construction for the whole table must abort.
    #[error("Unsupported column type '{0}'")]
    UnsupportedColumnType(String),
    /// Collectors only grow; a resize below the current length would drop
    /// parsed values.
    #[error("Cannot resize collector from {current} to {requested} row(s): shrinking is not supported")]
    InvalidSize { current: usize, requested: usize },
}

/// Result of one `parse_and_store` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A typed value was stored at the slot.
    Stored,
    /// The input was the missing sentinel; the slot is marked missing.
    Missing,
    /// The token failed the collector's grammar (or overflowed its range);
    /// the slot is marked missing and the caller should record a problem.
    Failed,
}

/// One column's growable typed store.
#[derive(Debug, Clone, PartialEq)]
pub enum Collector {
    Skip,
    Logical(Vec<Option<bool>>),
    Integer(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    Character(Vec<Option<String>>),
}

impl Collector {
    /// Constructs the empty collector for a concrete type. Infallible: the
    /// match is exhaustive over the closed set of kinds.
    pub fn new(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Skip => Collector::Skip,
            ColumnType::Logical => Collector::Logical(Vec::new()),
            ColumnType::Integer => Collector::Integer(Vec::new()),
            ColumnType::Double => Collector::Double(Vec::new()),
            ColumnType::Character => Collector::Character(Vec::new()),
        }
    }

    pub fn type_tag(&self) -> ColumnType {
        match self {
            Collector::Skip => ColumnType::Skip,
            Collector::Logical(_) => ColumnType::Logical,
            Collector::Integer(_) => ColumnType::Integer,
            Collector::Double(_) => ColumnType::Double,
            Collector::Character(_) => ColumnType::Character,
        }
    }

    /// Current store length; always 0 for skip.
    pub fn len(&self) -> usize {
        match self {
            Collector::Skip => 0,
            Collector::Logical(values) => values.len(),
            Collector::Integer(values) => values.len(),
            Collector::Double(values) => values.len(),
            Collector::Character(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grows the store to `n` rows, marking new slots missing. Shrinking is
    /// a [`CollectorError::InvalidSize`] contract violation. No-op for skip.
    pub fn resize(&mut self, n: usize) -> Result<(), CollectorError> {
        match self {
            Collector::Skip => Ok(()),
            Collector::Logical(values) => grow(values, n),
            Collector::Integer(values) => grow(values, n),
            Collector::Double(values) => grow(values, n),
            Collector::Character(values) => grow(values, n),
        }
    }

    /// Parses one cell into slot `index`. `None` is the missing sentinel.
    /// The slot must already exist (`index < len()` after a prior resize);
    /// writing past the end is a programming error and panics.
    pub fn parse_and_store(&mut self, index: usize, field: Option<&str>) -> ParseOutcome {
        let Some(token) = field else {
            self.mark_missing(index);
            return ParseOutcome::Missing;
        };
        match self {
            Collector::Skip => ParseOutcome::Stored,
            Collector::Logical(values) => match grammar::parse_logical(token) {
                Some(value) => {
                    values[index] = Some(value);
                    ParseOutcome::Stored
                }
                None => {
                    values[index] = None;
                    ParseOutcome::Failed
                }
            },
            Collector::Integer(values) => match grammar::parse_integer(token) {
                Some(value) => {
                    values[index] = Some(value);
                    ParseOutcome::Stored
                }
                // Syntactic integers beyond the i64 range land here too:
                // missing slot plus a signalled failure, never a wraparound.
                None => {
                    values[index] = None;
                    ParseOutcome::Failed
                }
            },
            Collector::Double(values) => match grammar::parse_double(token) {
                Some(value) => {
                    values[index] = Some(value);
                    ParseOutcome::Stored
                }
                None => {
                    values[index] = None;
                    ParseOutcome::Failed
                }
            },
            Collector::Character(values) => {
                values[index] = Some(token.to_string());
                ParseOutcome::Stored
            }
        }
    }

    fn mark_missing(&mut self, index: usize) {
        match self {
            Collector::Skip => {}
            Collector::Logical(values) => values[index] = None,
            Collector::Integer(values) => values[index] = None,
            Collector::Double(values) => values[index] = None,
            Collector::Character(values) => values[index] = None,
        }
    }

    /// True when slot `index` holds no value. Skip reports every slot
    /// missing since it stores nothing.
    pub fn is_missing(&self, index: usize) -> bool {
        match self {
            Collector::Skip => true,
            Collector::Logical(values) => values[index].is_none(),
            Collector::Integer(values) => values[index].is_none(),
            Collector::Double(values) => values[index].is_none(),
            Collector::Character(values) => values[index].is_none(),
        }
    }
}

fn grow<T: Clone>(values: &mut Vec<Option<T>>, n: usize) -> Result<(), CollectorError> {
    if n < values.len() {
        return Err(CollectorError::InvalidSize {
            current: values.len(),
            requested: n,
        });
    }
    values.resize(n, None);
    Ok(())
}

/// Builds the collector a directive asks for. A `guess` directive must be
/// resolved (see [`crate::guess::guess_type`]) before it reaches the
/// factory; passing one through is the same fatal configuration error as an
/// unknown type tag.
pub fn create(directive: &Directive) -> Result<Collector, CollectorError> {
    match directive.column_type() {
        Some(ty) => Ok(Collector::new(ty)),
        None => Err(CollectorError::UnsupportedColumnType("guess".to_string())),
    }
}

/// One collector per directive, preserving input order.
pub fn create_all(directives: &[Directive]) -> Result<Vec<Collector>, CollectorError> {
    directives.iter().map(create).collect()
}

/// Grows every collector to a common row count. Applied once per row-count
/// growth event while rows stream in.
pub fn resize_all(collectors: &mut [Collector], n: usize) -> Result<(), CollectorError> {
    for collector in collectors.iter_mut() {
        collector.resize(n)?;
    }
    Ok(())
}
