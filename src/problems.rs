//! Structured records for non-fatal per-cell parse failures.
//!
//! A failed cell never aborts the parse: the collector marks the slot
//! missing and the ingestion loop records one [`Problem`] so callers can
//! report or count them afterwards. This keeps "absent in the input" and
//! "present but unparseable" distinguishable.

use std::fmt;

use crate::column::ColumnType;

/// One cell that failed its column's grammar. Row and column are 0-based
/// data coordinates (the header row is not counted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub row: usize,
    pub column: usize,
    pub token: String,
    pub expected: ColumnType,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column {}: '{}' does not parse as {}",
            self.row + 1,
            self.column + 1,
            self.token,
            self.expected
        )
    }
}

/// Per-column failure counts for a summary line, keeping the order of the
/// input columns.
pub fn count_by_column(problems: &[Problem], column_count: usize) -> Vec<usize> {
    let mut counts = vec![0usize; column_count];
    for problem in problems {
        if let Some(slot) = counts.get_mut(problem.column) {
            *slot += 1;
        }
    }
    counts
}
