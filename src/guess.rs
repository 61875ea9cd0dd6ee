//! Strictness-ordered column type guessing.

use crate::{column::ColumnType, grammar};

/// Candidate order, strictest first. `Character` is the fallback and never
/// tested against a predicate.
const CANDIDATES: &[(ColumnType, fn(&str) -> bool)] = &[
    (ColumnType::Logical, grammar::is_logical),
    (ColumnType::Integer, grammar::is_integer),
    (ColumnType::Double, grammar::is_double),
];

/// Picks the narrowest type whose grammar accepts every non-missing token.
///
/// Missing cells (`None`) never falsify a candidate, so a sequence with no
/// non-missing tokens returns [`ColumnType::Logical`], the strictest
/// candidate. Single pass: one failing token eliminates a candidate for the
/// whole column, and the scan stops early once only the character fallback
/// remains. Pure and total: some tag is always returned.
pub fn guess_type<'a, I>(tokens: I) -> ColumnType
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut alive = [true; CANDIDATES.len()];
    for token in tokens {
        let Some(token) = token else {
            continue;
        };
        for (slot, (_, predicate)) in alive.iter_mut().zip(CANDIDATES) {
            if *slot && !predicate(token) {
                *slot = false;
            }
        }
        if alive.iter().all(|slot| !slot) {
            break;
        }
    }
    alive
        .iter()
        .zip(CANDIDATES)
        .find(|(slot, _)| **slot)
        .map(|(_, (tag, _))| *tag)
        .unwrap_or(ColumnType::Character)
}

/// Convenience over owned token buffers, as produced by the ingestion
/// loop's sample prefix.
pub fn guess_type_of(tokens: &[Option<String>]) -> ColumnType {
    guess_type(tokens.iter().map(|t| t.as_deref()))
}
