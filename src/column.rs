//! Column type tags, per-column directives, and YAML persistence.
//!
//! A [`Directive`] names what the caller wants for one column: a concrete
//! [`ColumnType`], or [`DirectiveKind::Guess`] to let the guesser decide
//! from the data. Directive lists are order-significant and match the column
//! order of the input file; [`DirectiveList`] adds the YAML round trip so a
//! guessed typing can be reviewed and replayed.

use std::{collections::BTreeMap, fmt, fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::collector::CollectorError;

/// The five collector kinds. Closed set: the factory and every per-kind
/// match are exhaustive over these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Skip,
    Logical,
    Integer,
    Double,
    Character,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Skip => "skip",
            ColumnType::Logical => "logical",
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Character => "character",
        }
    }

    /// Single-character code accepted in compact directive strings.
    pub fn code(&self) -> char {
        match self {
            ColumnType::Skip => '_',
            ColumnType::Logical => 'l',
            ColumnType::Integer => 'i',
            ColumnType::Double => 'd',
            ColumnType::Character => 'c',
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["skip", "logical", "integer", "double", "character"]
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = CollectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "skip" | "_" | "-" => Ok(ColumnType::Skip),
            "logical" | "bool" | "boolean" | "l" => Ok(ColumnType::Logical),
            "integer" | "int" | "i" => Ok(ColumnType::Integer),
            "double" | "float" | "number" | "d" => Ok(ColumnType::Double),
            "character" | "string" | "text" | "c" => Ok(ColumnType::Character),
            _ => Err(CollectorError::UnsupportedColumnType(value.to_string())),
        }
    }
}

/// What the caller requested for one column: a concrete type, or automatic
/// guessing. Options are opaque to this crate and carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(rename = "type")]
    pub kind: DirectiveKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Guess,
    #[serde(untagged)]
    Column(ColumnType),
}

impl Directive {
    pub fn typed(ty: ColumnType) -> Self {
        Directive {
            kind: DirectiveKind::Column(ty),
            options: BTreeMap::new(),
        }
    }

    pub fn guess() -> Self {
        Directive {
            kind: DirectiveKind::Guess,
            options: BTreeMap::new(),
        }
    }

    pub fn is_guess(&self) -> bool {
        matches!(self.kind, DirectiveKind::Guess)
    }

    /// The concrete type, when one has been named or resolved.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self.kind {
            DirectiveKind::Column(ty) => Some(ty),
            DirectiveKind::Guess => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DirectiveKind::Guess => write!(f, "guess"),
            DirectiveKind::Column(ty) => write!(f, "{ty}"),
        }
    }
}

impl FromStr for Directive {
    type Err = CollectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if matches!(normalized.as_str(), "guess" | "auto" | "?") {
            return Ok(Directive::guess());
        }
        ColumnType::from_str(value).map(Directive::typed)
    }
}

/// Named, ordered directives for a whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectiveList {
    pub columns: Vec<NamedDirective>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedDirective {
    pub name: String,
    #[serde(flatten)]
    pub directive: Directive,
}

impl DirectiveList {
    /// One `guess` directive per header, the starting point for probing.
    pub fn guess_all(headers: &[String]) -> Self {
        let columns = headers
            .iter()
            .map(|name| NamedDirective {
                name: name.clone(),
                directive: Directive::guess(),
            })
            .collect();
        DirectiveList { columns }
    }

    /// Parses a comma-separated directive string (`integer,guess,skip`) or a
    /// compact code string (`i?_`) against the given headers.
    pub fn parse_spec(spec: &str, headers: &[String]) -> Result<Self> {
        let directives = match parse_directive_tokens(spec) {
            Ok(directives) => directives,
            // A bare run of codes like `i?_c` is only tried when the spec
            // cannot be read as named tokens. If the codes fail too, their
            // error names the first offending character.
            Err(_) if !spec.contains(',') => parse_compact_codes(spec)?,
            Err(err) => return Err(err.into()),
        };
        anyhow::ensure!(
            directives.len() == headers.len(),
            "Directive spec '{}' names {} column(s) but the file contains {}",
            spec,
            directives.len(),
            headers.len()
        );
        let columns = headers
            .iter()
            .zip(directives)
            .map(|(name, directive)| NamedDirective {
                name: name.clone(),
                directive,
            })
            .collect();
        Ok(DirectiveList { columns })
    }

    pub fn directives(&self) -> Vec<Directive> {
        self.columns.iter().map(|c| c.directive.clone()).collect()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating directive file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing directive YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening directive file {path:?}"))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).context("Parsing directive YAML")
    }
}

fn parse_directive_tokens(spec: &str) -> Result<Vec<Directive>, CollectorError> {
    spec.split(',').map(|token| token.parse()).collect()
}

fn parse_compact_codes(spec: &str) -> Result<Vec<Directive>, CollectorError> {
    spec.chars()
        .map(|code| match code {
            '?' => Ok(Directive::guess()),
            other => other.to_string().parse(),
        })
        .collect()
}
