//! Reference tables of recognised US state names and street suffixes.
//!
//! A [`ReferenceTable`] is an immutable, case-insensitive set of literals
//! with a deterministic lookup policy: when several entries occur in the same
//! text, the **rightmost** occurrence wins, and at a given position the
//! longest entry wins. Tables are built once and shared read-only across
//! every concurrent matcher through an `Arc<ReferenceTables>`.
//!
//! ```
//! use postal_tables::{ReferenceTable, TableKind};
//!
//! let states = ReferenceTable::new(TableKind::State, ["NY", "New York", "York"]).unwrap();
//! assert_eq!(states.find_in("233 Spring St, New York, NY, 10013"), Some("NY"));
//! assert_eq!(states.find_in("offices in New York 10013"), Some("New York"));
//! assert_eq!(states.find_in("yorkshire pudding"), None);
//! ```

use std::cmp::Reverse;
use std::fmt;
use std::path::Path;

use postal_common::{PostalError, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

pub mod us;

// Big enough for a few thousand case-insensitive Unicode literals.
const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Which reference table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    State,
    StreetSuffix,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::State => f.write_str("states"),
            TableKind::StreetSuffix => f.write_str("street suffixes"),
        }
    }
}

/// Immutable set of literals matched as whole words, ignoring case.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    kind: TableKind,
    /// Entries, longest first.
    entries: Vec<String>,
    /// One capture group per entry, in `entries` order.
    matcher: Regex,
}

impl ReferenceTable {
    /// Build a table from arbitrary entries.
    ///
    /// Entries are trimmed, blank ones dropped and case-insensitive duplicates
    /// collapsed (the first spelling is kept). Regex metacharacters inside an
    /// entry are escaped, so `"St."` matches the literal text `St.`.
    pub fn new<I, S>(kind: TableKind, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        entries.sort_by_cached_key(|e| (Reverse(e.chars().count()), e.to_lowercase()));
        entries.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());

        if entries.is_empty() {
            tracing::warn!(table = %kind, "reference table is empty; nothing will match");
        }

        // Alternation is leftmost-first, so at any position the longest entry wins.
        let alternatives = entries
            .iter()
            .map(|e| format!("({})", regex::escape(e)))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternatives})\b"))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| PostalError::Table(format!("{kind}: {e}")))?;

        Ok(Self {
            kind,
            entries,
            matcher,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, longest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Case-insensitive membership test for a single literal.
    pub fn contains(&self, literal: &str) -> bool {
        let needle = literal.trim().to_lowercase();
        self.entries.iter().any(|e| e.to_lowercase() == needle)
    }

    /// Entry behind the rightmost whole-word occurrence in `text`.
    ///
    /// Occurrences are found by a left-to-right scan that does not overlap,
    /// so `"New York"` hides the `"York"` inside it.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.matcher.find_iter(text).last()?;
        let caps = self.matcher.captures_at(text, last.start())?;
        caps.iter()
            .skip(1)
            .position(|group| group.is_some())
            .map(|idx| self.entries[idx].as_str())
    }
}

/// State table and street-suffix table, loaded together.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub states: ReferenceTable,
    pub street_suffixes: ReferenceTable,
}

#[derive(Debug, Deserialize)]
struct TablesFile {
    states: Vec<String>,
    street_suffixes: Vec<String>,
}

impl ReferenceTables {
    pub fn new(states: ReferenceTable, street_suffixes: ReferenceTable) -> Result<Self> {
        if states.kind() != TableKind::State || street_suffixes.kind() != TableKind::StreetSuffix {
            return Err(PostalError::Table(format!(
                "expected (states, street suffixes), got ({}, {})",
                states.kind(),
                street_suffixes.kind()
            )));
        }
        Ok(Self {
            states,
            street_suffixes,
        })
    }

    /// Built-in United States data (see [`us`]).
    pub fn us() -> Result<Self> {
        Self::new(
            ReferenceTable::new(TableKind::State, us::STATES)?,
            ReferenceTable::new(TableKind::StreetSuffix, us::STREET_SUFFIXES)?,
        )
    }

    /// Parse `{ states: [...], street_suffixes: [...] }` YAML.
    ///
    /// ```
    /// use postal_tables::ReferenceTables;
    ///
    /// let tables = ReferenceTables::from_yaml_str(
    ///     "states: [Illinois]\nstreet_suffixes: [Street, St]",
    /// )
    /// .unwrap();
    /// assert_eq!(tables.states.len(), 1);
    /// assert!(tables.street_suffixes.contains("street"));
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: TablesFile = serde_yaml::from_str(yaml)
            .map_err(|e| PostalError::Table(format!("invalid tables document: {e}")))?;
        Self::new(
            ReferenceTable::new(TableKind::State, &file.states)?,
            ReferenceTable::new(TableKind::StreetSuffix, &file.street_suffixes)?,
        )
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let tables = Self::from_yaml_str(&raw)
            .map_err(|e| PostalError::Table(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            path = %path.display(),
            states = tables.states.len(),
            street_suffixes = tables.street_suffixes.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }
}
