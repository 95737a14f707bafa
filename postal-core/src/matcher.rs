//! Per-candidate address matching.
//!
//! A candidate is checked for a state and a street suffix first; only when
//! both are present is the positional address pattern built (or fetched from
//! the per-extraction [`PatternCache`]) and run against it.

use std::sync::Arc;

use dashmap::DashMap;
use postal_tables::ReferenceTables;
use regex::Regex;

use crate::types::AddressMatch;

/// Highest-priority state appearing as a whole word in `candidate`.
pub fn find_state<'t>(candidate: &str, tables: &'t ReferenceTables) -> Option<&'t str> {
    tables.states.find_in(candidate)
}

/// Highest-priority street suffix appearing as a whole word in `candidate`.
pub fn find_street<'t>(candidate: &str, tables: &'t ReferenceTables) -> Option<&'t str> {
    tables.street_suffixes.find_in(candidate)
}

/// Positional pattern: house number, up to three filler tokens, the street
/// suffix, anything, the state, one to three characters, then a ZIP or ZIP+4.
///
/// Digits are ASCII only; `\d` would also accept other scripts' numerals.
fn address_pattern(street: &str, state: &str) -> String {
    format!(
        r"(?i)[0-9]+(?:,*\s*\w*){{1,3}}\b{street}\b.+\b{state}\b.{{1,3}}(?:\b[0-9]{{5}}-[0-9]{{4}}\b|\b[0-9]{{5}}\b)",
        street = regex::escape(street),
        state = regex::escape(state),
    )
}

/// Compiled address patterns keyed by `(street, state)`, ignoring case.
///
/// Failed compilations are cached too so they are reported once.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<(String, String), Option<Arc<Regex>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn get_or_build(&self, street: &str, state: &str) -> Option<Arc<Regex>> {
        let key = (street.to_lowercase(), state.to_lowercase());
        if let Some(hit) = self.patterns.get(&key) {
            return hit.value().clone();
        }

        let built = match Regex::new(&address_pattern(street, state)) {
            Ok(re) => Some(Arc::new(re)),
            Err(e) => {
                tracing::warn!(street, state, error = %e, "address pattern failed to compile");
                None
            }
        };
        self.patterns.entry(key).or_insert(built).value().clone()
    }
}

/// Matches candidates against one set of reference tables.
///
/// Cheap to build; the engine creates one per extraction call so the pattern
/// cache lives exactly as long as that call.
#[derive(Debug)]
pub struct CandidateMatcher {
    tables: Arc<ReferenceTables>,
    cache: PatternCache,
}

impl CandidateMatcher {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self {
            tables,
            cache: PatternCache::new(),
        }
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Leftmost address in `candidate`, with `", USA"` appended.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use postal_core::CandidateMatcher;
    /// use postal_tables::ReferenceTables;
    ///
    /// let tables = ReferenceTables::from_yaml_str("states: [Illinois]\nstreet_suffixes: [Street]").unwrap();
    /// let matcher = CandidateMatcher::new(Arc::new(tables));
    /// let found = matcher.match_address("at 123 Main Street, Springfield, Illinois 62704 today");
    /// assert_eq!(found.unwrap(), "123 Main Street, Springfield, Illinois 62704, USA");
    /// ```
    pub fn match_address(&self, candidate: &str) -> Option<AddressMatch> {
        let state = find_state(candidate, &self.tables)?;
        let street = find_street(candidate, &self.tables)?;
        tracing::trace!(candidate, state, street, "state and street present");

        let pattern = self.cache.get_or_build(street, state)?;
        let found = pattern.find(candidate)?;
        Some(AddressMatch::from_matched(found.as_str()))
    }
}
