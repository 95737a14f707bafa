use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n+").expect("line break pattern is valid"));

/// Literal appended to every matched address.
pub const COUNTRY_SUFFIX: &str = ", USA";

/// Plain text with markup removed and line breaks collapsed to spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Collapse every run of line breaks into a single space. Nothing else is
    /// touched; word splitting happens later in the tokenizer.
    ///
    /// ```
    /// use postal_core::NormalizedText;
    ///
    /// let text = NormalizedText::from_plain_text("123 Main Street\r\n\nSpringfield");
    /// assert_eq!(text.as_str(), "123 Main Street Springfield");
    /// ```
    pub fn from_plain_text(text: &str) -> Self {
        Self(LINE_BREAKS.replace_all(text, " ").into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One fixed-width window of consecutive words, joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    index: usize,
    text: String,
}

impl Candidate {
    pub(crate) fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    /// Position of the window's first word in the source text.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A matched address, always terminated by [`COUNTRY_SUFFIX`].
///
/// Only the matcher constructs these; "nothing found" is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressMatch(String);

impl AddressMatch {
    pub(crate) fn from_matched(matched: &str) -> Self {
        Self(format!("{matched}{COUNTRY_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AddressMatch {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for AddressMatch {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AddressMatch {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_break_runs_become_one_space() {
        let text = NormalizedText::from_plain_text("a\nb\r\n\n\nc  d");
        assert_eq!(text.as_str(), "a b c  d");
        assert_eq!(text.word_count(), 4);
    }

    #[test]
    fn address_match_carries_country_suffix() {
        let found = AddressMatch::from_matched("1 Main St, Anytown, OH 43001");
        assert_eq!(found, "1 Main St, Anytown, OH 43001, USA");
        assert!(found.as_str().ends_with(COUNTRY_SUFFIX));
    }
}
