//! Address extraction engine.
//!
//! Turns normalized page text into at most one US postal address:
//!
//! - [`tokenize`] slides a fixed-width word window over the text
//! - [`CandidateMatcher`] looks for a state, a street suffix and the
//!   positional address pattern inside one window
//! - [`extract_address`] matches every window concurrently and keeps the
//!   first result to arrive
//!
//! [`AddressEngine`] wires the three together. The engine performs no I/O and
//! has no error type: "no address" is `None`.
//!
//! ```
//! use std::sync::Arc;
//! use postal_core::{AddressEngine, EngineSettings, NormalizedText};
//! use postal_tables::ReferenceTables;
//!
//! let tables = Arc::new(ReferenceTables::us().unwrap());
//! let engine = AddressEngine::new(tables, EngineSettings::default());
//! let text = NormalizedText::from_plain_text(
//!     "Write to us at our office:\n123 Main Street, Springfield, Illinois 62704\nThank you.",
//! );
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let found = rt.block_on(engine.extract(&text));
//! assert_eq!(found.unwrap(), "123 Main Street, Springfield, Illinois 62704, USA");
//! ```

use std::sync::Arc;

use postal_tables::ReferenceTables;

pub mod dispatch;
pub mod matcher;
pub mod tokenizer;
pub mod types;

pub use dispatch::{extract_address, extract_address_bounded};
pub use matcher::{CandidateMatcher, PatternCache, find_state, find_street};
pub use tokenizer::{DEFAULT_WINDOW_SIZE, tokenize};
pub use types::{AddressMatch, COUNTRY_SUFFIX, Candidate, NormalizedText};

/// Tuning knobs for [`AddressEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Words per candidate window.
    pub window_size: usize,
    /// Cap on concurrently running matchers; `None` runs them all at once.
    pub max_in_flight: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_in_flight: None,
        }
    }
}

/// Tokenizer, matcher and dispatcher bound to one set of reference tables.
#[derive(Debug, Clone)]
pub struct AddressEngine {
    tables: Arc<ReferenceTables>,
    settings: EngineSettings,
}

impl AddressEngine {
    pub fn new(tables: Arc<ReferenceTables>, settings: EngineSettings) -> Self {
        Self { tables, settings }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Extract the first address any window yields, or `None`.
    pub async fn extract(&self, text: &NormalizedText) -> Option<AddressMatch> {
        let candidates = tokenize(text.as_str(), self.settings.window_size);
        tracing::debug!(
            words = text.word_count(),
            candidates = candidates.len(),
            window_size = self.settings.window_size,
            max_in_flight = ?self.settings.max_in_flight,
            "dispatching candidates"
        );

        // Fresh matcher per call: the pattern cache is scoped to this extraction.
        let matcher = Arc::new(CandidateMatcher::new(Arc::clone(&self.tables)));
        match self.settings.max_in_flight {
            Some(limit) => extract_address_bounded(candidates, matcher, limit).await,
            None => extract_address(candidates, matcher).await,
        }
    }
}
