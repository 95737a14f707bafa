//! Page acquisition and text preparation in front of the address engine.
//!
//! - Markup to plain text (`extract`)
//! - Fetch, strip, normalize and match in one call (`pipeline`)
//!
//! Note: markup handling is a tolerant tag scanner, not a DOM parser. It is
//! good enough to keep block boundaries and entities intact for matching.

pub mod extract;
pub mod pipeline;

pub use extract::html_to_text;
pub use pipeline::AddressExtractor;
