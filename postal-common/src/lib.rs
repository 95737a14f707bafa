//! Common types and utilities shared across the postal crates.
//!
//! This crate holds the workspace-wide error type and the tracing setup used
//! by the `postal` binary and integration tests. It stays dependency-light so
//! that every other crate can pull it in.
//!
//! # Overview
//!
//! - [`PostalError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use postal_common::PostalError;
//!
//! let err = PostalError::Table("states: empty table".into());
//! assert_eq!(err.to_string(), "Reference table error: states: empty table");
//! ```

pub mod observability;

/// Error types used across the postal workspace.
///
/// The address engine itself never fails: "no address found" is an empty
/// result, not an error. These variants cover the collaborators around it.
#[derive(thiserror::Error, Debug)]
pub enum PostalError {
    /// A reference table could not be loaded or compiled.
    #[error("Reference table error: {0}")]
    Table(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient alias for results that use [`PostalError`].
pub type Result<T> = std::result::Result<T, PostalError>;
