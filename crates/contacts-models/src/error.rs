//! Error types for the `contacts-models` crate.
//!
//! All fallible constructors and parsers in this crate return variants of
//! [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A contact id was empty or could not be used as a single path segment.
    #[error("invalid contact id \"{value}\": {reason}")]
    InvalidContactId {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A location string was not an absolute path with optional query.
    #[error("invalid location \"{value}\": {reason}")]
    InvalidLocation {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
}
