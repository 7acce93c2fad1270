//! Error types for the Rulemark core library
//!
//! Only configuration problems are errors. Lookup misses while a filter is
//! applied to a document are reported through [`crate::ApplyReport`] instead.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for Rulemark operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid filter configuration (operation bindings, registrations)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// A validator was registered twice for the same type
    #[error("A validator for type '{type_name}' is already registered")]
    DuplicateValidator { type_name: String },

    /// The value handed in is not an OpenAPI document
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for a named field
    pub fn configuration(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
