//! Diagnostics produced while applying a filter
//!
//! A missing schema, property, operation or parameter is an expected
//! condition, not an error. Each one is recorded as a [`SkippedItem`] and the
//! rest of the document is still processed.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::fmt;

/// An item that could not be located in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkippedItem {
    /// No schema with this key in `components.schemas`
    MissingSchema { schema: String },
    /// The schema has no property with this key
    MissingProperty { schema: String, property: String },
    /// The property entry is not a schema object (for example `true`)
    UnsupportedProperty { schema: String, property: String },
    /// An operation binding names a schema no validator produced rules for
    UnknownBindingSchema { operation_id: String, schema: String },
    /// No operation with this identifier in any path
    MissingOperation { operation_id: String },
    /// The operation has no parameter with this name
    MissingParameter { operation_id: String, parameter: String },
    /// Several parameters of the operation share this name
    AmbiguousParameter { operation_id: String, parameter: String, matches: usize },
    /// The parameter has no schema to carry structural constraints
    ParameterWithoutSchema { operation_id: String, parameter: String },
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedItem::MissingSchema { schema } => write!(f, "schema '{}' is not present", schema),
            SkippedItem::MissingProperty { schema, property } => {
                write!(f, "property '{}' is not present in schema '{}'", property, schema)
            }
            SkippedItem::UnsupportedProperty { schema, property } => write!(
                f,
                "property '{}' of schema '{}' is not a schema object",
                property, schema
            ),
            SkippedItem::UnknownBindingSchema { operation_id, schema } => write!(
                f,
                "operation '{}' is bound to schema '{}' which has no validator",
                operation_id, schema
            ),
            SkippedItem::MissingOperation { operation_id } => {
                write!(f, "operation '{}' is not present", operation_id)
            }
            SkippedItem::MissingParameter { operation_id, parameter } => write!(
                f,
                "parameter '{}' is not present in operation '{}'",
                parameter, operation_id
            ),
            SkippedItem::AmbiguousParameter { operation_id, parameter, matches } => write!(
                f,
                "parameter '{}' matches {} parameters in operation '{}'",
                parameter, matches, operation_id
            ),
            SkippedItem::ParameterWithoutSchema { operation_id, parameter } => write!(
                f,
                "parameter '{}' of operation '{}' has no schema",
                parameter, operation_id
            ),
        }
    }
}

/// Summary of one filter application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Number of rules applied to a schema property or parameter
    pub applied: usize,
    /// Items that were not found, in processing order
    pub skipped: Vec<SkippedItem>,
}

impl ApplyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped item
    pub fn skip(&mut self, item: SkippedItem) {
        log::debug!("Skipping: {}", item);
        self.skipped.push(item);
    }

    /// True when every configured item was found
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ApplyReport) {
        self.applied += other.applied;
        self.skipped.extend(other.skipped);
    }
}
