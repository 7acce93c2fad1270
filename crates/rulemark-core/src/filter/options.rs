//! Document filter configuration
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Validate an operation's parameters with the rules of a named schema.
///
/// Used for operations whose input is bound from the query string rather
/// than a request body, so the schema rules would otherwise never reach
/// the parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOperationBinding")]
pub struct OperationBinding {
    operation_id: String,
    schema: String,
}

/// Unchecked shape of a binding as it appears in configuration files
#[derive(Debug, Deserialize)]
struct RawOperationBinding {
    operation_id: Option<String>,
    schema: Option<String>,
}

impl TryFrom<RawOperationBinding> for OperationBinding {
    type Error = Error;

    fn try_from(raw: RawOperationBinding) -> Result<Self> {
        let operation_id = raw
            .operation_id
            .ok_or_else(|| Error::configuration("operation binding is missing an operation id", "operation_id"))?;
        let schema = raw
            .schema
            .ok_or_else(|| Error::configuration("operation binding is missing a schema name", "schema"))?;
        Self::new(operation_id, schema)
    }
}

impl OperationBinding {
    /// Create a binding; both names must be non-blank
    pub fn new(operation_id: impl Into<String>, schema: impl Into<String>) -> Result<Self> {
        let operation_id = operation_id.into();
        let schema = schema.into();

        if operation_id.trim().is_empty() {
            return Err(Error::configuration(
                "operation id of an operation binding must not be empty",
                "operation_id",
            ));
        }
        if schema.trim().is_empty() {
            return Err(Error::configuration(
                format!("schema name for operation '{}' must not be empty", operation_id),
                "schema",
            ));
        }

        Ok(Self { operation_id, schema })
    }

    /// Bind an operation to the schema of a Rust type
    pub fn for_type<T: ?Sized>(operation_id: impl Into<String>) -> Result<Self> {
        Self::new(operation_id, crate::naming::type_name_of::<T>())
    }

    /// Identifier of the operation in the document
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Schema name as configured (before key resolution)
    pub fn schema(&self) -> &str {
        &self.schema
    }
}

/// Options of a validation document filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Operation bindings, processed in order; duplicates are kept
    pub operations: Vec<OperationBinding>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation binding
    pub fn add_operation(&mut self, operation_id: impl Into<String>, schema: impl Into<String>) -> Result<&mut Self> {
        self.operations.push(OperationBinding::new(operation_id, schema)?);
        Ok(self)
    }
}
