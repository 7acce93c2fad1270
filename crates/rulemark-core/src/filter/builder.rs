//! Builder for the validation document filter
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use super::document_filter::ValidationDocumentFilter;
use super::options::FilterOptions;
use crate::component::{RuleComponent, ValidationRule, ValidatorSet, Validator};
use crate::error::{Error, Result};
use crate::naming::type_name_of;
use crate::translator::ComponentTranslator;
use indexmap::IndexMap;

/// Collects validator registrations and operation bindings
///
/// The builder is the explicit registration list of the document filter:
/// each type is registered once with its validation rules, and operations
/// whose parameters are bound from the query string are mapped to the
/// schema whose rules should apply to them.
///
/// ```
/// use rulemark_core::{DocumentFilterBuilder, ValidationRule};
///
/// struct Sample;
///
/// let filter = DocumentFilterBuilder::new()
///     .add_validator::<Sample>(vec![ValidationRule::for_property("MyProperty").not_empty()])
///     .unwrap()
///     .add_operation_schema::<Sample>("getSample")
///     .unwrap()
///     .build();
///
/// assert!(filter.fragments()["sample"].contains_key("myProperty"));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentFilterBuilder<C = Validator> {
    validators: IndexMap<String, ValidatorSet<C>>,
    options: FilterOptions,
}

impl<C> Default for DocumentFilterBuilder<C> {
    fn default() -> Self {
        Self {
            validators: IndexMap::new(),
            options: FilterOptions::default(),
        }
    }
}

impl<C: RuleComponent> DocumentFilterBuilder<C> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validation rules of a Rust type
    pub fn add_validator<T: ?Sized>(self, rules: Vec<ValidationRule<C>>) -> Result<Self> {
        self.add_validator_set(ValidatorSet::for_type::<T>(rules))
    }

    /// Register validation rules under a declared type name
    pub fn add_named_validator(self, type_name: impl Into<String>, rules: Vec<ValidationRule<C>>) -> Result<Self> {
        self.add_validator_set(ValidatorSet::new(type_name, rules))
    }

    /// Register a complete validator set; a type may only be registered once
    pub fn add_validator_set(mut self, set: ValidatorSet<C>) -> Result<Self> {
        if self.validators.contains_key(&set.type_name) {
            return Err(Error::DuplicateValidator {
                type_name: set.type_name,
            });
        }

        log::debug!("Registered validator for '{}' with {} rules", set.type_name, set.rules.len());
        self.validators.insert(set.type_name.clone(), set);
        Ok(self)
    }

    /// Validate the parameters of an operation with the rules of a Rust type
    pub fn add_operation_schema<T: ?Sized>(self, operation_id: impl Into<String>) -> Result<Self> {
        self.add_operation_schema_named(operation_id, type_name_of::<T>())
    }

    /// Validate the parameters of an operation with the rules of a named schema
    pub fn add_operation_schema_named(
        mut self,
        operation_id: impl Into<String>,
        schema: impl Into<String>,
    ) -> Result<Self> {
        self.options.add_operation(operation_id, schema)?;
        Ok(self)
    }

    /// Number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Build the filter with the standard rule translator
    pub fn build(self) -> ValidationDocumentFilter {
        ValidationDocumentFilter::new(self.validators.into_values(), self.options)
    }

    /// Build the filter with a custom rule translator
    pub fn build_with<T: ComponentTranslator + ?Sized>(self, translator: &T) -> ValidationDocumentFilter {
        ValidationDocumentFilter::with_translator(translator, self.validators.into_values(), self.options)
    }
}
