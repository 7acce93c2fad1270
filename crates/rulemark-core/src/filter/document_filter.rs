//! The validation document filter
//!
//! Built once from the registered validators, then applied to as many
//! generated documents as needed. Application is best effort: anything the
//! document does not contain is skipped and reported, never an error.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use super::options::{FilterOptions, OperationBinding};
use super::report::{ApplyReport, SkippedItem};
use crate::component::{RuleComponent, ValidatorSet};
use crate::constraints::apply_rule;
use crate::document::{OpenApiDocument, ParameterLookup};
use crate::mapping::{PropertyRules, SchemaFragment, SchemaFragmentBuilder};
use crate::naming::camel_case;
use crate::translator::{ComponentTranslator, RuleTranslator};
use indexmap::IndexMap;
use serde_json::Value;

/// A transformation applied to a generated OpenAPI document
pub trait DocumentFilter {
    /// Mutate the document in place
    fn apply(&self, document: &mut OpenApiDocument) -> ApplyReport;
}

/// Applies validator rules to schema properties and bound operation parameters
#[derive(Debug, Clone, Default)]
pub struct ValidationDocumentFilter {
    fragments: IndexMap<String, PropertyRules>,
    options: FilterOptions,
}

impl ValidationDocumentFilter {
    /// Build a filter with the standard rule translator.
    ///
    /// When two validator sets resolve to the same schema key, the later one
    /// replaces the earlier.
    pub fn new<C, I>(validators: I, options: FilterOptions) -> Self
    where
        C: RuleComponent,
        I: IntoIterator<Item = ValidatorSet<C>>,
    {
        Self::with_translator(&RuleTranslator, validators, options)
    }

    /// Build a filter with a custom rule translator
    pub fn with_translator<T, C, I>(translator: &T, validators: I, options: FilterOptions) -> Self
    where
        T: ComponentTranslator + ?Sized,
        C: RuleComponent,
        I: IntoIterator<Item = ValidatorSet<C>>,
    {
        let builder = SchemaFragmentBuilder::new(translator);
        let fragments = validators
            .into_iter()
            .map(|set| builder.build_set(&set))
            .map(|SchemaFragment { schema_key, properties }| {
                log::debug!(
                    "Mapped schema '{}' with {} constrained properties",
                    schema_key,
                    properties.len()
                );
                (schema_key, properties)
            })
            .collect();

        Self { fragments, options }
    }

    /// Build a filter from precomputed fragments
    pub fn from_fragments(fragments: impl IntoIterator<Item = SchemaFragment>, options: FilterOptions) -> Self {
        let fragments = fragments
            .into_iter()
            .map(|fragment| (fragment.schema_key, fragment.properties))
            .collect();
        Self { fragments, options }
    }

    /// The precomputed rules, keyed by schema key then property key
    pub fn fragments(&self) -> &IndexMap<String, PropertyRules> {
        &self.fragments
    }

    /// Configured operation bindings
    pub fn operations(&self) -> &[OperationBinding] {
        &self.options.operations
    }

    /// Apply the filter to a document held as a JSON value.
    ///
    /// A value that is not an object has no schemas or operations, so every
    /// configured item is reported as skipped.
    pub fn apply_value(&self, document: &mut Value) -> ApplyReport {
        let mut wrapped = OpenApiDocument::from(std::mem::take(document));
        let report = self.apply(&mut wrapped);
        *document = wrapped.into_value();
        report
    }

    /// Mutate schema properties for every known schema key
    fn apply_schemas(&self, document: &mut OpenApiDocument, report: &mut ApplyReport) {
        for (schema_key, properties) in &self.fragments {
            let Some(mut schema) = document.schema_mut(schema_key) else {
                report.skip(SkippedItem::MissingSchema {
                    schema: schema_key.clone(),
                });
                continue;
            };

            for (property_key, rules) in properties {
                if !schema.has_property(property_key) {
                    report.skip(SkippedItem::MissingProperty {
                        schema: schema_key.clone(),
                        property: property_key.clone(),
                    });
                    continue;
                }

                let mut reported_unsupported = false;
                for rule in rules {
                    if rule.is_required() {
                        schema.require(property_key);
                    }
                    match schema.property_mut(property_key) {
                        Some(mut property) => apply_rule(rule, &mut property),
                        None if !rule.is_required() && !reported_unsupported => {
                            reported_unsupported = true;
                            report.skip(SkippedItem::UnsupportedProperty {
                                schema: schema_key.clone(),
                                property: property_key.clone(),
                            });
                            continue;
                        }
                        None if !rule.is_required() => continue,
                        None => {}
                    }
                    log::trace!("Applied '{}' to {}.{}", rule, schema_key, property_key);
                    report.applied += 1;
                }
            }
        }
    }

    /// Mutate parameters of every bound operation
    fn apply_operations(&self, document: &mut OpenApiDocument, report: &mut ApplyReport) {
        for binding in &self.options.operations {
            let operation_id = binding.operation_id();
            let schema_key = camel_case(binding.schema());

            let Some(properties) = self.fragments.get(&schema_key) else {
                report.skip(SkippedItem::UnknownBindingSchema {
                    operation_id: operation_id.to_string(),
                    schema: schema_key,
                });
                continue;
            };

            let Some(mut operation) = document.find_operation_mut(operation_id) else {
                report.skip(SkippedItem::MissingOperation {
                    operation_id: operation_id.to_string(),
                });
                continue;
            };

            for (property_key, rules) in properties {
                let mut parameter = match operation.parameter_lookup(property_key) {
                    ParameterLookup::Found(parameter) => parameter,
                    ParameterLookup::Missing => {
                        report.skip(SkippedItem::MissingParameter {
                            operation_id: operation_id.to_string(),
                            parameter: property_key.clone(),
                        });
                        continue;
                    }
                    ParameterLookup::Ambiguous(matches) => {
                        report.skip(SkippedItem::AmbiguousParameter {
                            operation_id: operation_id.to_string(),
                            parameter: property_key.clone(),
                            matches,
                        });
                        continue;
                    }
                };

                let mut reported_schemaless = false;
                for rule in rules {
                    if rule.is_required() {
                        parameter.set_required();
                    }
                    match parameter.schema_mut() {
                        Some(mut schema) => apply_rule(rule, &mut schema),
                        None if !rule.is_required() && !reported_schemaless => {
                            reported_schemaless = true;
                            report.skip(SkippedItem::ParameterWithoutSchema {
                                operation_id: operation_id.to_string(),
                                parameter: property_key.clone(),
                            });
                            continue;
                        }
                        None if !rule.is_required() => continue,
                        None => {}
                    }
                    log::trace!("Applied '{}' to parameter {}.{}", rule, operation_id, property_key);
                    report.applied += 1;
                }
            }
        }
    }
}

impl DocumentFilter for ValidationDocumentFilter {
    fn apply(&self, document: &mut OpenApiDocument) -> ApplyReport {
        let mut report = ApplyReport::new();
        self.apply_schemas(document, &mut report);
        self.apply_operations(document, &mut report);

        log::debug!(
            "Validation filter applied {} rules, skipped {} items",
            report.applied,
            report.skipped.len()
        );
        report
    }
}

impl<F: DocumentFilter + ?Sized> DocumentFilter for Box<F> {
    fn apply(&self, document: &mut OpenApiDocument) -> ApplyReport {
        (**self).apply(document)
    }
}

impl<F: DocumentFilter> DocumentFilter for [F] {
    /// Apply every filter in order and merge their reports
    fn apply(&self, document: &mut OpenApiDocument) -> ApplyReport {
        let mut report = ApplyReport::new();
        for filter in self {
            report.merge(filter.apply(document));
        }
        report
    }
}
