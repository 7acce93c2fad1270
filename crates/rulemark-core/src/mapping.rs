//! Property and schema mapping
//!
//! Turns the validation rules of one type into a [`SchemaFragment`]: the
//! schema key plus, per property key, the ordered canonical rules.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use crate::component::{RuleComponent, ValidationRule, ValidatorSet};
use crate::naming::camel_case;
use crate::rules::Rule;
use crate::translator::ComponentTranslator;
use indexmap::IndexMap;
use serde::Serialize;

/// Property key to ordered canonical rules
pub type PropertyRules = IndexMap<String, Vec<Rule>>;

/// Canonical rules derived from one validator, keyed for document lookup
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SchemaFragment {
    /// Schema lookup key
    pub schema_key: String,
    /// Rules per property lookup key, in first-declaration order
    pub properties: PropertyRules,
}

/// Collects the canonical rules of a single validation rule
pub struct PropertyRuleCollector<'a, T: ?Sized> {
    translator: &'a T,
}

impl<'a, T: ComponentTranslator + ?Sized> PropertyRuleCollector<'a, T> {
    pub fn new(translator: &'a T) -> Self {
        Self { translator }
    }

    /// Resolve the property key and translate every component in order.
    ///
    /// Returns `None` for a rule without a property name. Components the
    /// translator cannot map are dropped without leaving a gap.
    pub fn collect<C: RuleComponent>(&self, rule: &ValidationRule<C>) -> Option<(String, Vec<Rule>)> {
        let name = rule.property_name.as_deref()?;
        let rules = rule
            .components
            .iter()
            .filter_map(|component| self.translator.translate(component))
            .collect();
        Some((camel_case(name), rules))
    }
}

/// Builds schema fragments from validator sets
pub struct SchemaFragmentBuilder<'a, T: ?Sized> {
    collector: PropertyRuleCollector<'a, T>,
}

impl<'a, T: ComponentTranslator + ?Sized> SchemaFragmentBuilder<'a, T> {
    pub fn new(translator: &'a T) -> Self {
        Self {
            collector: PropertyRuleCollector::new(translator),
        }
    }

    /// Map a type name and its validation rules to a schema fragment.
    ///
    /// Several validation rules for the same property are concatenated in
    /// the order given; identical rules are kept.
    pub fn build<C: RuleComponent>(&self, type_name: &str, rules: &[ValidationRule<C>]) -> SchemaFragment {
        let mut properties = PropertyRules::new();
        for (key, mapped) in rules.iter().filter_map(|rule| self.collector.collect(rule)) {
            properties.entry(key).or_default().extend(mapped);
        }

        SchemaFragment {
            schema_key: camel_case(type_name),
            properties,
        }
    }

    /// Map a whole validator set
    pub fn build_set<C: RuleComponent>(&self, set: &ValidatorSet<C>) -> SchemaFragment {
        self.build(&set.type_name, &set.rules)
    }
}
