//! Rule translation: one rule component in, at most one canonical rule out
//!
//! Capabilities are checked in a fixed priority order and the first match
//! wins. Order matters because components commonly answer several checks:
//! an exact-length check also reports a length range, so it must be looked
//! at as exact-length first.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use crate::component::{Comparison, RuleComponent};
use crate::rules::Rule;

/// Maps a rule component to a canonical rule
pub trait ComponentTranslator {
    /// Translate one component, or `None` if it has no schema representation
    fn translate(&self, component: &dyn RuleComponent) -> Option<Rule>;
}

impl<F> ComponentTranslator for F
where
    F: Fn(&dyn RuleComponent) -> Option<Rule>,
{
    fn translate(&self, component: &dyn RuleComponent) -> Option<Rule> {
        self(component)
    }
}

/// The standard translator covering every canonical rule kind
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTranslator;

impl ComponentTranslator for RuleTranslator {
    fn translate(&self, component: &dyn RuleComponent) -> Option<Rule> {
        translate(component)
    }
}

/// Translate a rule component using the standard priority order.
///
/// A component whose first matching capability carries a value that cannot
/// be expressed as a JSON number yields no rule; later capabilities are not
/// consulted.
pub fn translate(component: &dyn RuleComponent) -> Option<Rule> {
    if component.is_not_empty() {
        return Some(Rule::NotEmpty);
    }
    if component.is_not_null() {
        return Some(Rule::NotNull);
    }
    if let Some(max) = component.maximum_length() {
        return Some(Rule::MaxLength { max });
    }
    if let Some(min) = component.minimum_length() {
        return Some(Rule::MinLength { min });
    }
    if let Some(length) = component.exact_length() {
        return Some(Rule::ExactLength { length });
    }
    if let Some((min, max)) = component.length_range() {
        return Some(Rule::LengthRange { min, max });
    }
    if let Some(pattern) = component.regular_expression() {
        return Some(Rule::Pattern {
            pattern: pattern.to_string(),
        });
    }
    if let Some((from, to)) = component.inclusive_between() {
        return Some(Rule::InclusiveBetween {
            min: from.as_number()?,
            max: to.as_number()?,
        });
    }
    if let Some((from, to)) = component.exclusive_between() {
        return Some(Rule::ExclusiveBetween {
            min: from.as_number()?,
            max: to.as_number()?,
        });
    }
    if let Some(value) = component.greater_than_or_equal() {
        return Some(Rule::GreaterThanOrEqual {
            value: value.as_number()?,
        });
    }
    if let Some(value) = component.less_than_or_equal() {
        return Some(Rule::LessThanOrEqual {
            value: value.as_number()?,
        });
    }
    if let Some((comparison, value)) = component.comparison() {
        // Only integral comparison values are mapped.
        return match comparison {
            Comparison::GreaterThan => Some(Rule::GreaterThan {
                value: value.as_integer()?,
            }),
            Comparison::LessThan => Some(Rule::LessThan {
                value: value.as_integer()?,
            }),
            _ => None,
        };
    }
    if let Some((scale, precision)) = component.scale_precision() {
        return Some(Rule::ScalePrecision { scale, precision });
    }
    None
}
