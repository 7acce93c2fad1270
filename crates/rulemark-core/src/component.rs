//! Rule components and validation rules
//!
//! A validator declares, per property, an ordered list of rule components.
//! Each component advertises what it checks through the capability checks of
//! [`RuleComponent`]; a component may answer several checks at once (an
//! exact-length check is also a length range), which is why the translator
//! evaluates them in a fixed order.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A comparison value carried by a numeric validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Integral value
    Integer(i64),
    /// Floating point value
    Decimal(f64),
    /// Anything else (dates, strings, member references)
    Text(String),
}

impl Operand {
    /// The operand as a JSON number, if it is numeric and finite
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Operand::Integer(value) => Some(Number::from(*value)),
            Operand::Decimal(value) => Number::from_f64(*value),
            Operand::Text(_) => None,
        }
    }

    /// The operand as a JSON number, only if it is integral
    pub fn as_integer(&self) -> Option<Number> {
        match self {
            Operand::Integer(value) => Some(Number::from(*value)),
            _ => None,
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Integer(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Integer(value.into())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Decimal(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Integer(value) => write!(f, "{}", value),
            Operand::Decimal(value) => write!(f, "{}", value),
            Operand::Text(value) => write!(f, "'{}'", value),
        }
    }
}

/// Comparison operator of a generic comparison validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// Capability checks exposed by one rule component.
///
/// Every check defaults to "not provided"; implementors override the ones
/// describing the check they perform.
pub trait RuleComponent {
    /// The component rejects empty values
    fn is_not_empty(&self) -> bool {
        false
    }

    /// The component rejects missing values
    fn is_not_null(&self) -> bool {
        false
    }

    /// Upper length bound of a maximum-length check
    fn maximum_length(&self) -> Option<u64> {
        None
    }

    /// Lower length bound of a minimum-length check
    fn minimum_length(&self) -> Option<u64> {
        None
    }

    /// Required length of an exact-length check
    fn exact_length(&self) -> Option<u64> {
        None
    }

    /// Bounds of a generic length check, 0 meaning unbounded
    fn length_range(&self) -> Option<(u64, u64)> {
        None
    }

    /// Expression of a regular-expression check
    fn regular_expression(&self) -> Option<&str> {
        None
    }

    /// Bounds of an inclusive range check
    fn inclusive_between(&self) -> Option<(Operand, Operand)> {
        None
    }

    /// Bounds of an exclusive range check
    fn exclusive_between(&self) -> Option<(Operand, Operand)> {
        None
    }

    /// Lower bound of a greater-than-or-equal check
    fn greater_than_or_equal(&self) -> Option<Operand> {
        None
    }

    /// Upper bound of a less-than-or-equal check
    fn less_than_or_equal(&self) -> Option<Operand> {
        None
    }

    /// Operator and value of a generic comparison check
    fn comparison(&self) -> Option<(Comparison, Operand)> {
        None
    }

    /// `(scale, precision)` of a decimal precision check
    fn scale_precision(&self) -> Option<(u32, u32)> {
        None
    }
}

impl<C: RuleComponent + ?Sized> RuleComponent for Box<C> {
    fn is_not_empty(&self) -> bool {
        (**self).is_not_empty()
    }
    fn is_not_null(&self) -> bool {
        (**self).is_not_null()
    }
    fn maximum_length(&self) -> Option<u64> {
        (**self).maximum_length()
    }
    fn minimum_length(&self) -> Option<u64> {
        (**self).minimum_length()
    }
    fn exact_length(&self) -> Option<u64> {
        (**self).exact_length()
    }
    fn length_range(&self) -> Option<(u64, u64)> {
        (**self).length_range()
    }
    fn regular_expression(&self) -> Option<&str> {
        (**self).regular_expression()
    }
    fn inclusive_between(&self) -> Option<(Operand, Operand)> {
        (**self).inclusive_between()
    }
    fn exclusive_between(&self) -> Option<(Operand, Operand)> {
        (**self).exclusive_between()
    }
    fn greater_than_or_equal(&self) -> Option<Operand> {
        (**self).greater_than_or_equal()
    }
    fn less_than_or_equal(&self) -> Option<Operand> {
        (**self).less_than_or_equal()
    }
    fn comparison(&self) -> Option<(Comparison, Operand)> {
        (**self).comparison()
    }
    fn scale_precision(&self) -> Option<(u32, u32)> {
        (**self).scale_precision()
    }
}

/// Built-in validator kinds.
///
/// The capability overlap mirrors how these checks are usually layered in a
/// validation library: exact, maximum and minimum length checks are all
/// length checks, and the inclusive comparisons are also generic comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    NotEmpty,
    NotNull,
    Length {
        #[serde(default)]
        min: u64,
        #[serde(default)]
        max: Option<u64>,
    },
    ExactLength {
        length: u64,
    },
    MaximumLength {
        max: u64,
    },
    MinimumLength {
        min: u64,
    },
    Matches {
        pattern: String,
    },
    EmailAddress,
    InclusiveBetween {
        from: Operand,
        to: Operand,
    },
    ExclusiveBetween {
        from: Operand,
        to: Operand,
    },
    GreaterThan {
        value: Operand,
    },
    GreaterThanOrEqual {
        value: Operand,
    },
    LessThan {
        value: Operand,
    },
    LessThanOrEqual {
        value: Operand,
    },
    Equal {
        value: Operand,
    },
    NotEqual {
        value: Operand,
    },
    PrecisionScale {
        precision: u32,
        scale: u32,
    },
    /// Application-specific check with no schema representation
    Custom {
        name: String,
    },
}

impl RuleComponent for Validator {
    fn is_not_empty(&self) -> bool {
        matches!(self, Validator::NotEmpty)
    }

    fn is_not_null(&self) -> bool {
        matches!(self, Validator::NotNull)
    }

    fn maximum_length(&self) -> Option<u64> {
        match self {
            Validator::MaximumLength { max } => Some(*max),
            _ => None,
        }
    }

    fn minimum_length(&self) -> Option<u64> {
        match self {
            Validator::MinimumLength { min } => Some(*min),
            _ => None,
        }
    }

    fn exact_length(&self) -> Option<u64> {
        match self {
            Validator::ExactLength { length } => Some(*length),
            _ => None,
        }
    }

    fn length_range(&self) -> Option<(u64, u64)> {
        match self {
            Validator::Length { min, max } => Some((*min, max.unwrap_or(0))),
            Validator::ExactLength { length } => Some((*length, *length)),
            Validator::MaximumLength { max } => Some((0, *max)),
            Validator::MinimumLength { min } => Some((*min, 0)),
            _ => None,
        }
    }

    fn regular_expression(&self) -> Option<&str> {
        match self {
            Validator::Matches { pattern } => Some(pattern),
            _ => None,
        }
    }

    fn inclusive_between(&self) -> Option<(Operand, Operand)> {
        match self {
            Validator::InclusiveBetween { from, to } => Some((from.clone(), to.clone())),
            _ => None,
        }
    }

    fn exclusive_between(&self) -> Option<(Operand, Operand)> {
        match self {
            Validator::ExclusiveBetween { from, to } => Some((from.clone(), to.clone())),
            _ => None,
        }
    }

    fn greater_than_or_equal(&self) -> Option<Operand> {
        match self {
            Validator::GreaterThanOrEqual { value } => Some(value.clone()),
            _ => None,
        }
    }

    fn less_than_or_equal(&self) -> Option<Operand> {
        match self {
            Validator::LessThanOrEqual { value } => Some(value.clone()),
            _ => None,
        }
    }

    fn comparison(&self) -> Option<(Comparison, Operand)> {
        let (comparison, value) = match self {
            Validator::Equal { value } => (Comparison::Equal, value),
            Validator::NotEqual { value } => (Comparison::NotEqual, value),
            Validator::LessThan { value } => (Comparison::LessThan, value),
            Validator::LessThanOrEqual { value } => (Comparison::LessThanOrEqual, value),
            Validator::GreaterThan { value } => (Comparison::GreaterThan, value),
            Validator::GreaterThanOrEqual { value } => (Comparison::GreaterThanOrEqual, value),
            _ => return None,
        };
        Some((comparison, value.clone()))
    }

    fn scale_precision(&self) -> Option<(u32, u32)> {
        match self {
            Validator::PrecisionScale { precision, scale } => Some((*scale, *precision)),
            _ => None,
        }
    }
}

/// The rule components one validator declares for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct ValidationRule<C = Validator> {
    /// Declared property name; rules without one are never mapped
    #[serde(default, rename = "property")]
    pub property_name: Option<String>,

    /// Rule components in declaration order
    #[serde(default)]
    pub components: Vec<C>,
}

impl<C> ValidationRule<C> {
    /// Create a rule for a named property
    pub fn new(property_name: impl Into<String>, components: Vec<C>) -> Self {
        Self {
            property_name: Some(property_name.into()),
            components,
        }
    }

    /// Create a rule that targets no property (e.g. a whole-model check)
    pub fn unnamed(components: Vec<C>) -> Self {
        Self {
            property_name: None,
            components,
        }
    }

    /// Append a component
    pub fn with(mut self, component: C) -> Self {
        self.components.push(component);
        self
    }
}

impl ValidationRule<Validator> {
    /// Start a rule for a named property with no components
    pub fn for_property(property_name: impl Into<String>) -> Self {
        Self::new(property_name, Vec::new())
    }

    pub fn not_empty(self) -> Self {
        self.with(Validator::NotEmpty)
    }

    pub fn not_null(self) -> Self {
        self.with(Validator::NotNull)
    }

    /// Length between `min` and `max`
    pub fn length(self, min: u64, max: u64) -> Self {
        self.with(Validator::Length { min, max: Some(max) })
    }

    pub fn exact_length(self, length: u64) -> Self {
        self.with(Validator::ExactLength { length })
    }

    pub fn maximum_length(self, max: u64) -> Self {
        self.with(Validator::MaximumLength { max })
    }

    pub fn minimum_length(self, min: u64) -> Self {
        self.with(Validator::MinimumLength { min })
    }

    pub fn matches(self, pattern: impl Into<String>) -> Self {
        self.with(Validator::Matches { pattern: pattern.into() })
    }

    pub fn inclusive_between(self, from: impl Into<Operand>, to: impl Into<Operand>) -> Self {
        self.with(Validator::InclusiveBetween { from: from.into(), to: to.into() })
    }

    pub fn exclusive_between(self, from: impl Into<Operand>, to: impl Into<Operand>) -> Self {
        self.with(Validator::ExclusiveBetween { from: from.into(), to: to.into() })
    }

    pub fn greater_than(self, value: impl Into<Operand>) -> Self {
        self.with(Validator::GreaterThan { value: value.into() })
    }

    pub fn greater_than_or_equal(self, value: impl Into<Operand>) -> Self {
        self.with(Validator::GreaterThanOrEqual { value: value.into() })
    }

    pub fn less_than(self, value: impl Into<Operand>) -> Self {
        self.with(Validator::LessThan { value: value.into() })
    }

    pub fn less_than_or_equal(self, value: impl Into<Operand>) -> Self {
        self.with(Validator::LessThanOrEqual { value: value.into() })
    }

    pub fn precision_scale(self, precision: u32, scale: u32) -> Self {
        self.with(Validator::PrecisionScale { precision, scale })
    }
}

/// All validation rules registered for one data type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct ValidatorSet<C = Validator> {
    /// Declared name of the validated type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Validation rules in declaration order
    #[serde(default)]
    pub rules: Vec<ValidationRule<C>>,
}

impl<C> ValidatorSet<C> {
    /// Create a set for a type given by name
    pub fn new(type_name: impl Into<String>, rules: Vec<ValidationRule<C>>) -> Self {
        Self {
            type_name: type_name.into(),
            rules,
        }
    }

    /// Create a set for a Rust type, named after its last path segment
    pub fn for_type<T: ?Sized>(rules: Vec<ValidationRule<C>>) -> Self {
        Self::new(crate::naming::type_name_of::<T>(), rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length_overlaps_length_range() {
        let validator = Validator::ExactLength { length: 6 };
        assert_eq!(validator.exact_length(), Some(6));
        assert_eq!(validator.length_range(), Some((6, 6)));
        assert_eq!(validator.maximum_length(), None);
    }

    #[test]
    fn test_inclusive_comparisons_overlap_generic_comparison() {
        let validator = Validator::GreaterThanOrEqual { value: Operand::Integer(3) };
        assert_eq!(validator.greater_than_or_equal(), Some(Operand::Integer(3)));
        assert_eq!(
            validator.comparison(),
            Some((Comparison::GreaterThanOrEqual, Operand::Integer(3)))
        );
    }

    #[test]
    fn test_precision_scale_reports_scale_first() {
        let validator = Validator::PrecisionScale { precision: 6, scale: 2 };
        assert_eq!(validator.scale_precision(), Some((2, 6)));
    }

    #[test]
    fn test_operand_numbers() {
        assert_eq!(Operand::Integer(4).as_integer(), Some(Number::from(4)));
        assert_eq!(Operand::Decimal(2.5).as_integer(), None);
        assert!(Operand::Decimal(2.5).as_number().is_some());
        assert_eq!(Operand::Decimal(f64::NAN).as_number(), None);
        assert_eq!(Operand::from("2020-01-01").as_number(), None);
    }

    #[test]
    fn test_deserialize_validator_kinds() {
        let validators: Vec<Validator> = serde_json::from_value(serde_json::json!([
            {"kind": "not_empty"},
            {"kind": "length", "max": 10},
            {"kind": "greater_than", "value": 0},
            {"kind": "less_than", "value": 1.5},
            {"kind": "matches", "pattern": "^[a-z]+$"}
        ]))
        .unwrap();

        assert_eq!(validators[0], Validator::NotEmpty);
        assert_eq!(validators[1], Validator::Length { min: 0, max: Some(10) });
        assert_eq!(validators[2], Validator::GreaterThan { value: Operand::Integer(0) });
        assert_eq!(validators[3], Validator::LessThan { value: Operand::Decimal(1.5) });
    }

    #[test]
    fn test_fluent_rule() {
        let rule = ValidationRule::for_property("Name").not_null().maximum_length(20);
        assert_eq!(rule.property_name.as_deref(), Some("Name"));
        assert_eq!(
            rule.components,
            vec![Validator::NotNull, Validator::MaximumLength { max: 20 }]
        );
    }

    #[test]
    fn test_validator_set_for_type() {
        struct SampleInput;
        let set: ValidatorSet = ValidatorSet::for_type::<SampleInput>(vec![]);
        assert_eq!(set.type_name, "SampleInput");
    }
}
