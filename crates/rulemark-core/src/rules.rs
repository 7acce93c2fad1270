//! Canonical rule model
//!
//! A [`Rule`] is the schema-relevant residue of one validator rule component:
//! just enough data to mutate a schema property or an operation parameter.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A schema-level constraint derived from a validator rule component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Value must be present and non-empty
    NotEmpty,
    /// Value must be present
    NotNull,
    /// Length must equal `length`
    ExactLength { length: u64 },
    /// Length must not exceed `max`
    MaxLength { max: u64 },
    /// Length must be at least `min`
    MinLength { min: u64 },
    /// Length must lie in `min..=max`; a bound of 0 means unbounded
    LengthRange { min: u64, max: u64 },
    /// Value must be strictly greater than `value`
    GreaterThan { value: Number },
    /// Value must be greater than or equal to `value`
    GreaterThanOrEqual { value: Number },
    /// Value must be strictly less than `value`
    LessThan { value: Number },
    /// Value must be less than or equal to `value`
    LessThanOrEqual { value: Number },
    /// Value must lie in `min..=max`
    InclusiveBetween { min: Number, max: Number },
    /// Value must lie strictly between `min` and `max`
    ExclusiveBetween { min: Number, max: Number },
    /// Value must match the regular expression
    Pattern { pattern: String },
    /// Decimal with at most `precision` digits, `scale` of them decimals
    ScalePrecision { scale: u32, precision: u32 },
}

impl Rule {
    /// Whether applying this rule marks the target as required
    pub fn is_required(&self) -> bool {
        matches!(self, Rule::NotEmpty | Rule::NotNull)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::NotEmpty => write!(f, "not empty"),
            Rule::NotNull => write!(f, "not null"),
            Rule::ExactLength { length } => write!(f, "length = {}", length),
            Rule::MaxLength { max } => write!(f, "length <= {}", max),
            Rule::MinLength { min } => write!(f, "length >= {}", min),
            Rule::LengthRange { min, max } => match (*min, *max) {
                (0, 0) => write!(f, "length unbounded"),
                (0, max) => write!(f, "length <= {}", max),
                (min, 0) => write!(f, "length >= {}", min),
                (min, max) => write!(f, "length in [{}, {}]", min, max),
            },
            Rule::GreaterThan { value } => write!(f, "> {}", value),
            Rule::GreaterThanOrEqual { value } => write!(f, ">= {}", value),
            Rule::LessThan { value } => write!(f, "< {}", value),
            Rule::LessThanOrEqual { value } => write!(f, "<= {}", value),
            Rule::InclusiveBetween { min, max } => write!(f, "in [{}, {}]", min, max),
            Rule::ExclusiveBetween { min, max } => write!(f, "in ({}, {})", min, max),
            Rule::Pattern { pattern } => write!(f, "matches /{}/", pattern),
            Rule::ScalePrecision { scale, precision } => {
                write!(f, "precision {} scale {}", precision, scale)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_markers() {
        assert!(Rule::NotEmpty.is_required());
        assert!(Rule::NotNull.is_required());
        assert!(!Rule::MaxLength { max: 3 }.is_required());
        assert!(!Rule::Pattern { pattern: ".*".into() }.is_required());
    }

    #[test]
    fn test_markers_compare_by_tag() {
        assert_eq!(Rule::NotEmpty, Rule::NotEmpty);
        assert_ne!(Rule::NotEmpty, Rule::NotNull);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rule::ExactLength { length: 6 }.to_string(), "length = 6");
        assert_eq!(Rule::LengthRange { min: 0, max: 10 }.to_string(), "length <= 10");
        assert_eq!(
            Rule::ExclusiveBetween { min: 1.into(), max: 9.into() }.to_string(),
            "in (1, 9)"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let value = serde_json::to_value(Rule::MinLength { min: 10 }).unwrap();
        assert_eq!(value, serde_json::json!({"rule": "min_length", "min": 10}));
        assert_eq!(serde_json::to_value(Rule::NotNull).unwrap()["rule"], "not_null");
    }
}
