//! Structural effect of a canonical rule on a schema
//!
//! Every effect is an assignment, so applying the same rule again leaves the
//! schema unchanged. The one exception is the scale/precision description,
//! which is appended.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use crate::document::{fields, SchemaMut};
use crate::rules::Rule;

/// Apply the structural part of a rule to a property or parameter schema.
///
/// The required marker of `NotEmpty`/`NotNull` lives on the owner (the
/// parent schema or the parameter) and is not handled here.
pub fn apply_rule(rule: &Rule, schema: &mut SchemaMut<'_>) {
    match rule {
        Rule::NotEmpty | Rule::NotNull => {}
        Rule::ExactLength { length } => {
            schema.set(fields::MIN_LENGTH, *length);
            schema.set(fields::MAX_LENGTH, *length);
        }
        Rule::MaxLength { max } => schema.set(fields::MAX_LENGTH, *max),
        Rule::MinLength { min } => schema.set(fields::MIN_LENGTH, *min),
        Rule::LengthRange { min, max } => {
            schema.assign(fields::MIN_LENGTH, non_zero(*min));
            schema.assign(fields::MAX_LENGTH, non_zero(*max));
        }
        Rule::GreaterThan { value } => {
            schema.set(fields::MINIMUM, value.clone());
            schema.set(fields::EXCLUSIVE_MINIMUM, true);
        }
        Rule::GreaterThanOrEqual { value } => {
            schema.set(fields::MINIMUM, value.clone());
            schema.unset(fields::EXCLUSIVE_MINIMUM);
        }
        Rule::LessThan { value } => {
            schema.set(fields::MAXIMUM, value.clone());
            schema.set(fields::EXCLUSIVE_MAXIMUM, true);
        }
        Rule::LessThanOrEqual { value } => {
            schema.set(fields::MAXIMUM, value.clone());
            schema.unset(fields::EXCLUSIVE_MAXIMUM);
        }
        Rule::InclusiveBetween { min, max } => {
            schema.set(fields::MINIMUM, min.clone());
            schema.set(fields::MAXIMUM, max.clone());
            schema.unset(fields::EXCLUSIVE_MINIMUM);
            schema.unset(fields::EXCLUSIVE_MAXIMUM);
        }
        Rule::ExclusiveBetween { min, max } => {
            schema.set(fields::MINIMUM, min.clone());
            schema.set(fields::MAXIMUM, max.clone());
            schema.set(fields::EXCLUSIVE_MINIMUM, true);
            schema.set(fields::EXCLUSIVE_MAXIMUM, true);
        }
        Rule::Pattern { pattern } => schema.set(fields::PATTERN, pattern.as_str()),
        Rule::ScalePrecision { scale, precision } => {
            append_description(schema, &scale_precision_text(*scale, *precision));
        }
    }
}

/// Human-readable form of a decimal scale/precision constraint
pub fn scale_precision_text(scale: u32, precision: u32) -> String {
    format!(
        "Must not be more than {} digits in total, with allowance for {} decimals.",
        precision, scale
    )
}

/// Append a paragraph to the schema description.
///
/// Paragraphs are separated by a blank line, which Swagger UI renders as a
/// line break.
pub fn append_description(schema: &mut SchemaMut<'_>, text: &str) {
    let description = match schema.description() {
        Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, text),
        _ => text.to_string(),
    };
    schema.set(fields::DESCRIPTION, description);
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};

    const SCALE_TEXT: &str = "Must not be more than 6 digits in total, with allowance for 2 decimals.";

    fn apply_to(rule: Rule, schema: Value) -> Value {
        let mut map = schema.as_object().cloned().unwrap();
        apply_rule(&rule, &mut SchemaMut::new(&mut map));
        Value::Object(map)
    }

    fn applied(rule: Rule) -> Value {
        apply_to(rule, json!({}))
    }

    #[test]
    fn test_markers_leave_schema_untouched() {
        assert_eq!(applied(Rule::NotEmpty), json!({}));
        assert_eq!(applied(Rule::NotNull), json!({}));
    }

    #[test]
    fn test_exact_length() {
        assert_eq!(applied(Rule::ExactLength { length: 6 }), json!({"minLength": 6, "maxLength": 6}));
    }

    #[test]
    fn test_min_and_max_length() {
        assert_eq!(applied(Rule::MaxLength { max: 4 }), json!({"maxLength": 4}));
        assert_eq!(applied(Rule::MinLength { min: 10 }), json!({"minLength": 10}));
    }

    #[test]
    fn test_length_range_zero_is_unset() {
        assert_eq!(applied(Rule::LengthRange { min: 0, max: 10 }), json!({"maxLength": 10}));
        assert_eq!(
            apply_to(Rule::LengthRange { min: 2, max: 0 }, json!({"maxLength": 3})),
            json!({"minLength": 2})
        );
    }

    #[test]
    fn test_numeric_bounds() {
        assert_eq!(
            applied(Rule::GreaterThan { value: 0.into() }),
            json!({"minimum": 0, "exclusiveMinimum": true})
        );
        assert_eq!(
            applied(Rule::LessThan { value: 100.into() }),
            json!({"maximum": 100, "exclusiveMaximum": true})
        );
    }

    #[test]
    fn test_inclusive_bounds_clear_exclusive_flags() {
        let schema = applied(Rule::ExclusiveBetween { min: 1.into(), max: 9.into() });
        assert_eq!(
            schema,
            json!({"minimum": 1, "maximum": 9, "exclusiveMinimum": true, "exclusiveMaximum": true})
        );

        let schema = apply_to(Rule::InclusiveBetween { min: 2.into(), max: 8.into() }, schema);
        assert_eq!(schema, json!({"minimum": 2, "maximum": 8}));

        let schema = apply_to(Rule::GreaterThan { value: 0.into() }, schema);
        let schema = apply_to(Rule::GreaterThanOrEqual { value: 5.into() }, schema);
        assert_eq!(schema, json!({"minimum": 5, "maximum": 8}));
    }

    #[test]
    fn test_numeric_exclusive_bound_is_replaced() {
        // JSON Schema 2020-12 style numeric bound
        let schema = apply_to(Rule::LessThanOrEqual { value: 10.into() }, json!({"exclusiveMaximum": 11}));
        assert_eq!(schema, json!({"maximum": 10}));
    }

    #[test]
    fn test_pattern() {
        assert_eq!(applied(Rule::Pattern { pattern: "^$".into() }), json!({"pattern": "^$"}));
    }

    #[test]
    fn test_scale_precision_sets_description() {
        let schema = applied(Rule::ScalePrecision { scale: 2, precision: 6 });
        assert_eq!(schema, json!({ "description": SCALE_TEXT }));
    }

    #[test]
    fn test_scale_precision_appends_description() {
        let schema = apply_to(
            Rule::ScalePrecision { scale: 2, precision: 6 },
            json!({"description": "Something!"}),
        );
        assert_eq!(
            schema["description"],
            "Something!\n\nMust not be more than 6 digits in total, with allowance for 2 decimals."
        );
    }

    #[test]
    fn test_empty_description_is_replaced() {
        let mut map = Map::new();
        map.insert("description".into(), json!(""));
        append_description(&mut SchemaMut::new(&mut map), "Text.");
        assert_eq!(map["description"], "Text.");
    }

    #[test]
    fn test_existing_fields_keep_their_position() {
        let schema = apply_to(
            Rule::MaxLength { max: 3 },
            json!({"type": "string", "maxLength": 99, "format": "email"}),
        );
        let keys: Vec<_> = schema.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["type", "maxLength", "format"]);
        assert_eq!(schema["maxLength"], 3);
    }

    #[test]
    fn test_assignments_are_idempotent() {
        let rules = [
            Rule::ExactLength { length: 3 },
            Rule::Pattern { pattern: "[a-z]".into() },
            Rule::ExclusiveBetween { min: 0.into(), max: 1.into() },
        ];
        let once = rules.iter().cloned().fold(json!({}), |schema, rule| apply_to(rule, schema));
        let twice = rules.iter().cloned().fold(once.clone(), |schema, rule| apply_to(rule, schema));
        assert_eq!(once, twice);
    }
}
