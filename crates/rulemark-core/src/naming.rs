//! Key resolution for schema and property lookups
//!
//! Generated OpenAPI documents name schemas and properties in camel case,
//! while validators are declared against type and field names as written in
//! code. These helpers bridge the two.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

/// Resolve a type or property name to its document lookup key.
///
/// The first character is lower-cased and the remainder is kept unchanged.
/// Single-character names are lower-cased entirely.
///
/// ```rust
/// use rulemark_core::naming::camel_case;
///
/// assert_eq!(camel_case("Name"), "name");
/// assert_eq!(camel_case("A"), "a");
/// assert_eq!(camel_case("myField"), "myField");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let rest = chars.as_str();
            let mut key = String::with_capacity(name.len());
            key.extend(first.to_lowercase());
            key.push_str(rest);
            key
        }
    }
}

/// Short, declared name of a Rust type.
///
/// Module path and generic arguments are dropped, so `app::models::Sample`
/// becomes `Sample` and `app::Page<app::Sample>` becomes `Page`.
pub fn type_name_of<T: ?Sized>() -> &'static str {
    short_type_name(std::any::type_name::<T>())
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Sample;

    #[allow(dead_code)]
    struct Page<T>(T);

    #[test]
    fn test_camel_case_examples() {
        assert_eq!(camel_case("Name"), "name");
        assert_eq!(camel_case("MyProperty"), "myProperty");
        assert_eq!(camel_case("myField"), "myField");
        assert_eq!(camel_case("URL"), "uRL");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_camel_case_single_character() {
        assert_eq!(camel_case("A"), "a");
        assert_eq!(camel_case("a"), "a");
        assert_eq!(camel_case("Ä"), "ä");
    }

    #[test]
    fn test_type_name_of() {
        assert_eq!(type_name_of::<Sample>(), "Sample");
        assert_eq!(type_name_of::<Page<Sample>>(), "Page");
        assert_eq!(type_name_of::<String>(), "String");
    }

    proptest! {
        #[test]
        fn prop_camel_case_idempotent(name in "[a-zA-Z][a-zA-Z0-9_]{0,30}") {
            let once = camel_case(&name);
            prop_assert_eq!(camel_case(&once), once.clone());
        }

        #[test]
        fn prop_camel_case_keeps_tail(name in "[A-Z][a-zA-Z0-9]{1,30}") {
            let key = camel_case(&name);
            prop_assert_eq!(&key[1..], &name[1..]);
            prop_assert!(key.chars().next().unwrap().is_lowercase());
        }

        #[test]
        fn prop_lower_first_unchanged(name in "[a-z][a-zA-Z0-9]{0,30}") {
            prop_assert_eq!(camel_case(&name), name);
        }
    }
}
