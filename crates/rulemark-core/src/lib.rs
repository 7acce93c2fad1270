//! Rulemark Core - Validation rules as OpenAPI schema constraints
//!
//! This crate translates declarative, per-property validation rules into the
//! structural constraints of a generated OpenAPI document, so that consumers
//! of the document can see which fields are required, length-bounded,
//! numerically bounded or pattern-constrained.
//!
//! # Main Components
//!
//! - **Rule Model**: the closed set of canonical [`Rule`] kinds
//! - **Rule Translator**: maps a [`RuleComponent`] to at most one canonical rule
//! - **Mapping**: collects the rules of a validator into a [`SchemaFragment`]
//! - **Document Filter**: mutates schema properties and operation parameters
//!
//! # Example
//!
//! ```
//! use rulemark_core::{DocumentFilter, DocumentFilterBuilder, OpenApiDocument, ValidationRule};
//! use serde_json::json;
//!
//! struct Sample;
//!
//! let filter = DocumentFilterBuilder::new()
//!     .add_validator::<Sample>(vec![ValidationRule::for_property("MyProperty").not_empty()])
//!     .unwrap()
//!     .build();
//!
//! let mut document = OpenApiDocument::from_value(json!({
//!     "components": {"schemas": {"sample": {"properties": {"myProperty": {"type": "string"}}}}}
//! }))
//! .unwrap();
//!
//! let report = filter.apply(&mut document);
//! assert!(report.is_complete());
//! assert_eq!(document.schema_mut("sample").unwrap().required(), vec!["myProperty"]);
//! ```
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

pub mod component;
pub mod constraints;
pub mod document;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod naming;
pub mod rules;
pub mod translator;

// Re-export main types for convenience
pub use component::{Comparison, Operand, RuleComponent, ValidationRule, Validator, ValidatorSet};
pub use document::{Method, OpenApiDocument, OperationMut, ParameterLookup, ParameterMut, SchemaMut};
pub use error::{Error, Result};
pub use filter::{
    ApplyReport, DocumentFilter, DocumentFilterBuilder, FilterOptions, OperationBinding, SkippedItem,
    ValidationDocumentFilter,
};
pub use mapping::{PropertyRuleCollector, PropertyRules, SchemaFragment, SchemaFragmentBuilder};
pub use naming::camel_case;
pub use rules::Rule;
pub use translator::{translate, ComponentTranslator, RuleTranslator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
