//! Document filter: applies validator rules to a generated OpenAPI document
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

mod builder;
mod document_filter;
mod options;
mod report;

pub use builder::DocumentFilterBuilder;
pub use document_filter::{DocumentFilter, ValidationDocumentFilter};
pub use options::{FilterOptions, OperationBinding};
pub use report::{ApplyReport, SkippedItem};
