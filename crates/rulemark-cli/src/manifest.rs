//! Rules manifest: validator declarations loaded from disk
//!
//! ```yaml
//! validators:
//!   - type: SampleInput
//!     rules:
//!       - property: Name
//!         components:
//!           - kind: not_empty
//!           - kind: maximum_length
//!             max: 50
//! operations:
//!   - operation_id: getSample
//!     schema: SampleInput
//! ```

use crate::config::FileFormat;
use crate::error::{Error, Result};
use rulemark_core::{DocumentFilterBuilder, OperationBinding, ValidationDocumentFilter, ValidatorSet};
use serde::Deserialize;
use std::path::Path;

/// Validators and operation bindings declared in a manifest file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesManifest {
    /// One entry per validated type
    pub validators: Vec<ValidatorSet>,

    /// Operations whose parameters are validated with a schema's rules
    pub operations: Vec<OperationBinding>,
}

impl RulesManifest {
    /// Load a manifest, choosing the parser by file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = FileFormat::from_path(path).ok_or_else(|| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML, JSON or TOML".to_string(),
        })?;

        let content = std::fs::read_to_string(path)?;
        let manifest: Self = format
            .parse(&content)
            .map_err(|e| Error::config(format!("Invalid rules manifest {}: {}", path.display(), e)))?;

        tracing::debug!(
            validators = manifest.validators.len(),
            operations = manifest.operations.len(),
            "Loaded rules manifest"
        );
        Ok(manifest)
    }

    /// Register every declaration with a filter builder
    pub fn into_builder(self) -> Result<DocumentFilterBuilder> {
        let mut builder = DocumentFilterBuilder::new();
        for set in self.validators {
            builder = builder.add_validator_set(set)?;
        }
        for binding in self.operations {
            builder = builder.add_operation_schema_named(binding.operation_id(), binding.schema())?;
        }
        Ok(builder)
    }

    /// Build the document filter
    pub fn build_filter(self) -> Result<ValidationDocumentFilter> {
        let builder = self.into_builder()?;
        tracing::debug!(validators = builder.validator_count(), "Building document filter");
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulemark_core::{Rule, Validator};
    use std::io::Write;

    fn manifest_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const YAML: &str = r#"
validators:
  - type: SampleInput
    rules:
      - property: Name
        components:
          - kind: not_empty
          - kind: length
            min: 2
            max: 50
      - property: Price
        components:
          - kind: precision_scale
            precision: 8
            scale: 2
          - kind: greater_than
            value: 0
operations:
  - operation_id: getSample
    schema: SampleInput
"#;

    #[test]
    fn test_yaml_manifest() {
        let file = manifest_file(".yaml", YAML);
        let manifest = RulesManifest::from_file(file.path()).unwrap();

        assert_eq!(manifest.validators.len(), 1);
        assert_eq!(
            manifest.validators[0].rules[1].components[0],
            Validator::PrecisionScale { precision: 8, scale: 2 }
        );

        let filter = manifest.build_filter().unwrap();
        let sample = &filter.fragments()["sampleInput"];
        assert_eq!(sample["name"], vec![Rule::NotEmpty, Rule::LengthRange { min: 2, max: 50 }]);
        assert_eq!(
            sample["price"],
            vec![
                Rule::ScalePrecision { scale: 2, precision: 8 },
                Rule::GreaterThan { value: 0.into() }
            ]
        );
        assert_eq!(filter.operations()[0].operation_id(), "getSample");
    }

    #[test]
    fn test_toml_manifest() {
        let file = manifest_file(
            ".toml",
            r#"
[[validators]]
type = "Order"

[[validators.rules]]
property = "Reference"
components = [{ kind = "exact_length", length = 10 }, { kind = "matches", pattern = "^[A-Z0-9]+$" }]
"#,
        );
        let filter = RulesManifest::from_file(file.path()).unwrap().build_filter().unwrap();

        assert_eq!(
            filter.fragments()["order"]["reference"],
            vec![
                Rule::ExactLength { length: 10 },
                Rule::Pattern {
                    pattern: "^[A-Z0-9]+$".into()
                }
            ]
        );
    }

    #[test]
    fn test_duplicate_validator_is_rejected() {
        let file = manifest_file(
            ".json",
            r#"{"validators": [{"type": "Order", "rules": []}, {"type": "Order", "rules": []}]}"#,
        );
        let result = RulesManifest::from_file(file.path()).unwrap().build_filter();
        assert!(matches!(
            result,
            Err(Error::Core(rulemark_core::Error::DuplicateValidator { .. }))
        ));
    }

    #[test]
    fn test_invalid_binding_is_a_configuration_error() {
        let file = manifest_file(".json", r#"{"operations": [{"operation_id": "getSample", "schema": ""}]}"#);
        let result = RulesManifest::from_file(file.path());
        match result {
            Err(Error::Config(message)) => assert!(message.contains("must not be empty")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let file = manifest_file(".xml", "<rules/>");
        assert!(matches!(
            RulesManifest::from_file(file.path()),
            Err(Error::InvalidFormat { .. })
        ));
    }
}
