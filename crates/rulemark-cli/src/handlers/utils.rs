//! Shared utilities for command handlers

use crate::cli::OutputFormat;
use crate::error::{Error, ErrorContext, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialization of an OpenAPI document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension; anything but YAML is JSON
    pub fn from_path(path: &Path) -> Self {
        let is_yaml = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s == "yaml" || s == "yml")
            .unwrap_or(false);

        if is_yaml {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

/// Load an OpenAPI document as a JSON value
pub fn read_document(path: &Path) -> Result<(Value, DocumentFormat)> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let format = DocumentFormat::from_path(path);

    let value = match format {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok((value, format))
}

/// Serialize a document as JSON or YAML
pub fn render_document(document: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    let mut rendered = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(document)?,
        DocumentFormat::Json if pretty => serde_json::to_string_pretty(document)?,
        DocumentFormat::Json => serde_json::to_string(document)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Pick the serialization of the output document.
///
/// An explicit machine output format wins, then the extension of the output
/// file, then the format the document was read in.
pub fn target_format(
    output: OutputFormat,
    save_to: Option<&Path>,
    input: DocumentFormat,
) -> (DocumentFormat, bool) {
    match output {
        OutputFormat::Json => (DocumentFormat::Json, false),
        OutputFormat::JsonPretty => (DocumentFormat::Json, true),
        OutputFormat::Yaml => (DocumentFormat::Yaml, true),
        OutputFormat::Human => {
            let format = save_to.map(DocumentFormat::from_path).unwrap_or(input);
            (format, true)
        }
    }
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
