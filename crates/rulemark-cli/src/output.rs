//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output in
//! various formats (JSON, YAML, human-readable) for apply reports and
//! manifest inspections.
//!
//! Results go to stdout; human-oriented messages go to stderr so that a
//! document written to stdout can be piped.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indexmap::IndexMap;
use rulemark_core::{ApplyReport, OperationBinding, PropertyRules, SkippedItem};
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Summary of what a rules manifest produces
#[derive(Debug, Serialize)]
pub struct Inspection<'a> {
    /// Schema key to property key to canonical rules
    pub schemas: &'a IndexMap<String, PropertyRules>,
    /// Operations whose parameters receive schema rules
    pub operations: &'a [OperationBinding],
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format an apply report
    fn format_report(&self, report: &ApplyReport) -> Result<String>;

    /// Format a manifest inspection
    fn format_inspection(&self, inspection: &Inspection<'_>) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ApplyReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_inspection(&self, inspection: &Inspection<'_>) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_inspection_human(inspection)),
            _ => self.format(inspection),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    messages: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout and stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(format, use_color, quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an output writer with custom writers for results and messages
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        messages: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            messages,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn message(&mut self, content: &str) -> Result<()> {
        writeln!(self.messages, "{}", content)?;
        self.messages.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.message(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&message.green().to_string())
        } else {
            self.message(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&message.yellow().to_string())
        } else {
            self.message(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.message("")?;
        if self.use_color {
            self.message(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.message(&format!("=== {} ===", title))
        }
    }

    /// Write an apply report.
    ///
    /// Human reports, and any report accompanying a document written to
    /// stdout, go with the messages.
    pub fn report(&mut self, report: &ApplyReport, alongside_document: bool) -> Result<()> {
        let formatted = self.format.format_report(report)?;
        if self.format == OutputFormat::Human || alongside_document {
            self.message(formatted.trim_end())
        } else {
            self.writeln(formatted.trim_end())
        }
    }

    /// Write a manifest inspection
    pub fn inspection(&mut self, inspection: &Inspection<'_>) -> Result<()> {
        let formatted = self.format.format_inspection(inspection)?;
        trace!(bytes = formatted.len(), "Outputting inspection");
        self.writeln(formatted.trim_end())
    }
}

/// Format an apply report for human reading
fn format_report_human(report: &ApplyReport) -> String {
    let mut output = format!("Applied {} rule(s)\n", report.applied);

    if report.is_complete() {
        output.push_str("All configured schemas, properties, operations and parameters were found\n");
        return output;
    }

    output.push_str(&format!("Skipped {} item(s):\n", report.skipped.len()));
    for item in &report.skipped {
        output.push_str(&format!("  • [{}] {}\n", skip_reason(item), item));
    }
    output
}

fn skip_reason(item: &SkippedItem) -> &'static str {
    match item {
        SkippedItem::MissingSchema { .. } => "schema",
        SkippedItem::MissingProperty { .. } => "property",
        SkippedItem::UnsupportedProperty { .. } => "property",
        SkippedItem::UnknownBindingSchema { .. } => "binding",
        SkippedItem::MissingOperation { .. } => "operation",
        SkippedItem::MissingParameter { .. } => "parameter",
        SkippedItem::AmbiguousParameter { .. } => "parameter",
        SkippedItem::ParameterWithoutSchema { .. } => "parameter",
    }
}

/// Format a manifest inspection for human reading
fn format_inspection_human(inspection: &Inspection<'_>) -> String {
    let headers = ["Schema", "Property", "Rules"];
    let rows: Vec<[String; 3]> = inspection
        .schemas
        .iter()
        .flat_map(|(schema, properties)| {
            properties.iter().map(move |(property, rules)| {
                let rules = if rules.is_empty() {
                    "-".to_string()
                } else {
                    rules.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
                };
                [schema.clone(), property.clone(), rules]
            })
        })
        .collect();

    let mut output = table(&headers, &rows);

    if !inspection.operations.is_empty() {
        output.push_str("\nOperation bindings:\n");
        for binding in inspection.operations {
            output.push_str(&format!("  {} -> {}\n", binding.operation_id(), binding.schema()));
        }
    }
    output
}

/// Render a plain-text table
fn table(headers: &[&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: [&str; 3]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut output = render(*headers);
    output.push('\n');
    output.push_str(&widths.map(|w| "─".repeat(w)).join("─┼─"));
    output.push('\n');
    for row in rows {
        output.push_str(&render([&row[0], &row[1], &row[2]]));
        output.push('\n');
    }
    output
}
