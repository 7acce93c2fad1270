//! End-to-end tests for the rulemark binary
//!
//! Each test works in its own temporary directory with an explicit settings
//! file so that no user configuration is picked up.

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const MANIFEST: &str = r#"
validators:
  - type: SampleInput
    rules:
      - property: Name
        components:
          - kind: not_empty
          - kind: maximum_length
            max: 50
      - property: Amount
        components:
          - kind: precision_scale
            precision: 6
            scale: 2
  - type: SampleQuery
    rules:
      - property: Code
        components:
          - kind: not_null
          - kind: exact_length
            length: 3
operations:
  - operation_id: getSample
    schema: SampleQuery
"#;

fn document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {"title": "Sample", "version": "1.0"},
        "paths": {
            "/sample": {
                "get": {
                    "operationId": "getSample",
                    "parameters": [{"name": "code", "in": "query", "schema": {"type": "string"}}],
                    "responses": {"200": {"description": "OK"}}
                }
            }
        },
        "components": {
            "schemas": {
                "sampleInput": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "amount": {"type": "number"}
                    }
                }
            }
        }
    })
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("settings.yaml"), "output:\n  color: false\n")?;
        fs::write(dir.path().join("rules.yaml"), MANIFEST)?;
        fs::write(dir.path().join("api.json"), serde_json::to_string_pretty(&document())?)?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Ok(Command::new(env!("CARGO_BIN_EXE_rulemark"))
            .args(args)
            .current_dir(self.dir.path())
            .env("RULEMARK_CONFIG", self.path("settings.yaml"))
            .env_remove("RUST_LOG")
            .env_remove("RULEMARK_LOG_FILE")
            .env_remove("RULEMARK_LOG_FORMAT")
            .output()?)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn test_apply_writes_document_to_stdout() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["apply", "api.json", "--rules", "rules.yaml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout)?;

    let sample = &result["components"]["schemas"]["sampleInput"];
    assert_eq!(sample["required"], json!(["name"]));
    assert_eq!(sample["properties"]["name"], json!({"type": "string", "maxLength": 50}));
    assert_eq!(
        sample["properties"]["amount"]["description"],
        "Must not be more than 6 digits in total, with allowance for 2 decimals."
    );

    let parameter = &result["paths"]["/sample"]["get"]["parameters"][0];
    assert_eq!(
        parameter,
        &json!({
            "name": "code",
            "in": "query",
            "required": true,
            "schema": {"type": "string", "minLength": 3, "maxLength": 3}
        })
    );
    assert_eq!(result["info"], document()["info"]);
    Ok(())
}

#[test]
fn test_apply_save_to_yaml_with_report() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&[
        "-o",
        "json",
        "apply",
        "api.json",
        "--rules",
        "rules.yaml",
        "--save-to",
        "out/api.yaml",
        "--report",
    ])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    // An explicit JSON output format wins over the .yaml extension.
    let saved = read_json(&workspace.path("out/api.yaml"))?;
    assert_eq!(saved["components"]["schemas"]["sampleInput"]["required"], json!(["name"]));

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["applied"], 5);
    assert_eq!(
        report["skipped"],
        json!([{"reason": "missing_schema", "schema": "sampleQuery"}])
    );
    Ok(())
}

#[test]
fn test_apply_yaml_document_keeps_yaml() -> Result<()> {
    let workspace = Workspace::new()?;
    fs::write(workspace.path("api.yaml"), serde_yaml::to_string(&document())?)?;
    let output = workspace.run(&["apply", "api.yaml", "--rules", "rules.yaml", "--save-to", "result.yaml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let saved: Value = serde_yaml::from_str(&fs::read_to_string(workspace.path("result.yaml"))?)?;
    assert_eq!(
        saved["components"]["schemas"]["sampleInput"]["properties"]["name"]["maxLength"],
        50
    );
    Ok(())
}

#[test]
fn test_strict_fails_on_missing_items() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["apply", "api.json", "--rules", "rules.yaml", "--strict"])?;

    assert_eq!(output.status.code(), Some(6));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 configured item(s) were not found"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn test_missing_document() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["apply", "missing.json", "--rules", "rules.yaml"])?;

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    Ok(())
}

#[test]
fn test_malformed_document_reports_location() -> Result<()> {
    let workspace = Workspace::new()?;
    fs::write(workspace.path("broken.json"), "{\n  \"openapi\": \"3.0.1\",\n  \"paths\": {,}\n}")?;
    let output = workspace.run(&["apply", "broken.json", "--rules", "rules.yaml"])?;

    assert_eq!(output.status.code(), Some(12));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3 column"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn test_document_root_must_be_object() -> Result<()> {
    let workspace = Workspace::new()?;
    fs::write(workspace.path("list.json"), "[]")?;
    let output = workspace.run(&["apply", "list.json", "--rules", "rules.yaml"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid document"));
    Ok(())
}

#[test]
fn test_apply_keeps_document_key_order() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["apply", "api.json", "--rules", "rules.yaml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout)?;
    let keys: Vec<_> = result.as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default();
    let expected: Vec<_> = document().as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default();
    assert_eq!(keys, expected);
    Ok(())
}

#[test]
fn test_duplicate_validator_in_manifest() -> Result<()> {
    let workspace = Workspace::new()?;
    fs::write(
        workspace.path("dup.json"),
        r#"{"validators": [{"type": "Sample"}, {"type": "Sample"}]}"#,
    )?;
    let output = workspace.run(&["inspect", "--rules", "dup.json"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already registered"));
    Ok(())
}

#[test]
fn test_inspect_json() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["-o", "json", "inspect", "--rules", "rules.yaml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let inspection: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        inspection["schemas"]["sampleQuery"]["code"],
        json!([{"rule": "not_null"}, {"rule": "exact_length", "length": 3}])
    );
    assert_eq!(
        inspection["operations"],
        json!([{"operation_id": "getSample", "schema": "SampleQuery"}])
    );
    Ok(())
}

#[test]
fn test_inspect_human() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["inspect", "--rules", "rules.yaml"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sampleInput │ name"));
    assert!(stdout.contains("getSample -> SampleQuery"));
    Ok(())
}

#[test]
fn test_completions() -> Result<()> {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["completions", "bash"])?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("rulemark"));
    Ok(())
}
