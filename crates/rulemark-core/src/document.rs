//! OpenAPI document model
//!
//! The document is kept as the JSON tree it was read from. Lookups walk the
//! tree and hand out views over the objects the filter mutates, so a node of
//! an unexpected shape only hides that node. Every other key keeps its value
//! and its position.
//!
//! Copyright (c) 2025 Rulemark Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys of the schema constraint fields the filter writes
pub mod fields {
    pub const DESCRIPTION: &str = "description";
    pub const REQUIRED: &str = "required";
    pub const PROPERTIES: &str = "properties";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const MINIMUM: &str = "minimum";
    pub const MAXIMUM: &str = "maximum";
    pub const EXCLUSIVE_MINIMUM: &str = "exclusiveMinimum";
    pub const EXCLUSIVE_MAXIMUM: &str = "exclusiveMaximum";
    pub const PATTERN: &str = "pattern";
}

/// An OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenApiDocument {
    root: Value,
}

impl Default for OpenApiDocument {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl From<Value> for OpenApiDocument {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl OpenApiDocument {
    /// Wrap a JSON value that must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidDocument {
                message: format!("expected a JSON object at the root, found {}", kind_of(&value)),
            });
        }
        Ok(Self::from(value))
    }

    /// The underlying JSON tree
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Unwrap the JSON tree
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Look up a named schema in `components.schemas`.
    ///
    /// Entries that are not schema objects (for example boolean schemas) are
    /// not returned.
    pub fn schema_mut(&mut self, key: &str) -> Option<SchemaMut<'_>> {
        self.root
            .get_mut("components")?
            .get_mut("schemas")?
            .get_mut(key)?
            .as_object_mut()
            .map(SchemaMut::new)
    }

    /// Find an operation by identifier across every path and method
    pub fn find_operation_mut(&mut self, operation_id: &str) -> Option<OperationMut<'_>> {
        let paths = self.root.get_mut("paths")?.as_object_mut()?;
        let (path, method, operation) = paths
            .iter_mut()
            .filter_map(|(path, item)| Some((path, item.as_object_mut()?)))
            .flat_map(|(path, item)| operations_mut(item).map(move |(method, operation)| (path, method, operation)))
            .find(|(_, _, operation)| operation.operation_id() == Some(operation_id))?;

        log::trace!("Operation '{}' found at {} {}", operation_id, method, path);
        Some(operation)
    }
}

/// HTTP methods an operation can be declared under in a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    /// Parse a path item key; anything else (`parameters`, `summary`, ...) is not a method
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Operations of a path item, in document order
fn operations_mut(item: &mut Map<String, Value>) -> impl Iterator<Item = (Method, OperationMut<'_>)> + '_ {
    item.iter_mut().filter_map(|(key, value)| {
        let method = Method::from_key(key)?;
        Some((method, OperationMut::new(value.as_object_mut()?)))
    })
}

/// Mutable view of a schema object
#[derive(Debug)]
pub struct SchemaMut<'a> {
    map: &'a mut Map<String, Value>,
}

impl<'a> SchemaMut<'a> {
    pub fn new(map: &'a mut Map<String, Value>) -> Self {
        Self { map }
    }

    /// Read a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.map.get(field)
    }

    /// Assign a field; an existing field keeps its position
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.map.insert(field.to_string(), value.into());
    }

    /// Remove a field, keeping the order of the others
    pub fn unset(&mut self, field: &str) {
        self.map.shift_remove(field);
    }

    /// Assign a field, or remove it for `None`
    pub fn assign(&mut self, field: &str, value: Option<impl Into<Value>>) {
        match value {
            Some(value) => self.set(field, value),
            None => self.unset(field),
        }
    }

    /// Description text, if the field holds a string
    pub fn description(&self) -> Option<&str> {
        self.get(fields::DESCRIPTION).and_then(Value::as_str)
    }

    /// Whether `properties` has an entry for the key, whatever its shape
    pub fn has_property(&self, key: &str) -> bool {
        self.map
            .get(fields::PROPERTIES)
            .and_then(Value::as_object)
            .is_some_and(|properties| properties.contains_key(key))
    }

    /// Look up a property schema object by key
    pub fn property_mut(&mut self, key: &str) -> Option<SchemaMut<'_>> {
        self.map
            .get_mut(fields::PROPERTIES)?
            .get_mut(key)?
            .as_object_mut()
            .map(SchemaMut::new)
    }

    /// Names listed in the `required` array
    pub fn required(&self) -> Vec<&str> {
        self.map
            .get(fields::REQUIRED)
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Add a name to the `required` array.
    ///
    /// Returns false when the name is already listed or when `required` is
    /// present but not an array; existing entries are never rewritten.
    pub fn require(&mut self, key: &str) -> bool {
        let entry = self
            .map
            .entry(fields::REQUIRED)
            .or_insert_with(|| Value::Array(Vec::new()));

        match entry {
            Value::Array(names) if names.iter().any(|name| name.as_str() == Some(key)) => false,
            Value::Array(names) => {
                names.push(Value::String(key.to_string()));
                true
            }
            other => {
                log::debug!("Cannot require '{}': 'required' is {}", key, kind_of(other));
                false
            }
        }
    }
}

/// Mutable view of an operation object
#[derive(Debug)]
pub struct OperationMut<'a> {
    map: &'a mut Map<String, Value>,
}

/// Outcome of looking up a parameter by name
#[derive(Debug)]
pub enum ParameterLookup<'a> {
    /// No parameter has the name
    Missing,
    /// Exactly one parameter has the name
    Found(ParameterMut<'a>),
    /// Several parameters share the name
    Ambiguous(usize),
}

impl<'a> OperationMut<'a> {
    pub fn new(map: &'a mut Map<String, Value>) -> Self {
        Self { map }
    }

    pub fn operation_id(&self) -> Option<&str> {
        self.map.get("operationId").and_then(Value::as_str)
    }

    /// Look up a parameter that must be unique by name.
    ///
    /// Entries without a string `name` (such as `$ref` parameters) never match.
    pub fn parameter_lookup(&mut self, name: &str) -> ParameterLookup<'_> {
        let Some(parameters) = self.map.get_mut("parameters").and_then(Value::as_array_mut) else {
            return ParameterLookup::Missing;
        };

        let named = |parameter: &Value| parameter.get("name").and_then(Value::as_str) == Some(name);
        match parameters.iter().filter(|parameter| named(parameter)).count() {
            0 => ParameterLookup::Missing,
            1 => parameters
                .iter_mut()
                .filter(|parameter| named(parameter))
                .find_map(Value::as_object_mut)
                .map_or(ParameterLookup::Missing, |map| ParameterLookup::Found(ParameterMut { map })),
            n => ParameterLookup::Ambiguous(n),
        }
    }
}

/// Mutable view of a parameter object
#[derive(Debug)]
pub struct ParameterMut<'a> {
    map: &'a mut Map<String, Value>,
}

impl ParameterMut<'_> {
    /// The `required` flag, if set to a boolean
    pub fn required(&self) -> Option<bool> {
        self.map.get("required").and_then(Value::as_bool)
    }

    pub fn set_required(&mut self) {
        self.map.insert("required".to_string(), Value::Bool(true));
    }

    /// The parameter's schema object; absent for content-typed parameters
    pub fn schema_mut(&mut self) -> Option<SchemaMut<'_>> {
        self.map
            .get_mut("schema")?
            .as_object_mut()
            .map(SchemaMut::new)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
