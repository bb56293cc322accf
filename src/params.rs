//! Parameter bag supplied by the host for a single invocation

use serde_json::{Map, Value};
use thiserror::Error;

/// Read-only mapping from parameter name to JSON value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    values: Map<String, Value>,
}

/// Parameter bag construction errors
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Parameters must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ParameterBag {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a bag from the JSON text the host serializes its parameters into
    pub fn from_json_str(raw: &str) -> Result<Self, ParamsError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::try_from(value)
    }

    /// Look up a parameter; `Null` counts as absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Value> for ParameterBag {
    type Error = ParamsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(ParamsError::NotAnObject(json_type_name(&other))),
        }
    }
}

impl From<Map<String, Value>> for ParameterBag {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
