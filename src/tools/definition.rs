//! Tool definitions as advertised by the tool provider
//!
//! A tool carries its JSON input schema verbatim; parameters are derived from
//! the schema's `properties` in declaration order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description used when the provider omits one
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Type reported for a parameter whose schema declares none
const ANY_TYPE: &str = "any";

/// A tool exposed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name, unique within a catalog
    pub name: String,
    /// Human-readable description for the model
    pub description: String,
    /// JSON schema for input parameters
    pub input_schema: Value,
}

/// A named parameter from a tool's input schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub param_type: String,
    pub required: bool,
}

impl Tool {
    /// Create a tool with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    /// Set input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Parameters in schema declaration order
    pub fn parameters(&self) -> Vec<Parameter> {
        let required: Vec<&str> = self
            .input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let Some(properties) = self.input_schema.get("properties").and_then(|p| p.as_object()) else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(name, prop)| Parameter {
                name: name.clone(),
                param_type: prop
                    .get("type")
                    .and_then(type_label)
                    .unwrap_or_else(|| ANY_TYPE.to_string()),
                required: required.contains(&name.as_str()),
            })
            .collect()
    }
}

/// Render a schema `type`, which may be a single name or a union list
fn type_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let names: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if names.is_empty() { None } else { Some(names.join("|")) }
        }
        _ => None,
    }
}
