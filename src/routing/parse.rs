//! Parser for the model's routing output
//!
//! The model is asked for `{"tool": ..., "arguments": {...}}`. Surrounding
//! whitespace and a single Markdown code fence are tolerated. Anything that
//! does not have the required shape is reported as
//! [`RouterError::MalformedModelOutput`] so the caller can attempt a repair.

use serde_json::{Map, Value};

use crate::domain::RoutingDecision;
use crate::error::{Result, RouterError};

/// Parse raw model text into a routing decision
pub fn parse_decision(raw: &str) -> Result<RoutingDecision> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(malformed("empty response"));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| malformed(format!("not valid JSON: {}", e)))?;
    decision_from_value(value)
}

/// Validate the structure of an already-parsed JSON value
pub fn decision_from_value(value: Value) -> Result<RoutingDecision> {
    let Value::Object(mut obj) = value else {
        return Err(malformed("expected a JSON object"));
    };

    let tool = match obj.remove("tool") {
        Some(Value::String(name)) => name.trim().to_string(),
        // An explicit null means no tool
        Some(Value::Null) => String::new(),
        Some(other) => return Err(malformed(format!("\"tool\" must be a string, got {}", type_name(&other)))),
        None => return Err(malformed("missing \"tool\" key")),
    };

    let arguments = match obj.remove("arguments") {
        Some(Value::Object(args)) => args,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            return Err(malformed(format!(
                "\"arguments\" must be an object, got {}",
                type_name(&other)
            )));
        }
    };

    Ok(RoutingDecision::new(tool, arguments))
}

/// Strip whitespace and at most one surrounding Markdown code fence
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    match rest.find('\n') {
        Some(idx) => rest[idx + 1..].trim(),
        None => rest.trim(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn malformed(reason: impl Into<String>) -> RouterError {
    RouterError::MalformedModelOutput(reason.into())
}
