//! Uniform result envelope returned for every processed request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tools::ToolResult;

/// Message carried by every no-action envelope
pub const NO_ACTION_MESSAGE: &str = "No tool was selected by the LLM";

/// Outcome of one request, serialized with a `status` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseEnvelope {
    NoAction {
        message: String,
    },
    Success {
        tool: String,
        arguments: Map<String, Value>,
        result: ToolResult,
    },
    Error {
        tool: String,
        arguments: Map<String, Value>,
        error: String,
    },
}

impl ResponseEnvelope {
    pub fn no_action() -> Self {
        Self::NoAction {
            message: NO_ACTION_MESSAGE.to_string(),
        }
    }

    pub fn success(tool: impl Into<String>, arguments: Map<String, Value>, result: ToolResult) -> Self {
        Self::Success {
            tool: tool.into(),
            arguments,
            result,
        }
    }

    pub fn error(tool: impl Into<String>, arguments: Map<String, Value>, error: impl Into<String>) -> Self {
        Self::Error {
            tool: tool.into(),
            arguments,
            error: error.into(),
        }
    }

    /// Wire value of the `status` tag
    pub fn status(&self) -> &'static str {
        match self {
            Self::NoAction { .. } => "no_action",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    /// Tool name, for envelopes that name one
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::NoAction { .. } => None,
            Self::Success { tool, .. } | Self::Error { tool, .. } => Some(tool.as_str()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn to_json(&self) -> Value {
        // Every field is a string or JSON value
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> Map<String, Value> {
        json!({"message": "hello"}).as_object().unwrap().clone()
    }

    #[test]
    fn test_no_action_serialization() {
        assert_eq!(
            ResponseEnvelope::no_action().to_json(),
            json!({"status": "no_action", "message": "No tool was selected by the LLM"})
        );
    }

    #[test]
    fn test_success_serialization() {
        let result = vec![json!({"type": "text", "text": "Sent"}).as_object().unwrap().clone()];
        let envelope = ResponseEnvelope::success("minecraft_chat", args(), result);

        assert_eq!(
            envelope.to_json(),
            json!({
                "status": "success",
                "tool": "minecraft_chat",
                "arguments": {"message": "hello"},
                "result": [{"type": "text", "text": "Sent"}]
            })
        );
        assert_eq!(envelope.status(), "success");
        assert!(envelope.is_success());
    }

    #[test]
    fn test_error_serialization_field_order() {
        let envelope = ResponseEnvelope::error("minecraft_chat", args(), "Bot not connected");
        let text = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            text,
            r#"{"status":"error","tool":"minecraft_chat","arguments":{"message":"hello"},"error":"Bot not connected"}"#
        );
        assert_eq!(envelope.tool(), Some("minecraft_chat"));
    }

    #[test]
    fn test_envelope_deserializes_by_status() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"status": "no_action", "message": "m"})).unwrap();
        assert_eq!(envelope.status(), "no_action");
        assert_eq!(envelope.tool(), None);
    }
}
