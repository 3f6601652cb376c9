//! Routing decision produced by the model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool name meaning "no tool applies"
pub const NO_TOOL: &str = "none";

/// The model's choice of a single tool call
///
/// `tool` is either [`NO_TOOL`] or a tool name that may or may not exist in
/// the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub tool: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl RoutingDecision {
    pub fn new(tool: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }

    /// Decision used whenever the model cannot produce a valid one
    pub fn safe_default() -> Self {
        Self::new(NO_TOOL, Map::new())
    }

    /// True for the sentinel in any casing and for a blank tool name
    pub fn is_no_action(&self) -> bool {
        let tool = self.tool.trim();
        tool.is_empty() || tool.eq_ignore_ascii_case(NO_TOOL)
    }
}

impl Default for RoutingDecision {
    fn default() -> Self {
        Self::safe_default()
    }
}
