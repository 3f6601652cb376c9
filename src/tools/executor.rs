//! Tool execution through the session's provider

use serde_json::{Map, Value};

use super::catalog::ToolCatalog;
use super::content::{ToolResult, normalize};
use crate::error::{Result, RouterError};
use crate::provider::ToolProvider;

/// Invokes tools on a provider and normalizes their content
#[derive(Debug, Clone, Default)]
pub struct ToolExecutor {
    validate_tool_names: bool,
}

impl ToolExecutor {
    /// Executor that defers tool-name checks to the provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject names missing from the catalog before dispatch
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_tool_names = enabled;
        self
    }

    /// Execute a tool call
    ///
    /// Every failure is reported as [`RouterError::Execution`] with a
    /// non-empty description.
    pub async fn execute<P>(
        &self,
        provider: &P,
        tool_name: &str,
        arguments: &Map<String, Value>,
        catalog: &ToolCatalog,
    ) -> Result<ToolResult>
    where
        P: ToolProvider + ?Sized,
    {
        if self.validate_tool_names && !catalog.contains(tool_name) {
            log::warn!("Rejecting unknown tool before dispatch: {}", tool_name);
            return Err(RouterError::Execution(format!("Unknown tool: {}", tool_name)));
        }

        log::info!("Calling tool: {}", tool_name);
        log::debug!("Arguments: {}", Value::Object(arguments.clone()));

        match provider.call_tool(tool_name, arguments).await {
            Ok(content) => {
                let result = normalize(&content);
                log::info!("Tool {} returned {} content item(s)", tool_name, result.len());
                Ok(result)
            }
            Err(e) => {
                log::warn!("Tool {} failed: {}", tool_name, e);
                Err(into_execution_error(tool_name, e))
            }
        }
    }
}

fn into_execution_error(tool_name: &str, err: RouterError) -> RouterError {
    let message = match err {
        RouterError::Execution(message) => message,
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        RouterError::Execution(format!("tool '{}' failed", tool_name))
    } else {
        RouterError::Execution(message)
    }
}
