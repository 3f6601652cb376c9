//! Scriptable in-memory tool provider

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::ToolProvider;
use crate::error::{Result, RouterError};
use crate::tools::{RawContent, Tool};

/// A recorded `call_tool` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Content(Vec<Value>),
    Failure(String),
}

/// Provider with canned tools and per-tool responses
///
/// Clones share the call log and the closed flag, so a test can keep a
/// handle after moving the provider into a session.
#[derive(Debug, Clone, Default)]
pub struct MockToolProvider {
    tools: Vec<Tool>,
    responses: HashMap<String, Scripted>,
    list_failure: Option<String>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    list_count: Arc<Mutex<usize>>,
    closed: Arc<AtomicBool>,
}

impl MockToolProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool to the listed catalog
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set raw content items returned for a tool
    pub fn with_response(mut self, tool_name: &str, content: Vec<Value>) -> Self {
        self.responses.insert(tool_name.to_string(), Scripted::Content(content));
        self
    }

    /// Make a tool fail with an execution error
    pub fn with_failure(mut self, tool_name: &str, message: &str) -> Self {
        self.responses
            .insert(tool_name.to_string(), Scripted::Failure(message.to_string()));
        self
    }

    /// Make `list_tools` fail with a transport error
    pub fn with_list_failure(mut self, message: &str) -> Self {
        self.list_failure = Some(message.to_string());
        self
    }

    /// Every `call_tool` invocation so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of `list_tools` invocations so far
    pub fn list_count(&self) -> usize {
        *self.list_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolProvider for MockToolProvider {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        *self.list_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        match &self.list_failure {
            Some(message) => Err(RouterError::Transport(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> Result<Vec<RawContent>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                name: name.to_string(),
                arguments: arguments.clone(),
            });

        match self.responses.get(name) {
            Some(Scripted::Content(items)) => Ok(items.iter().cloned().map(RawContent::resolve).collect()),
            Some(Scripted::Failure(message)) => Err(RouterError::Execution(message.clone())),
            None => Err(RouterError::Execution(format!("Unknown tool: {}", name))),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
