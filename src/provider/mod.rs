//! Tool provider boundary
//!
//! A provider lists the tools it offers and executes them by name. The
//! production provider is an MCP server spoken to over the stdio of a child
//! process; tests use the in-memory [`MockToolProvider`].

pub mod mock;
pub mod stdio;
pub mod transport;
pub mod types;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::tools::{RawContent, Tool};

pub use mock::MockToolProvider;
pub use stdio::McpStdioProvider;
pub use transport::StdioTransport;
pub use types::{PROTOCOL_VERSION, ServerInfo};

/// Source of tools and executor of tool calls
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Tools offered by the provider, in provider order
    async fn list_tools(&self) -> Result<Vec<Tool>>;

    /// Invoke a tool and return its raw content items
    async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> Result<Vec<RawContent>>;

    /// Release the connection
    async fn close(&mut self) -> Result<()>;
}
