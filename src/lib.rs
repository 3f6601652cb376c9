//! mcp-router - route free-text requests to a single MCP tool call
//!
//! A language model picks one tool from the provider's catalog (or none),
//! its output is validated and repaired once if needed, the tool is
//! executed over MCP, and every request ends in a uniform result envelope.

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod routing;
pub mod session;
pub mod tools;

pub use config::Config;
pub use domain::{ResponseEnvelope, RoutingDecision};
pub use error::{Result, RouterError};
pub use orchestrator::RequestOrchestrator;
pub use session::Session;
