//! LLM Client Layer - chat completions for the routing model
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - OpenAiClient for OpenAI-compatible endpoints (Groq by default)
//! - MockLlmClient for scripted tests

pub mod client;
pub mod openai;
pub mod types;

pub use client::{LlmClient, MockLlmClient};
pub use openai::OpenAiClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, Usage};
