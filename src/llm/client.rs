//! LLM client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::types::{CompletionRequest, CompletionResponse};
use crate::error::{Result, RouterError};

/// Stateless LLM client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model used when a request does not name one
    fn model(&self) -> &str;
}

/// Scripted client for tests
///
/// Replies are consumed in order. Each reply is either the raw assistant
/// text or a transport failure. Every received request is recorded; clones
/// share the script and the log.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    script: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that answers with the given texts in order
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for response in responses {
            client.push_response(response);
        }
        client
    }

    /// Queue a successful reply
    pub fn push_response(&self, content: impl Into<String>) {
        self.script_guard().push_back(Ok(content.into()));
    }

    /// Queue a transport failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script_guard().push_back(Err(message.into()));
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.script_guard().len()
    }

    fn script_guard(&self) -> std::sync::MutexGuard<'_, VecDeque<std::result::Result<String, String>>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match self.script_guard().pop_front() {
            Some(Ok(content)) => Ok(CompletionResponse::new(content)),
            Some(Err(message)) => Err(RouterError::Transport(message)),
            None => Err(RouterError::Transport("mock LLM script exhausted".to_string())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
