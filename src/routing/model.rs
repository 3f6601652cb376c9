//! Routing model: asks the LLM for a single tool call
//!
//! One primary request, at most one repair request, and a safe no-action
//! fallback for everything else. `decide` never fails.

use std::sync::Arc;

use super::parse::parse_decision;
use crate::config::LlmConfig;
use crate::domain::RoutingDecision;
use crate::error::RouterError;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{SYSTEM_PROMPT, correction_prompt, render, routing_prompt};
use crate::tools::ToolCatalog;

/// Sampling parameters applied to every routing request
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
    pub json_mode: bool,
}

impl Default for Sampling {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

impl From<&LlmConfig> for Sampling {
    fn from(config: &LlmConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            json_mode: config.json_mode,
        }
    }
}

pub struct RoutingModel<L: LlmClient> {
    llm: Arc<L>,
    sampling: Sampling,
}

impl<L: LlmClient> RoutingModel<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self {
            llm,
            sampling: Sampling::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Choose a tool for the request
    ///
    /// Transport failures fall back to no action without retrying. Output
    /// that is not a structurally valid decision gets exactly one repair
    /// request; if that also fails, the result is no action.
    pub async fn decide(&self, user_text: &str, catalog: &ToolCatalog) -> RoutingDecision {
        let catalog_text = render(catalog);
        let prompt = routing_prompt(&catalog_text, user_text);
        log::debug!("Routing prompt is {} chars ({} tools)", prompt.len(), catalog.len());

        let raw = match self.llm.complete(self.request(prompt)).await {
            Ok(response) => response.content,
            Err(e) => {
                log::warn!("Routing request failed, no tool selected: {}", e);
                return RoutingDecision::safe_default();
            }
        };
        log::debug!("Raw model output: {}", raw);

        match parse_decision(&raw) {
            Ok(decision) => {
                log::info!("Model selected tool: {}", display_tool(&decision));
                decision
            }
            Err(e) => {
                log::warn!("Invalid model output, attempting repair: {}", e);
                self.repair(&raw, &reason(e), &catalog_text).await
            }
        }
    }

    /// Single corrective round-trip
    async fn repair(&self, invalid: &str, reason: &str, catalog_text: &str) -> RoutingDecision {
        let prompt = correction_prompt(invalid, reason, catalog_text);

        let raw = match self.llm.complete(self.request(prompt)).await {
            Ok(response) => response.content,
            Err(e) => {
                log::warn!("Repair request failed, no tool selected: {}", e);
                return RoutingDecision::safe_default();
            }
        };
        log::debug!("Raw repair output: {}", raw);

        match parse_decision(&raw) {
            Ok(decision) => {
                log::info!("Repaired output selected tool: {}", display_tool(&decision));
                decision
            }
            Err(e) => {
                log::warn!("Repair output still invalid, no tool selected: {}", e);
                RoutingDecision::safe_default()
            }
        }
    }

    fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest::new(SYSTEM_PROMPT)
            .with_user_message(prompt)
            .with_temperature(self.sampling.temperature)
            .with_max_tokens(self.sampling.max_tokens)
            .with_json_mode(self.sampling.json_mode)
    }
}

fn reason(err: RouterError) -> String {
    match err {
        RouterError::MalformedModelOutput(reason) => reason,
        other => other.to_string(),
    }
}

fn display_tool(decision: &RoutingDecision) -> &str {
    if decision.tool.is_empty() { "<null>" } else { &decision.tool }
}
