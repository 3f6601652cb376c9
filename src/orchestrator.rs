//! Request orchestration
//!
//! One request-response cycle: decide, execute if a tool was chosen, and
//! wrap the outcome in a [`ResponseEnvelope`]. `process` never fails.

use crate::domain::ResponseEnvelope;
use crate::error::{Result, RouterError};
use crate::llm::LlmClient;
use crate::provider::ToolProvider;
use crate::routing::RoutingModel;
use crate::session::Session;
use crate::tools::ToolExecutor;

pub struct RequestOrchestrator<L: LlmClient, P: ToolProvider> {
    router: RoutingModel<L>,
    executor: ToolExecutor,
    session: Session<P>,
}

impl<L: LlmClient, P: ToolProvider> RequestOrchestrator<L, P> {
    pub fn new(router: RoutingModel<L>, executor: ToolExecutor, session: Session<P>) -> Self {
        Self {
            router,
            executor,
            session,
        }
    }

    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    /// Process one user request into exactly one envelope
    pub async fn process(&self, user_text: &str) -> ResponseEnvelope {
        log::info!("Processing request: {}", user_text);
        let catalog = self.session.catalog();
        let decision = self.router.decide(user_text, catalog).await;

        if decision.is_no_action() {
            log::info!("No tool selected");
            return ResponseEnvelope::no_action();
        }

        let result = self
            .executor
            .execute(self.session.provider(), &decision.tool, &decision.arguments, catalog)
            .await;

        match result {
            Ok(result) => ResponseEnvelope::success(decision.tool, decision.arguments, result),
            Err(e) => ResponseEnvelope::error(decision.tool, decision.arguments, error_text(e)),
        }
    }

    /// Close the session's provider
    pub async fn shutdown(self) -> Result<()> {
        self.session.close().await
    }
}

fn error_text(err: RouterError) -> String {
    match err {
        RouterError::Execution(message) => message,
        other => other.to_string(),
    }
}
