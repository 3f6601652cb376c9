//! End-to-end routing tests
//!
//! Each test drives the public API with a scripted model and an in-memory
//! provider: decide, execute, and envelope.

use std::sync::Arc;

use serde_json::{Value, json};

use mcp_router::domain::{ResponseEnvelope, RoutingDecision};
use mcp_router::llm::MockLlmClient;
use mcp_router::orchestrator::RequestOrchestrator;
use mcp_router::prompt::render;
use mcp_router::provider::MockToolProvider;
use mcp_router::routing::RoutingModel;
use mcp_router::session::Session;
use mcp_router::tools::{Tool, ToolCatalog, ToolExecutor};

fn minecraft_tools() -> Vec<Tool> {
    vec![
        Tool::new("minecraft_get_status", "Get the bot's health, food\nand position"),
        Tool::new("minecraft_chat", "Send a chat message").with_schema(json!({
            "type": "object",
            "properties": {"message": {"type": "string", "description": "Message text"}},
            "required": ["message"]
        })),
        Tool::new("minecraft_move_to", "Move the bot to a position").with_schema(json!({
            "type": "object",
            "properties": {
                "x": {"type": "number"},
                "y": {"type": "number"},
                "z": {"type": "number"}
            },
            "required": ["x", "y", "z"]
        })),
    ]
}

fn provider() -> MockToolProvider {
    minecraft_tools()
        .into_iter()
        .fold(MockToolProvider::new(), |p, tool| p.with_tool(tool))
        .with_response(
            "minecraft_get_status",
            vec![json!({"type": "text", "text": "Health: 20/20, Food: 18/20, Position: (12, 64, -30)"})],
        )
        .with_response(
            "minecraft_chat",
            vec![json!({"type": "text", "text": "Sent message: \"hello\"", "annotations": {"priority": 1}})],
        )
        .with_failure("minecraft_move_to", "Bot is not spawned")
}

async fn orchestrator(
    llm: &MockLlmClient,
    provider: MockToolProvider,
) -> RequestOrchestrator<MockLlmClient, MockToolProvider> {
    let session = Session::open(provider).await.unwrap();
    RequestOrchestrator::new(RoutingModel::new(Arc::new(llm.clone())), ToolExecutor::new(), session)
}

#[test]
fn test_render_line_count_matches_catalog() {
    let catalog = ToolCatalog::from_tools(minecraft_tools());
    let text = render(&catalog);

    assert_eq!(text.lines().count(), catalog.len());
    assert_eq!(text, render(&catalog));
    assert_eq!(render(&ToolCatalog::new()), "No tools available.");
}

#[tokio::test]
async fn test_sentinel_in_any_casing_is_no_action() {
    for reply in [
        r#"{"tool": "none", "arguments": {}}"#,
        r#"{"tool": "NONE"}"#,
        r#"{"tool": "None", "arguments": null}"#,
    ] {
        let llm = MockLlmClient::with_responses([reply]);
        let provider = provider();
        let handle = provider.clone();

        let envelope = orchestrator(&llm, provider).await.process("hello bot").await;

        assert_eq!(envelope, ResponseEnvelope::no_action(), "{}", reply);
        assert_eq!(handle.call_count(), 0);
        assert_eq!(llm.request_count(), 1);
    }
}

#[tokio::test]
async fn test_malformed_then_repaired_decision_is_executed() {
    let llm = MockLlmClient::with_responses([
        "Sure! You should call minecraft_get_status.",
        r#"{"tool": "minecraft_get_status", "arguments": {}}"#,
    ]);
    let provider = provider();
    let handle = provider.clone();

    let envelope = orchestrator(&llm, provider).await.process("how am I doing?").await;

    assert_eq!(envelope.status(), "success");
    assert_eq!(envelope.tool(), Some("minecraft_get_status"));
    assert_eq!(llm.request_count(), 2);
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn test_malformed_twice_is_no_action_without_execution() {
    let llm = MockLlmClient::with_responses(["not json", "{\"tool\": "]);
    let provider = provider();
    let handle = provider.clone();

    let envelope = orchestrator(&llm, provider).await.process("how am I doing?").await;

    assert_eq!(envelope, ResponseEnvelope::no_action());
    assert_eq!(llm.request_count(), 2);
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn test_parseable_but_invalid_repair_is_no_action_without_execution() {
    for repair in [
        r#"{"arguments": {}}"#,
        r#"{"tool": "minecraft_get_status", "arguments": [1]}"#,
    ] {
        let llm = MockLlmClient::with_responses(["I would check the status", repair]);
        let provider = provider();
        let handle = provider.clone();

        let envelope = orchestrator(&llm, provider).await.process("how am I doing?").await;

        assert_eq!(envelope, ResponseEnvelope::no_action(), "{}", repair);
        assert_eq!(llm.request_count(), 2);
        assert_eq!(handle.call_count(), 0);
    }
}

#[tokio::test]
async fn test_model_unreachable_is_no_action() {
    let llm = MockLlmClient::new();
    llm.push_failure("timed out after 30000ms");
    let provider = provider();
    let handle = provider.clone();

    let envelope = orchestrator(&llm, provider).await.process("status").await;

    assert_eq!(envelope.status(), "no_action");
    assert_eq!(llm.request_count(), 1);
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn test_success_envelope_carries_normalized_result() {
    let llm = MockLlmClient::with_responses([r#"{"tool": "minecraft_chat", "arguments": {"message": "hello"}}"#]);
    let provider = provider();
    let handle = provider.clone();

    let envelope = orchestrator(&llm, provider).await.process("say hello").await;

    let expected = json!({
        "status": "success",
        "tool": "minecraft_chat",
        "arguments": {"message": "hello"},
        "result": [{"type": "text", "text": "Sent message: \"hello\"", "annotations": {"priority": 1}}]
    });
    assert_eq!(envelope.to_json(), expected);

    let calls = handle.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "minecraft_chat");
    assert_eq!(Value::Object(calls[0].arguments.clone()), json!({"message": "hello"}));
}

#[tokio::test]
async fn test_provider_failure_is_error_envelope() {
    let llm = MockLlmClient::with_responses([r#"{"tool": "minecraft_move_to", "arguments": {"x": 1, "y": 64, "z": 2}}"#]);

    let envelope = orchestrator(&llm, provider()).await.process("go to 1 64 2").await;

    match envelope {
        ResponseEnvelope::Error { tool, arguments, error } => {
            assert_eq!(tool, "minecraft_move_to");
            assert_eq!(arguments["y"], 64);
            assert!(!error.is_empty());
        }
        other => panic!("expected error envelope, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invented_tool_is_rejected_by_provider() {
    let llm = MockLlmClient::with_responses([r#"{"tool": "minecraft_fly", "arguments": {}}"#]);
    let provider = provider();
    let handle = provider.clone();

    let envelope = orchestrator(&llm, provider).await.process("fly up").await;

    assert_eq!(envelope.status(), "error");
    assert_eq!(envelope.tool(), Some("minecraft_fly"));
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn test_local_validation_rejects_invented_tool_before_dispatch() {
    let llm = MockLlmClient::with_responses([r#"{"tool": "minecraft_fly", "arguments": {}}"#]);
    let provider = provider();
    let handle = provider.clone();

    let session = Session::open(provider).await.unwrap();
    let orchestrator = RequestOrchestrator::new(
        RoutingModel::new(Arc::new(llm.clone())),
        ToolExecutor::new().with_validation(true),
        session,
    );
    let envelope = orchestrator.process("fly up").await;

    assert_eq!(envelope.status(), "error");
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn test_identical_requests_yield_equal_envelopes() {
    let reply = r#"{"tool": "minecraft_get_status", "arguments": {}}"#;
    let llm = MockLlmClient::with_responses([reply, reply]);
    let orchestrator = orchestrator(&llm, provider()).await;

    let first = orchestrator.process("status please").await;
    let second = orchestrator.process("status please").await;

    assert_eq!(first, second);
    let requests = llm.requests();
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_catalog_is_fetched_once_per_session() {
    let reply = r#"{"tool": "none"}"#;
    let llm = MockLlmClient::with_responses([reply, reply, reply]);
    let provider = provider();
    let handle = provider.clone();

    let orchestrator = orchestrator(&llm, provider).await;
    for text in ["one", "two", "three"] {
        orchestrator.process(text).await;
    }

    assert_eq!(handle.list_count(), 1);
    orchestrator.shutdown().await.unwrap();
    assert!(handle.is_closed());
}

#[test]
fn test_safe_default_shape() {
    let decision = RoutingDecision::safe_default();
    assert_eq!(
        serde_json::to_value(&decision).unwrap(),
        json!({"tool": "none", "arguments": {}})
    );
}
