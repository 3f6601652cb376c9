//! JSON-RPC over stdio transport.
//!
//! Line-delimited JSON: one message per line in each direction. The transport
//! works over any async reader/writer pair; for a provider subprocess these
//! are its stdout and stdin.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use super::types::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, error_codes};
use crate::error::{Result, RouterError};

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;
type BoxedReader = BufReader<Box<dyn AsyncRead + Send + Unpin>>;

/// Bi-directional JSON-RPC transport
pub struct StdioTransport {
    server_name: String,
    next_id: AtomicU64,
    writer: Mutex<Option<BoxedWriter>>,
    reader: Mutex<BoxedReader>,
}

impl StdioTransport {
    pub fn new<W, R>(server_name: &str, writer: W, reader: R) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            server_name: server_name.to_string(),
            next_id: AtomicU64::new(1),
            writer: Mutex::new(Some(Box::new(writer))),
            reader: Mutex::new(BufReader::new(Box::new(reader))),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Send a request and wait for the response with the matching id
    ///
    /// Lines that are not a response to this request (server logs,
    /// notifications, server-initiated requests) are skipped.
    pub async fn request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);
        self.send_line(&serde_json::to_string(&req)?).await?;

        let mut line_buf = String::new();
        let mut reader = self.reader.lock().await;

        loop {
            line_buf.clear();
            let bytes_read = reader
                .read_line(&mut line_buf)
                .await
                .map_err(|e| self.transport_error(format!("failed to read from stdout: {}", e)))?;

            if bytes_read == 0 {
                return Err(self.transport_error("server stdout closed (process may have exited)"));
            }

            let trimmed = line_buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcResponse>(trimmed) {
                Ok(resp) if resp.id == id && resp.method.is_none() => return extract_result(resp),
                Ok(_) => continue,
                Err(_) => {
                    log::debug!("[{}] skipping non-response line: {}", self.server_name, trimmed);
                    continue;
                }
            }
        }
    }

    /// Send a notification (no response expected)
    pub async fn notify(&self, method: &str, params: Option<Value>) -> Result<()> {
        let notification = JsonRpcNotification::new(method, params);
        self.send_line(&serde_json::to_string(&notification)?).await
    }

    /// Close the write half, signalling end of input to the server
    pub async fn close(&self) {
        let mut writer = self.writer.lock().await;
        if let Some(mut w) = writer.take() {
            let _ = w.shutdown().await;
        }
    }

    async fn send_line(&self, json: &str) -> Result<()> {
        let mut guard = self.writer.lock().await;
        let writer = guard
            .as_mut()
            .ok_or_else(|| self.transport_error("transport is closed"))?;

        writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| self.transport_error(format!("failed to write to stdin: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| self.transport_error(format!("failed to write to stdin: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| self.transport_error(format!("failed to flush stdin: {}", e)))?;
        Ok(())
    }

    fn transport_error(&self, reason: impl std::fmt::Display) -> RouterError {
        RouterError::Transport(format!("server '{}': {}", self.server_name, reason))
    }
}

/// Extract the result from a response, converting error objects to `RouterError::Rpc`
pub fn extract_result(response: JsonRpcResponse) -> Result<Value> {
    if let Some(err) = response.error {
        let message = match err.data {
            Some(data) if !data.is_null() => format!("{} ({})", err.message, data),
            _ => err.message,
        };
        return Err(RouterError::Rpc { code: err.code, message });
    }

    response.result.ok_or(RouterError::Rpc {
        code: error_codes::INTERNAL_ERROR,
        message: "response missing both result and error".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, duplex};

    /// Wire a transport to an in-memory peer; returns the peer's read and write halves
    fn connected() -> (
        StdioTransport,
        tokio::io::Lines<BufReader<tokio::io::DuplexStream>>,
        tokio::io::DuplexStream,
    ) {
        let (client_out, server_in) = duplex(64 * 1024);
        let (server_out, client_in) = duplex(64 * 1024);
        let transport = StdioTransport::new("test", client_out, client_in);
        (transport, BufReader::new(server_in).lines(), server_out)
    }

    #[tokio::test]
    async fn test_request_skips_noise_and_matches_id() {
        let (transport, mut requests, mut server_out) = connected();

        let server = tokio::spawn(async move {
            let line = requests.next_line().await.unwrap().unwrap();
            let req: Value = serde_json::from_str(&line).unwrap();
            assert_eq!(req["method"], "tools/list");
            let id = req["id"].as_u64().unwrap();

            let replies = format!(
                "Initializing Minecraft bot tools...\n\n{}\n{}\n{}\n",
                json!({"jsonrpc": "2.0", "method": "notifications/message", "params": {}}),
                json!({"jsonrpc": "2.0", "id": id + 100, "result": {"tools": ["stale"]}}),
                json!({"jsonrpc": "2.0", "id": id, "result": {"tools": []}}),
            );
            server_out.write_all(replies.as_bytes()).await.unwrap();
        });

        let result = transport.request("tools/list", None).await.unwrap();
        assert_eq!(result, json!({"tools": []}));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_ids_are_monotonic() {
        let (transport, mut requests, mut server_out) = connected();

        let server = tokio::spawn(async move {
            let mut ids = Vec::new();
            for _ in 0..2 {
                let line = requests.next_line().await.unwrap().unwrap();
                let req: Value = serde_json::from_str(&line).unwrap();
                let id = req["id"].as_u64().unwrap();
                ids.push(id);
                let reply = format!("{}\n", json!({"jsonrpc": "2.0", "id": id, "result": {}}));
                server_out.write_all(reply.as_bytes()).await.unwrap();
            }
            ids
        });

        transport.request("ping", None).await.unwrap();
        transport.request("ping", None).await.unwrap();
        let ids = server.await.unwrap();
        assert!(ids[1] > ids[0]);
    }

    #[tokio::test]
    async fn test_error_response_becomes_rpc_error() {
        let (transport, mut requests, mut server_out) = connected();

        tokio::spawn(async move {
            let line = requests.next_line().await.unwrap().unwrap();
            let req: Value = serde_json::from_str(&line).unwrap();
            let reply = json!({
                "jsonrpc": "2.0",
                "id": req["id"],
                "error": {"code": -32602, "message": "Unknown tool: fly"}
            });
            server_out.write_all(format!("{}\n", reply).as_bytes()).await.unwrap();
        });

        let err = transport.request("tools/call", Some(json!({"name": "fly"}))).await.unwrap_err();
        match err {
            RouterError::Rpc { code, message } => {
                assert_eq!(code, -32602);
                assert_eq!(message, "Unknown tool: fly");
            }
            other => panic!("expected Rpc error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_eof_is_transport_error() {
        let (transport, requests, server_out) = connected();
        drop(server_out);

        let err = transport.request("tools/list", None).await.unwrap_err();
        assert!(matches!(err, RouterError::Transport(_)));
        drop(requests);
    }

    #[tokio::test]
    async fn test_notify_writes_single_line_without_id() {
        let (transport, mut requests, _server_out) = connected();

        transport.notify("notifications/initialized", None).await.unwrap();
        let line = requests.next_line().await.unwrap().unwrap();
        let msg: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(msg["method"], "notifications/initialized");
        assert!(msg.get("id").is_none());
    }

    #[tokio::test]
    async fn test_closed_transport_rejects_requests() {
        let (transport, _requests, _server_out) = connected();
        transport.close().await;

        let err = transport.request("tools/list", None).await.unwrap_err();
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn test_extract_result_appends_error_data() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": {"code": -32603, "message": "Tool failed", "data": {"reason": "bot offline"}}
        }))
        .unwrap();

        match extract_result(resp) {
            Err(RouterError::Rpc { code, message }) => {
                assert_eq!(code, -32603);
                assert_eq!(message, r#"Tool failed ({"reason":"bot offline"})"#);
            }
            other => panic!("expected Rpc error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_result_ignores_null_error_data() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "error": {"code": -32602, "message": "Unknown tool: fly", "data": null}
        }))
        .unwrap();

        let err = extract_result(resp).unwrap_err();
        assert_eq!(err.to_string(), "RPC error [-32602]: Unknown tool: fly");
    }

    #[test]
    fn test_extract_result_missing_both() {
        let resp = JsonRpcResponse {
            id: 1,
            method: None,
            result: None,
            error: None,
        };
        assert!(matches!(extract_result(resp), Err(RouterError::Rpc { .. })));
    }
}
