//! MCP tool provider running as a child process.
//!
//! Spawns the configured server command, performs the `initialize`
//! handshake, and serves `tools/list` and `tools/call` over the stdio
//! transport for the lifetime of the session.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

use super::ToolProvider;
use super::transport::StdioTransport;
use super::types::{CallToolResult, InitializeResult, ListToolsResult, PROTOCOL_VERSION, ServerInfo};
use crate::config::ProviderConfig;
use crate::error::{Result, RouterError};
use crate::tools::{RawContent, Tool};

pub struct McpStdioProvider {
    transport: StdioTransport,
    child: Option<Child>,
    call_timeout: Duration,
    shutdown_timeout: Duration,
    server_info: Option<ServerInfo>,
}

impl McpStdioProvider {
    /// Spawn the server process and complete the MCP handshake
    pub async fn connect(config: &ProviderConfig) -> Result<Self> {
        let name = server_label(config);
        log::info!("Connecting to MCP server: {} {}", config.command, config.args.join(" "));

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &config.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| RouterError::Transport(format!("failed to spawn server '{}': {}", name, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| RouterError::Transport("failed to capture server stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RouterError::Transport("failed to capture server stdout".into()))?;

        // Drain stderr into the log so a chatty server never blocks on a full pipe
        if let Some(stderr) = child.stderr.take() {
            let label = name.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::debug!("[{}] {}", label, line);
                }
            });
        }

        let transport = StdioTransport::new(&name, stdin, stdout);
        let mut provider = Self::from_transport(transport, config);
        provider.child = Some(child);

        let init_timeout = Duration::from_millis(config.init_timeout_ms);
        match tokio::time::timeout(init_timeout, provider.initialize()).await {
            Ok(Ok(())) => Ok(provider),
            Ok(Err(e)) => {
                let _ = provider.close().await;
                Err(RouterError::Transport(format!("server '{}' initialization failed: {}", name, e)))
            }
            Err(_) => {
                let _ = provider.close().await;
                Err(RouterError::Transport(format!(
                    "server '{}' initialization timed out after {}ms",
                    name, config.init_timeout_ms
                )))
            }
        }
    }

    /// Wrap an already-connected transport; call `initialize` before use
    pub fn from_transport(transport: StdioTransport, config: &ProviderConfig) -> Self {
        Self {
            transport,
            child: None,
            call_timeout: Duration::from_millis(config.call_timeout_ms),
            shutdown_timeout: Duration::from_millis(config.shutdown_timeout_ms),
            server_info: None,
        }
    }

    /// MCP handshake: `initialize` request followed by the `initialized` notification
    pub async fn initialize(&mut self) -> Result<()> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            }
        });

        let result = self.transport.request("initialize", Some(params)).await?;
        let init: InitializeResult = serde_json::from_value(result)?;
        if let Some(version) = &init.protocol_version
            && version != PROTOCOL_VERSION
        {
            log::warn!("Server negotiated protocol version {}", version);
        }
        log::debug!("Server capabilities: {}", init.capabilities);

        self.transport.notify("notifications/initialized", None).await?;
        self.server_info = init.server_info;
        log::info!("Connected to server: {}", self.transport.server_name());
        Ok(())
    }

    pub fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    async fn timed_request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        tokio::time::timeout(self.call_timeout, self.transport.request(method, params))
            .await
            .map_err(|_| {
                RouterError::Transport(format!(
                    "{} timed out after {}ms",
                    method,
                    self.call_timeout.as_millis()
                ))
            })?
    }
}

#[async_trait]
impl ToolProvider for McpStdioProvider {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let params = cursor.as_ref().map(|c| json!({ "cursor": c }));
            let page: ListToolsResult = serde_json::from_value(self.timed_request("tools/list", params).await?)?;
            tools.extend(page.tools.into_iter().map(Tool::from));

            match page.next_cursor {
                Some(next) if !next.is_empty() && cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> Result<Vec<RawContent>> {
        let params = json!({ "name": name, "arguments": arguments });
        let result: CallToolResult = serde_json::from_value(self.timed_request("tools/call", Some(params)).await?)?;

        let content: Vec<RawContent> = result.content.into_iter().map(RawContent::resolve).collect();

        if result.is_error {
            let message: Vec<&str> = content.iter().filter_map(|c| c.text()).collect();
            let message = if message.is_empty() {
                format!("tool '{}' reported an error", name)
            } else {
                message.join("\n")
            };
            return Err(RouterError::Execution(message));
        }

        Ok(content)
    }

    async fn close(&mut self) -> Result<()> {
        log::info!("Closing connection to {}", self.transport.server_name());
        self.transport.close().await;

        if let Some(mut child) = self.child.take() {
            match tokio::time::timeout(self.shutdown_timeout, child.wait()).await {
                Ok(Ok(status)) => log::debug!("Server exited with {}", status),
                _ => {
                    log::warn!("Server did not exit in time, killing it");
                    let _ = child.kill().await;
                }
            }
        }
        Ok(())
    }
}

/// Short name for logs: the script path if there is one, else the command
fn server_label(config: &ProviderConfig) -> String {
    config.args.last().cloned().unwrap_or_else(|| config.command.clone())
}
