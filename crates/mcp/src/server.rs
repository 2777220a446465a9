// MCP server: JSON-RPC 2.0 over stdio, dispatching into the tool registry

use crate::protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Serves the tool registry over newline-delimited JSON-RPC on stdio.
/// Stdout carries only protocol frames; all logging goes to stderr.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Read requests from stdin until it closes.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!(error = %e, "discarding unparseable request");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                let mut frame = serde_json::to_vec(&response)?;
                frame.push(b'\n');
                stdout.write_all(&frame).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one request. Returns `None` for notifications, which get no
    /// response frame.
    pub(crate) async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "handling request");
        let id = request.id;

        match request.method.as_str() {
            "initialize" => id.map(|id| JsonRpcResponse::success(id, self.initialize_result())),
            "ping" => id.map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => id.map(|id| {
                JsonRpcResponse::success(
                    id,
                    ListToolsResult {
                        tools: self.registry.list_schemas(),
                    },
                )
            }),
            "tools/call" => {
                // A call without an id would have nowhere to send its
                // result; treat it as a malformed notification.
                let id = id?;
                Some(self.handle_tool_call(id, request.params).await)
            }
            method if method.starts_with("notifications/") => None,
            other => id.map(|id| JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))),
        }
    }

    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("tools/call requires params"),
                )
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("invalid tools/call params: {e}")),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        debug!(tool = %params.name, "dispatching tool call");
        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Default::default()));
        match tool.execute(arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            // Err from a tool means its arguments could not be decoded.
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::invalid_params(format!("{e:#}"))),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Read-only Monarch Money tools: accounts, transactions, budgets, cash flow, \
                 holdings, institutions, recurring transactions, and categories."
                    .to_string(),
            ),
        }
    }
}
