use super::tools::LmStudioTools;
use crate::infrastructure::probe::InferenceBackend;
use crate::infrastructure::rpc::{RpcRequest, RpcResponse};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name announced in `initialize`
pub const SERVER_NAME: &str = "lmstudio";

#[derive(Debug, Error)]
pub enum McpError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON-RPC response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// JSON-RPC 2.0 request loop exposing [`LmStudioTools`]
pub struct McpServer<B> {
    tools: LmStudioTools<B>,
}

impl<B: InferenceBackend> McpServer<B> {
    pub fn new(tools: LmStudioTools<B>) -> Self {
        Self { tools }
    }

    /// Serve line-delimited JSON-RPC until the reader reaches EOF.
    ///
    /// Requests are handled one at a time, in arrival order.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, "MCP server listening on stdio");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(trimmed).await {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!(server = SERVER_NAME, "stdin closed; MCP server stopping");
        Ok(())
    }

    /// Handle one raw line; `None` when no response is due
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(source) => {
                warn!(%source, "Received invalid JSON-RPC message");
                Some(RpcResponse::parse_error(format!("Parse error: {source}")))
            }
        }
    }

    pub async fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!(method = %request.method, "Received JSON-RPC request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification acknowledged");
            return None;
        }

        let id = request.id.clone();
        if request.jsonrpc != "2.0" {
            return Some(RpcResponse::invalid_request(
                id,
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => RpcResponse::success(id, initialize_result()),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => RpcResponse::success(
                id,
                json!({ "tools": LmStudioTools::<B>::definitions() }),
            ),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            "" => RpcResponse::invalid_request(id, "missing method"),
            other => {
                error!(method = other, "Unknown JSON-RPC method");
                RpcResponse::method_not_found(id, other)
            }
        };
        Some(response)
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> RpcResponse {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return RpcResponse::invalid_params(id, "params.name must be a string");
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        match self.tools.call(name, &arguments).await {
            Ok(output) => RpcResponse::success(id, output.to_result()),
            Err(err) => {
                warn!(tool = name, %err, "Tool call rejected");
                RpcResponse::invalid_params(id, err.to_string())
            }
        }
    }
}

/// Serve on the process's stdin and stdout
pub async fn run_stdio<B: InferenceBackend>(server: &McpServer<B>) -> Result<(), McpError> {
    let reader = BufReader::new(io::stdin());
    let writer = io::stdout();
    server.serve(reader, writer).await
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {}
        }
    })
}
