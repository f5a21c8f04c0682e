//! MCP Server implementation
//!
//! JSON-RPC dispatch shared by the stdio and SSE transports, plus the
//! stdio transport itself (one message per line, responses on stdout,
//! logging on stderr).

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::assisted::client::AssistedClient;
use crate::error::Result;
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;

/// MCP Server info
const SERVER_NAME: &str = "assisted";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for the Assisted Service
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,

    /// Whether the client has completed initialization
    initialized: AtomicBool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(client: Arc<AssistedClient>, default_pull_secret: Option<String>) -> Self {
        Self {
            tool_handler: ToolHandler::new(client, default_pull_secret),
            initialized: AtomicBool::new(false),
        }
    }

    /// Run the server on stdio
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        let reader = stdin.lock();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_message(&line).await {
                Some(response) => {
                    let response_str = serde_json::to_string(&response)?;
                    writeln!(stdout, "{}", response_str)?;
                    stdout.flush()?;
                }
                None => {
                    // Notification, no response needed
                }
            }
        }

        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    ///
    /// Returns None for notifications. Shared by both transports.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                // The id could not be read, so it goes back as null
                return Some(JsonRpcResponse::error(
                    RequestId::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        if request.method == methods::INITIALIZED {
            self.initialized.store(true, Ordering::Relaxed);
            return None;
        }

        // Every remaining method is a request and needs an id
        let id = request.id.clone()?;

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                JsonRpcResponse::success(id, self.handle_initialize())
            }
            methods::PING => JsonRpcResponse::success(id, serde_json::json!({})),
            methods::LIST_TOOLS => {
                let result = ListToolsResult {
                    tools: self.tool_handler.list_tools(),
                };
                match serde_json::to_value(result) {
                    Ok(value) => JsonRpcResponse::success(id, value),
                    Err(e) => JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(e.to_string()),
                    ),
                }
            }
            methods::CALL_TOOL => {
                let result = self.handle_call_tool(&request).await;
                JsonRpcResponse::success(id, result)
            }
            _ => JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method)),
        };

        Some(response)
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Value {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        serde_json::to_value(result).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Handle call tool request
    async fn handle_call_tool(&self, request: &JsonRpcRequest) -> Value {
        let params: CallToolParams = match request.params.as_ref() {
            Some(p) => match serde_json::from_value(p.clone()) {
                Ok(params) => params,
                Err(e) => {
                    return tool_result_value(CallToolResult::error(format!(
                        "Invalid tool parameters: {}",
                        e
                    )));
                }
            },
            None => {
                return tool_result_value(CallToolResult::error("Missing tool parameters"));
            }
        };

        let result = self
            .tool_handler
            .call_tool(&params.name, params.arguments)
            .await;

        tool_result_value(result)
    }
}

/// Serialize a tool result, degrading to an error result on failure
fn tool_result_value(result: CallToolResult) -> Value {
    serde_json::to_value(&result).unwrap_or_else(|e| {
        serde_json::json!({
            "content": [{"type": "text", "text": format!("Error: {}", e)}],
            "isError": true
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info() {
        assert_eq!(SERVER_NAME, "assisted");
    }

    #[test]
    fn test_tool_result_value_serializes() {
        let value = tool_result_value(CallToolResult::text("ok"));
        assert!(value["content"][0]["text"].as_str().unwrap().contains("ok"));
    }
}
