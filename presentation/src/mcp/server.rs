//! MCP request handling.

use serde_json::{Value, json};
use siren_application::ApiError;
use tracing::{debug, info, warn};

use super::protocol::{
    DEFAULT_PROTOCOL_VERSION, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, text_result,
};
use crate::toolkit::SirenToolkit;

pub const SERVER_NAME: &str = "Siren";

/// MCP server exposing the toolkit's permitted tools.
///
/// Stateless between requests; `handle` takes `&self`.
#[derive(Debug, Clone)]
pub struct McpServer {
    toolkit: SirenToolkit,
    version: String,
}

impl McpServer {
    pub fn new(toolkit: SirenToolkit) -> Self {
        Self {
            toolkit,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn toolkit(&self) -> &SirenToolkit {
        &self.toolkit
    }

    /// Handle one raw frame. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "MCP request");

        let notification = request.is_notification();
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => self.initialize(&request, id),
            "notifications/initialized" | "initialized" => return None,
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, json!({ "tools": self.toolkit.tools_schema() }))
            }
            "tools/call" => self.call_tool(&request, id).await,
            other => {
                if notification {
                    return None;
                }
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        };

        (!notification).then_some(response)
    }

    fn initialize(&self, request: &JsonRpcRequest, id: Value) -> JsonRpcResponse {
        // Echo the client's version so strict clients accept the handshake
        let protocol_version = request
            .param("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        info!(protocol_version, "MCP client connected");

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": protocol_version,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": self.version,
                },
                "capabilities": {
                    "tools": {},
                },
            }),
        )
    }

    async fn call_tool(&self, request: &JsonRpcRequest, id: Value) -> JsonRpcResponse {
        let Some(name) = request.param("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "params.name must be a string");
        };
        let args = match request.param("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(args) => args.clone(),
        };

        let output = match self.toolkit.execute(name, args).await {
            Ok(output) => output,
            Err(ApiError::UnknownMethod(method)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", method));
            }
            Err(ApiError::Validation(e)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string());
            }
            Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        };

        match output.to_text() {
            Ok(text) => {
                if !output.is_success() {
                    warn!(tool = name, "Tool call failed");
                }
                JsonRpcResponse::success(id, text_result(text, !output.is_success()))
            }
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}
