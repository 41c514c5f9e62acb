//! JSON-RPC tool server exposing the workflows to MCP clients.

pub mod jsonrpc;
pub mod resources;
pub mod stdio;
pub mod tools;

use serde_json::{Value, json};
use tracing::debug;

use crate::context::AppContext;
use crate::error::AppError;
use jsonrpc::{
    INTERNAL_ERROR, INVALID_PARAMS, JsonRpcRequest, METHOD_NOT_FOUND, NOT_INITIALIZED,
    json_rpc_error, json_rpc_response, tool_text_content,
};

pub const MCP_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "pr-agent";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct McpServer {
    ctx: AppContext,
    initialized: bool,
}

impl McpServer {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            initialized: false,
        }
    }

    /// Handles one request; notifications produce no response.
    pub async fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        debug!(method, "handling request");

        if method == "initialize" {
            self.initialized = true;
            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": MCP_VERSION,
                    "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                    "capabilities": { "tools": {}, "resources": {} }
                }),
            ));
        }

        if method == "notifications/initialized" {
            self.initialized = true;
            return None;
        }

        if request.is_notification() {
            return None;
        }

        if !self.initialized {
            return Some(json_rpc_error(
                request.id,
                NOT_INITIALIZED,
                "Server not initialized",
            ));
        }

        let params = request.params.unwrap_or(Value::Null);
        let result = match method {
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_definitions() })),
            "resources/list" => Ok(json!({ "resources": resources::resource_definitions() })),
            "resources/templates/list" => Ok(json!({
                "resourceTemplates": resources::resource_template_definitions()
            })),
            "tools/call" => self.call_tool(&params).await,
            "resources/read" => match params.get("uri").and_then(Value::as_str) {
                Some(uri) => resources::read_resource(&self.ctx, uri).await,
                None => Err(AppError::Protocol("uri must be a string".to_string())),
            },
            other => {
                return Some(json_rpc_error(
                    request.id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {other}"),
                ));
            }
        };

        Some(match result {
            Ok(value) => json_rpc_response(request.id, value),
            Err(AppError::Protocol(message)) => {
                json_rpc_error(request.id, INVALID_PARAMS, &message)
            }
            Err(err) => json_rpc_error(request.id, INTERNAL_ERROR, &err.to_string()),
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, AppError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::Protocol("tool name must be a string".to_string()))?;
        if tools::find_tool(name).is_none() {
            return Err(AppError::Protocol(format!("Unknown tool: {name}")));
        }
        let args = params.get("arguments").cloned().unwrap_or(Value::Null);

        let payload = tools::call_tool(&self.ctx, name, args).await?;
        let is_error = payload.get("error").is_some_and(|e| !e.is_null());
        Ok(json!({
            "content": [tool_text_content(&payload)],
            "isError": is_error
        }))
    }
}
