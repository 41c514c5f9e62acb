use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const NOT_INITIALIZED: i64 = -32002;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    #[serde(rename = "jsonrpc")]
    pub _jsonrpc: Option<String>,
    pub method: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and get no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

pub fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

/// Wraps a tool result as a single text content item.
pub fn tool_text_content(payload: &Value) -> Value {
    json!({ "type": "text", "text": payload.to_string() })
}
