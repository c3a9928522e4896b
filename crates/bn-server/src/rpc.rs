//! MCP over JSON-RPC 2.0.
//!
//! [`handle_message`] takes one raw message and returns the serialized
//! response, or `None` for notifications. Both transports sit on top of it.

use crate::state::AppState;
use crate::tools;
use bn_core::mcp::{docs_resource, render_docs, DOCS_URI};
use bn_core::BnError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";

/// Protocol revisions this server speaks, oldest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn ok(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
    }

    fn err(id: Value, error: RpcError) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.into(), id, result: None, error: Some(error) }
    }
}

/// Handle one raw JSON-RPC message.
pub async fn handle_message(state: &AppState, raw: &str) -> Option<String> {
    let response = match serde_json::from_str::<Value>(raw) {
        Ok(value) => handle_value(state, value).await?,
        Err(e) => RpcResponse::err(Value::Null, RpcError::new(PARSE_ERROR, format!("Parse error: {e}"))),
    };
    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            None
        }
    }
}

/// Handle one decoded message. Notifications yield `None`.
pub async fn handle_value(state: &AppState, value: Value) -> Option<RpcResponse> {
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    if !value.is_object() {
        return Some(RpcResponse::err(
            id,
            RpcError::new(INVALID_REQUEST, "Invalid request: expected an object"),
        ));
    }
    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Some(RpcResponse::err(
                id,
                RpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
            ))
        }
    };

    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "notification");
        return None;
    };

    Some(match dispatch(state, &request.method, request.params).await {
        Ok(result) => RpcResponse::ok(id, result),
        Err(error) => RpcResponse::err(id, error),
    })
}

async fn dispatch(state: &AppState, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize(state, &params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": state.registry.definitions() })),
        "tools/call" => {
            let name = params
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing tool name"))?
                .to_string();
            let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
            tracing::info!(tool = %name, "tools/call");
            let text = tools::call_boundary_blocking(state.registry.clone(), name, arguments).await;
            Ok(json!({ "content": [{ "type": "text", "text": text }] }))
        }
        "resources/list" => Ok(json!({ "resources": [docs_resource()] })),
        "resources/read" => {
            let uri = params
                .get("uri")
                .and_then(Value::as_str)
                .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing resource uri"))?;
            if uri != DOCS_URI {
                let err = BnError::UnknownResource(uri.to_string());
                return Err(RpcError::new(INVALID_PARAMS, err.to_string()));
            }
            let resource = docs_resource();
            Ok(json!({
                "contents": [{
                    "uri": resource.uri,
                    "mimeType": resource.mime_type,
                    "text": render_docs(state.registry.definitions()),
                }]
            }))
        }
        _ => Err(RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))),
    }
}

fn initialize(state: &AppState, params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(LATEST_PROTOCOL_VERSION);
    tracing::info!(requested = ?requested, negotiated = version, "initialize");
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": {}, "resources": {} },
        "serverInfo": {
            "name": state.config.server.name,
            "version": state.config.server.version,
        },
    })
}
