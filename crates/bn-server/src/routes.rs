use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::rpc;
use crate::state::AppState;
use crate::tools;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn mcp_routes() -> Router<AppState> {
    Router::new().route("/mcp", post(mcp))
}

pub fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tools", get(list_tools))
        .route("/api/v1/tools/{name}", post(call_tool))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": state.config.server.name,
        "version": state.config.server.version,
        "uptime_secs": state.uptime_secs(),
    }))
}

/// One JSON-RPC message per request; notifications get `202 Accepted`.
async fn mcp(State(state): State<AppState>, body: String) -> Response {
    match rpc::handle_message(&state, &body).await {
        Some(text) => ([(header::CONTENT_TYPE, "application/json")], text).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tools": state.registry.definitions() }))
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if !state.registry.contains(&name) {
        return Err(ApiError::not_found(format!("Unknown tool: {name}")));
    }
    let args: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?
    };

    tracing::info!(tool = %name, bytes = body.len(), "rest tool call");
    let output = tools::call_blocking(state.registry.clone(), name.clone(), args)
        .await
        .inspect_err(|e| tracing::warn!(tool = %name, error = %e, "tool call failed"))?;
    Ok(Json(json!({ "tool": name, "output": output })))
}
