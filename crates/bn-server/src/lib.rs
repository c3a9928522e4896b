//! Beaunifi MCP server.
//!
//! Exposes the beautify/minify tools, the minification detector and the
//! smart workflow over JSON-RPC (stdio or HTTP) and a small REST surface.

pub mod cli;
pub mod error;
pub mod logging;
pub mod routes;
pub mod rpc;
pub mod state;
pub mod stdio;
pub mod tools;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use state::AppState;

/// Room for the JSON envelope around a `code` argument at the size limit.
const BODY_OVERHEAD: usize = 64 * 1024;

/// Build the application router with default configuration.
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    let limit = state.config.format.max_input_bytes.saturating_add(BODY_OVERHEAD);
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::mcp_routes())
        .merge(routes::tool_routes())
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn serve_http(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "serving MCP over HTTP");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
