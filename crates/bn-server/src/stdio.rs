//! Newline-delimited JSON-RPC over stdin/stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::rpc;
use crate::state::AppState;

/// Serve messages from `reader` until EOF, one at a time, in order.
pub async fn run<R, W>(state: &AppState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = rpc::handle_message(state, &line).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    tracing::info!("stdin closed, stopping");
    Ok(())
}

pub async fn serve_stdio(state: AppState) -> std::io::Result<()> {
    tracing::info!(name = %state.config.server.name, "serving MCP on stdio");
    run(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
