//! Newline-delimited stdio transport.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::server::McpServer;

/// Transport failures; protocol errors are answered in-band instead.
#[derive(Error, Debug)]
pub enum McpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serve requests until EOF or cancellation.
///
/// One request is handled at a time; each response is written as a single
/// line and flushed.
pub async fn serve<R, W>(
    server: &McpServer,
    reader: R,
    mut writer: W,
    cancellation: CancellationToken,
) -> Result<(), McpError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                info!("MCP server cancelled");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            debug!("stdin closed");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = server.handle_line(line).await {
            let mut frame = serde_json::to_vec(&response)?;
            frame.push(b'\n');
            writer.write_all(&frame).await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Serve on the process's stdin/stdout. Logs must go elsewhere.
pub async fn run_stdio(server: &McpServer, cancellation: CancellationToken) -> Result<(), McpError> {
    let reader = BufReader::new(tokio::io::stdin());
    serve(server, reader, tokio::io::stdout(), cancellation).await
}
