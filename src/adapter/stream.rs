use std::future::Future;

use axum::Router;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{AdapterError, InvocationError, ProxyHandler};

/// Serves newline-delimited proxy events from `reader`, writing one JSON line
/// per event to `writer`. Lines are handed over as raw bytes, so undecodable
/// input only fails its own invocation. Returns an error on I/O failure or
/// after reporting a failed initialization.
pub async fn serve_lines<F, Fut, R, W>(handler: &ProxyHandler<F>, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Router>> + Send,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = buf.trim_ascii();
        if line.is_empty() { continue; }

        let (mut out, fatal) = match handler.proxy_stream(line).await {
            Ok(out) => (out, None),
            Err(err) => {
                tracing::warn!(error = %err, "invocation failed");
                let payload = serde_json::to_vec(&InvocationError::from(&err))?;
                (payload, err.is_fatal().then_some(err))
            }
        };
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;

        if let Some(err) = fatal {
            return Err(err.into());
        }
    }
}
