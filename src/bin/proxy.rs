//! Function-invocation entry point. Reads one proxy event per line on stdin
//! and answers each with one JSON line on stdout. Logs go to stderr.

use tokio::io::BufReader;
use todo_api::adapter::{serve_lines, ProxyHandler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let handler = ProxyHandler::new(|| async { Ok::<_, anyhow::Error>(todo_api::http::build_router()) });
    serve_lines(&handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
