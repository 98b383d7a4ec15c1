use std::future::Future;

use axum::Router;
use tokio::sync::OnceCell;
use tower::ServiceExt;

use super::{AdapterError, ProxyRequest, ProxyResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Uninitialized,
    Ready,
    Failed,
}

/// Lazily builds the application on the first invocation and reuses it for
/// every later one. A failed build is remembered and never retried; the host
/// is expected to replace the process.
pub struct ProxyHandler<F> {
    init: F,
    app: OnceCell<Result<Router, String>>,
}

impl<F, Fut> ProxyHandler<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Router>> + Send,
{
    pub fn new(init: F) -> Self { Self { init, app: OnceCell::new() } }

    pub fn state(&self) -> HandlerState {
        match self.app.get() {
            None => HandlerState::Uninitialized,
            Some(Ok(_)) => HandlerState::Ready,
            Some(Err(_)) => HandlerState::Failed,
        }
    }

    pub async fn handle(&self, event: ProxyRequest) -> Result<ProxyResponse, AdapterError> {
        let app = self.app().await?;
        dispatch(app, event).await
    }

    /// Raw JSON in, raw JSON out. Initialization runs before the event is
    /// decoded so a broken cold start fails regardless of input.
    pub async fn proxy_stream(&self, input: &[u8]) -> Result<Vec<u8>, AdapterError> {
        let app = self.app().await?;
        let event: ProxyRequest = serde_json::from_slice(input)?;
        let response = dispatch(app, event).await?;
        serde_json::to_vec(&response).map_err(AdapterError::Encode)
    }

    async fn app(&self) -> Result<&Router, AdapterError> {
        let app = self
            .app
            .get_or_init(|| async {
                match (self.init)().await {
                    Ok(router) => {
                        tracing::info!("application initialized");
                        Ok(router)
                    }
                    Err(err) => {
                        let message = format!("{err:#}");
                        tracing::error!(error = %message, "application initialization failed");
                        Err(message)
                    }
                }
            })
            .await;
        app.as_ref().map_err(|message| AdapterError::Initialization(message.clone()))
    }
}

async fn dispatch(app: &Router, event: ProxyRequest) -> Result<ProxyResponse, AdapterError> {
    let request = event.into_http()?;
    let (method, uri) = (request.method().clone(), request.uri().clone());
    let response = app.clone().oneshot(request).await.unwrap_or_else(|never| match never {});
    tracing::debug!(%method, %uri, status = response.status().as_u16(), "invocation handled");
    ProxyResponse::from_http(response).await
}
