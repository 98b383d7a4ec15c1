//! Runs the HTTP surface inside a function-invocation model: the platform
//! hands over one proxy event per call and expects one proxy response back.

pub mod envelope;
pub mod handler;
pub mod stream;

pub use envelope::{InvocationError, ProxyRequest, ProxyResponse};
pub use handler::{HandlerState, ProxyHandler};
pub use stream::serve_lines;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("could not initialize application: {0}")]
    Initialization(String),
    #[error("malformed proxy event: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Http(#[from] ::http::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),
    #[error("failed to encode proxy response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl AdapterError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AdapterError::Initialization(_) => "InitializationError",
            AdapterError::Decode(_) => "DecodeError",
            AdapterError::Request(_) | AdapterError::Base64(_) | AdapterError::Http(_) => "InvalidRequest",
            AdapterError::Body(_) | AdapterError::Encode(_) => "ResponseError",
        }
    }

    /// Initialization failures poison the process; everything else is scoped
    /// to a single invocation.
    pub fn is_fatal(&self) -> bool { matches!(self, AdapterError::Initialization(_)) }
}
