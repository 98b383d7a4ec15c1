//! JSON proxy envelope exchanged with a serverless platform: one HTTP request
//! in, one HTTP response out, per invocation.

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::response::Response;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::AdapterError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

/// Payload written back when an invocation cannot produce a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationError {
    pub error_type: String,
    pub error_message: String,
}

impl From<&AdapterError> for InvocationError {
    fn from(err: &AdapterError) -> Self {
        Self { error_type: err.error_type().to_string(), error_message: err.to_string() }
    }
}

impl ProxyRequest {
    pub fn into_http(self) -> Result<::http::Request<Body>, AdapterError> {
        let method = ::http::Method::from_bytes(self.http_method.as_bytes())
            .map_err(|_| AdapterError::Request(format!("invalid method {:?}", self.http_method)))?;

        let mut uri = if self.path.is_empty() { "/".to_string() } else { self.path.clone() };
        let query = self.query_string();
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }

        let mut builder = ::http::Request::builder().method(method).uri(uri);
        for (name, values) in self.header_pairs() {
            for value in values {
                builder = builder.header(name.as_str(), value);
            }
        }

        let body = match self.body {
            None => Body::empty(),
            Some(body) if self.is_base64_encoded => Body::from(STANDARD.decode(body)?),
            Some(body) => Body::from(body),
        };
        Ok(builder.body(body)?)
    }

    /// Multi-value headers win over single-value ones when both are sent.
    fn header_pairs(&self) -> Vec<(String, Vec<String>)> {
        match (&self.multi_value_headers, &self.headers) {
            (Some(multi), _) if !multi.is_empty() => multi.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            (_, Some(single)) => single.iter().map(|(k, v)| (k.clone(), vec![v.clone()])).collect(),
            _ => Vec::new(),
        }
    }

    fn query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = match (&self.multi_value_query_string_parameters, &self.query_string_parameters) {
            (Some(multi), _) if !multi.is_empty() => multi
                .iter()
                .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
                .collect(),
            (_, Some(single)) => single.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
            _ => Vec::new(),
        };
        pairs.sort();
        form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
    }
}

impl ProxyResponse {
    pub async fn from_http(response: Response) -> Result<Self, AdapterError> {
        let (parts, body) = response.into_parts();

        let mut headers = HashMap::new();
        let mut multi_value_headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in parts.headers.iter() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            multi_value_headers.entry(name.as_str().to_string()).or_default().push(value.clone());
            headers.insert(name.as_str().to_string(), value);
        }

        let bytes = to_bytes(body, usize::MAX).await?;
        let (body, is_base64_encoded) = if bytes.is_empty() {
            (None, false)
        } else {
            match std::str::from_utf8(&bytes) {
                Ok(text) => (Some(text.to_string()), false),
                Err(_) => (Some(STANDARD.encode(&bytes)), true),
            }
        };

        Ok(Self { status_code: parts.status.as_u16(), headers, multi_value_headers, body, is_base64_encoded })
    }
}
