//! HTTP client for tool servers.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::wire::{ErrorBody, Health};

/// Default request timeout applied when none is configured.
///
/// A hung tool must never block a caller indefinitely; the exact duration is
/// a deployment parameter, this is just a sane ceiling.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint configuration for one tool server.
///
/// Address and timeout are passed in explicitly at construction time rather
/// than read from the environment.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ToolConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for invoking named operations on one tool server.
///
/// Every operation is a synchronous request/response exchange: `POST
/// {base}/mcp/tools/{operation}` with a JSON object of named arguments, or
/// GET with query parameters for read-only operations. Any non-2xx status,
/// connection failure, timeout, or undecodable body becomes a uniform
/// [`Error`]. This layer never retries.
#[derive(Debug, Clone)]
pub struct ToolClient {
    http: reqwest::Client,
    config: ToolConfig,
}

impl ToolClient {
    pub fn new(config: ToolConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Invoke a named operation with a JSON object of arguments.
    pub async fn call<A, R>(&self, operation: &str, args: &A) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/mcp/tools/{operation}", self.config.base_url);
        tracing::debug!(%url, "invoking tool operation");
        let response = self
            .http
            .post(&url)
            .json(args)
            .send()
            .await
            .map_err(map_send_error)?;
        decode(response).await
    }

    /// Invoke a read-only operation via GET with query parameters.
    pub async fn fetch<R>(&self, operation: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}/mcp/tools/{operation}", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_send_error)?;
        decode(response).await
    }

    /// Probe the server's `/health` endpoint.
    pub async fn health(&self) -> Result<Health> {
        let url = format!("{}/health", self.config.base_url);
        let response = self.http.get(&url).send().await.map_err(map_send_error)?;
        decode(response).await
    }
}

async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        // Servers answer with an ErrorBody, but anything else (a proxy's
        // HTML error page, an empty body) still folds into the same error.
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        return Err(Error::Status {
            status: status.as_u16(),
            detail,
        });
    }
    response
        .json::<R>()
        .await
        .map_err(|e| Error::Decode(e.to_string()))
}

fn map_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(err.to_string())
    }
}
