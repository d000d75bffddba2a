//! Transport error types.

use thiserror::Error;

/// Uniform error for tool invocations.
///
/// Structured tool errors (non-2xx with a detail body) and transport-level
/// failures (connection refused, timeout, undecodable body) all fold into
/// this one taxonomy, so callers never have to distinguish them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout waiting for tool response")]
    Timeout,

    #[error("tool returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
