//! Tool transport: the uniform request/response convention every tool
//! server implements.
//!
//! Operations are addressed by the fixed path convention
//! `{base}/mcp/tools/{operation}` and carry a JSON object of named
//! arguments. A server answers 2xx with the operation's result as the
//! top-level body, or 4xx/5xx with `{"detail": "..."}`. Every server also
//! exposes `GET /health` for liveness probing.
//!
//! # Example
//!
//! ```no_run
//! use transport::{ToolClient, ToolConfig};
//! use serde_json::{Value, json};
//!
//! # async fn example() -> transport::Result<()> {
//! let client = ToolClient::new(ToolConfig::new("http://127.0.0.1:8000"))?;
//!
//! let rows: Vec<Value> = client
//!     .call("execute_query", &json!({"query": "SELECT * FROM sales"}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod wire;

pub use client::{DEFAULT_TIMEOUT, ToolClient, ToolConfig};
pub use error::{Error, Result};
pub use wire::{ErrorBody, Health};
