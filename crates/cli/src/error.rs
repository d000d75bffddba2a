//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is invalid or unreadable.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// An error from the data tool layer (seeding, local store access).
    #[error(transparent)]
    Data(#[from] datatool::Error),

    /// A tool call failed at the transport layer.
    #[error(transparent)]
    Transport(#[from] transport::Error),

    /// The returned visualization payload could not be decoded.
    #[error("invalid image payload: {0}")]
    Image(String),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
