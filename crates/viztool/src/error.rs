//! Visualization tool error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A render or introspection call referenced a name never saved.
    #[error("dataset '{0}' not found")]
    DatasetNotFound(String),

    /// Chart construction or encoding failed (unsupported mark, field not
    /// present in the dataset, non-numeric measure, raster fault).
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
