//! Visualization tool service: a named in-memory dataset store plus chart
//! rendering against declarative specs.
//!
//! Callers ingest a result set under a chosen name with `save_data`, then
//! render it any number of times with `visualize_data`, referencing the
//! dataset by name. Names are last-writer-wins; datasets live for the
//! lifetime of the owning process (no delete, no eviction).
//!
//! # Example
//!
//! ```no_run
//! use viztool::{ChartSpec, Dataset, DatasetStore, Encoding, render_png};
//! use serde_json::json;
//!
//! # fn example() -> viztool::Result<()> {
//! let store = DatasetStore::new();
//! let rows = vec![json!({"month": "2025-01", "total_revenue": 100})
//!     .as_object()
//!     .cloned()
//!     .unwrap()];
//! store.save("s1", Dataset::from_rows(rows));
//!
//! let spec = ChartSpec::new("line")
//!     .with_encoding("x", Encoding::field("month").temporal())
//!     .with_encoding("y", Encoding::field("total_revenue").quantitative());
//! let png = render_png(&store.get("s1").expect("just saved"), &spec)?;
//! assert!(!png.is_empty());
//! # Ok(())
//! # }
//! ```

mod chart;
mod dataset;
mod error;
mod render;
mod service;
mod store;

pub use chart::{ChartSpec, DataRef, Encoding, VEGA_LITE_SCHEMA};
pub use dataset::{ColumnType, Dataset};
pub use error::{Error, Result};
pub use render::{DEFAULT_HEIGHT, DEFAULT_WIDTH, render_png, render_png_base64};
pub use service::{Artifact, SaveDataArgs, SaveOutcome, VisualizeArgs, router};
pub use store::DatasetStore;
