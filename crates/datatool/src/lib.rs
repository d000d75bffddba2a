//! Data tool service: schema introspection and guarded read-only queries
//! over a SQLite store.
//!
//! The store owns the only connection to the database. Two invariants hold
//! at this boundary:
//!
//! 1. **Safety gate** — every statement must start with SELECT or WITH
//!    (case-insensitive, after leading whitespace) or it is rejected before
//!    execution. This is the sole defense against mutating statements.
//! 2. **Live catalog** — schema introspection walks `sqlite_master` and
//!    `PRAGMA table_info` on every call; nothing is cached.
//!
//! # Example
//!
//! ```no_run
//! use datatool::DataStore;
//!
//! let store = DataStore::open("sample_data.db")?;
//!
//! let schema = store.schema()?;
//! for table in &schema.tables {
//!     println!("table: {table}");
//! }
//!
//! let result = store.execute("SELECT * FROM sales LIMIT 5")?;
//! println!("{} rows", result.len());
//! # Ok::<(), datatool::Error>(())
//! ```

mod error;
pub mod seed;
mod service;
mod store;
mod types;

pub use error::{Error, Result};
pub use service::{QueryArgs, TableDataArgs, router};
pub use store::{DEFAULT_TABLE_LIMIT, DataStore};
pub use types::{Column, QueryResult, Schema};
