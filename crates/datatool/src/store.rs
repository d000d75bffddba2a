//! SQLite-backed data store with guarded read-only access.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{Column, QueryResult, Schema};

/// Default row cap for [`DataStore::table_data`].
pub const DEFAULT_TABLE_LIMIT: u32 = 10;

/// Longest query fragment echoed back in a rejection message.
const REJECT_PREVIEW_LEN: usize = 120;

/// Read-only view over a SQLite database.
///
/// The connection is serialized behind a mutex. Only SELECT/WITH statements
/// ever reach it; [`DataStore::execute`] enforces that at this boundary and
/// nothing else is relied on to.
pub struct DataStore {
    conn: Mutex<Connection>,
}

impl DataStore {
    /// Open a store over an existing database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, useful for testing.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Wrap an already-open connection (e.g. one that was just seeded).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot the live catalog: every user table with its ordered columns.
    pub fn schema(&self) -> Result<Schema> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut table_schemas = BTreeMap::new();
        for table in &tables {
            // PRAGMA table_info rows come back in column (cid) order.
            let mut info = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
            let columns = info
                .query_map([], |row| {
                    Ok(Column {
                        name: row.get(1)?,
                        decl_type: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            table_schemas.insert(table.clone(), columns);
        }

        Ok(Schema {
            tables,
            table_schemas,
        })
    }

    /// Execute a read-only query and collect its rows.
    ///
    /// The statement must start with SELECT or WITH (case-insensitive, after
    /// leading whitespace); anything else is rejected before it is prepared.
    /// Errors from an accepted statement surface as [`Error::Execution`]
    /// with the store's own error text.
    pub fn execute(&self, query: &str) -> Result<QueryResult> {
        if !is_read_only(query) {
            return Err(Error::RejectedQuery(preview(query)));
        }

        let conn = self.conn();
        let mut stmt = conn
            .prepare(query)
            .map_err(|e| Error::Execution(e.to_string()))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = Vec::new();
        let mut result_rows = stmt
            .query([])
            .map_err(|e| Error::Execution(e.to_string()))?;
        while let Some(row) = result_rows
            .next()
            .map_err(|e| Error::Execution(e.to_string()))?
        {
            let mut object = Map::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                let value = row
                    .get_ref(idx)
                    .map_err(|e| Error::Execution(e.to_string()))?;
                object.insert(name.clone(), json_value(value));
            }
            rows.push(object);
        }

        tracing::debug!(rows = rows.len(), columns = columns.len(), "query executed");
        Ok(QueryResult { columns, rows })
    }

    /// Convenience read of one table, capped at `limit` rows (default 10).
    ///
    /// Defined purely in terms of [`DataStore::execute`], so it inherits the
    /// gate and the error taxonomy; a missing table flows through the normal
    /// execution error path.
    pub fn table_data(&self, table: &str, limit: Option<u32>) -> Result<QueryResult> {
        let limit = limit.unwrap_or(DEFAULT_TABLE_LIMIT);
        self.execute(&format!("SELECT * FROM {table} LIMIT {limit}"))
    }
}

/// Gate applied to every statement before it reaches the database.
fn is_read_only(query: &str) -> bool {
    let lowered = query.trim_start().to_lowercase();
    lowered.starts_with("select") || lowered.starts_with("with")
}

fn preview(query: &str) -> String {
    let trimmed = query.trim();
    match trimmed.char_indices().nth(REJECT_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Map a SQLite scalar to JSON. Blobs become standard base64 strings so row
/// objects stay valid JSON.
fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(STANDARD.encode(b)),
    }
}
