//! Schema and query result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One column of a table schema: name plus declared type, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub decl_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, decl_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl_type: decl_type.into(),
        }
    }
}

/// Snapshot of the store's catalog: every user table with its ordered
/// columns. Produced fresh on each introspection call, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<String>,
    pub table_schemas: BTreeMap<String, Vec<Column>>,
}

/// Rows returned by one accepted query.
///
/// `columns` preserves the statement's result-set metadata order; each row
/// carries the full column set. On the wire only the row array is sent.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
