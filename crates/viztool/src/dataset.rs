//! Tabular dataset model.

use serde_json::{Map, Value};

/// Column-uniform table built from a sequence of row objects.
///
/// Ragged input is normalized rather than rejected: the column set is the
/// union of keys across all rows in first-seen order, and a row missing a
/// column carries an explicit JSON null for it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

/// Inferred scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Number,
    String,
    Boolean,
    Null,
    Mixed,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Mixed => "mixed",
        }
    }
}

impl Dataset {
    /// Normalize a row sequence into a column-uniform table.
    pub fn from_rows(input: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &input {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = input
            .into_iter()
            .map(|row| {
                let mut normalized = Map::with_capacity(columns.len());
                for column in &columns {
                    normalized
                        .insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
                }
                normalized
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// First `n` rows, for inspection.
    pub fn sample(&self, n: usize) -> &[Map<String, Value>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Inferred type of one column from its values; nulls are transparent
    /// unless the whole column is null.
    pub fn column_type(&self, column: &str) -> ColumnType {
        let mut seen: Option<ColumnType> = None;
        for row in &self.rows {
            let kind = match row.get(column) {
                None | Some(Value::Null) => continue,
                Some(Value::Bool(_)) => ColumnType::Boolean,
                Some(Value::Number(n)) if n.is_i64() || n.is_u64() => ColumnType::Integer,
                Some(Value::Number(_)) => ColumnType::Number,
                Some(Value::String(_)) => ColumnType::String,
                Some(_) => ColumnType::Mixed,
            };
            seen = Some(match seen {
                None => kind,
                Some(prior) if prior == kind => kind,
                // Integers widen to numbers; anything else is mixed.
                Some(ColumnType::Integer) if kind == ColumnType::Number => ColumnType::Number,
                Some(ColumnType::Number) if kind == ColumnType::Integer => ColumnType::Number,
                Some(_) => ColumnType::Mixed,
            });
        }
        seen.unwrap_or(ColumnType::Null)
    }

    /// Column name → inferred type, in column order.
    pub fn dtypes(&self) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|c| (c.clone(), Value::String(self.column_type(c).as_str().into())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Value) -> Vec<Map<String, Value>> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn columns_in_first_seen_order() {
        let dataset = Dataset::from_rows(rows(json!([
            {"month": "2025-01", "total_revenue": 100},
            {"month": "2025-02", "total_revenue": 120}
        ])));
        assert_eq!(dataset.columns(), ["month", "total_revenue"]);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn ragged_rows_normalize_to_null() {
        let dataset = Dataset::from_rows(rows(json!([
            {"a": 1},
            {"a": 2, "b": "x"},
            {"b": "y"}
        ])));
        assert_eq!(dataset.columns(), ["a", "b"]);
        assert_eq!(dataset.rows()[0]["b"], Value::Null);
        assert_eq!(dataset.rows()[2]["a"], Value::Null);
    }

    #[test]
    fn column_type_inference() {
        let dataset = Dataset::from_rows(rows(json!([
            {"i": 1, "f": 1.5, "s": "x", "b": true, "n": null, "m": 1, "w": 1},
            {"i": 2, "f": 2.0, "s": "y", "b": false, "n": null, "m": "two", "w": 2.5}
        ])));
        assert_eq!(dataset.column_type("i"), ColumnType::Integer);
        assert_eq!(dataset.column_type("f"), ColumnType::Number);
        assert_eq!(dataset.column_type("s"), ColumnType::String);
        assert_eq!(dataset.column_type("b"), ColumnType::Boolean);
        assert_eq!(dataset.column_type("n"), ColumnType::Null);
        assert_eq!(dataset.column_type("m"), ColumnType::Mixed);
        // Integers widen to number when floats appear.
        assert_eq!(dataset.column_type("w"), ColumnType::Number);
    }

    #[test]
    fn sample_is_bounded() {
        let many: Vec<_> = (0..20).map(|i| rows(json!([{"i": i}]))[0].clone()).collect();
        let dataset = Dataset::from_rows(many);
        assert_eq!(dataset.sample(5).len(), 5);

        let few = Dataset::from_rows(rows(json!([{"i": 1}])));
        assert_eq!(few.sample(5).len(), 1);
    }
}
