//! Sample database bootstrapping.
//!
//! Recreates the demo `products`/`sales` database: three products with six
//! months of revenue history, enough for the end-to-end trend question to
//! return something worth charting.

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

const SCHEMA_SQL: &str = r#"
CREATE TABLE products (
    product_id INTEGER PRIMARY KEY,
    product_name TEXT NOT NULL,
    category TEXT NOT NULL,
    unit_price REAL NOT NULL
);

CREATE TABLE sales (
    sale_id INTEGER PRIMARY KEY,
    product_id INTEGER NOT NULL REFERENCES products(product_id),
    date TEXT NOT NULL,
    units INTEGER NOT NULL,
    revenue REAL NOT NULL
);
"#;

const PRODUCTS: &[(i64, &str, &str, f64)] = &[
    (1, "Product A", "Widgets", 120.0),
    (2, "Product B", "Widgets", 95.0),
    (3, "Product C", "Gadgets", 240.0),
];

// (product_id, date, units, revenue); Product A trends upward so the demo
// chart has a visible story.
const MONTHLY_SALES: &[(i64, &str, i64, f64)] = &[
    (1, "2024-12-15", 30, 3600.0),
    (1, "2025-01-15", 32, 3800.0),
    (1, "2025-02-15", 83, 10000.0),
    (1, "2025-03-15", 100, 12000.0),
    (1, "2025-04-15", 120, 14400.0),
    (1, "2025-05-15", 150, 18000.0),
    (2, "2024-12-15", 40, 3800.0),
    (2, "2025-01-15", 38, 3610.0),
    (2, "2025-02-15", 35, 3325.0),
    (2, "2025-03-15", 33, 3135.0),
    (2, "2025-04-15", 30, 2850.0),
    (2, "2025-05-15", 28, 2660.0),
    (3, "2024-12-15", 10, 2400.0),
    (3, "2025-01-15", 12, 2880.0),
    (3, "2025-02-15", 11, 2640.0),
    (3, "2025-03-15", 14, 3360.0),
    (3, "2025-04-15", 13, 3120.0),
    (3, "2025-05-15", 15, 3600.0),
];

/// Create (or recreate) the sample database at `path`.
pub fn init_sample_db(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_file(path)?;
    }

    let mut conn = Connection::open(path)?;
    seed(&mut conn)?;
    tracing::info!(path = %path.display(), "sample database initialized");
    Ok(())
}

/// Seed an open connection with the sample schema and rows.
pub fn seed(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let tx = conn.transaction()?;
    for (id, name, category, price) in PRODUCTS {
        tx.execute(
            "INSERT INTO products (product_id, product_name, category, unit_price)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, name, category, price],
        )?;
    }
    for (product_id, date, units, revenue) in MONTHLY_SALES {
        tx.execute(
            "INSERT INTO sales (product_id, date, units, revenue)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![product_id, date, units, revenue],
        )?;
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataStore;
    use serde_json::json;

    #[test]
    fn seeded_file_has_expected_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.db");
        init_sample_db(&path).unwrap();

        let store = DataStore::open(&path).unwrap();
        let schema = store.schema().unwrap();
        assert_eq!(schema.tables, vec!["products", "sales"]);

        let sales_columns: Vec<_> = schema.table_schemas["sales"]
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            sales_columns,
            vec!["sale_id", "product_id", "date", "units", "revenue"]
        );
    }

    #[test]
    fn reseeding_replaces_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.db");
        init_sample_db(&path).unwrap();
        init_sample_db(&path).unwrap();

        let store = DataStore::open(&path).unwrap();
        let count = store
            .execute("SELECT COUNT(*) AS n FROM products")
            .unwrap();
        assert_eq!(count.rows[0]["n"], json!(3));
    }

    #[test]
    fn trend_query_aggregates_by_month() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.db");
        init_sample_db(&path).unwrap();

        let store = DataStore::open(&path).unwrap();
        let result = store
            .execute(
                "SELECT strftime('%Y-%m', date) AS month, SUM(revenue) AS total_revenue
                 FROM sales JOIN products ON sales.product_id = products.product_id
                 WHERE products.product_name = 'Product A'
                 GROUP BY month ORDER BY month ASC",
            )
            .unwrap();
        assert_eq!(result.len(), 6);
        assert_eq!(result.rows[0]["month"], json!("2024-12"));
        assert_eq!(result.rows[5]["total_revenue"], json!(18000.0));
    }
}
