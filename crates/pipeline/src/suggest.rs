//! Chart selection from a query result's shape.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use viztool::{ChartSpec, Encoding};

/// Pick a chart for a result set: first column on x, first numeric column
/// on y. Temporal-looking x values get a line over a time axis; anything
/// else gets bars over categories. Returns `None` when the result has no
/// usable (dimension, measure) pair.
pub fn suggest_spec(
    columns: &[String],
    rows: &[Map<String, Value>],
    title: &str,
) -> Option<ChartSpec> {
    let x = columns.first()?;
    let y = columns
        .iter()
        .find(|c| *c != x && is_numeric_column(c, rows))?;

    let temporal = rows
        .iter()
        .filter_map(|row| row.get(x.as_str()))
        .all(looks_temporal)
        && !rows.is_empty();

    let (mark, x_enc) = if temporal {
        ("line", Encoding::field(x).temporal())
    } else {
        ("bar", Encoding::field(x).nominal())
    };

    Some(
        ChartSpec::new(mark)
            .with_encoding("x", x_enc)
            .with_encoding("y", Encoding::field(y).quantitative())
            .with_title(title),
    )
}

fn is_numeric_column(column: &str, rows: &[Map<String, Value>]) -> bool {
    let mut any = false;
    for row in rows {
        match row.get(column) {
            Some(Value::Number(_)) => any = true,
            Some(Value::Null) | None => {}
            Some(_) => return false,
        }
    }
    any
}

/// "2025-01" and "2025-01-15" both count as temporal.
fn looks_temporal(value: &Value) -> bool {
    let Value::String(s) = value else {
        return false;
    };
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok()
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

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn monthly_series_becomes_a_line() {
        let spec = suggest_spec(
            &columns(&["month", "total_revenue"]),
            &rows(json!([
                {"month": "2025-01", "total_revenue": 100},
                {"month": "2025-02", "total_revenue": 266}
            ])),
            "trend",
        )
        .unwrap();

        assert_eq!(spec.mark_type(), Some("line"));
        assert_eq!(spec.x().unwrap().field, "month");
        assert_eq!(spec.x().unwrap().kind.as_deref(), Some("temporal"));
        assert_eq!(spec.y().unwrap().field, "total_revenue");
        assert_eq!(spec.y().unwrap().kind.as_deref(), Some("quantitative"));
        assert_eq!(spec.title.as_deref(), Some("trend"));
    }

    #[test]
    fn categorical_dimension_becomes_bars() {
        let spec = suggest_spec(
            &columns(&["region", "sales"]),
            &rows(json!([
                {"region": "north", "sales": 10},
                {"region": "south", "sales": 20}
            ])),
            "by region",
        )
        .unwrap();
        assert_eq!(spec.mark_type(), Some("bar"));
        assert_eq!(spec.x().unwrap().kind.as_deref(), Some("nominal"));
    }

    #[test]
    fn skips_non_numeric_columns_for_y() {
        let spec = suggest_spec(
            &columns(&["region", "note", "sales"]),
            &rows(json!([
                {"region": "north", "note": "n/a", "sales": 10}
            ])),
            "t",
        )
        .unwrap();
        assert_eq!(spec.y().unwrap().field, "sales");
    }

    #[test]
    fn no_measure_means_no_chart() {
        assert!(
            suggest_spec(
                &columns(&["a", "b"]),
                &rows(json!([{"a": "x", "b": "y"}])),
                "t"
            )
            .is_none()
        );
        assert!(suggest_spec(&[], &[], "t").is_none());
    }
}
