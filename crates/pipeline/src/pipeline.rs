//! The answer pipeline.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::clients::{DataToolClient, VizToolClient};
use crate::resolver::QueryResolver;
use crate::suggest::suggest_spec;
use viztool::Artifact;

/// Final answer for one caller question.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub visualization: Option<Artifact>,
}

impl Answer {
    fn without_visualization(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visualization: None,
        }
    }
}

/// Sequences tool calls to answer one caller question.
///
/// The pipeline is a straight line with early exit on error: schema, query,
/// ingest, render, answer. Schema and query failures are fatal to the
/// answer; ingest and render failures only drop the visualization. Calls
/// run sequentially, with no retries and no cancellation; transient-fault
/// policy belongs to the caller, above this layer.
pub struct Orchestrator<R> {
    data: DataToolClient,
    viz: VizToolClient,
    resolver: R,
}

impl<R: QueryResolver> Orchestrator<R> {
    pub fn new(data: DataToolClient, viz: VizToolClient, resolver: R) -> Self {
        Self {
            data,
            viz,
            resolver,
        }
    }

    /// Run the full pipeline for one question.
    pub async fn answer(&self, question: &str) -> Answer {
        tracing::info!(question, "processing question");

        // Schema first: downstream resolution is meaningless without it.
        let schema = match self.data.get_schema().await {
            Ok(schema) => schema,
            Err(err) => {
                tracing::error!(error = %err, "schema introspection failed");
                return Answer::without_visualization(format!(
                    "Error accessing database: {err}"
                ));
            }
        };
        tracing::debug!(tables = schema.tables.len(), "schema loaded");

        let Some(sql) = self.resolver.resolve(question) else {
            return Answer::without_visualization(
                "I could not translate that question into a query against the \
                 available data. Try asking about the sales trend for a product.",
            );
        };

        let rows = match self.data.execute_query(&sql).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(error = %err, "query execution failed");
                return Answer::without_visualization(format!(
                    "Error querying database: {err}"
                ));
            }
        };

        let columns = column_order(&rows);
        let text = summarize(question, &sql, &columns, &rows);

        if rows.is_empty() {
            return Answer::without_visualization(text);
        }

        // Pipeline-chosen name; unique per answer so a re-ask never clobbers
        // an earlier dataset.
        let data_name = format!("result_{}", Uuid::new_v4().simple());
        if let Err(err) = self.viz.save_data(&rows, &data_name).await {
            tracing::warn!(error = %err, "dataset ingest failed, answering without visualization");
            return Answer::without_visualization(text);
        }

        let Some(spec) = suggest_spec(&columns, &rows, question) else {
            tracing::debug!("result shape has no chartable measure");
            return Answer::without_visualization(text);
        };

        let visualization = match self.viz.visualize_data(&data_name, &spec, "png").await {
            Ok(artifact) => Some(artifact),
            Err(err) => {
                tracing::warn!(error = %err, "render failed, answering without visualization");
                None
            }
        };

        Answer {
            text,
            visualization,
        }
    }
}

/// Column order of a result set, taken from the first row's key order.
fn column_order(rows: &[Map<String, Value>]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

fn summarize(
    question: &str,
    sql: &str,
    columns: &[String],
    rows: &[Map<String, Value>],
) -> String {
    let mut text = format!(
        "Question: {question}\n\nI ran the following query:\n\n{sql}\n\n"
    );

    if rows.is_empty() {
        text.push_str("The query returned no rows.");
        return text;
    }

    text.push_str(&format!(
        "The query returned {} row(s) with columns {}.",
        rows.len(),
        columns.join(", ")
    ));

    // A quick read on the first numeric column, when there is one.
    if let Some(measure) = columns
        .iter()
        .find(|c| rows.iter().any(|r| r.get(c.as_str()).is_some_and(Value::is_number)))
    {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.get(measure.as_str()).and_then(Value::as_f64))
            .collect();
        if !values.is_empty() {
            let total: f64 = values.iter().sum();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            text.push_str(&format!(
                "\n\n{measure}: total {total:.2}, ranging from {min:.2} to {max:.2}."
            ));
        }
    }

    text
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
    fn column_order_follows_first_row() {
        let rows = rows(json!([{"month": "2025-01", "total_revenue": 100}]));
        assert_eq!(column_order(&rows), ["month", "total_revenue"]);
        assert!(column_order(&[]).is_empty());
    }

    #[test]
    fn summary_includes_shape_and_measure_stats() {
        let rows = rows(json!([
            {"month": "2025-01", "total_revenue": 100.0},
            {"month": "2025-02", "total_revenue": 300.0}
        ]));
        let columns = column_order(&rows);
        let text = summarize("trend?", "SELECT 1", &columns, &rows);
        assert!(text.contains("2 row(s)"));
        assert!(text.contains("month, total_revenue"));
        assert!(text.contains("total 400.00"));
        assert!(text.contains("from 100.00 to 300.00"));
    }

    #[test]
    fn summary_handles_empty_results() {
        let text = summarize("anything?", "SELECT 1 WHERE 0", &[], &[]);
        assert!(text.contains("no rows"));
    }
}
