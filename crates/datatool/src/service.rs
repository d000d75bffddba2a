//! HTTP surface of the data tool.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use transport::wire::{ErrorBody, Health};

use crate::error::Error;
use crate::store::DataStore;
use crate::types::Schema;

/// Arguments for `execute_query`.
#[derive(Debug, Deserialize)]
pub struct QueryArgs {
    pub query: String,
}

/// Arguments for `get_table_data`.
#[derive(Debug, Deserialize)]
pub struct TableDataArgs {
    pub table_name: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Build the tool router over a shared store.
pub fn router(store: Arc<DataStore>) -> Router {
    Router::new()
        .route("/mcp/tools/get_schema", post(get_schema))
        .route("/mcp/tools/execute_query", post(execute_query))
        .route("/mcp/tools/get_table_data", post(get_table_data))
        .route("/mcp/resources/schema", get(schema_resource))
        .route("/health", get(health))
        .with_state(store)
}

async fn health() -> Json<Health> {
    Json(Health::healthy())
}

async fn get_schema(State(store): State<Arc<DataStore>>) -> Result<Json<Schema>, Failure> {
    Ok(Json(store.schema()?))
}

async fn execute_query(
    State(store): State<Arc<DataStore>>,
    Json(args): Json<QueryArgs>,
) -> Result<Json<Vec<Map<String, Value>>>, Failure> {
    let result = store.execute(&args.query)?;
    tracing::info!(rows = result.len(), "execute_query served");
    Ok(Json(result.rows))
}

async fn get_table_data(
    State(store): State<Arc<DataStore>>,
    Json(args): Json<TableDataArgs>,
) -> Result<Json<Vec<Map<String, Value>>>, Failure> {
    let result = store.table_data(&args.table_name, args.limit)?;
    Ok(Json(result.rows))
}

/// Nested read-only schema view: `{tables: {t: {columns: {c: {type}}}}}`.
async fn schema_resource(State(store): State<Arc<DataStore>>) -> Result<Json<Value>, Failure> {
    let schema = store.schema()?;
    let mut tables = Map::new();
    for (table, columns) in &schema.table_schemas {
        let mut column_map = Map::new();
        for column in columns {
            column_map.insert(column.name.clone(), json!({"type": column.decl_type}));
        }
        tables.insert(table.clone(), json!({"columns": column_map}));
    }
    Ok(Json(json!({"tables": tables})))
}

/// Service error ready for conversion into the wire envelope.
struct Failure(Error);

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::RejectedQuery(_) | Error::Execution(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self.0, "data tool request failed");
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn seeded_router() -> Router {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        crate::seed::seed(&mut conn).unwrap();
        let store = Arc::new(DataStore::from_connection(conn));
        router(store)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn get_schema_envelope_shape() {
        let response = seeded_router()
            .oneshot(post_json("/mcp/tools/get_schema", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["tables"], json!(["products", "sales"]));
        assert_eq!(
            body["table_schemas"]["products"][0],
            json!({"name": "product_id", "type": "INTEGER"})
        );
    }

    #[tokio::test]
    async fn execute_query_returns_bare_row_array() {
        let response = seeded_router()
            .oneshot(post_json(
                "/mcp/tools/execute_query",
                json!({"query": "SELECT product_name FROM products ORDER BY product_id LIMIT 2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!([
                {"product_name": "Product A"},
                {"product_name": "Product B"}
            ])
        );
    }

    #[tokio::test]
    async fn rejected_query_is_400_with_detail() {
        let response = seeded_router()
            .oneshot(post_json(
                "/mcp/tools/execute_query",
                json!({"query": "DROP TABLE products"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("SELECT or WITH"));
        assert!(detail.contains("DROP TABLE products"));
    }

    #[tokio::test]
    async fn table_data_defaults_and_caps_limit() {
        let response = seeded_router()
            .oneshot(post_json(
                "/mcp/tools/get_table_data",
                json!({"table_name": "sales", "limit": 3}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn schema_resource_is_nested() {
        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .uri("/mcp/resources/schema")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(
            body["tables"]["sales"]["columns"]["revenue"]["type"],
            json!("REAL")
        );
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "healthy"}));
    }
}
