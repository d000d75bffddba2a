//! HTTP surface of the visualization tool.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use transport::wire::{ErrorBody, Health};

use crate::chart::ChartSpec;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::render;
use crate::store::DatasetStore;

/// Arguments for `save_data`.
#[derive(Debug, Deserialize)]
pub struct SaveDataArgs {
    pub data: Vec<Map<String, Value>>,
    pub name: String,
}

/// Arguments for `visualize_data`.
#[derive(Debug, Deserialize)]
pub struct VisualizeArgs {
    pub data_name: String,
    pub spec: ChartSpec,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "png".to_string()
}

/// Result of `save_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub status: String,
    pub message: String,
    pub rows: usize,
}

/// A rendered chart ready for the wire: base64 PNG bytes or a resolved
/// declarative document, tagged by format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub format: String,
    pub content: Value,
}

#[derive(Debug, Deserialize)]
pub struct InfoParams {
    pub name: String,
}

/// Build the tool router over a shared dataset store.
pub fn router(store: Arc<DatasetStore>) -> Router {
    Router::new()
        .route("/mcp/tools/save_data", post(save_data))
        .route("/mcp/tools/visualize_data", post(visualize_data))
        .route("/mcp/tools/list_datasets", get(list_datasets))
        .route("/mcp/tools/get_dataset_info", get(get_dataset_info))
        .route("/mcp/resources/datasets", get(datasets_resource))
        .route("/health", get(health))
        .with_state(store)
}

async fn health() -> Json<Health> {
    Json(Health::healthy())
}

async fn save_data(
    State(store): State<Arc<DatasetStore>>,
    Json(args): Json<SaveDataArgs>,
) -> Json<SaveOutcome> {
    let dataset = Dataset::from_rows(args.data);
    let rows = store.save(&args.name, dataset);
    tracing::info!(name = %args.name, rows, "dataset saved");
    Json(SaveOutcome {
        status: "success".to_string(),
        message: format!("Data saved as '{}'", args.name),
        rows,
    })
}

async fn visualize_data(
    State(store): State<Arc<DatasetStore>>,
    Json(args): Json<VisualizeArgs>,
) -> Result<Json<Artifact>, Failure> {
    let dataset = store
        .get(&args.data_name)
        .ok_or_else(|| Error::DatasetNotFound(args.data_name.clone()))?;
    let spec = args.spec.resolved(&args.data_name);

    let artifact = match args.format.as_str() {
        "json" => Artifact {
            format: "json".to_string(),
            content: spec.to_document(),
        },
        "png" => Artifact {
            format: "png".to_string(),
            content: Value::String(render::render_png_base64(&dataset, &spec)?),
        },
        other => {
            return Err(Error::Render(format!(
                "unsupported format '{other}' (expected \"png\" or \"json\")"
            ))
            .into());
        }
    };
    tracing::info!(name = %args.data_name, format = %artifact.format, "visualization rendered");
    Ok(Json(artifact))
}

async fn list_datasets(State(store): State<Arc<DatasetStore>>) -> Json<Value> {
    Json(json!({"datasets": dataset_summaries(&store)}))
}

async fn get_dataset_info(
    State(store): State<Arc<DatasetStore>>,
    Query(params): Query<InfoParams>,
) -> Result<Json<Value>, Failure> {
    let dataset = store
        .get(&params.name)
        .ok_or_else(|| Error::DatasetNotFound(params.name.clone()))?;
    Ok(Json(json!({
        "name": params.name,
        "rows": dataset.len(),
        "columns": dataset.columns(),
        "dtypes": dataset.dtypes(),
        "sample": dataset.sample(5),
    })))
}

/// Read-only datasets view, one summary per name.
async fn datasets_resource(State(store): State<Arc<DatasetStore>>) -> Json<Value> {
    Json(Value::Object(dataset_summaries(&store)))
}

fn dataset_summaries(store: &DatasetStore) -> Map<String, Value> {
    store
        .entries()
        .into_iter()
        .map(|(name, dataset)| {
            (
                name,
                json!({"rows": dataset.len(), "columns": dataset.columns()}),
            )
        })
        .collect()
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
            Error::DatasetNotFound(_) => StatusCode::NOT_FOUND,
            Error::Render(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(error = %self.0, "visualization tool request failed");
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}
