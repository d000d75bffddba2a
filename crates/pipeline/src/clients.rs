//! Typed clients for the two tool services.
//!
//! Thin method-per-operation wrappers over [`ToolClient`]; every error is
//! the transport's uniform one, so the pipeline treats a structured tool
//! failure and a dead server identically.

use serde_json::{Map, Value, json};
use transport::{ToolClient, ToolConfig};

use datatool::Schema;
use viztool::{Artifact, ChartSpec, SaveOutcome};

/// Client for the data tool service.
#[derive(Debug, Clone)]
pub struct DataToolClient {
    client: ToolClient,
}

impl DataToolClient {
    pub fn new(config: ToolConfig) -> transport::Result<Self> {
        Ok(Self {
            client: ToolClient::new(config)?,
        })
    }

    pub async fn get_schema(&self) -> transport::Result<Schema> {
        self.client.call("get_schema", &json!({})).await
    }

    pub async fn execute_query(
        &self,
        query: &str,
    ) -> transport::Result<Vec<Map<String, Value>>> {
        self.client
            .call("execute_query", &json!({"query": query}))
            .await
    }

    pub async fn get_table_data(
        &self,
        table_name: &str,
        limit: Option<u32>,
    ) -> transport::Result<Vec<Map<String, Value>>> {
        self.client
            .call(
                "get_table_data",
                &json!({"table_name": table_name, "limit": limit}),
            )
            .await
    }
}

/// Client for the visualization tool service.
#[derive(Debug, Clone)]
pub struct VizToolClient {
    client: ToolClient,
}

impl VizToolClient {
    pub fn new(config: ToolConfig) -> transport::Result<Self> {
        Ok(Self {
            client: ToolClient::new(config)?,
        })
    }

    pub async fn save_data(
        &self,
        data: &[Map<String, Value>],
        name: &str,
    ) -> transport::Result<SaveOutcome> {
        self.client
            .call("save_data", &json!({"data": data, "name": name}))
            .await
    }

    pub async fn visualize_data(
        &self,
        data_name: &str,
        spec: &ChartSpec,
        format: &str,
    ) -> transport::Result<Artifact> {
        self.client
            .call(
                "visualize_data",
                &json!({"data_name": data_name, "spec": spec, "format": format}),
            )
            .await
    }

    pub async fn list_datasets(&self) -> transport::Result<Value> {
        self.client.fetch("list_datasets", &[]).await
    }

    pub async fn get_dataset_info(&self, name: &str) -> transport::Result<Value> {
        self.client
            .fetch("get_dataset_info", &[("name", name)])
            .await
    }
}
