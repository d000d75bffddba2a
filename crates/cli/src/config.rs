//! Configuration loading from plotline.toml.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use transport::ToolConfig;

/// Top-level configuration.
///
/// Tool addresses and the request timeout are construction-time inputs to
/// the clients; nothing downstream reads the environment.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the data tool server.
    #[serde(default = "default_data_tool_url")]
    pub data_tool_url: String,

    /// Base URL of the visualization tool server.
    #[serde(default = "default_viz_tool_url")]
    pub viz_tool_url: String,

    /// Per-request timeout for tool calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_data_tool_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_viz_tool_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_tool_url: default_data_tool_url(),
            viz_tool_url: default_viz_tool_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn data_tool(&self) -> ToolConfig {
        ToolConfig::new(&self.data_tool_url).with_timeout(self.timeout())
    }

    pub fn viz_tool(&self) -> ToolConfig {
        ToolConfig::new(&self.viz_tool_url).with_timeout(self.timeout())
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
