//! Orchestrator: the deterministic pipeline composing the data tool and the
//! visualization tool into one answer.
//!
//! The pipeline owns no persistent state; it is a pure sequence over
//! values the tools return:
//!
//! 1. introspect the data tool's schema (fatal on error);
//! 2. resolve the question to SQL via an injected [`QueryResolver`] and
//!    execute it (fatal on error);
//! 3. ingest the result into the visualization tool under a
//!    pipeline-chosen name (failure degrades: no visualization);
//! 4. render a pipeline-suggested chart (failure degrades likewise);
//! 5. assemble `{text, visualization}`.
//!
//! # Example
//!
//! ```no_run
//! use pipeline::{DataToolClient, Orchestrator, VizToolClient};
//! use transport::ToolConfig;
//!
//! # async fn example() -> transport::Result<()> {
//! let data = DataToolClient::new(ToolConfig::new("http://127.0.0.1:8000"))?;
//! let viz = VizToolClient::new(ToolConfig::new("http://127.0.0.1:8001"))?;
//! let resolver = |question: &str| {
//!     question
//!         .contains("orders")
//!         .then(|| "SELECT * FROM orders".to_string())
//! };
//!
//! let orchestrator = Orchestrator::new(data, viz, resolver);
//! let answer = orchestrator.answer("how many orders?").await;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

mod clients;
mod pipeline;
mod resolver;
mod suggest;

pub use clients::{DataToolClient, VizToolClient};
pub use pipeline::{Answer, Orchestrator};
pub use resolver::QueryResolver;
pub use suggest::suggest_spec;
