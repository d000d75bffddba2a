mod config;
mod error;
mod resolver;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use pipeline::{DataToolClient, Orchestrator, VizToolClient};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "plotline.toml";

#[derive(Parser)]
#[command(name = "plotline")]
#[command(about = "Ask questions of your data through composable tool servers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the data tool server
    ServeData {
        /// Path to the SQLite database file
        #[arg(long, default_value = "sample_data.db")]
        db: PathBuf,
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
    /// Run the visualization tool server
    ServeViz {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8001")]
        addr: SocketAddr,
    },
    /// Create and seed the sample database
    InitDb {
        #[arg(long, default_value = "sample_data.db")]
        db: PathBuf,
    },
    /// Ask a question against the running tool servers
    Ask {
        question: String,
        /// Config file with tool addresses (defaults to plotline.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Where to write the rendered chart, if one comes back
        #[arg(long, default_value = "chart.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ServeData { db, addr } => cmd_serve_data(&db, addr).await,
        Commands::ServeViz { addr } => cmd_serve_viz(addr).await,
        Commands::InitDb { db } => cmd_init_db(&db),
        Commands::Ask {
            question,
            config,
            out,
        } => cmd_ask(&question, config.as_deref(), &out).await,
    }
}

async fn cmd_serve_data(db: &Path, addr: SocketAddr) -> Result<()> {
    let store = Arc::new(datatool::DataStore::open(db)?);
    let tables = store.schema()?.tables;
    tracing::info!(db = %db.display(), ?tables, "data tool starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "data tool listening");
    axum::serve(listener, datatool::router(store)).await?;
    Ok(())
}

async fn cmd_serve_viz(addr: SocketAddr) -> Result<()> {
    let store = Arc::new(viztool::DatasetStore::new());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "visualization tool listening");
    axum::serve(listener, viztool::router(store)).await?;
    Ok(())
}

fn cmd_init_db(db: &Path) -> Result<()> {
    datatool::seed::init_sample_db(db)?;

    let store = datatool::DataStore::open(db)?;
    let schema = store.schema()?;
    println!("Database initialized at {}", db.display());
    for table in &schema.tables {
        let count = store.execute(&format!("SELECT COUNT(*) AS n FROM {table}"))?;
        let n = count.rows[0]["n"].as_i64().unwrap_or(0);
        println!("  {table}: {n} rows");
    }
    Ok(())
}

async fn cmd_ask(question: &str, config_path: Option<&Path>, out: &Path) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None if Path::new(CONFIG_FILE).exists() => Config::load(CONFIG_FILE)?,
        None => Config::default(),
    };

    let data = DataToolClient::new(config.data_tool())?;
    let viz = VizToolClient::new(config.viz_tool())?;
    let orchestrator = Orchestrator::new(data, viz, resolver::KeywordResolver);

    let answer = orchestrator.answer(question).await;
    println!("{}", answer.text);

    match answer.visualization {
        Some(artifact) if artifact.format == "png" => {
            let encoded = artifact
                .content
                .as_str()
                .ok_or_else(|| Error::Image("png content is not a string".to_string()))?;
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|e| Error::Image(e.to_string()))?;
            std::fs::write(out, bytes)?;
            println!("\nChart written to {}", out.display());
        }
        Some(artifact) => {
            println!(
                "\nVisualization returned in '{}' format:\n{}",
                artifact.format, artifact.content
            );
        }
        None => println!("\n(no visualization)"),
    }

    Ok(())
}
