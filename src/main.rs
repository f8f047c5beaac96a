//! WikiSearch-RS: a Wikipedia search front-end written in Rust
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wikisearch_rs::{
    config::{self, Settings},
    network::HttpClient,
    web::{create_router, AppState},
    EnrichedResult,
};

#[derive(Parser, Debug)]
#[command(name = "wikisearch", version, about = "Wikipedia search front-end")]
struct Cli {
    /// Path to settings.yml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run a single search and print the results
    Query {
        /// Search text
        text: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load(cli.config.as_deref())?;
    init_logging(&settings)?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(settings, port).await,
        Command::Query { text, limit, json } => query(settings, &text, limit, json).await,
    }
}

/// Install the fmt subscriber; RUST_LOG overrides the configured level
fn init_logging(settings: &Settings) -> Result<()> {
    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
}

async fn serve(mut settings: Settings, port: Option<u16>) -> Result<()> {
    info!("Starting WikiSearch-RS v{}", wikisearch_rs::VERSION);

    if let Some(port) = port {
        settings.server.port = port;
    }
    info!(
        "Searching {} Wikipedia, locale {}",
        settings.wikipedia.base_lang(),
        settings.general.locale
    );

    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, client)?;
    info!("Application state initialized");

    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn query(settings: Settings, text: &str, limit: Option<u32>, json: bool) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let limit = settings.search.clamp_limit(limit);
    let client = HttpClient::with_settings(&settings.outgoing)?;
    let state = AppState::new(settings, client)?;

    let results = state.orchestrator.search(text, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }
    Ok(())
}

fn print_results(results: &[EnrichedResult]) {
    if results.is_empty() {
        println!("No results.");
        return;
    }
    for (i, result) in results.iter().enumerate() {
        println!("{}. {} (#{})", i + 1, result.title, result.id);
        println!("   {}", result.display_date);
        println!("   {}", result.snippet);
        println!();
    }
}
