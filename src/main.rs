use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog_front::api::{AppState, create_router};
use catalog_front::config::CONFIG;
use catalog_front::openapi_catalog::StaticOpenApiCatalog;
use catalog_front::search_service::CatalogClient;

#[derive(Parser)]
#[command(name = "catalog-front", about = "Public data catalog front-end")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the front-end and relay requests to the catalog API
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3000
        #[arg(long)]
        addr: Option<String>,
        /// Base URL of the catalog API
        #[arg(long)]
        api_url: Option<String>,
        /// Directory holding index.html and assets
        #[arg(long)]
        static_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = match cli.command {
        Some(Command::Serve {
            addr,
            api_url,
            static_dir,
        }) => CONFIG.with_overrides(addr, api_url, static_dir),
        None => CONFIG.clone(),
    };

    let client = CatalogClient::from_config(&config).context("Failed to create catalog client")?;
    let state = AppState {
        client,
        open_apis: Arc::new(StaticOpenApiCatalog),
        static_dir: PathBuf::from(&config.static_dir),
    };

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;
    tracing::info!(
        "serving on http://{} (catalog api: {})",
        config.server_addr,
        config.api_base_url
    );

    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;
    Ok(())
}
