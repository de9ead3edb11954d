//! book-library HTTP service

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use book_library::config::LibraryConfig;
use book_library::engine::sequencer::Sequencer;
use book_library::server::handler::{AppState, LibraryServer};
use book_library::storage::fs_writer::FsBookWriter;
use book_library::store::library::Library;
use book_library::telemetry::init_tracing;

/// In-memory book library with simulated persistence
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Directory for persisted books, overrides the config file
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => LibraryConfig::load_from_yaml(path)?,
        None => LibraryConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(storage_dir) = args.storage_dir {
        config.storage_dir = storage_dir;
    }
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("config: {:?}", config);

    let writer = Arc::new(FsBookWriter::new(&config.storage_dir));
    writer
        .ensure_root()
        .await
        .with_context(|| format!("cannot create storage dir {}", config.storage_dir.display()))?;

    let sequencer = Arc::new(Sequencer::from_config(writer, &config));
    let state = AppState::new(Arc::new(Library::new()), sequencer);
    let server = LibraryServer::start(state, config.listen_addr).await?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown requested");
    server.shutdown().await;
    Ok(())
}
