//! chirpdb Server Binary
//!
//! Starts the HTTP server for chirpdb.

use std::sync::Arc;

use chirpdb::network::Server;
use chirpdb::{Config, DocumentStore};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// chirpdb Server
#[derive(Parser, Debug)]
#[command(name = "chirpdb-server")]
#[command(about = "Users/posts HTTP service backed by a JSON file")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "db.json")]
    db: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Per-request store timeout in milliseconds
    #[arg(short, long, default_value = "30000")]
    timeout_ms: u64,

    /// fsync the database file after every write
    #[arg(long)]
    sync: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chirpdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("chirpdb Server v{}", chirpdb::VERSION);
    tracing::info!("Database file: {}", args.db);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .db_path(&args.db)
        .listen_addr(&args.listen)
        .request_timeout_ms(args.timeout_ms)
        .sync_on_write(args.sync)
        .build();

    // Open store
    let store = match DocumentStore::open(config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    match store.ensure_initialized() {
        Ok(true) => tracing::info!("Initialized empty database at {}", args.db),
        Ok(false) => tracing::info!("Using existing database at {}", args.db),
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    }

    // Start server
    let server = match Server::bind(store).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
