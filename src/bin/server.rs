//! RowKV Server Binary
//!
//! Starts the HTTP server for RowKV.

use clap::Parser;
use rowkv::network::Server;
use rowkv::{Config, RecordStore};
use tracing_subscriber::{fmt, EnvFilter};

/// RowKV Server
#[derive(Parser, Debug)]
#[command(name = "rowkv-server")]
#[command(about = "Key-value record store over HTTP")]
#[command(version)]
struct Args {
    /// Data directory (created if absent)
    #[arg(short, long, default_value = "./data")]
    data_dir: String,

    /// Database file name inside the data directory
    #[arg(long, default_value = "kvstore.db")]
    db_file: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Maximum pooled SQLite connections
    #[arg(short, long, default_value = "8")]
    pool_size: u32,

    /// SQLite busy timeout in milliseconds
    #[arg(long, default_value = "5000")]
    busy_timeout_ms: u64,

    /// Records inserted per generate-dummy request
    #[arg(short, long, default_value = "1000")]
    bulk_count: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rowkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("RowKV Server v{}", rowkv::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .db_filename(&args.db_file)
        .listen_addr(&args.listen)
        .pool_size(args.pool_size)
        .busy_timeout_ms(args.busy_timeout_ms)
        .bulk_count(args.bulk_count)
        .build();

    // Opening builds the pool and runs schema setup, both blocking
    let open_config = config.clone();
    let store = match tokio::task::spawn_blocking(move || RecordStore::open(&open_config)).await {
        Ok(Ok(store)) => store,
        Ok(Err(e)) => {
            tracing::error!("Failed to open record store: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Record store startup task failed: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Record store initialized successfully");

    let server = Server::new(config, store);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
