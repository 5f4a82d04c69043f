//! Configuration for RowKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a RowKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the database file (created on open if absent)
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── kvstore.db       (SQLite database)
    ///     ├── kvstore.db-wal   (SQLite write-ahead log)
    ///     └── kvstore.db-shm
    pub data_dir: PathBuf,

    /// File name of the database inside `data_dir`
    pub db_filename: String,

    /// Maximum number of pooled SQLite connections
    pub pool_size: u32,

    /// How long a connection waits on a locked database (milliseconds)
    pub busy_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Synthetic Data Configuration
    // -------------------------------------------------------------------------
    /// Number of records produced by one bulk-generate call
    pub bulk_count: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            db_filename: "kvstore.db".to_string(),
            pool_size: 8,
            busy_timeout_ms: 5000,
            bulk_count: 1000,
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_filename)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the database file name
    pub fn db_filename(mut self, name: impl Into<String>) -> Self {
        self.config.db_filename = name.into();
        self
    }

    /// Set the maximum number of pooled connections
    pub fn pool_size(mut self, size: u32) -> Self {
        self.config.pool_size = size;
        self
    }

    /// Set the busy timeout (in milliseconds)
    pub fn busy_timeout_ms(mut self, ms: u64) -> Self {
        self.config.busy_timeout_ms = ms;
        self
    }

    /// Set how many records a bulk-generate call inserts
    pub fn bulk_count(mut self, count: usize) -> Self {
        self.config.bulk_count = count;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
