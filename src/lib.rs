//! # RowKV
//!
//! A persistent key-value record store with:
//! - One SQLite table with a UNIQUE constraint on `key`
//! - Substring search, allow-listed sorting, and pagination
//! - Transactional bulk insert of synthetic data and full truncation
//! - An HTTP/JSON API
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                (axum, many concurrent tasks)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ spawn_blocking
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Record Store                              │
//! │        (query construction, conflict classification)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐
//!               │ r2d2 pool    │
//!               │ SQLite (WAL) │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod query;
pub mod storage;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RowKvError, Result};
pub use config::Config;
pub use record::Record;
pub use query::{ListParams, ListQuery, SortColumn, SortOrder};
pub use storage::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RowKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
