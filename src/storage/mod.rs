//! Storage Module
//!
//! Persistent record storage on a single SQLite file.
//!
//! ## Responsibilities
//! - Own the schema (table, UNIQUE key, indexes)
//! - Execute CRUD, listing, bulk insert and truncate
//! - Classify engine errors into `NotFound` / `KeyConflict` / storage failures
//!
//! ## Table Layout
//! ```text
//! key_values
//! ┌────────────┬──────────────┬──────────┬─────────────┬─────────────┐
//! │ id (PK,AI) │ key (UNIQUE) │ value    │ created_at  │ updated_at  │
//! └────────────┴──────────────┴──────────┴─────────────┴─────────────┘
//!   idx_key(key), idx_value(value)
//! ```

mod schema;
mod store;
mod synthetic;

pub use schema::SCHEMA;
pub use store::RecordStore;
pub use synthetic::{RandomSource, SyntheticSource, KEY_SUFFIX_LEN, VALUE_SUFFIX_LEN};
