//! Record Store
//!
//! All read/write access to the `key_values` table.
//!
//! ## Responsibilities
//! - Open the connection pool and initialise the schema
//! - CRUD on single records
//! - Search / sort / paginate listings
//! - Transactional bulk insert and full truncation

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};

use crate::config::Config;
use crate::error::{is_unique_violation, Result, RowKvError};
use crate::query::{ListParams, ListQuery};
use crate::record::{self, decode_timestamp, encode_timestamp, Record};

use super::schema;
use super::synthetic::{RandomSource, SyntheticSource};

const SELECT_BY_ID: &str =
    "SELECT id, key, value, created_at, updated_at FROM key_values WHERE id = ?1";

const INSERT_OR_IGNORE: &str = "INSERT OR IGNORE INTO key_values (key, value, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?3)";

/// Handle to the record table
///
/// ## Concurrency:
/// - Holds only the connection pool (cheap to clone, shared across threads)
/// - No application-level locking: key uniqueness, update races and
///   bulk-vs-truncate interleavings are settled by SQLite's constraints
///   and transactions
#[derive(Clone)]
pub struct RecordStore {
    /// Pooled SQLite connections
    pool: Pool<SqliteConnectionManager>,

    /// Location of the database file
    db_path: PathBuf,
}

impl RecordStore {
    /// Open or create the store described by `config`
    ///
    /// On startup:
    /// 1. Create the data directory if it doesn't exist
    /// 2. Build the connection pool (WAL mode, busy timeout)
    /// 3. Create the table and indexes if missing
    pub fn open(config: &Config) -> Result<Self> {
        if config.pool_size == 0 {
            return Err(RowKvError::Config("pool_size must be at least 1".to_string()));
        }

        fs::create_dir_all(&config.data_dir)?;
        let db_path = config.db_path();

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let manager = SqliteConnectionManager::file(&db_path)
            .with_init(move |conn| schema::configure_connection(conn, busy_timeout));
        let pool = Pool::builder().max_size(config.pool_size).build(manager)?;

        schema::init(&*pool.get()?)?;

        tracing::info!(
            "Opened record store at {} (pool_size={})",
            db_path.display(),
            config.pool_size
        );

        Ok(Self { pool, db_path })
    }

    /// Open with a data directory and otherwise default config
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(&config)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// List records matching `params`
    ///
    /// Parameters are validated before a connection is taken from the pool,
    /// so a rejected sort column or order never reaches the engine.
    pub fn list(&self, params: &ListParams) -> Result<Vec<Record>> {
        let query = ListQuery::parse(params).inspect_err(|e| {
            tracing::warn!("Rejected list parameters: {}", e);
        })?;
        self.list_query(&query)
    }

    /// List records for an already validated query
    pub fn list_query(&self, query: &ListQuery) -> Result<Vec<Record>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare_cached(query.sql())?;

        let records = stmt
            .query_map(
                params![query.like_pattern(), query.page_size(), query.offset()],
                record_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(
            "Listed {} records (page={}, page_size={}, sort={} {}, search_len={})",
            records.len(),
            query.page(),
            query.page_size(),
            query.column(),
            query.order(),
            query.search().len()
        );

        Ok(records)
    }

    // =========================================================================
    // Single-record Operations
    // =========================================================================

    /// Insert a new record
    ///
    /// The insert is `INSERT OR IGNORE`; zero affected rows means the UNIQUE
    /// constraint on `key` rejected it, reported as `KeyConflict`.
    pub fn create(&self, key: &str, value: &str) -> Result<Record> {
        let conn = self.pool.get()?;
        let now = record::now();

        let inserted = conn.execute(INSERT_OR_IGNORE, params![key, value, encode_timestamp(&now)])?;
        if inserted == 0 {
            tracing::warn!("Create rejected, key already exists: {:?}", key);
            return Err(RowKvError::KeyConflict(key.to_string()));
        }

        // Connection is held exclusively, so the rowid is ours
        let id = conn.last_insert_rowid();
        tracing::debug!("Created record id={}", id);

        Ok(Record {
            id,
            key: key.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a record by id
    pub fn get(&self, id: i64) -> Result<Record> {
        let conn = self.pool.get()?;
        conn.query_row(SELECT_BY_ID, [id], record_from_row)
            .optional()?
            .ok_or(RowKvError::NotFound(id))
    }

    /// Replace `key` and `value` of an existing record
    ///
    /// Steps (in one IMMEDIATE transaction, so concurrent updates of the
    /// same record are serialized and `updated_at` never goes backwards):
    /// 1. Look up the record (absent → `NotFound`, no write attempted)
    /// 2. UPDATE with a refreshed `updated_at`
    /// 3. A UNIQUE violation on the new key → `KeyConflict`, row unchanged
    pub fn update(&self, id: i64, key: &str, value: &str) -> Result<Record> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<(String, String)> = tx
            .query_row(
                "SELECT created_at, updated_at FROM key_values WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (created_at, previous) = existing.ok_or(RowKvError::NotFound(id))?;

        let created_at = decode_timestamp(&created_at)?;
        let updated_at = record::next_update_time(&decode_timestamp(&previous)?);

        let result = tx.execute(
            "UPDATE key_values SET key = ?1, value = ?2, updated_at = ?3 WHERE id = ?4",
            params![key, value, encode_timestamp(&updated_at), id],
        );

        match result {
            Ok(0) => Err(RowKvError::NotFound(id)),
            Ok(_) => {
                tx.commit()?;
                tracing::debug!("Updated record id={}", id);
                Ok(Record {
                    id,
                    key: key.to_string(),
                    value: value.to_string(),
                    created_at,
                    updated_at,
                })
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!("Update of id={} rejected, key already exists: {:?}", id, key);
                Err(RowKvError::KeyConflict(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Permanently remove a record
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM key_values WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(RowKvError::NotFound(id));
        }

        tracing::debug!("Deleted record id={}", id);
        Ok(())
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Insert `count` random records in one transaction
    ///
    /// Returns the number of rows actually inserted (collisions are ignored).
    pub fn generate_bulk(&self, count: usize) -> Result<usize> {
        self.generate_bulk_with(count, &mut RandomSource::new())
    }

    /// Insert `count` records drawn from `source` in one transaction
    ///
    /// All-or-nothing: any error (from the source or the engine) drops the
    /// transaction before commit, rolling back every row of the batch.
    pub fn generate_bulk_with(
        &self,
        count: usize,
        source: &mut dyn SyntheticSource,
    ) -> Result<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let now = encode_timestamp(&record::now());

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(INSERT_OR_IGNORE)?;
            for index in 0..count {
                let pair = source.generate(index).inspect_err(|e| {
                    tracing::error!("Bulk generate aborted at row {}: {}", index, e);
                })?;
                inserted += stmt.execute(params![pair.key, pair.value, now])?;
            }
        }
        tx.commit()?;

        tracing::info!("Bulk generated {} records ({} requested)", inserted, count);
        Ok(inserted)
    }

    /// Remove every record and reclaim the file space
    ///
    /// The AUTOINCREMENT sequence survives, so ids issued afterwards are
    /// still greater than any id issued before.
    pub fn truncate(&self) -> Result<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM key_values", [])?;
        conn.execute_batch("VACUUM")?;

        tracing::info!("Truncated record store ({} records removed)", removed);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Total number of records
    pub fn count(&self) -> Result<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM key_values", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get the database file path
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Map a `SELECT id, key, value, created_at, updated_at` row
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        key: row.get(1)?,
        value: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(idx)?;
    decode_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
