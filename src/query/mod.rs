//! Query Module
//!
//! Translates listing parameters (pagination, free-text search, sort column
//! and direction) into a validated query and its statement text.
//!
//! ## Listing Statement
//! ```text
//! SELECT id, key, value, created_at, updated_at FROM key_values
//! WHERE key LIKE ?1 ESCAPE '\' OR value LIKE ?1 ESCAPE '\'
//! ORDER BY <column> <ASC|DESC>, id <ASC|DESC>
//! LIMIT ?2 OFFSET ?3
//! ```
//!
//! `<column>` and the direction are chosen by `match` over [`SortColumn`]
//! and [`SortOrder`]; request text is never spliced into the statement.

mod list;
mod sort;

pub use list::{escape_like, ListParams, ListQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use sort::{SortColumn, SortOrder};
