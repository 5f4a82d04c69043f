//! List query construction
//!
//! Turns untrusted listing parameters into a validated [`ListQuery`] and
//! selects the statement text for it. Every statement the store can run for
//! a listing is one of the eight literals produced by [`ListQuery::sql`].

use serde::Deserialize;

use super::sort::{SortColumn, SortOrder};
use crate::error::{Result, RowKvError};

/// Default page number when none is supplied
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Escape character used in LIKE patterns
const LIKE_ESCAPE: char = '\\';

/// Listing parameters as they arrive from a caller, not yet validated
///
/// Field names match the HTTP query string (`pageSize`, `sort`, `order`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,

    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,

    pub search: Option<String>,

    pub sort: Option<String>,

    pub order: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

/// A validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: i64,
    page_size: i64,
    offset: i64,
    search: String,
    column: SortColumn,
    order: SortOrder,
}

impl ListQuery {
    /// Validate raw parameters
    ///
    /// Fails with `InvalidParameter` for a page below 1, a non-positive page
    /// size, an offset that does not fit in an i64, or a sort column/order
    /// outside the allow-list.
    pub fn parse(params: &ListParams) -> Result<Self> {
        let page = params.page.unwrap_or(DEFAULT_PAGE);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(RowKvError::InvalidParameter(format!(
                "page must be at least 1, got {page}"
            )));
        }
        if page_size < 1 {
            return Err(RowKvError::InvalidParameter(format!(
                "pageSize must be positive, got {page_size}"
            )));
        }

        let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
            RowKvError::InvalidParameter(format!(
                "page {page} with pageSize {page_size} is out of range"
            ))
        })?;

        let column = match params.sort.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortColumn::default(),
        };
        let order = match params.order.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            page,
            page_size,
            offset,
            search: params.search.clone().unwrap_or_default(),
            column,
            order,
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// LIMIT for the statement
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// OFFSET for the statement: `(page - 1) * page_size`
    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn column(&self) -> SortColumn {
        self.column
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Pattern bound to both LIKE placeholders
    ///
    /// The search term is matched as a literal substring. An empty term
    /// yields `%%`, which matches every row.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.search))
    }

    /// Statement text for this query
    ///
    /// Parameters: `?1` LIKE pattern, `?2` limit, `?3` offset. Ties on the
    /// sort column are broken by `id` in the same direction so that pages
    /// never overlap.
    pub fn sql(&self) -> &'static str {
        macro_rules! list_sql {
            ($column:literal, $order:literal) => {
                concat!(
                    "SELECT id, key, value, created_at, updated_at FROM key_values ",
                    "WHERE key LIKE ?1 ESCAPE '\\' OR value LIKE ?1 ESCAPE '\\' ",
                    "ORDER BY ",
                    $column,
                    " ",
                    $order,
                    ", id ",
                    $order,
                    " LIMIT ?2 OFFSET ?3"
                )
            };
        }

        match (self.column, self.order) {
            (SortColumn::Key, SortOrder::Asc) => list_sql!("key", "ASC"),
            (SortColumn::Key, SortOrder::Desc) => list_sql!("key", "DESC"),
            (SortColumn::Value, SortOrder::Asc) => list_sql!("value", "ASC"),
            (SortColumn::Value, SortOrder::Desc) => list_sql!("value", "DESC"),
            (SortColumn::CreatedAt, SortOrder::Asc) => list_sql!("created_at", "ASC"),
            (SortColumn::CreatedAt, SortOrder::Desc) => list_sql!("created_at", "DESC"),
            (SortColumn::UpdatedAt, SortOrder::Asc) => list_sql!("updated_at", "ASC"),
            (SortColumn::UpdatedAt, SortOrder::Desc) => list_sql!("updated_at", "DESC"),
        }
    }
}

/// Escape LIKE metacharacters (`%`, `_`, and the escape char itself)
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
