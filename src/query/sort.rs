//! Sort definitions
//!
//! The only SQL fragments assembled at runtime are the ORDER BY column and
//! direction. Both come from these closed enums; raw request text is parsed
//! into them and rejected if it is not on the allow-list.

use std::fmt;
use std::str::FromStr;

use crate::error::RowKvError;

/// Columns a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Key,
    Value,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Key,
        SortColumn::Value,
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
    ];

    /// Column name as it appears in the schema
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Key => "key",
            SortColumn::Value => "value",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortColumn {
    type Err = RowKvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key" => Ok(SortColumn::Key),
            "value" => Ok(SortColumn::Value),
            "created_at" => Ok(SortColumn::CreatedAt),
            "updated_at" => Ok(SortColumn::UpdatedAt),
            _ => Err(RowKvError::InvalidParameter(format!(
                "unsupported sort column {s:?} (expected key, value, created_at or updated_at)"
            ))),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = RowKvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(RowKvError::InvalidParameter(format!(
                "unsupported sort order {s:?} (expected asc or desc)"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
