//! HTTP request bodies

use serde::Deserialize;

/// Body of create and update requests
///
/// Both fields must be present; an empty string is accepted and stored as is.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryBody {
    pub key: String,
    pub value: String,
}
