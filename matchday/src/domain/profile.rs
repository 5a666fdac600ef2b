//! Profile document shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile document as stored in the document store.
///
/// Ids are provider-issued opaque strings. Optional fields may be absent
/// on documents written by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    /// Owning user id.
    pub user_id: String,
    /// Public display name.
    pub display_name: String,
    /// Unique handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Free-form biography.
    #[serde(default)]
    pub bio: String,
    /// Last write timestamp, when the store recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
