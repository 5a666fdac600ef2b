//! Document shapes for the engagement slice of a post.
//!
//! Like and share arrays historically stored bare user-id strings; current
//! clients write objects carrying at least `userId`. Both shapes, and
//! anything malformed a buggy writer may have left behind, deserialize
//! without failing the whole document. Classification happens in exactly
//! one place, [`ActorEntry::user_id`], so call sites never type-check
//! entries themselves.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A like or share entry as stored on a post document.
///
/// ## Invariants
/// - An entry counts toward engagement only when [`ActorEntry::user_id`]
///   returns `Some`; everything else is preserved for diagnostics and
///   dropped by [`crate::sanitize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActorEntry {
    /// Legacy shape: a bare user-id string.
    Id(String),
    /// Current shape: an object carrying at least `userId`.
    Record(ActorRecord),
    /// Anything else found in the array; never counted.
    Invalid(Value),
}

impl ActorEntry {
    /// The user id this entry refers to, or `None` when the entry is not
    /// attributable to a user (empty string, object without a `userId`,
    /// or a malformed value).
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id.as_str()).filter(|value| !value.is_empty()),
            Self::Record(record) => record.user_id.as_deref().filter(|value| !value.is_empty()),
            Self::Invalid(_) => None,
        }
    }
}

/// Object form of a like or share entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    /// Id of the user who liked or shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display name captured at interaction time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,
    /// When the interaction happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this version does not model; round-tripped untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A comment entry as stored on a post document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentEntry {
    /// Object form; completeness is checked by [`CommentEntry::is_complete`].
    Record(CommentRecord),
    /// A non-object value left by a broken writer; never counted.
    Invalid(Value),
}

impl CommentEntry {
    /// `true` when the entry carries everything a feed needs to render it:
    /// `id`, `text`, `userId`, and `userDisplayName`, all non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Record(record) => record.is_complete(),
            Self::Invalid(_) => false,
        }
    }
}

/// Object form of a comment entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    /// Comment document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Comment body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Author user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Author display name captured at write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,
    /// When the comment was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentRecord {
    fn is_complete(&self) -> bool {
        [
            self.id.as_deref(),
            self.text.as_deref(),
            self.user_id.as_deref(),
            self.user_display_name.as_deref(),
        ]
        .iter()
        .all(|field| field.is_some_and(|value| !value.is_empty()))
    }
}

/// Aggregate share bookkeeping kept beside the share array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMetadata {
    /// Most recent share, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_shared_at: Option<DateTime<Utc>>,
    /// Per-platform share tallies.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platforms: BTreeMap<String, u64>,
}

/// The engagement slice of a post document.
///
/// Array fields that are missing or not arrays collapse to empty vectors;
/// counters that are missing or not integers collapse to `None`. Nothing
/// in this type fails deserialization for a malformed document, which is
/// what lets [`crate::validate_post_engagement`] report and repair instead
/// of erroring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEngagement {
    /// Like entries, mixed legacy and current shapes.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub likes: Vec<ActorEntry>,
    /// Comment entries.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentEntry>,
    /// Share entries, mixed legacy and current shapes.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub shares: Vec<ActorEntry>,
    /// Denormalized like counter.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<i64>,
    /// Denormalized comment counter.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<i64>,
    /// Denormalized share counter.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shares_count: Option<i64>,
    /// Legacy duplicate of `sharesCount` written by older clients.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub share_count: Option<i64>,
    /// Aggregate share bookkeeping.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub share_metadata: Option<ShareMetadata>,
}

/// Deserialize a field, collapsing any shape mismatch to the default
/// instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("user-1"), Some("user-1"))]
    #[case(json!(""), None)]
    #[case(json!({"userId": "user-2", "userDisplayName": "Sam"}), Some("user-2"))]
    #[case(json!({"userId": ""}), None)]
    #[case(json!({"userDisplayName": "no id"}), None)]
    #[case(json!(null), None)]
    #[case(json!(42), None)]
    fn actor_entry_normalizes_mixed_shapes(
        #[case] raw: serde_json::Value,
        #[case] expected: Option<&str>,
    ) {
        let entry: ActorEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.user_id(), expected);
    }

    #[test]
    fn comment_entry_requires_all_render_fields() {
        let complete: CommentEntry = serde_json::from_value(json!({
            "id": "c1",
            "text": "great match",
            "userId": "user-1",
            "userDisplayName": "Sam",
        }))
        .unwrap();
        assert!(complete.is_complete());

        let missing_name: CommentEntry = serde_json::from_value(json!({
            "id": "c2",
            "text": "no author name",
            "userId": "user-1",
        }))
        .unwrap();
        assert!(!missing_name.is_complete());

        let garbage: CommentEntry = serde_json::from_value(json!("just a string")).unwrap();
        assert!(!garbage.is_complete());
    }

    #[test]
    fn malformed_fields_collapse_instead_of_failing() {
        let post: PostEngagement = serde_json::from_value(json!({
            "likes": "not an array",
            "comments": [{"id": "c1", "text": "t", "userId": "u", "userDisplayName": "n"}],
            "likesCount": "seven",
            "commentsCount": 1,
            "shareMetadata": 3,
        }))
        .unwrap();

        assert!(post.likes.is_empty());
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.likes_count, None);
        assert_eq!(post.comments_count, Some(1));
        assert_eq!(post.share_metadata, None);
    }

    #[test]
    fn unknown_record_fields_round_trip() {
        let raw = json!({"userId": "u1", "reaction": "🔥"});
        let entry: ActorEntry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }
}
