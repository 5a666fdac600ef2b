//! Counter reconciliation, membership checks, and snapshot repair.
//!
//! Counter drift and malformed entries are data-integrity findings, not
//! failures: every function here degrades gracefully, reporting what it
//! found and how many entries actually validated. The corrected count is
//! always the number of valid entries, never the stored counter.

use crate::entries::{ActorEntry, CommentEntry, PostEngagement, ShareMetadata};

/// Engagement field under reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngagementField {
    /// The `likes` array and `likesCount` counter.
    Likes,
    /// The `comments` array and `commentsCount` counter.
    Comments,
    /// The `shares` array and `sharesCount` counter.
    Shares,
}

impl EngagementField {
    /// Field label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Shares => "Shares",
        }
    }
}

impl std::fmt::Display for EngagementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single data-integrity finding on a post's engagement slice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngagementIssue {
    /// The stored counter disagrees with the number of valid entries.
    #[error("{field} count mismatch: provided {provided}, actual {actual}")]
    CountMismatch {
        /// Field whose counter drifted.
        field: EngagementField,
        /// Counter value stored on the document.
        provided: i64,
        /// Number of entries that actually validated.
        actual: usize,
    },
    /// Entries that could not be attributed or rendered.
    #[error("{field} has {count} invalid entries")]
    InvalidEntries {
        /// Field containing the entries.
        field: EngagementField,
        /// How many entries failed validation.
        count: usize,
    },
    /// The denormalized counter is absent or unreadable.
    #[error("{field} count missing")]
    MissingCount {
        /// Field without a counter.
        field: EngagementField,
    },
    /// The aggregate share bookkeeping object is absent.
    #[error("share metadata missing")]
    MissingShareMetadata,
}

/// Outcome of reconciling one engagement field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// Field this report covers.
    pub field: EngagementField,
    /// `true` when nothing needed correcting.
    pub is_valid: bool,
    /// Number of entries that validated; the authoritative count.
    pub corrected_count: usize,
    /// Findings, in detection order.
    pub errors: Vec<EngagementIssue>,
}

/// Outcome of reconciling a whole post's engagement slice.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementReport {
    /// `true` when no errors were found (warnings do not invalidate).
    pub is_valid: bool,
    /// Mismatches and invalid entries.
    pub errors: Vec<EngagementIssue>,
    /// Absent counters and metadata, tolerated but worth surfacing.
    pub warnings: Vec<EngagementIssue>,
    /// Repaired snapshot, present whenever any repair is needed.
    pub corrected: Option<PostEngagement>,
}

/// Reconcile a like or share array against its stored counter.
///
/// Invalid entries are dropped from the corrected count but never abort
/// processing. A `provided` counter disagreeing with the valid-entry count
/// is reported as a [`EngagementIssue::CountMismatch`]; the corrected
/// count is always the actual count.
#[must_use]
pub fn validate_actor_entries(
    field: EngagementField,
    entries: &[ActorEntry],
    provided: Option<i64>,
) -> FieldReport {
    let actual = entries
        .iter()
        .filter(|entry| entry.user_id().is_some())
        .count();
    build_report(field, entries.len(), actual, provided)
}

/// Reconcile the comment array against its stored counter.
///
/// A comment entry validates only when it carries every field a feed needs
/// to render it; one incomplete entry invalidates that entry alone.
#[must_use]
pub fn validate_comment_entries(entries: &[CommentEntry], provided: Option<i64>) -> FieldReport {
    let actual = entries.iter().filter(|entry| entry.is_complete()).count();
    build_report(EngagementField::Comments, entries.len(), actual, provided)
}

fn build_report(
    field: EngagementField,
    total: usize,
    actual: usize,
    provided: Option<i64>,
) -> FieldReport {
    let mut errors = Vec::new();
    let invalid = total - actual;
    if invalid > 0 {
        errors.push(EngagementIssue::InvalidEntries {
            field,
            count: invalid,
        });
    }
    if let Some(stored) = provided {
        let agrees = usize::try_from(stored).is_ok_and(|count| count == actual);
        if !agrees {
            errors.push(EngagementIssue::CountMismatch {
                field,
                provided: stored,
                actual,
            });
        }
    }
    FieldReport {
        field,
        is_valid: errors.is_empty(),
        corrected_count: actual,
        errors,
    }
}

/// Reconcile a whole post's engagement slice.
///
/// Mismatched counters and invalid entries are errors; absent counters and
/// absent share metadata are warnings. Shares reconcile against
/// `sharesCount`, falling back to the legacy `shareCount` when the former
/// is absent. `corrected` carries a repaired snapshot whenever anything,
/// error or warning, needs fixing.
#[must_use]
pub fn validate_post_engagement(post: &PostEngagement) -> EngagementReport {
    let likes = validate_actor_entries(EngagementField::Likes, &post.likes, post.likes_count);
    let comments = validate_comment_entries(&post.comments, post.comments_count);
    let shares_provided = post.shares_count.or(post.share_count);
    let shares = validate_actor_entries(EngagementField::Shares, &post.shares, shares_provided);

    let mut errors = Vec::new();
    errors.extend(likes.errors);
    errors.extend(comments.errors);
    errors.extend(shares.errors);

    let mut warnings = Vec::new();
    for (field, counter) in [
        (EngagementField::Likes, post.likes_count),
        (EngagementField::Comments, post.comments_count),
        (EngagementField::Shares, shares_provided),
    ] {
        if counter.is_none() {
            warnings.push(EngagementIssue::MissingCount { field });
        }
    }
    if post.share_metadata.is_none() {
        warnings.push(EngagementIssue::MissingShareMetadata);
    }

    let needs_repair = !errors.is_empty() || !warnings.is_empty();
    EngagementReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        corrected: needs_repair.then(|| sanitize(post.clone())),
    }
}

/// Produce a fully repaired engagement snapshot.
///
/// Invalid entries are dropped, all counters (including the legacy
/// `shareCount` mirror) are overwritten with actual lengths, and default
/// share metadata is synthesized when absent. Sanitizing an already
/// sanitized snapshot returns it unchanged.
#[must_use]
pub fn sanitize(mut post: PostEngagement) -> PostEngagement {
    post.likes.retain(|entry| entry.user_id().is_some());
    post.comments.retain(CommentEntry::is_complete);
    post.shares.retain(|entry| entry.user_id().is_some());

    post.likes_count = stored_count(post.likes.len());
    post.comments_count = stored_count(post.comments.len());
    let shares = stored_count(post.shares.len());
    post.shares_count = shares;
    post.share_count = shares;
    if post.share_metadata.is_none() {
        post.share_metadata = Some(ShareMetadata::default());
    }
    post
}

fn stored_count(len: usize) -> Option<i64> {
    i64::try_from(len).ok()
}

/// `true` when `user_id` appears in the post's like entries, whatever
/// shape each entry takes.
#[must_use]
pub fn has_user_liked(post: &PostEngagement, user_id: &str) -> bool {
    contains_actor(&post.likes, user_id)
}

/// `true` when `user_id` appears in the post's share entries, whatever
/// shape each entry takes.
#[must_use]
pub fn has_user_shared(post: &PostEngagement, user_id: &str) -> bool {
    contains_actor(&post.shares, user_id)
}

fn contains_actor(entries: &[ActorEntry], user_id: &str) -> bool {
    entries.iter().any(|entry| entry.user_id() == Some(user_id))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
