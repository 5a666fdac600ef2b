//! Engagement counter reconciliation and scoring primitives.
//!
//! Post documents fetched from the document store carry denormalized
//! engagement counters (`likesCount`, `commentsCount`, `sharesCount`)
//! alongside the authoritative detail arrays. Documents written by older
//! clients mix bare user-id strings with the current object entries, and
//! counters drift out of sync with their arrays. This crate treats every
//! such document as untrusted input: it classifies mixed entry shapes
//! through a single normalization point, reports counter drift without
//! aborting, and repairs snapshots so the count-equals-length invariant
//! holds before anything is rendered.
//!
//! Repairs are diagnostics, never failures; a snapshot that cannot be
//! trusted is corrected, not rejected.

pub mod entries;
pub mod report;
pub mod score;

pub use entries::{ActorEntry, ActorRecord, CommentEntry, CommentRecord, PostEngagement, ShareMetadata};
pub use report::{
    EngagementField, EngagementIssue, EngagementReport, FieldReport, has_user_liked,
    has_user_shared, sanitize, validate_actor_entries, validate_comment_entries,
    validate_post_engagement,
};
pub use score::{engagement_score, weighted_engagement_score};
