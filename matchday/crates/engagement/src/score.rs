//! Fixed-weight engagement scoring.
//!
//! The 1/2/3 weighting for likes/comments/shares is product policy, not a
//! per-call knob. Scores read the stored denormalized counters; absent or
//! negative counters contribute nothing.

use crate::entries::PostEngagement;

const LIKE_WEIGHT: u64 = 1;
const COMMENT_WEIGHT: u64 = 2;
const SHARE_WEIGHT: u64 = 3;

/// Unweighted engagement score for a post.
///
/// # Examples
/// ```
/// use engagement::{PostEngagement, engagement_score};
///
/// let post = PostEngagement {
///     likes_count: Some(10),
///     comments_count: Some(5),
///     shares_count: Some(2),
///     ..PostEngagement::default()
/// };
/// assert_eq!(engagement_score(&post), 26);
/// ```
#[must_use]
pub fn engagement_score(post: &PostEngagement) -> u64 {
    counter(post.likes_count) * LIKE_WEIGHT
        + counter(post.comments_count) * COMMENT_WEIGHT
        + counter(post.shares_count.or(post.share_count)) * SHARE_WEIGHT
}

/// Engagement score scaled by a caller-supplied time weight.
///
/// `time_weight` of `1.0` reproduces [`engagement_score`]; feed ranking
/// passes a decay factor for older posts.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "scores are far below the 2^52 threshold where f64 loses integer precision"
)]
pub fn weighted_engagement_score(post: &PostEngagement, time_weight: f64) -> f64 {
    engagement_score(post) as f64 * time_weight
}

fn counter(value: Option<i64>) -> u64 {
    value.and_then(|n| u64::try_from(n).ok()).unwrap_or(0)
}
