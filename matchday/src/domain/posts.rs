//! Post documents and the feed boundary.
//!
//! Posts come straight out of the document store, so their engagement
//! slice is untrusted: counters drift and older clients wrote different
//! entry shapes. [`FeedService`] repairs every post before it is handed
//! to a rendering surface and reports what it fixed as diagnostics.
//! Data-integrity findings never block rendering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use engagement::{PostEngagement, validate_post_engagement, weighted_engagement_score};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::{DocumentStoreError, PostStore};

/// A post document as stored in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    /// Post id.
    pub id: String,
    /// Author user id.
    pub author_id: String,
    /// Post body.
    pub body: String,
    /// When the post was written, when the store recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Engagement slice, stored inline on the post document.
    #[serde(flatten)]
    pub engagement: PostEngagement,
}

/// Read side of the feed: loads posts and repairs their engagement data
/// before anything renders.
#[derive(Clone)]
pub struct FeedService<S> {
    posts: Arc<S>,
}

impl<S> FeedService<S> {
    /// Create a feed service over a post store.
    pub fn new(posts: Arc<S>) -> Self {
        Self { posts }
    }
}

impl<S> FeedService<S>
where
    S: PostStore,
{
    /// Fetch a post with its engagement data repaired.
    ///
    /// Counter mismatches and invalid entries are logged and corrected;
    /// the returned post always satisfies the count-equals-length
    /// invariant.
    pub async fn fetch_post(
        &self,
        post_id: &str,
    ) -> Result<Option<PostDocument>, DocumentStoreError> {
        let Some(mut post) = self.posts.load_post(post_id).await? else {
            return Ok(None);
        };

        let report = validate_post_engagement(&post.engagement);
        for issue in &report.errors {
            warn!(post_id = %post.id, %issue, "repairing engagement data");
        }
        for issue in &report.warnings {
            debug!(post_id = %post.id, %issue, "filling missing engagement field");
        }
        if let Some(corrected) = report.corrected {
            post.engagement = corrected;
        }
        Ok(Some(post))
    }
}

/// Order posts by weighted engagement score, highest first.
///
/// `time_weight` maps a post to its decay factor; the score weighting
/// itself is fixed policy.
pub fn rank_posts(posts: &mut [PostDocument], time_weight: impl Fn(&PostDocument) -> f64) {
    posts.sort_by(|a, b| {
        let score_a = weighted_engagement_score(&a.engagement, time_weight(a));
        let score_b = weighted_engagement_score(&b.engagement, time_weight(b));
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixturePostStore;
    use serde_json::json;

    fn stored_post(raw: serde_json::Value) -> PostDocument {
        serde_json::from_value(raw).expect("post documents deserialize leniently")
    }

    #[tokio::test]
    async fn fetch_post_repairs_untrusted_engagement_data() {
        let post = stored_post(json!({
            "id": "post-1",
            "authorId": "user-1",
            "body": "Derby day!",
            "likes": ["u1", {"userId": "u2"}, {"broken": true}],
            "likesCount": 9,
        }));
        let service = FeedService::new(Arc::new(FixturePostStore::with_post(post)));

        let fetched = service
            .fetch_post("post-1")
            .await
            .expect("fixture store cannot fail")
            .expect("post exists");

        assert_eq!(fetched.engagement.likes_count, Some(2));
        assert_eq!(fetched.engagement.likes.len(), 2);
        assert!(fetched.engagement.share_metadata.is_some());
    }

    #[tokio::test]
    async fn fetch_post_passes_missing_posts_through() {
        let service = FeedService::new(Arc::new(FixturePostStore::default()));
        let fetched = service
            .fetch_post("missing")
            .await
            .expect("fixture store cannot fail");
        assert!(fetched.is_none());
    }

    #[test]
    fn ranking_orders_by_weighted_score() {
        let mut posts = vec![
            stored_post(json!({
                "id": "quiet", "authorId": "a", "body": "",
                "likesCount": 1, "commentsCount": 0, "sharesCount": 0,
            })),
            stored_post(json!({
                "id": "busy", "authorId": "b", "body": "",
                "likesCount": 10, "commentsCount": 5, "sharesCount": 2,
            })),
        ];
        rank_posts(&mut posts, |_| 1.0);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["busy", "quiet"]);
    }
}
