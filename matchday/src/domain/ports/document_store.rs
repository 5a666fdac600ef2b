//! Ports for the hosted document store.
//!
//! Documents read through these ports are untrusted until validated; the
//! feed service runs engagement hygiene on every post before it is shown.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::posts::PostDocument;
use crate::domain::profile::ProfileDocument;
use crate::domain::settings::ProfileDraft;

/// Errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// The store could not be reached.
    #[error("document store connection failed: {message}")]
    Connection {
        /// Adapter-supplied detail.
        message: String,
    },
    /// A read or write failed during execution.
    #[error("document store query failed: {message}")]
    Query {
        /// Adapter-supplied detail.
        message: String,
    },
    /// A document could not be encoded or decoded.
    #[error("document serialization failed: {message}")]
    Serialization {
        /// Adapter-supplied detail.
        message: String,
    },
}

/// Profile document storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile; `None` when the user has no document yet.
    async fn load_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<ProfileDocument>, DocumentStoreError>;

    /// Persist the edited profile fields. Last write wins; this layer
    /// implements no concurrency discipline over the store.
    async fn save_profile(
        &self,
        user_id: &str,
        draft: &ProfileDraft,
    ) -> Result<(), DocumentStoreError>;
}

/// Post document reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch a post; `None` when it does not exist.
    async fn load_post(&self, post_id: &str) -> Result<Option<PostDocument>, DocumentStoreError>;
}

/// Fixture profile store serving one canned profile and capturing the
/// last save for assertions.
#[derive(Debug, Default)]
pub struct FixtureProfileStore {
    profile: Option<ProfileDocument>,
    saved: Mutex<Option<ProfileDraft>>,
}

impl FixtureProfileStore {
    /// Serve `profile` from every load.
    #[must_use]
    pub fn with_profile(profile: ProfileDocument) -> Self {
        Self {
            profile: Some(profile),
            saved: Mutex::new(None),
        }
    }

    /// The draft captured by the most recent save, if any.
    #[must_use]
    pub fn last_saved(&self) -> Option<ProfileDraft> {
        self.saved.lock().ok().and_then(|guard| (*guard).clone())
    }
}

#[async_trait]
impl ProfileStore for FixtureProfileStore {
    async fn load_profile(
        &self,
        _user_id: &str,
    ) -> Result<Option<ProfileDocument>, DocumentStoreError> {
        Ok(self.profile.clone())
    }

    async fn save_profile(
        &self,
        _user_id: &str,
        draft: &ProfileDraft,
    ) -> Result<(), DocumentStoreError> {
        if let Ok(mut guard) = self.saved.lock() {
            *guard = Some(draft.clone());
        }
        Ok(())
    }
}

/// Fixture post store serving one canned post.
#[derive(Debug, Default)]
pub struct FixturePostStore {
    post: Option<PostDocument>,
}

impl FixturePostStore {
    /// Serve `post` from every load.
    #[must_use]
    pub fn with_post(post: PostDocument) -> Self {
        Self { post: Some(post) }
    }
}

#[async_trait]
impl PostStore for FixturePostStore {
    async fn load_post(
        &self,
        _post_id: &str,
    ) -> Result<Option<PostDocument>, DocumentStoreError> {
        Ok(self.post.clone())
    }
}
