//! Comment thread under a blog.
//!
//! Loaded comments are mirrored to local storage so the thread can still be
//! shown when the backend is unreachable.

use std::sync::Arc;

use thiserror::Error;

use folio_core::context::LocalComments;
use folio_core::domain::{Comment, CommentDraft};
use folio_core::ports::BlogApi;
use folio_core::{ApiError, DomainError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Comments are disabled for this blog")]
    Disabled,

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct CommentThread {
    slug: String,
    enabled: bool,
    api: Arc<dyn BlogApi>,
    local: LocalComments,
    comments: Vec<Comment>,
    error: Option<String>,
}

impl CommentThread {
    pub fn new(
        slug: impl Into<String>,
        enabled: bool,
        api: Arc<dyn BlogApi>,
        local: LocalComments,
    ) -> Self {
        Self {
            slug: slug.into(),
            enabled,
            api,
            local,
            comments: Vec::new(),
            error: None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Message of the last failed load or submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the thread. Disabled threads stay empty; on failure the locally
    /// stored copy is shown.
    pub async fn load(&mut self) -> &[Comment] {
        if !self.enabled {
            self.comments.clear();
            return &self.comments;
        }

        match self.api.get_comments(&self.slug).await {
            Ok(comments) => {
                if let Err(e) = self.local.save(&self.slug, &comments) {
                    tracing::warn!(slug = %self.slug, error = %e, "Failed to store comments locally");
                }
                self.comments = comments;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(slug = %self.slug, error = %e, "Failed to fetch comments");
                self.comments = self.local.load(&self.slug);
                self.error = Some(e.to_string());
            }
        }
        &self.comments
    }

    /// Validate and post `draft`. The draft is cleared only on success.
    pub async fn submit(&mut self, draft: &mut CommentDraft) -> Result<Comment, SubmitError> {
        if !self.enabled {
            return Err(SubmitError::Disabled);
        }
        let (name, text) = draft.validate()?;

        match self.api.create_comment(&self.slug, &name, &text).await {
            Ok(created) => {
                self.comments.insert(0, created.clone());
                if let Err(e) = self.local.save(&self.slug, &self.comments) {
                    tracing::warn!(slug = %self.slug, error = %e, "Failed to store comments locally");
                }
                self.error = None;
                draft.clear();
                tracing::info!(slug = %self.slug, comment_id = %created.id, "Comment posted");
                Ok(created)
            }
            Err(e) => {
                tracing::error!(slug = %self.slug, error = %e, "Failed to post comment");
                self.error = Some(e.to_string());
                Err(SubmitError::Api(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryBlogApi;
    use crate::storage::InMemoryStore;

    fn thread(enabled: bool) -> (Arc<InMemoryBlogApi>, Arc<InMemoryStore>, CommentThread) {
        let api = Arc::new(InMemoryBlogApi::seeded());
        let store = Arc::new(InMemoryStore::default());
        let thread = CommentThread::new(
            api.first_slug(),
            enabled,
            api.clone(),
            LocalComments::new(store.clone()),
        );
        (api, store, thread)
    }

    #[tokio::test]
    async fn test_disabled_thread_is_empty() {
        let (api, _, mut thread) = thread(false);
        assert!(thread.load().await.is_empty());
        assert_eq!(api.calls("get_comments"), 0);

        let mut draft = CommentDraft::new("Ann", "Hi");
        assert!(matches!(
            thread.submit(&mut draft).await,
            Err(SubmitError::Disabled)
        ));
    }

    #[tokio::test]
    async fn test_submit_prepends_and_clears_draft() {
        let (_, _, mut thread) = thread(true);
        let before = thread.load().await.len();

        let mut draft = CommentDraft::new(" Ann ", "Great post");
        let created = thread.submit(&mut draft).await.unwrap();

        assert_eq!(created.name, "Ann");
        assert_eq!(thread.comments().len(), before + 1);
        assert_eq!(thread.comments()[0].id, created.id);
        assert_eq!(draft, CommentDraft::default());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let (api, _, mut thread) = thread(true);
        thread.load().await;
        api.fail_with(Some(ApiError::Network("offline".into())));

        let mut draft = CommentDraft::new("Ann", "Great post");
        let err = thread.submit(&mut draft).await.unwrap_err();

        assert!(matches!(err, SubmitError::Api(ApiError::Network(_))));
        assert_eq!(draft, CommentDraft::new("Ann", "Great post"));
        assert!(thread.error().unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let (api, _, mut thread) = thread(true);
        let mut draft = CommentDraft::new("", "text");

        assert!(matches!(
            thread.submit(&mut draft).await,
            Err(SubmitError::Invalid(_))
        ));
        assert_eq!(api.calls("create_comment"), 0);
    }

    #[tokio::test]
    async fn test_load_falls_back_to_local_copy() {
        let (api, _, mut thread) = thread(true);
        let online = thread.load().await.to_vec();
        assert!(!online.is_empty());

        api.fail_with(Some(ApiError::Timeout));
        let offline = thread.load().await.to_vec();

        assert_eq!(offline, online);
        assert!(thread.error().is_some());
    }
}
