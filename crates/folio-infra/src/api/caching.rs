//! Caching decorator - keeps blog documents and comment lists for a short
//! time so revisiting a page does not hit the network.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::ApiError;
use folio_core::domain::{Blog, BlogPreview, CalendarEvent, Comment, Tag, UserVote, VoteTally};
use folio_core::ports::{BlogApi, Cache, CacheStats, ListBlogsParams, Page};

pub struct CachingBlogApi {
    inner: Arc<dyn BlogApi>,
    blogs: Arc<dyn Cache<Blog>>,
    comments: Arc<dyn Cache<Vec<Comment>>>,
}

impl CachingBlogApi {
    pub fn new(
        inner: Arc<dyn BlogApi>,
        blogs: Arc<dyn Cache<Blog>>,
        comments: Arc<dyn Cache<Vec<Comment>>>,
    ) -> Self {
        Self {
            inner,
            blogs,
            comments,
        }
    }

    /// Drop expired entries from both caches.
    pub async fn cleanup_expired(&self) -> usize {
        self.blogs.cleanup_expired().await + self.comments.cleanup_expired().await
    }

    /// `(blogs, comments)` cache statistics.
    pub async fn stats(&self) -> (CacheStats, CacheStats) {
        (self.blogs.stats().await, self.comments.stats().await)
    }

    pub async fn clear(&self) {
        self.blogs.clear().await;
        self.comments.clear().await;
    }

    /// Keep a cached blog's counters in line with a confirmed vote.
    async fn refresh_cached_voting(&self, slug: &str, tally: VoteTally) {
        let Some(mut blog) = self.blogs.get(slug).await else {
            return;
        };
        blog.voting.upvotes = tally.upvotes;
        blog.voting.downvotes = tally.downvotes;
        blog.voting.user_vote = tally.user_vote;

        if let Err(e) = self.blogs.replace(slug, blog).await {
            tracing::warn!(slug = %slug, error = %e, "Failed to update cached blog");
        }
    }
}

#[async_trait]
impl BlogApi for CachingBlogApi {
    async fn list_blogs(&self, params: &ListBlogsParams) -> Result<Page<BlogPreview>, ApiError> {
        self.inner.list_blogs(params).await
    }

    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError> {
        if let Some(blog) = self.blogs.get(slug).await {
            tracing::debug!(slug = %slug, "Blog cache hit");
            return Ok(Some(blog));
        }

        let blog = self.inner.get_blog(slug).await?;
        if let Some(blog) = &blog {
            if let Err(e) = self.blogs.set(slug, blog.clone()).await {
                tracing::warn!(slug = %slug, error = %e, "Failed to cache blog");
            }
        }
        Ok(blog)
    }

    async fn get_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        if let Some(comments) = self.comments.get(slug).await {
            tracing::debug!(slug = %slug, "Comments cache hit");
            return Ok(comments);
        }

        let comments = self.inner.get_comments(slug).await?;
        if let Err(e) = self.comments.set(slug, comments.clone()).await {
            tracing::warn!(slug = %slug, error = %e, "Failed to cache comments");
        }
        Ok(comments)
    }

    async fn create_comment(
        &self,
        slug: &str,
        name: &str,
        comment: &str,
    ) -> Result<Comment, ApiError> {
        let created = self.inner.create_comment(slug, name, comment).await?;
        if let Err(e) = self.comments.invalidate(slug).await {
            tracing::warn!(slug = %slug, error = %e, "Failed to invalidate comments cache");
        }
        Ok(created)
    }

    async fn vote(&self, slug: &str, vote: UserVote) -> Result<VoteTally, ApiError> {
        let tally = self.inner.vote(slug, vote).await?;
        self.refresh_cached_voting(slug, tally).await;
        Ok(tally)
    }

    async fn remove_vote(&self, slug: &str) -> Result<VoteTally, ApiError> {
        let tally = self.inner.remove_vote(slug).await?;
        self.refresh_cached_voting(slug, tally).await;
        Ok(tally)
    }

    async fn search(&self, query: &str) -> Result<Vec<BlogPreview>, ApiError> {
        self.inner.search(query).await
    }

    async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.inner.tags().await
    }

    async fn blogs_by_tag(&self, slug: &str) -> Result<Vec<BlogPreview>, ApiError> {
        self.inner.blogs_by_tag(slug).await
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        self.inner.calendar_events().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryBlogApi;
    use crate::cache::InMemoryCache;

    fn setup() -> (Arc<InMemoryBlogApi>, CachingBlogApi) {
        let inner = Arc::new(InMemoryBlogApi::seeded());
        let api = CachingBlogApi::new(
            inner.clone(),
            Arc::new(InMemoryCache::<Blog>::default()),
            Arc::new(InMemoryCache::<Vec<Comment>>::default()),
        );
        (inner, api)
    }

    #[tokio::test]
    async fn test_blog_served_from_cache() {
        let (inner, api) = setup();
        let slug = inner.first_slug();

        assert!(api.get_blog(&slug).await.unwrap().is_some());
        assert!(api.get_blog(&slug).await.unwrap().is_some());
        assert_eq!(inner.calls("get_blog"), 1);
    }

    #[tokio::test]
    async fn test_missing_blog_is_not_cached() {
        let (inner, api) = setup();
        assert!(api.get_blog("nope").await.unwrap().is_none());
        assert!(api.get_blog("nope").await.unwrap().is_none());
        assert_eq!(inner.calls("get_blog"), 2);
    }

    #[tokio::test]
    async fn test_new_comment_invalidates_comment_cache() {
        let (inner, api) = setup();
        let slug = inner.first_slug();

        let before = api.get_comments(&slug).await.unwrap();
        api.get_comments(&slug).await.unwrap();
        assert_eq!(inner.calls("get_comments"), 1);

        api.create_comment(&slug, "Ann", "Nice post").await.unwrap();
        let after = api.get_comments(&slug).await.unwrap();
        assert_eq!(inner.calls("get_comments"), 2);
        assert_eq!(after.len(), before.len() + 1);
    }

    #[tokio::test]
    async fn test_vote_updates_cached_blog() {
        let (inner, api) = setup();
        let slug = inner.first_slug();
        let original = api.get_blog(&slug).await.unwrap().unwrap().voting;

        let tally = api.vote(&slug, UserVote::Upvote).await.unwrap();
        let cached = api.get_blog(&slug).await.unwrap().unwrap().voting;

        assert_eq!(tally.upvotes, original.upvotes + 1);
        assert_eq!(cached.tally(), tally);
        assert_eq!(inner.calls("get_blog"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_vote_does_not_extend_cached_blog_lifetime() {
        let (inner, api) = setup();
        let slug = inner.first_slug();
        api.get_blog(&slug).await.unwrap();

        tokio::time::advance(std::time::Duration::from_secs(10 * 60)).await;
        api.vote(&slug, UserVote::Upvote).await.unwrap();

        tokio::time::advance(std::time::Duration::from_secs(5 * 60 + 1)).await;
        api.get_blog(&slug).await.unwrap();
        assert_eq!(inner.calls("get_blog"), 2);
    }
}
