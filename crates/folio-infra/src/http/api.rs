//! `BlogApi` over the REST backend.

use async_trait::async_trait;
use chrono::Utc;

use folio_core::ApiError;
use folio_core::domain::{Blog, BlogPreview, CalendarEvent, Comment, Tag, UserVote, VoteTally};
use folio_core::ports::{BlogApi, ListBlogsParams, Page};
use folio_shared::dto::{
    ApiBlogPayload, ApiCalendarEventsResponse, ApiCommentPayload, ApiCommentsResponse,
    ApiPaginatedBlogs, ApiSearchResult, ApiTagBlogsResponse, ApiTagsResponse, ApiVoteResponse,
    CreateCommentRequest, VoteRequest,
};

use super::client::HttpClient;
use crate::transform;

/// Stateless REST implementation; wrap it in
/// [`CachingBlogApi`](crate::api::CachingBlogApi) for caching.
pub struct RestBlogApi {
    client: HttpClient,
}

impl RestBlogApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlogApi for RestBlogApi {
    async fn list_blogs(&self, params: &ListBlogsParams) -> Result<Page<BlogPreview>, ApiError> {
        let response: ApiPaginatedBlogs = self.client.get(&["blogs"], &params.to_query()).await?;

        Ok(Page {
            items: transform::previews(response.blogs),
            page: response.pagination.page,
            limit: response.pagination.limit,
            total: response.pagination.total,
            total_pages: response.pagination.total_pages,
        })
    }

    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError> {
        let payload: ApiBlogPayload = match self.client.get(&["blogs", slug], &[]).await {
            Ok(payload) => payload,
            Err(ApiError::MalformedResponse(reason)) => {
                tracing::error!(slug = %slug, reason = %reason, "Invalid blog response structure");
                return Ok(None);
            }
            Err(e) if e.status_code() == Some(404) => return Ok(None),
            Err(e) => return Err(e),
        };

        match transform::blog(payload.into_blog(), slug) {
            Ok(blog) => Ok(Some(blog)),
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "Unusable blog document");
                Ok(None)
            }
        }
    }

    async fn get_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        let response: ApiCommentsResponse =
            self.client.get(&["blogs", slug, "comments"], &[]).await?;
        let now = Utc::now();

        Ok(response
            .comments
            .into_iter()
            .map(|c| transform::comment(c, now))
            .collect())
    }

    async fn create_comment(
        &self,
        slug: &str,
        name: &str,
        comment: &str,
    ) -> Result<Comment, ApiError> {
        let request = CreateCommentRequest {
            name: name.to_string(),
            comment: comment.to_string(),
        };
        let payload: ApiCommentPayload = self
            .client
            .post(&["blogs", slug, "comments"], &request)
            .await?;

        Ok(transform::comment(payload.into_comment(), Utc::now()))
    }

    async fn vote(&self, slug: &str, vote: UserVote) -> Result<VoteTally, ApiError> {
        let request = VoteRequest {
            vote_type: vote.as_str().to_string(),
        };
        let response: ApiVoteResponse = self.client.post(&["blogs", slug, "vote"], &request).await?;
        Ok(transform::vote_tally(response))
    }

    async fn remove_vote(&self, slug: &str) -> Result<VoteTally, ApiError> {
        let response: ApiVoteResponse = self.client.delete(&["blogs", slug, "vote"]).await?;
        Ok(transform::vote_tally(response))
    }

    async fn search(&self, query: &str) -> Result<Vec<BlogPreview>, ApiError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response: ApiSearchResult = self
            .client
            .get(&["search"], &[("q", query.to_string())])
            .await?;
        Ok(transform::previews(response.blogs))
    }

    async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        let response: ApiTagsResponse = self.client.get(&["tags"], &[]).await?;
        Ok(response.tags.into_iter().map(transform::tag).collect())
    }

    async fn blogs_by_tag(&self, slug: &str) -> Result<Vec<BlogPreview>, ApiError> {
        let response: ApiTagBlogsResponse = self.client.get(&["tags", slug], &[]).await?;
        Ok(transform::previews(response.blogs))
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        let response: ApiCalendarEventsResponse =
            self.client.get(&["calendar", "events"], &[]).await?;

        Ok(response
            .events
            .into_iter()
            .filter_map(|event| {
                let id = event.id.clone();
                transform::calendar_event(event)
                    .inspect_err(|e| tracing::warn!(event_id = %id, error = %e, "Skipping calendar event"))
                    .ok()
            })
            .collect())
    }
}
