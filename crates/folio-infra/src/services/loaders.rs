//! Loaders - read the catalogue for a page, degrading to empty results
//! when the backend fails.

use std::sync::Arc;

use futures::future::join_all;

use folio_core::ApiError;
use folio_core::domain::{Blog, BlogPreview, CalendarEvent, Tag};
use folio_core::ports::{BlogApi, ListBlogsParams, Page};

/// Previews requested for catalogue-wide views.
pub const PREVIEW_LIMIT: u32 = 100;

/// Outcome of a single fetch.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    fn from_result(result: Result<Option<T>, ApiError>) -> Self {
        match result {
            Ok(data) => Self {
                data,
                ..Self::default()
            },
            Err(error) => Self {
                error: Some(error),
                ..Self::default()
            },
        }
    }
}

/// Load one blog. A blank id loads nothing.
pub async fn load_blog(api: &dyn BlogApi, id: &str) -> FetchState<Blog> {
    if id.trim().is_empty() {
        return FetchState::default();
    }
    FetchState::from_result(api.get_blog(id).await)
}

/// Catalogue reads used by the pages.
#[derive(Clone)]
pub struct Catalog {
    api: Arc<dyn BlogApi>,
}

impl Catalog {
    pub fn new(api: Arc<dyn BlogApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn BlogApi> {
        &self.api
    }

    pub async fn previews(&self) -> Vec<BlogPreview> {
        match self.api.list_blogs(&ListBlogsParams::with_limit(PREVIEW_LIMIT)).await {
            Ok(page) => page.items,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch blog previews");
                Vec::new()
            }
        }
    }

    /// A page of previews with filters; failures yield an empty page.
    pub async fn list(&self, params: &ListBlogsParams) -> Page<BlogPreview> {
        self.api.list_blogs(params).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch blogs");
            Page::empty()
        })
    }

    /// Blog detail; errors read as "not found".
    pub async fn blog(&self, slug: &str) -> Option<Blog> {
        match self.api.get_blog(slug).await {
            Ok(blog) => blog,
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "Failed to fetch blog");
                None
            }
        }
    }

    /// Full documents for `previews`, fetched concurrently. Blogs that fail
    /// to load are left out.
    pub async fn blogs(&self, previews: &[BlogPreview]) -> Vec<Blog> {
        join_all(previews.iter().map(|p| self.blog(&p.id)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    pub async fn search(&self, query: &str) -> Vec<BlogPreview> {
        self.api.search(query).await.unwrap_or_else(|e| {
            tracing::error!(query = %query, error = %e, "Search failed");
            Vec::new()
        })
    }

    pub async fn tags(&self) -> Vec<Tag> {
        self.api.tags().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch tags");
            Vec::new()
        })
    }

    pub async fn blogs_by_tag(&self, slug: &str) -> Vec<BlogPreview> {
        self.api.blogs_by_tag(slug).await.unwrap_or_else(|e| {
            tracing::error!(tag = %slug, error = %e, "Failed to fetch blogs by tag");
            Vec::new()
        })
    }

    pub async fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.api.calendar_events().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch calendar events");
            Vec::new()
        })
    }
}
