use async_trait::async_trait;

use crate::domain::{Blog, BlogPreview, CalendarEvent, Comment, Tag, UserVote, VoteTally};
use crate::error::ApiError;

/// Blog API - abstraction over the REST backend (HTTP, in-memory).
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// `GET /blogs` with filters.
    async fn list_blogs(&self, params: &ListBlogsParams) -> Result<Page<BlogPreview>, ApiError>;

    /// `GET /blogs/{slug}`. Unknown slugs and unusable payloads are `Ok(None)`.
    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError>;

    /// `GET /blogs/{slug}/comments`.
    async fn get_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError>;

    /// `POST /blogs/{slug}/comments`.
    async fn create_comment(&self, slug: &str, name: &str, comment: &str)
    -> Result<Comment, ApiError>;

    /// `POST /blogs/{slug}/vote`.
    async fn vote(&self, slug: &str, vote: UserVote) -> Result<VoteTally, ApiError>;

    /// `DELETE /blogs/{slug}/vote`.
    async fn remove_vote(&self, slug: &str) -> Result<VoteTally, ApiError>;

    /// `GET /search?q=`.
    async fn search(&self, query: &str) -> Result<Vec<BlogPreview>, ApiError>;

    /// `GET /tags`.
    async fn tags(&self) -> Result<Vec<Tag>, ApiError>;

    /// `GET /tags/{slug}`.
    async fn blogs_by_tag(&self, slug: &str) -> Result<Vec<BlogPreview>, ApiError>;

    /// `GET /calendar/events`.
    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    Popular,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
        }
    }
}

/// Filters for the blog list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBlogsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<SortOrder>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

impl ListBlogsParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query-string pairs; unset filters are left out, tags are comma-joined.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            query.push(("limit", limit.to_string()));
        }
        if let Some(sort) = self.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        if !self.tags.is_empty() {
            query.push(("tags", self.tags.join(",")));
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            query.push(("author", author.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }

        query
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            limit: 0,
            total: 0,
            total_pages: 0,
        }
    }
}
