//! In-memory blog API.
//!
//! Used when no backend URL is configured, and as the fake behind service
//! tests. Documents are seeded from a bundled JSON file in the wire format,
//! so they go through the same transformers as REST responses.
//! Note: comments and votes are lost on restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use folio_core::ApiError;
use folio_core::domain::{
    Blog, BlogPreview, CalendarEvent, Comment, Tag, UserVote, VoteTally, slugify,
};
use folio_core::ports::{BlogApi, ListBlogsParams, Page, SortOrder};
use folio_shared::dto::{ApiBlog, ApiCalendarEvent, ApiComment};

use crate::transform;

const SEED: &str = include_str!("seed.json");
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Deserialize)]
struct Seed {
    blogs: Vec<ApiBlog>,
    #[serde(default)]
    comments: HashMap<String, Vec<ApiComment>>,
    #[serde(default)]
    events: Vec<ApiCalendarEvent>,
}

#[derive(Default)]
struct State {
    blogs: Vec<Blog>,
    comments: HashMap<String, Vec<Comment>>,
    events: Vec<CalendarEvent>,
}

impl State {
    fn blog_mut(&mut self, slug: &str) -> Result<&mut Blog, ApiError> {
        self.blogs
            .iter_mut()
            .find(|b| b.slug == slug)
            .ok_or_else(|| not_found(slug))
    }
}

/// In-memory `BlogApi` with call counters and fault injection.
#[derive(Default)]
pub struct InMemoryBlogApi {
    state: Mutex<State>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failure: Mutex<Option<ApiError>>,
    latency: Mutex<Duration>,
}

impl InMemoryBlogApi {
    pub fn new(blogs: Vec<Blog>) -> Self {
        Self {
            state: Mutex::new(State {
                blogs,
                ..State::default()
            }),
            ..Self::default()
        }
    }

    /// Catalogue seeded with the bundled demo posts and calendar.
    pub fn seeded() -> Self {
        let seed: Seed = match serde_json::from_str(SEED) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse bundled seed data");
                return Self::default();
            }
        };

        let now = Utc::now();
        let blogs: Vec<Blog> = seed
            .blogs
            .into_iter()
            .filter_map(|api| {
                let slug = api.slug.clone();
                transform::blog(api, &slug)
                    .inspect_err(|e| tracing::warn!(slug = %slug, error = %e, "Skipping seed blog"))
                    .ok()
            })
            .collect();
        let comments = seed
            .comments
            .into_iter()
            .map(|(slug, list)| {
                let list = list.into_iter().map(|c| transform::comment(c, now)).collect();
                (slug, list)
            })
            .collect();
        let events = seed
            .events
            .into_iter()
            .filter_map(|e| transform::calendar_event(e).ok())
            .collect();

        tracing::debug!(blogs = blogs.len(), "Seeded in-memory blog API");

        Self {
            state: Mutex::new(State {
                blogs,
                comments,
                events,
            }),
            ..Self::default()
        }
    }

    /// Slug of the first stored blog, or an empty string.
    pub fn first_slug(&self) -> String {
        self.lock_state()
            .blogs
            .first()
            .map(|b| b.slug.clone())
            .unwrap_or_default()
    }

    pub fn insert_blog(&self, blog: Blog) {
        let mut state = self.lock_state();
        state.blogs.retain(|b| b.slug != blog.slug);
        state.blogs.push(blog);
    }

    /// Number of calls made to an endpoint, by trait method name.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Make every following call fail with `error` (or succeed again with `None`).
    pub fn fail_with(&self, error: Option<ApiError>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }

    /// Delay every following call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = latency;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count the call, wait out the configured latency, then apply any
    /// injected failure.
    async fn enter(&self, endpoint: &'static str) -> Result<(), ApiError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(endpoint)
            .or_insert(0) += 1;

        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn matching<F>(&self, predicate: F) -> Vec<BlogPreview>
    where
        F: Fn(&Blog) -> bool,
    {
        let mut previews: Vec<BlogPreview> = self
            .lock_state()
            .blogs
            .iter()
            .filter(|b| predicate(b))
            .map(Blog::preview)
            .collect();
        previews.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));
        previews
    }
}

fn not_found(slug: &str) -> ApiError {
    ApiError::Server {
        code: "NOT_FOUND".to_string(),
        message: format!("Blog not found: {slug}"),
        status_code: Some(404),
        details: None,
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_text(blog: &Blog, needle: &str) -> bool {
    contains_ci(&blog.meta.title, needle)
        || contains_ci(&blog.meta.description, needle)
        || blog.tags.iter().any(|t| contains_ci(t, needle))
}

#[async_trait]
impl BlogApi for InMemoryBlogApi {
    async fn list_blogs(&self, params: &ListBlogsParams) -> Result<Page<BlogPreview>, ApiError> {
        self.enter("list_blogs").await?;

        let wanted_tags: Vec<String> = params.tags.iter().map(|t| t.to_lowercase()).collect();
        let author = params.author.as_deref().map(str::to_lowercase);
        let search = params
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut blogs: Vec<Blog> = self
            .lock_state()
            .blogs
            .iter()
            .filter(|b| {
                wanted_tags.is_empty()
                    || b.tags.iter().any(|t| wanted_tags.contains(&t.to_lowercase()))
            })
            .filter(|b| {
                author
                    .as_deref()
                    .is_none_or(|a| a.is_empty() || b.meta.author.to_lowercase() == a)
            })
            .filter(|b| search.as_deref().is_none_or(|s| matches_text(b, s)))
            .cloned()
            .collect();

        match params.sort.unwrap_or(SortOrder::Newest) {
            SortOrder::Newest => blogs.sort_by_key(|b| std::cmp::Reverse(b.meta.published_at)),
            SortOrder::Oldest => blogs.sort_by_key(|b| b.meta.published_at),
            SortOrder::Popular => blogs.sort_by_key(|b| std::cmp::Reverse(b.voting.tally().score())),
        }

        let page = params.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = params.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
        let total = blogs.len() as u64;
        let total_pages = total.div_ceil(u64::from(limit)) as u32;

        let offset = (page as usize - 1).saturating_mul(limit as usize);
        let items = blogs
            .iter()
            .skip(offset)
            .take(limit as usize)
            .map(Blog::preview)
            .collect();

        Ok(Page {
            items,
            page,
            limit,
            total,
            total_pages,
        })
    }

    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError> {
        self.enter("get_blog").await?;
        Ok(self.lock_state().blogs.iter().find(|b| b.slug == slug).cloned())
    }

    async fn get_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        self.enter("get_comments").await?;
        Ok(self
            .lock_state()
            .comments
            .get(slug)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_comment(
        &self,
        slug: &str,
        name: &str,
        comment: &str,
    ) -> Result<Comment, ApiError> {
        self.enter("create_comment").await?;

        let mut state = self.lock_state();
        state.blog_mut(slug)?;

        let created = Comment::new(
            uuid::Uuid::new_v4().to_string(),
            name.to_string(),
            comment.to_string(),
        );
        state
            .comments
            .entry(slug.to_string())
            .or_default()
            .insert(0, created.clone());
        Ok(created)
    }

    async fn vote(&self, slug: &str, vote: UserVote) -> Result<VoteTally, ApiError> {
        self.enter("vote").await?;

        let mut state = self.lock_state();
        let blog = state.blog_mut(slug)?;
        let mut tally = blog.voting.tally().without_user_vote();
        match vote {
            UserVote::Upvote => tally.upvotes += 1,
            UserVote::Downvote => tally.downvotes += 1,
        }
        tally.user_vote = Some(vote);

        blog.voting.upvotes = tally.upvotes;
        blog.voting.downvotes = tally.downvotes;
        blog.voting.user_vote = tally.user_vote;
        Ok(tally)
    }

    async fn remove_vote(&self, slug: &str) -> Result<VoteTally, ApiError> {
        self.enter("remove_vote").await?;

        let mut state = self.lock_state();
        let blog = state.blog_mut(slug)?;
        let tally = blog.voting.tally().without_user_vote();

        blog.voting.upvotes = tally.upvotes;
        blog.voting.downvotes = tally.downvotes;
        blog.voting.user_vote = None;
        Ok(tally)
    }

    async fn search(&self, query: &str) -> Result<Vec<BlogPreview>, ApiError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.enter("search").await?;
        Ok(self.matching(|b| matches_text(b, &query)))
    }

    async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.enter("tags").await?;

        let mut tags: BTreeMap<String, Tag> = BTreeMap::new();
        for name in self.lock_state().blogs.iter().flat_map(|b| b.tags.iter()) {
            let slug = slugify(name);
            tags.entry(slug.clone())
                .or_insert_with(|| Tag {
                    slug,
                    name: name.clone(),
                    count: 0,
                })
                .count += 1;
        }
        Ok(tags.into_values().collect())
    }

    async fn blogs_by_tag(&self, slug: &str) -> Result<Vec<BlogPreview>, ApiError> {
        self.enter("blogs_by_tag").await?;
        Ok(self.matching(|b| b.tags.iter().any(|t| slugify(t) == slug)))
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        self.enter("calendar_events").await?;
        Ok(self.lock_state().events.clone())
    }
}
