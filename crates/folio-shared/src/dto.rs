//! Data Transfer Objects - request/response types for the blog API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Blog metadata as sent by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBlogMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    pub published_at: String,
    #[serde(default)]
    pub read_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBlogLayout {
    #[serde(rename = "type")]
    pub layout_type: String,
    pub max_width: String,
    pub show_table_of_contents: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBlogSettings {
    #[serde(default)]
    pub enable_voting: bool,
    #[serde(default)]
    pub enable_social_share: bool,
    #[serde(default)]
    pub enable_comments: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBlogLink {
    pub label: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

/// A content block; the payload shape depends on `block_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVoting {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub user_vote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSocialShare {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Full blog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBlog {
    #[serde(default)]
    pub slug: String,
    pub meta: ApiBlogMeta,
    pub layout: ApiBlogLayout,
    pub settings: ApiBlogSettings,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<ApiBlogLink>,
    pub blocks: Vec<ApiBlock>,
    pub voting: ApiVoting,
    pub social_share: ApiSocialShare,
}

/// `GET /blogs/{slug}` answers either `{ "blog": {...} }` or the blog itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiBlogPayload {
    Nested { blog: ApiBlog },
    Direct(ApiBlog),
}

impl ApiBlogPayload {
    pub fn into_blog(self) -> ApiBlog {
        match self {
            ApiBlogPayload::Nested { blog } => blog,
            ApiBlogPayload::Direct(blog) => blog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBlogPreview {
    pub slug: String,
    pub meta: ApiBlogMeta,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPaginatedBlogs {
    pub blogs: Vec<ApiBlogPreview>,
    pub pagination: crate::Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiComment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCommentsResponse {
    pub comments: Vec<ApiComment>,
}

/// `POST /blogs/{slug}/comments` answers either `{ "comment": {...} }` or the comment itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiCommentPayload {
    Nested { comment: ApiComment },
    Direct(ApiComment),
}

impl ApiCommentPayload {
    pub fn into_comment(self) -> ApiComment {
        match self {
            ApiCommentPayload::Nested { comment } => comment,
            ApiCommentPayload::Direct(comment) => comment,
        }
    }
}

/// Request to post a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub name: String,
    pub comment: String,
}

/// Request to cast a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVoteResponse {
    pub upvotes: u32,
    pub downvotes: u32,
    #[serde(default)]
    pub user_vote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSearchResult {
    pub blogs: Vec<ApiBlogPreview>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTag {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTagsResponse {
    pub tags: Vec<ApiTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTagBlogsResponse {
    pub blogs: Vec<ApiBlogPreview>,
    pub tag: ApiTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO date or date-time string.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCalendarEventsResponse {
    pub events: Vec<ApiCalendarEvent>,
}
