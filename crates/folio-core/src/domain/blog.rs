use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::BlogBlock;
use super::voting::BlogVoting;

/// Blog entity - a fully loaded post, identified by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub slug: String,
    pub meta: BlogMeta,
    pub layout: BlogLayout,
    pub settings: BlogSettings,
    pub tags: Vec<String>,
    pub links: Vec<BlogLink>,
    pub blocks: Vec<BlogBlock>,
    pub voting: BlogVoting,
    pub social_share: BlogSocialShare,
}

impl Blog {
    /// Catalogue entry for this blog.
    pub fn preview(&self) -> BlogPreview {
        BlogPreview {
            id: self.slug.clone(),
            meta: self.meta.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMeta {
    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    /// Minutes.
    pub read_time: u32,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    #[default]
    SingleColumn,
    TwoColumn,
}

impl LayoutType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single-column" => Some(Self::SingleColumn),
            "two-column" => Some(Self::TwoColumn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogLayout {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub max_width: String,
    pub show_table_of_contents: bool,
}

impl Default for BlogLayout {
    fn default() -> Self {
        Self {
            layout_type: LayoutType::SingleColumn,
            max_width: "100%".to_string(),
            show_table_of_contents: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSettings {
    pub enable_voting: bool,
    pub enable_social_share: bool,
    pub enable_comments: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogLink {
    pub label: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Linkedin,
    Reddit,
    Copy,
}

impl SocialPlatform {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "twitter" => Some(Self::Twitter),
            "facebook" => Some(Self::Facebook),
            "linkedin" => Some(Self::Linkedin),
            "reddit" => Some(Self::Reddit),
            "copy" => Some(Self::Copy),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Linkedin => "LinkedIn",
            Self::Reddit => "Reddit",
            Self::Copy => "Copy Link",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSocialShare {
    pub enabled: bool,
    pub platforms: Vec<SocialPlatform>,
}

/// Catalogue entry shown on the home feed, in search and tag listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPreview {
    /// The blog's slug.
    pub id: String,
    pub meta: BlogMeta,
    pub tags: Vec<String>,
}

/// Derive a URL slug from a title: lowercase ASCII alphanumerics joined by
/// single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
