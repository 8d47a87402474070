//! Fixtures shared by unit tests.

use chrono::{TimeZone, Utc};

use crate::domain::{
    Blog, BlogBlock, BlogLayout, BlogMeta, BlogPreview, BlogSettings, BlogSocialShare, BlogVoting,
};

pub fn meta(title: &str, description: &str, day: u32) -> BlogMeta {
    BlogMeta {
        title: title.to_string(),
        description: description.to_string(),
        author: "Jane Doe".to_string(),
        published_at: Utc
            .with_ymd_and_hms(2024, 1, day, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        read_time: 5,
        cover_image: None,
    }
}

pub fn blog(slug: &str, title: &str, blocks: Vec<BlogBlock>) -> Blog {
    Blog {
        slug: slug.to_string(),
        meta: meta(title, "A short description", 1),
        layout: BlogLayout::default(),
        settings: BlogSettings {
            enable_voting: true,
            enable_social_share: true,
            enable_comments: true,
        },
        tags: vec!["rust".to_string()],
        links: Vec::new(),
        blocks,
        voting: BlogVoting {
            enabled: true,
            upvotes: 5,
            downvotes: 1,
            user_vote: None,
        },
        social_share: BlogSocialShare::default(),
    }
}

pub fn preview(id: &str, title: &str, description: &str, tags: &[&str], day: u32) -> BlogPreview {
    BlogPreview {
        id: id.to_string(),
        meta: meta(title, description, day),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
