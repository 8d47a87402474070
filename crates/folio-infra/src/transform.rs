//! API transformers - wire DTOs into domain types.
//!
//! Missing optional fields get the same defaults the server documents;
//! unknown block types become [`BlockKind::Unsupported`].

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{Map, Value};

use folio_core::ApiError;
use folio_core::domain::{
    BlockKind, Blog, BlogBlock, BlogLayout, BlogLink, BlogMeta, BlogPreview, BlogSettings,
    BlogSocialShare, BlogVoting, CalendarEvent, CalloutVariant, Comment, HeadingLevel, LayoutType,
    LinkType, ListStyle, SocialPlatform, Tag, UserVote, VoteTally, slugify,
};
use folio_shared::dto::{
    ApiBlock, ApiBlog, ApiBlogMeta, ApiBlogPreview, ApiCalendarEvent, ApiComment, ApiTag,
    ApiVoteResponse,
};

pub fn blog(api: ApiBlog, requested_slug: &str) -> Result<Blog, ApiError> {
    let meta = meta(api.meta)?;
    let slug = if !api.slug.is_empty() {
        api.slug
    } else if !requested_slug.is_empty() {
        requested_slug.to_string()
    } else {
        slugify(&meta.title)
    };
    let blocks = unique_blocks(&slug, api.blocks);

    Ok(Blog {
        slug,
        meta,
        layout: BlogLayout {
            layout_type: LayoutType::parse(&api.layout.layout_type).unwrap_or_default(),
            max_width: api.layout.max_width,
            show_table_of_contents: api.layout.show_table_of_contents,
        },
        settings: BlogSettings {
            enable_voting: api.settings.enable_voting,
            enable_social_share: api.settings.enable_social_share,
            enable_comments: api.settings.enable_comments,
        },
        tags: api.tags,
        links: api
            .links
            .into_iter()
            .map(|link| BlogLink {
                link_type: if link.link_type == "internal" {
                    LinkType::Internal
                } else {
                    LinkType::External
                },
                label: link.label,
                url: link.url,
            })
            .collect(),
        blocks,
        voting: BlogVoting {
            enabled: api.voting.enabled,
            upvotes: api.voting.upvotes,
            downvotes: api.voting.downvotes,
            user_vote: api.voting.user_vote.as_deref().and_then(UserVote::parse),
        },
        social_share: BlogSocialShare {
            enabled: api.social_share.enabled,
            platforms: api
                .social_share
                .platforms
                .iter()
                .filter_map(|p| SocialPlatform::parse(p))
                .collect(),
        },
    })
}

/// Block ids must be unique within a blog; later repeats are dropped.
fn unique_blocks(slug: &str, blocks: Vec<ApiBlock>) -> Vec<BlogBlock> {
    let mut seen = HashSet::new();
    blocks
        .into_iter()
        .filter(|b| {
            let fresh = seen.insert(b.id.clone());
            if !fresh {
                tracing::warn!(slug = %slug, block_id = %b.id, "Dropping block with duplicate id");
            }
            fresh
        })
        .map(block)
        .collect()
}

pub fn block(api: ApiBlock) -> BlogBlock {
    let content = &api.content;

    let kind = match api.block_type.as_str() {
        "heading" => BlockKind::Heading {
            level: content
                .get("level")
                .and_then(Value::as_u64)
                .and_then(|l| u8::try_from(l).ok())
                .and_then(HeadingLevel::new)
                .unwrap_or_default(),
            text: text(content, "text"),
        },
        "paragraph" => BlockKind::Paragraph {
            text: text(content, "text"),
        },
        "code" => BlockKind::Code {
            code: text(content, "code"),
            language: opt_text(content, "language"),
            filename: opt_text(content, "filename"),
        },
        "image" => BlockKind::Image {
            src: text(content, "src"),
            alt: text(content, "alt"),
            caption: opt_text(content, "caption"),
        },
        "callout" => BlockKind::Callout {
            variant: opt_text(content, "variant")
                .and_then(|v| CalloutVariant::parse(&v))
                .unwrap_or_default(),
            title: opt_text(content, "title"),
            content: text(content, "content"),
        },
        "list" => BlockKind::List {
            style: opt_text(content, "style")
                .and_then(|s| ListStyle::parse(&s))
                .unwrap_or_default(),
            items: content
                .get("items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
        },
        "quote" => BlockKind::Quote {
            text: text(content, "text"),
            author: opt_text(content, "author"),
        },
        "divider" => BlockKind::Divider,
        other => BlockKind::Unsupported {
            kind: other.to_string(),
        },
    };

    BlogBlock::new(api.id, kind)
}

fn text(content: &Map<String, Value>, key: &str) -> String {
    opt_text(content, key).unwrap_or_default()
}

/// String field; empty strings count as absent.
fn opt_text(content: &Map<String, Value>, key: &str) -> Option<String> {
    content
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn meta(api: ApiBlogMeta) -> Result<BlogMeta, ApiError> {
    Ok(BlogMeta {
        published_at: parse_timestamp(&api.published_at).ok_or_else(|| {
            ApiError::MalformedResponse(format!("invalid publishedAt: {}", api.published_at))
        })?,
        title: api.title,
        description: api.description,
        author: api.author,
        read_time: api.read_time,
        cover_image: api.cover_image,
    })
}

pub fn preview(api: ApiBlogPreview) -> Result<BlogPreview, ApiError> {
    Ok(BlogPreview {
        id: api.slug,
        meta: meta(api.meta)?,
        tags: api.tags,
    })
}

/// Convert a listing, dropping entries that cannot be read.
pub fn previews(api: Vec<ApiBlogPreview>) -> Vec<BlogPreview> {
    api.into_iter()
        .filter_map(|p| {
            let slug = p.slug.clone();
            preview(p)
                .inspect_err(|e| tracing::warn!(slug = %slug, error = %e, "Skipping blog preview"))
                .ok()
        })
        .collect()
}

pub fn comment(api: ApiComment, now: DateTime<Utc>) -> Comment {
    Comment {
        id: api.id.unwrap_or_default(),
        name: api
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Anonymous".to_string()),
        comment: api.comment.unwrap_or_default(),
        created_at: api
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now),
    }
}

pub fn vote_tally(api: ApiVoteResponse) -> VoteTally {
    VoteTally::new(
        api.upvotes,
        api.downvotes,
        api.user_vote.as_deref().and_then(UserVote::parse),
    )
}

pub fn tag(api: ApiTag) -> Tag {
    Tag {
        slug: api.slug,
        name: api.name,
        count: api.count,
    }
}

pub fn calendar_event(api: ApiCalendarEvent) -> Result<CalendarEvent, ApiError> {
    let date = parse_date(&api.date)
        .ok_or_else(|| ApiError::MalformedResponse(format!("invalid event date: {}", api.date)))?;

    Ok(CalendarEvent {
        id: api.id,
        title: api.title,
        description: api.description,
        date,
        start_time: api.start_time.as_deref().and_then(parse_time),
        end_time: api.end_time.as_deref().and_then(parse_time),
        color: api.color,
        blog_id: api.blog_id,
    })
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_block(block_type: &str, content: Value) -> ApiBlock {
        serde_json::from_value(json!({ "id": "b1", "type": block_type, "content": content }))
            .unwrap()
    }

    #[test]
    fn test_block_defaults() {
        let heading = block(api_block("heading", json!({ "text": "Hi" })));
        assert_eq!(
            heading.kind,
            BlockKind::Heading {
                level: HeadingLevel::DEFAULT,
                text: "Hi".into()
            }
        );

        let callout = block(api_block("callout", json!({ "variant": "bogus", "content": "c" })));
        assert!(matches!(
            callout.kind,
            BlockKind::Callout {
                variant: CalloutVariant::Info,
                title: None,
                ..
            }
        ));

        let code = block(api_block("code", json!({ "code": "x", "language": "" })));
        assert!(matches!(code.kind, BlockKind::Code { language: None, .. }));
    }

    #[test]
    fn test_unknown_block_type_is_kept_as_unsupported() {
        let unknown = block(api_block("video", json!({ "src": "a.mp4" })));
        assert_eq!(unknown.id, "b1");
        assert_eq!(
            unknown.kind,
            BlockKind::Unsupported {
                kind: "video".into()
            }
        );
    }

    #[test]
    fn test_duplicate_block_ids_keep_the_first() {
        let doc: ApiBlog = serde_json::from_value(json!({
            "slug": "dupes",
            "meta": { "title": "Dupes", "publishedAt": "2024-01-01" },
            "layout": { "type": "single-column", "maxWidth": "800px", "showTableOfContents": false },
            "settings": {},
            "blocks": [
                { "id": "a", "type": "paragraph", "content": { "text": "first" } },
                { "id": "b", "type": "divider" },
                { "id": "a", "type": "paragraph", "content": { "text": "again" } }
            ],
            "voting": {},
            "socialShare": {}
        }))
        .unwrap();

        let blog = blog(doc, "dupes").unwrap();
        let ids: Vec<&str> = blog.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(
            blog.blocks[0].kind,
            BlockKind::Paragraph {
                text: "first".into()
            }
        );
    }

    #[test]
    fn test_comment_fallbacks() {
        let now = Utc::now();
        let comment = comment(serde_json::from_value(json!({})).unwrap(), now);
        assert_eq!(comment.id, "");
        assert_eq!(comment.name, "Anonymous");
        assert_eq!(comment.comment, "");
        assert_eq!(comment.created_at, now);
    }

    #[test]
    fn test_calendar_event_dates_and_times() {
        let event = calendar_event(ApiCalendarEvent {
            id: "e1".into(),
            title: "Launch".into(),
            description: None,
            date: "2024-03-10T00:00:00.000Z".into(),
            start_time: Some("09:30".into()),
            end_time: Some("bad".into()),
            color: None,
            blog_id: Some("launch-post".into()),
        })
        .unwrap();

        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(event.start_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(event.end_time, None);
    }

    #[test]
    fn test_unreadable_preview_is_skipped() {
        let previews = previews(vec![
            serde_json::from_value(json!({
                "slug": "ok",
                "meta": { "title": "Ok", "publishedAt": "2024-01-01" }
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "slug": "broken",
                "meta": { "title": "Broken", "publishedAt": "yesterday" }
            }))
            .unwrap(),
        ]);
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].id, "ok");
    }
}
