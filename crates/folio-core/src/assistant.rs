//! "Ask AI" - a keyword matcher over the loaded blogs. No model is involved.

use std::collections::BTreeSet;

use crate::domain::{BlockKind, Blog, BlogPreview};
use crate::render::plain_text;

const MAX_CITED: usize = 3;
const MAX_TOPICS: usize = 8;
const KEY_POINT_CHARS: usize = 200;

/// An answer plus the slugs of the blogs it cites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub cited: Vec<String>,
}

/// Answer a question from the catalogue (`previews`) and the fully loaded
/// blogs (`blogs`).
pub fn answer(question: &str, previews: &[BlogPreview], blogs: &[Blog]) -> Answer {
    let question = question.trim().to_lowercase();

    if asks_for_latest(&question) {
        return latest_posts(previews);
    }

    let relevant = relevant_blogs(&question, blogs);
    if relevant.is_empty() {
        return topics_overview(blogs);
    }

    let mut text = format!(
        "After searching through your blog content, I found {} relevant {}:\n\n",
        relevant.len(),
        if relevant.len() == 1 { "post" } else { "posts" }
    );
    for (index, blog) in relevant.iter().take(MAX_CITED).enumerate() {
        text.push_str(&format!(
            "**{}. {}**\n{}\n\n",
            index + 1,
            blog.meta.title,
            blog.meta.description
        ));

        let points: Vec<&str> = blog
            .blocks
            .iter()
            .filter_map(|b| match &b.kind {
                BlockKind::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .take(2)
            .collect();
        if !points.is_empty() {
            text.push_str("Key points from this post:\n");
            for point in points {
                text.push_str(&format!("- {}\n", truncate(point, KEY_POINT_CHARS)));
            }
            text.push('\n');
        }
    }

    Answer {
        text: text.trim_end().to_string(),
        cited: relevant
            .iter()
            .take(MAX_CITED)
            .map(|b| b.slug.clone())
            .collect(),
    }
}

fn asks_for_latest(question: &str) -> bool {
    ["latest", "recent", "new"].iter().any(|w| question.contains(w))
        && ["blog", "post", "article"].iter().any(|w| question.contains(w))
}

fn latest_posts(previews: &[BlogPreview]) -> Answer {
    if previews.is_empty() {
        return Answer {
            text: "I've searched through your blog content, but I couldn't find any blog posts at the moment. Please check back later!".to_string(),
            cited: Vec::new(),
        };
    }

    let mut latest: Vec<&BlogPreview> = previews.iter().collect();
    latest.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));
    latest.truncate(MAX_CITED);

    let mut text =
        String::from("After reviewing your blog content, here are the latest blog posts:\n\n");
    for (index, preview) in latest.iter().enumerate() {
        text.push_str(&format!(
            "{}. **{}**\n   Published: {} | {} min read\n   {}\n\n",
            index + 1,
            preview.meta.title,
            preview.meta.published_at.format("%B %-d, %Y"),
            preview.meta.read_time,
            preview.meta.description
        ));
    }

    Answer {
        text: text.trim_end().to_string(),
        cited: latest.iter().map(|p| p.id.clone()).collect(),
    }
}

fn relevant_blogs<'a>(question: &str, blogs: &'a [Blog]) -> Vec<&'a Blog> {
    let keywords: Vec<&str> = question
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.chars().count() > 3)
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    blogs
        .iter()
        .filter(|blog| {
            let haystack = format!("{} {}", plain_text(blog), blog.tags.join(" ")).to_lowercase();
            keywords.iter().any(|keyword| haystack.contains(keyword))
        })
        .collect()
}

fn topics_overview(blogs: &[Blog]) -> Answer {
    let mut seen = BTreeSet::new();
    let topics: Vec<&str> = blogs
        .iter()
        .flat_map(|b| b.tags.iter().map(String::as_str))
        .filter(|tag| seen.insert(*tag))
        .take(MAX_TOPICS)
        .collect();

    let mut text = format!(
        "I've reviewed your blog content. You have {} blog posts covering various topics.\n\nYour blog covers:\n",
        blogs.len()
    );
    for topic in topics {
        text.push_str(&format!("- {topic}\n"));
    }
    text.push_str("\nCould you ask a more specific question? I'll search through the relevant blog posts and provide detailed information!");

    Answer {
        text,
        cited: Vec::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlogBlock;
    use crate::test_support::{blog, preview};

    #[test]
    fn test_latest_lists_three_newest() {
        let previews = vec![
            preview("old", "Old", "", &[], 1),
            preview("newest", "Newest", "", &[], 20),
            preview("mid", "Mid", "", &[], 10),
            preview("recent", "Recent", "", &[], 15),
        ];

        let answer = answer("What are the latest blog posts?", &previews, &[]);
        assert_eq!(answer.cited, vec!["newest", "recent", "mid"]);
        assert!(answer.text.contains("Published: January 20, 2024"));
    }

    #[test]
    fn test_latest_without_posts() {
        let answer = answer("any new articles?", &[], &[]);
        assert!(answer.cited.is_empty());
        assert!(answer.text.contains("couldn't find any blog posts"));
    }

    #[test]
    fn test_keywords_match_block_text() {
        let blogs = vec![
            blog(
                "tailwind",
                "Styling Guide",
                vec![BlogBlock::new(
                    "p",
                    BlockKind::Paragraph {
                        text: "Animations with transition utilities".into(),
                    },
                )],
            ),
            blog("other", "Unrelated", Vec::new()),
        ];

        let answer = answer("How do I add animations?", &[], &blogs);
        assert_eq!(answer.cited, vec!["tailwind"]);
        assert!(answer.text.contains("found 1 relevant post:"));
        assert!(answer.text.contains("- Animations with transition utilities"));
    }

    #[test]
    fn test_fallback_lists_topics() {
        let blogs = vec![blog("a", "A", Vec::new()), blog("b", "B", Vec::new())];
        let answer = answer("why?", &[], &blogs);
        assert!(answer.cited.is_empty());
        assert!(answer.text.contains("You have 2 blog posts"));
        assert_eq!(answer.text.matches("- rust").count(), 1);
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("héllo", 2), "hé...");
        assert_eq!(truncate("hi", 5), "hi");
    }
}
