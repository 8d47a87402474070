use serde::Serialize;

use crate::domain::{BlockKind, Blog};

/// Table-of-contents entry for one heading block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

pub fn table_of_contents(blog: &Blog) -> Vec<TocEntry> {
    blog.blocks
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::Heading { level, text } => Some(TocEntry {
                id: block.id.clone(),
                level: level.get(),
                text: text.clone(),
                anchor: format!("heading-{}", block.id),
            }),
            _ => None,
        })
        .collect()
}

/// Searchable text of a blog: title, description and the prose of its blocks.
pub fn plain_text(blog: &Blog) -> String {
    let mut parts = vec![blog.meta.title.as_str(), blog.meta.description.as_str()];

    for block in &blog.blocks {
        match &block.kind {
            BlockKind::Heading { text, .. } | BlockKind::Paragraph { text } => parts.push(text),
            BlockKind::Quote { text, .. } => parts.push(text),
            BlockKind::Callout { title, content, .. } => {
                if let Some(title) = title {
                    parts.push(title);
                }
                parts.push(content);
            }
            BlockKind::List { items, .. } => parts.extend(items.iter().map(String::as_str)),
            BlockKind::Code { .. }
            | BlockKind::Image { .. }
            | BlockKind::Divider
            | BlockKind::Unsupported { .. } => {}
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlogBlock, HeadingLevel, ListStyle};
    use crate::test_support;

    #[test]
    fn test_toc_lists_headings_in_order() {
        let blog = test_support::blog(
            "guide",
            "Guide",
            vec![
                BlogBlock::new(
                    "a",
                    BlockKind::Heading {
                        level: HeadingLevel::new(1).unwrap(),
                        text: "Start".into(),
                    },
                ),
                BlogBlock::new("p", BlockKind::Paragraph { text: "...".into() }),
                BlogBlock::new(
                    "b",
                    BlockKind::Heading {
                        level: HeadingLevel::new(3).unwrap(),
                        text: "Details".into(),
                    },
                ),
            ],
        );

        let toc = table_of_contents(&blog);
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].anchor, "heading-a");
        assert_eq!(toc[1].level, 3);
        assert_eq!(toc[1].text, "Details");
    }

    #[test]
    fn test_toc_empty_without_headings() {
        let blog = test_support::blog("plain", "Plain", Vec::new());
        assert!(table_of_contents(&blog).is_empty());
    }

    #[test]
    fn test_plain_text_skips_code() {
        let blog = test_support::blog(
            "mixed",
            "Mixed",
            vec![
                BlogBlock::new(
                    "c",
                    BlockKind::Code {
                        code: "let secret = 1;".into(),
                        language: None,
                        filename: None,
                    },
                ),
                BlogBlock::new(
                    "l",
                    BlockKind::List {
                        style: ListStyle::Unordered,
                        items: vec!["hooks".into(), "state".into()],
                    },
                ),
            ],
        );

        let text = plain_text(&blog);
        assert!(text.starts_with("Mixed A short description"));
        assert!(text.contains("hooks state"));
        assert!(!text.contains("secret"));
    }
}
