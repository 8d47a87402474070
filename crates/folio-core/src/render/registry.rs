use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::domain::{BlockKind, BlogBlock, CalloutVariant, ListStyle};

/// Render one block to an HTML fragment.
///
/// Returns `None` for block types this client does not understand; those are
/// logged and left out of the page instead of failing the whole render.
pub fn render_block(block: &BlogBlock) -> Option<String> {
    let html = match &block.kind {
        BlockKind::Heading { level, text: body } => {
            let level = level.get();
            format!(
                r#"<h{level} id="heading-{id}" class="heading heading-{level}">{body}</h{level}>"#,
                id = attr(&block.id),
                body = text(body),
            )
        }
        BlockKind::Paragraph { text: body } => {
            format!(r#"<p class="paragraph">{}</p>"#, text(body))
        }
        BlockKind::Code {
            code,
            language,
            filename,
        } => render_code(code, language.as_deref(), filename.as_deref()),
        BlockKind::Image { src, alt, caption } => {
            let caption = caption
                .as_deref()
                .map(|c| format!("<figcaption>{}</figcaption>", text(c)))
                .unwrap_or_default();
            format!(
                r#"<figure class="image"><img src="{}" alt="{}" loading="lazy">{caption}</figure>"#,
                attr(src),
                attr(alt),
            )
        }
        BlockKind::Callout {
            variant,
            title,
            content,
        } => {
            let style = match variant {
                CalloutVariant::Error => "destructive",
                CalloutVariant::Info | CalloutVariant::Warning | CalloutVariant::Success => {
                    "default"
                }
            };
            let title = title
                .as_deref()
                .map(|t| format!(r#"<h5 class="callout-title">{}</h5>"#, text(t)))
                .unwrap_or_default();
            format!(
                r#"<div role="alert" class="callout callout-{style}" data-variant="{}">{title}<div class="callout-content">{}</div></div>"#,
                variant.as_str(),
                text(content),
            )
        }
        BlockKind::List { style, items } => {
            let tag = match style {
                ListStyle::Ordered => "ol",
                ListStyle::Unordered => "ul",
            };
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", text(item)))
                .collect();
            format!(r#"<{tag} class="list">{items}</{tag}>"#)
        }
        BlockKind::Quote {
            text: body,
            author,
        } => {
            let footer = author
                .as_deref()
                .map(|a| format!("<footer>\u{2014} {}</footer>", text(a)))
                .unwrap_or_default();
            format!(
                r#"<blockquote class="quote"><p>{}</p>{footer}</blockquote>"#,
                text(body)
            )
        }
        BlockKind::Divider => r#"<hr class="divider">"#.to_string(),
        BlockKind::Unsupported { kind } => {
            tracing::warn!(block_id = %block.id, block_type = %kind, "Unknown block type");
            return None;
        }
    };

    Some(html)
}

fn render_code(code: &str, language: Option<&str>, filename: Option<&str>) -> String {
    let header = filename
        .or(language)
        .map(|label| format!(r#"<div class="code-header">{}</div>"#, text(label)))
        .unwrap_or_default();
    let class = language
        .map(|lang| format!(r#" class="language-{}""#, attr(lang)))
        .unwrap_or_default();

    format!(
        r#"<div class="code-block">{header}<pre><code{class}>{}</code></pre></div>"#,
        text(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeadingLevel;

    fn render(kind: BlockKind) -> String {
        render_block(&BlogBlock::new("b1", kind)).unwrap_or_default()
    }

    #[test]
    fn test_heading_carries_anchor() {
        let html = render(BlockKind::Heading {
            level: HeadingLevel::new(3).unwrap(),
            text: "Intro".into(),
        });
        assert_eq!(
            html,
            r#"<h3 id="heading-b1" class="heading heading-3">Intro</h3>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(BlockKind::Paragraph {
            text: "<script>alert(1)</script> & co".into(),
        });
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_code_header_prefers_filename() {
        let html = render(BlockKind::Code {
            code: "fn main() {}".into(),
            language: Some("rust".into()),
            filename: Some("main.rs".into()),
        });
        assert!(html.contains(r#"<div class="code-header">main.rs</div>"#));
        assert!(html.contains(r#"<code class="language-rust">"#));

        let html = render(BlockKind::Code {
            code: "ls".into(),
            language: Some("bash".into()),
            filename: None,
        });
        assert!(html.contains(r#"<div class="code-header">bash</div>"#));

        let html = render(BlockKind::Code {
            code: "plain".into(),
            language: None,
            filename: None,
        });
        assert!(!html.contains("code-header"));
        assert!(html.contains("<code>plain</code>"));
    }

    #[test]
    fn test_error_callout_is_destructive() {
        let html = render(BlockKind::Callout {
            variant: CalloutVariant::Error,
            title: Some("Careful".into()),
            content: "Broken".into(),
        });
        assert!(html.contains("callout-destructive"));

        let html = render(BlockKind::Callout {
            variant: CalloutVariant::Warning,
            title: None,
            content: "Heads up".into(),
        });
        assert!(html.contains("callout-default"));
        assert!(!html.contains("callout-title"));
    }

    #[test]
    fn test_list_and_quote() {
        let html = render(BlockKind::List {
            style: ListStyle::Ordered,
            items: vec!["one".into(), "two".into()],
        });
        assert_eq!(html, r#"<ol class="list"><li>one</li><li>two</li></ol>"#);

        let html = render(BlockKind::Quote {
            text: "Stay hungry".into(),
            author: Some("Steve".into()),
        });
        assert!(html.contains("<footer>\u{2014} Steve</footer>"));
    }

    #[test]
    fn test_unsupported_block_is_omitted() {
        let block = BlogBlock::new(
            "b2",
            BlockKind::Unsupported {
                kind: "video".into(),
            },
        );
        assert!(render_block(&block).is_none());
    }
}
