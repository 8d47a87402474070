use html_escape::encode_double_quoted_attribute as attr;
use serde::Serialize;

use super::registry::render_block;
use crate::domain::{Blog, BlogBlock};

/// A rendered block, keyed by the block's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub key: String,
    pub html: String,
}

/// Rendered body of a blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlog {
    pub max_width: String,
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedBlog {
    /// Full article markup.
    pub fn to_html(&self) -> String {
        let body: String = self.blocks.iter().map(|b| b.html.as_str()).collect();
        format!(
            r#"<div class="blog-container" style="max-width: {}"><article class="blog-content">{body}</article></div>"#,
            attr(&self.max_width)
        )
    }
}

/// Render blocks in input order. Unknown blocks are skipped.
pub fn render_blocks(blocks: &[BlogBlock]) -> Vec<RenderedBlock> {
    blocks
        .iter()
        .filter_map(|block| {
            render_block(block).map(|html| RenderedBlock {
                key: block.id.clone(),
                html,
            })
        })
        .collect()
}

pub fn render_blog(blog: &Blog) -> RenderedBlog {
    tracing::debug!(slug = %blog.slug, blocks = blog.blocks.len(), "Rendering blog");

    RenderedBlog {
        max_width: blog.layout.max_width.clone(),
        blocks: render_blocks(&blog.blocks),
    }
}
