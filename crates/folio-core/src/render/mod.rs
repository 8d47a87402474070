//! Block rendering - turns a blog's block list into HTML.

mod copy;
mod registry;
mod renderer;
mod toc;

pub use copy::CopyFeedback;
pub use registry::render_block;
pub use renderer::{RenderedBlock, RenderedBlog, render_blocks, render_blog};
pub use toc::{TocEntry, plain_text, table_of_contents};
