//! `BlogApi` implementations that need no network.

mod caching;
mod memory;

pub use caching::CachingBlogApi;
pub use memory::InMemoryBlogApi;
