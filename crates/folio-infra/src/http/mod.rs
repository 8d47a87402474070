//! REST client for the blog API.

mod api;
mod client;

pub use api::RestBlogApi;
pub use client::{HttpClient, HttpConfig};
