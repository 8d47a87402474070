//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`, plus the
//! stateful services (voting, comments, search) built on top of them.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network, in-memory seeded API only
//! - `http` - REST client via reqwest

pub mod api;
pub mod cache;
mod env;
pub mod notify;
pub mod services;
pub mod storage;
pub mod transform;

#[cfg(feature = "http")]
pub mod http;

// Re-exports - In-Memory
pub use api::{CachingBlogApi, InMemoryBlogApi};
pub use cache::{CacheConfig, InMemoryCache};
pub use notify::{ToastCenter, ToastConfig};
pub use storage::{InMemoryStore, JsonFileStore, StorageConfig};

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig, RestBlogApi};
