//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod api;
mod cache;
mod notify;
mod storage;

pub use api::{BlogApi, ListBlogsParams, Page, SortOrder};
pub use cache::{Cache, CacheError, CacheStats};
pub use notify::Notifier;
pub use storage::{KeyValueStore, StorageError, load_json, save_json};
