//! Cache implementations.

mod memory;

pub use memory::{CacheConfig, InMemoryCache};
