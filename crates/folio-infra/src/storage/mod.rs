//! Key/value stores backing the persisted contexts.

mod file;
mod memory;

pub use file::{JsonFileStore, StorageConfig};
pub use memory::InMemoryStore;
