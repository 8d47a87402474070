use serde::{Deserialize, Serialize};

/// Tag with the number of blogs carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub slug: String,
    pub name: String,
    pub count: u32,
}
