use std::sync::Arc;

use crate::domain::Comment;
use crate::ports::{KeyValueStore, StorageError, load_json, save_json};

pub fn local_comments_key(blog_id: &str) -> String {
    format!("blog-comments-{blog_id}")
}

/// Per-blog comment list kept in local storage, newest first.
pub struct LocalComments {
    store: Arc<dyn KeyValueStore>,
}

impl LocalComments {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, blog_id: &str) -> Vec<Comment> {
        load_json(self.store.as_ref(), &local_comments_key(blog_id)).unwrap_or_default()
    }

    /// Persist the list. An empty list leaves storage untouched.
    pub fn save(&self, blog_id: &str, comments: &[Comment]) -> Result<(), StorageError> {
        if comments.is_empty() {
            return Ok(());
        }
        save_json(self.store.as_ref(), &local_comments_key(blog_id), comments)
    }

    /// Prepend a comment and persist, returning the new list.
    pub fn prepend(&self, blog_id: &str, comment: Comment) -> Result<Vec<Comment>, StorageError> {
        let mut comments = self.load(blog_id);
        comments.insert(0, comment);
        self.save(blog_id, &comments)?;
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_store::MapStore;

    #[test]
    fn test_prepend_keeps_newest_first() {
        let store = Arc::new(MapStore::default());
        let local = LocalComments::new(store.clone());

        local
            .prepend("post", Comment::new("c1", "Ann".into(), "First".into()))
            .unwrap();
        let comments = local
            .prepend("post", Comment::new("c2", "Bob".into(), "Second".into()))
            .unwrap();

        assert_eq!(comments[0].id, "c2");
        assert_eq!(local.load("post").len(), 2);
        assert!(store.raw("blog-comments-post").is_some());
    }

    #[test]
    fn test_empty_list_is_not_written() {
        let store = Arc::new(MapStore::default());
        let local = LocalComments::new(store.clone());
        local.save("post", &[]).unwrap();
        assert!(store.raw("blog-comments-post").is_none());
    }
}
