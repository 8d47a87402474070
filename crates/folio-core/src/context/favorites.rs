use std::sync::{Arc, RwLock};

use crate::ports::{KeyValueStore, load_json, save_json};

pub const FAVORITES_STORAGE_KEY: &str = "blog_favorites";

/// Favorite blog ids, persisted on every change.
pub struct FavoritesContext {
    store: Arc<dyn KeyValueStore>,
    favorites: RwLock<Vec<String>>,
}

impl FavoritesContext {
    /// Load favorites from storage; unreadable data starts an empty list.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let favorites: Vec<String> =
            load_json(store.as_ref(), FAVORITES_STORAGE_KEY).unwrap_or_default();
        tracing::debug!(count = favorites.len(), "Loaded favorites");

        Self {
            store,
            favorites: RwLock::new(favorites),
        }
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> Vec<String> {
        self.favorites
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_favorite(&self, blog_id: &str) -> bool {
        self.favorites
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|id| id == blog_id)
    }

    pub fn add(&self, blog_id: &str) {
        self.update(|favorites| {
            if !favorites.iter().any(|id| id == blog_id) {
                favorites.push(blog_id.to_string());
            }
        });
    }

    pub fn remove(&self, blog_id: &str) {
        self.update(|favorites| favorites.retain(|id| id != blog_id));
    }

    /// Flip membership, returning whether the blog is now a favorite.
    pub fn toggle(&self, blog_id: &str) -> bool {
        let mut now_favorite = false;
        self.update(|favorites| {
            if let Some(pos) = favorites.iter().position(|id| id == blog_id) {
                favorites.remove(pos);
            } else {
                favorites.push(blog_id.to_string());
                now_favorite = true;
            }
        });
        now_favorite
    }

    fn update(&self, mutate: impl FnOnce(&mut Vec<String>)) {
        let snapshot = {
            let mut favorites = self.favorites.write().unwrap_or_else(|e| e.into_inner());
            mutate(&mut favorites);
            favorites.clone()
        };

        if let Err(e) = save_json(self.store.as_ref(), FAVORITES_STORAGE_KEY, &snapshot) {
            tracing::warn!(error = %e, "Failed to persist favorites");
        }
    }
}
