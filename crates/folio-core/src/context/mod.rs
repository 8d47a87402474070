//! Process-wide UI contexts, created once at startup over a storage port.

mod comments;
mod favorites;
mod search;
mod theme;

pub use comments::{LocalComments, local_comments_key};
pub use favorites::{FAVORITES_STORAGE_KEY, FavoritesContext};
pub use search::{SearchContext, SearchKey};
pub use theme::{
    COLOR_MODE_KEY, ColorMode, ResolvedColorMode, THEME_NAME_KEY, ThemeContext, ThemeName,
};

#[cfg(test)]
pub(crate) mod test_store {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::ports::{KeyValueStore, StorageError};

    #[derive(Default)]
    pub struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl MapStore {
        pub fn put(&self, key: &str, value: &str) {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.put(key, value);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }
}
