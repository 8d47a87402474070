use std::sync::RwLock;

use crate::domain::BlogPreview;

/// A key press inside the search overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Default)]
struct SearchState {
    open: bool,
    query: String,
    active: Option<usize>,
}

/// Search overlay state. Not persisted.
#[derive(Default)]
pub struct SearchContext {
    state: RwLock<SearchState>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.read().open
    }

    pub fn query(&self) -> String {
        self.read().query.clone()
    }

    /// Index of the highlighted result, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.read().active
    }

    pub fn open(&self) {
        self.write().open = true;
    }

    /// Close the overlay, dropping the query and highlight.
    pub fn close(&self) {
        let mut state = self.write();
        state.open = false;
        state.query.clear();
        state.active = None;
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let mut state = self.write();
        state.query = query.into();
        state.active = None;
    }

    /// Results changed; the highlight no longer points at anything meaningful.
    pub fn reset_active(&self) {
        self.write().active = None;
    }

    /// Handle a key against the current results. `Enter` on a highlighted
    /// result closes the overlay and returns the route to navigate to.
    pub fn handle_key(&self, key: SearchKey, results: &[BlogPreview]) -> Option<String> {
        if key == SearchKey::Escape {
            self.close();
            return None;
        }
        if results.is_empty() {
            return None;
        }

        let last = results.len() - 1;
        let mut state = self.write();
        match key {
            SearchKey::ArrowDown => {
                state.active = Some(match state.active {
                    Some(i) if i < last => i + 1,
                    _ => 0,
                });
                None
            }
            SearchKey::ArrowUp => {
                state.active = Some(match state.active {
                    Some(i) if i > 0 => i - 1,
                    _ => last,
                });
                None
            }
            SearchKey::Enter => {
                let blog = results.get(state.active?)?;
                let route = format!("/blog/{}", blog.id);
                state.open = false;
                state.query.clear();
                state.active = None;
                Some(route)
            }
            SearchKey::Escape => None,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SearchState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SearchState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
