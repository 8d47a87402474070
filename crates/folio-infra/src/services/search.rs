//! Live search - the query input is debounced before results are filtered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use folio_core::domain::BlogPreview;
use folio_core::search::{empty_state_message, filter_previews};

use crate::env;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self {
            debounce: env::millis_or("FOLIO_SEARCH_DEBOUNCE_MS", 200),
        }
    }
}

/// Lets only the last of a burst of calls through.
#[derive(Debug, Default)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// Wait out the delay; `true` if no newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.latest.load(Ordering::SeqCst) == generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub items: Vec<BlogPreview>,
    /// Shown instead of the list when `items` is empty.
    pub message: Option<String>,
}

/// Debounced client-side search over the loaded previews.
pub struct LiveSearch {
    previews: Vec<BlogPreview>,
    debouncer: Debouncer,
}

impl LiveSearch {
    pub fn new(previews: Vec<BlogPreview>, config: SearchConfig) -> Self {
        Self {
            previews,
            debouncer: Debouncer::new(config.debounce),
        }
    }

    /// Results for `query`, or `None` when a newer query superseded it.
    pub async fn query(&self, query: &str) -> Option<SearchResults> {
        if !self.debouncer.settle().await {
            return None;
        }
        Some(self.results(query))
    }

    /// Results without waiting.
    pub fn results(&self, query: &str) -> SearchResults {
        let items = filter_previews(&self.previews, query);
        let message = items.is_empty().then(|| empty_state_message(query));
        SearchResults { items, message }
    }
}
