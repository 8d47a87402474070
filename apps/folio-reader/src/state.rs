//! Application state - shared across all pages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_core::context::{FavoritesContext, LocalComments, SearchContext, ThemeContext};
use folio_core::domain::{Blog, Comment};
use folio_core::ports::{BlogApi, KeyValueStore, Notifier};
use folio_infra::services::{Catalog, CommentThread, VotingController};
use folio_infra::{CachingBlogApi, InMemoryBlogApi, InMemoryCache, JsonFileStore, ToastCenter};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<CachingBlogApi>,
    pub catalog: Catalog,
    pub store: Arc<dyn KeyValueStore>,
    pub favorites: Arc<FavoritesContext>,
    pub theme: Arc<ThemeContext>,
    pub search: Arc<SearchContext>,
    pub toasts: ToastCenter,
    /// One voting controller per blog, so debounce and cooldowns span actions.
    votes: Arc<Mutex<HashMap<String, Arc<VotingController>>>>,
}

impl AppState {
    /// Build the state with the configured backend and persistent storage.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(config.storage.clone())?);
        let backend = backend(&config);
        Ok(Self::assemble(config, backend, store))
    }

    /// Wire contexts and services around an API and a store.
    pub fn assemble(
        config: AppConfig,
        backend: Arc<dyn BlogApi>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let api = Arc::new(CachingBlogApi::new(
            backend,
            Arc::new(InMemoryCache::<Blog>::new(config.cache.clone())),
            Arc::new(InMemoryCache::<Vec<Comment>>::new(config.cache.clone())),
        ));

        let state = Self {
            catalog: Catalog::new(api.clone()),
            favorites: Arc::new(FavoritesContext::load(store.clone())),
            theme: Arc::new(ThemeContext::load(store.clone(), config.system_dark)),
            search: Arc::new(SearchContext::new()),
            toasts: ToastCenter::new(config.toast.clone()),
            votes: Arc::new(Mutex::new(HashMap::new())),
            api,
            store,
            config,
        };

        tracing::info!("Application state initialized");
        state
    }

    /// The blog's voting controller, fed the tally of the loaded document.
    pub fn voting(&self, blog: &Blog) -> Arc<VotingController> {
        let mut votes = self.votes.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(controller) = votes.get(&blog.slug) {
            controller.sync_from_props(blog.voting.tally());
            return controller.clone();
        }

        let controller = Arc::new(VotingController::new(
            blog.slug.clone(),
            Some(blog.voting.tally()),
            self.api.clone(),
            Arc::new(self.toasts.clone()) as Arc<dyn Notifier>,
            self.config.voting.clone(),
        ));
        votes.insert(blog.slug.clone(), controller.clone());
        controller
    }

    pub fn comments(&self, blog: &Blog) -> CommentThread {
        CommentThread::new(
            blog.slug.clone(),
            blog.settings.enable_comments,
            self.api.clone(),
            LocalComments::new(self.store.clone()),
        )
    }

    /// Public URL of a route, for share links.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.config.site_url, path)
    }
}

#[cfg(feature = "http")]
fn backend(config: &AppConfig) -> Arc<dyn BlogApi> {
    use folio_infra::{HttpClient, RestBlogApi};

    let Some(http) = config.http.clone() else {
        tracing::warn!("FOLIO_API_URL not set. Using the seeded in-memory catalogue.");
        return Arc::new(InMemoryBlogApi::seeded());
    };

    match HttpClient::new(http) {
        Ok(client) => Arc::new(RestBlogApi::new(client)),
        Err(e) => {
            tracing::error!(
                "Failed to build HTTP client: {}. Using the seeded in-memory catalogue.",
                e
            );
            Arc::new(InMemoryBlogApi::seeded())
        }
    }
}

#[cfg(not(feature = "http"))]
fn backend(_config: &AppConfig) -> Arc<dyn BlogApi> {
    tracing::info!("Running without http feature - using the seeded in-memory catalogue");
    Arc::new(InMemoryBlogApi::seeded())
}

#[cfg(test)]
pub(crate) mod test_state {
    use std::sync::Arc;

    use folio_infra::{InMemoryBlogApi, InMemoryStore};

    use super::AppState;
    use crate::config::AppConfig;

    /// State over the seeded catalogue and a throwaway store.
    pub fn seeded() -> (Arc<InMemoryBlogApi>, AppState) {
        let api = Arc::new(InMemoryBlogApi::seeded());
        let state = AppState::assemble(
            AppConfig::default(),
            api.clone(),
            Arc::new(InMemoryStore::new()),
        );
        (api, state)
    }
}
