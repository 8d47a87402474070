//! Pages - each renders to text for the terminal.

pub mod ask;
pub mod blog;
pub mod calendar;
pub mod help;
pub mod home;
pub mod settings;

use chrono::{DateTime, Utc};

use crate::routes::Route;
use crate::state::AppState;

/// Render the page behind a route with its default options.
pub async fn open(state: &AppState, route: &Route) -> String {
    match route {
        Route::Home => home::render(state, &Default::default()).await,
        Route::Blog(id) => blog::render(state, id).await,
        Route::Calendar => calendar::render(state, &Default::default()).await,
        Route::Settings => settings::render(state),
        Route::Help => help::render(),
        Route::AskAi => ask::intro(),
        Route::NotFound(path) => format!("404 - Page not found: {path}\n"),
    }
}

/// `January 15, 2024`.
pub fn long_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[tokio::test]
    async fn test_unknown_route_renders_404() {
        let (_, state) = test_state::seeded();
        let page = open(&state, &Route::parse("/nope")).await;
        assert!(page.starts_with("404"));
    }

    #[tokio::test]
    async fn test_blog_route_opens_blog() {
        let (api, state) = test_state::seeded();
        let page = open(&state, &Route::Blog(api.first_slug())).await;
        assert!(page.contains("Getting Started with React and TypeScript"));
    }
}
