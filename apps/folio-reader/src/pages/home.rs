//! Blog catalogue, favorites, tags and search.

use folio_core::context::SearchKey;
use folio_core::domain::BlogPreview;
use folio_core::ports::ListBlogsParams;
use folio_infra::services::LiveSearch;

use super::long_date;
use crate::routes::Route;
use crate::state::AppState;

pub async fn render(state: &AppState, params: &ListBlogsParams) -> String {
    let page = state.catalog.list(params).await;

    let mut out = String::from("Blog Catalogue\nExplore our collection of articles and insights\n\n");
    if page.items.is_empty() {
        out.push_str("No blogs available yet.\n");
        return out;
    }

    for preview in &page.items {
        out.push_str(&card(state, preview));
    }
    if page.total_pages > 1 {
        out.push_str(&format!(
            "Page {} of {} ({} blogs)\n",
            page.page, page.total_pages, page.total
        ));
    }
    out
}

fn card(state: &AppState, preview: &BlogPreview) -> String {
    let star = if state.favorites.is_favorite(&preview.id) {
        "* "
    } else {
        ""
    };
    let tags: Vec<&str> = preview.tags.iter().take(3).map(String::as_str).collect();

    let mut out = format!(
        "{star}{}\n  {}\n  {} | {} | {} min\n",
        preview.meta.title,
        preview.meta.description,
        preview.meta.author,
        long_date(preview.meta.published_at),
        preview.meta.read_time
    );
    if !tags.is_empty() {
        out.push_str(&format!("  [{}]\n", tags.join("] [")));
    }
    out.push_str(&format!("  {}\n\n", Route::Blog(preview.id.clone()).path()));
    out
}

/// Favorites in the order they were added. Ids no longer in the catalogue
/// are listed bare.
pub async fn favorites(state: &AppState) -> String {
    let ids = state.favorites.favorites();
    if ids.is_empty() {
        return "No favorites yet. Use `favorite <slug>` to add one.\n".to_string();
    }

    let previews = state.catalog.previews().await;
    let mut out = String::from("Favorites\n\n");
    for id in ids {
        match previews.iter().find(|p| p.id == id) {
            Some(preview) => out.push_str(&card(state, preview)),
            None => out.push_str(&format!("{id}\n  {}\n\n", Route::Blog(id.clone()).path())),
        }
    }
    out
}

pub async fn tags(state: &AppState, slug: Option<&str>) -> String {
    match slug {
        Some(slug) => {
            let blogs = state.catalog.blogs_by_tag(slug).await;
            if blogs.is_empty() {
                return format!("No blogs tagged \"{slug}\".\n");
            }
            let mut out = format!("Tagged \"{slug}\"\n\n");
            for preview in &blogs {
                out.push_str(&card(state, preview));
            }
            out
        }
        None => {
            let tags = state.catalog.tags().await;
            if tags.is_empty() {
                return "No tags yet.\n".to_string();
            }
            tags.iter()
                .map(|t| format!("{} ({}) - {}\n", t.name, t.count, t.slug))
                .collect()
        }
    }
}

/// Search the catalogue. With `pick`, the `pick`-th result (1-based) is
/// opened the way keyboard navigation would.
pub async fn search(state: &AppState, query: &str, pick: Option<usize>) -> String {
    let live = LiveSearch::new(state.catalog.previews().await, state.config.search.clone());

    state.search.open();
    state.search.set_query(query);
    let Some(results) = live.query(query).await else {
        return String::new();
    };

    if let Some(message) = &results.message {
        state.search.close();
        return format!("{message}\n");
    }

    if let Some(pick) = pick.filter(|p| *p > 0) {
        if pick > results.items.len() {
            state.search.close();
            return format!(
                "No result {pick}: the search returned {} results.\n",
                results.items.len()
            );
        }
        for _ in 0..pick {
            state.search.handle_key(SearchKey::ArrowDown, &results.items);
        }
        if let Some(path) = state.search.handle_key(SearchKey::Enter, &results.items) {
            return super::open(state, &Route::parse(&path)).await;
        }
    }

    let mut out = String::new();
    for (index, preview) in results.items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   {}\n",
            index + 1,
            preview.meta.title,
            Route::Blog(preview.id.clone()).path()
        ));
    }
    state.search.close();
    out
}
