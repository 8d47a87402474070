//! Client-side blog search over already loaded previews.

use crate::domain::BlogPreview;

/// Previews shown before the viewer types anything.
pub const DEFAULT_RESULT_COUNT: usize = 10;

/// Filter previews by a case-insensitive substring of title, description
/// and tags. A blank query returns the first few previews.
pub fn filter_previews(previews: &[BlogPreview], query: &str) -> Vec<BlogPreview> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return previews.iter().take(DEFAULT_RESULT_COUNT).cloned().collect();
    }

    previews
        .iter()
        .filter(|preview| searchable_text(preview).contains(&needle))
        .cloned()
        .collect()
}

fn searchable_text(preview: &BlogPreview) -> String {
    format!(
        "{} {} {}",
        preview.meta.title,
        preview.meta.description,
        preview.tags.join(" ")
    )
    .to_lowercase()
}

/// Placeholder text for an empty result list.
pub fn empty_state_message(query: &str) -> String {
    if query.trim().is_empty() {
        "Start typing to search for blog posts...".to_string()
    } else {
        format!("No blogs found matching \"{query}\"")
    }
}
