//! Ask AI - answers questions from the loaded blog content.

use folio_core::assistant;

use crate::routes::Route;
use crate::state::AppState;

pub fn intro() -> String {
    "Ask AI\nAsk anything about the blog content, for example:\n\
     - What are the latest blog posts?\n\
     - How do I add animations with Tailwind?\n\
     - What topics do you write about?\n"
        .to_string()
}

pub async fn render(state: &AppState, question: &str) -> String {
    if question.trim().is_empty() {
        return intro();
    }

    let previews = state.catalog.previews().await;
    let blogs = state.catalog.blogs(&previews).await;
    tracing::debug!(
        previews = previews.len(),
        blogs = blogs.len(),
        "Answering question"
    );

    let answer = assistant::answer(question, &previews, &blogs);
    let mut out = format!("{}\n", answer.text);
    if !answer.cited.is_empty() {
        out.push_str("\nSources\n");
        for slug in &answer.cited {
            out.push_str(&format!("- {}\n", Route::Blog(slug.clone()).path()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[tokio::test]
    async fn test_latest_posts_are_cited() {
        let (_, state) = test_state::seeded();
        let page = render(&state, "Show me the latest posts").await;

        assert!(page.contains("here are the latest blog posts"));
        assert!(page.contains("- /blog/building-configuration-driven-uis"));
    }

    #[tokio::test]
    async fn test_keyword_answer() {
        let (_, state) = test_state::seeded();
        let page = render(&state, "How do I add animations?").await;

        assert!(page.contains("found 1 relevant post:"));
        assert!(page.contains("- /blog/mastering-tailwind-css"));
    }

    #[tokio::test]
    async fn test_blank_question_shows_intro() {
        let (_, state) = test_state::seeded();
        assert!(render(&state, "  ").await.starts_with("Ask AI"));
    }
}
