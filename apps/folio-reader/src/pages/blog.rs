//! Blog page - article, voting, sharing and comments.

use anyhow::bail;
use chrono::Utc;

use folio_core::domain::{Blog, CommentDraft, Toast, UserVote, relative_time};
use folio_core::render::{render_blog, table_of_contents};
use folio_core::share::share_targets;
use folio_infra::services::{FetchState, IgnoredReason, VoteOutcome, load_blog};

use super::long_date;
use crate::routes::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
    Clear,
}

async fn fetch(state: &AppState, slug: &str) -> anyhow::Result<Blog> {
    let FetchState { data, error, .. } = load_blog(state.api.as_ref(), slug).await;
    match (data, error) {
        (Some(blog), _) => Ok(blog),
        (None, Some(e)) => bail!("Failed to load blog: {e}"),
        (None, None) => bail!("Blog not found. The blog you're looking for doesn't exist."),
    }
}

pub async fn render(state: &AppState, slug: &str) -> String {
    match fetch(state, slug).await {
        Ok(blog) => article(state, &blog).await,
        Err(e) => format!("{e}\n"),
    }
}

async fn article(state: &AppState, blog: &Blog) -> String {
    let meta = &blog.meta;
    let star = if state.favorites.is_favorite(&blog.slug) {
        " *"
    } else {
        ""
    };

    let mut out = format!(
        "{}{star}\n{}\nBy {} | {} | {} min read\n",
        meta.title,
        meta.description,
        meta.author,
        long_date(meta.published_at),
        meta.read_time
    );
    if !blog.tags.is_empty() {
        out.push_str(&format!("[{}]\n", blog.tags.join("] [")));
    }

    if blog.settings.enable_voting && blog.voting.enabled {
        out.push_str(&tally_line(state.voting(blog).tally()));
    }

    if blog.layout.show_table_of_contents {
        let toc = table_of_contents(blog);
        if !toc.is_empty() {
            out.push_str("\nOn this page\n");
            for entry in toc {
                let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                out.push_str(&format!("{indent}- {} (#{})\n", entry.text, entry.anchor));
            }
        }
    }

    out.push('\n');
    out.push_str(&render_blog(blog).to_html());
    out.push('\n');

    if !blog.links.is_empty() {
        out.push_str("\nLinks\n");
        for link in &blog.links {
            out.push_str(&format!("- {}: {}\n", link.label, link.url));
        }
    }

    if blog.settings.enable_social_share {
        let url = state.page_url(&Route::Blog(blog.slug.clone()).path());
        let targets = share_targets(&blog.social_share, &url, &meta.title);
        if !targets.is_empty() {
            out.push_str("\nShare\n");
            for target in targets {
                out.push_str(&format!("- {}: {}\n", target.label, target.href));
            }
        }
    }

    if blog.settings.enable_comments {
        out.push('\n');
        out.push_str(&comments_section(state, blog).await);
    }

    out
}

fn tally_line(tally: folio_core::domain::VoteTally) -> String {
    let mine = match tally.user_vote {
        Some(UserVote::Upvote) => " (you upvoted)",
        Some(UserVote::Downvote) => " (you downvoted)",
        None => "",
    };
    format!(
        "Votes: +{} / -{} (score {}){mine}\n",
        tally.upvotes,
        tally.downvotes,
        tally.score()
    )
}

async fn comments_section(state: &AppState, blog: &Blog) -> String {
    let mut thread = state.comments(blog);
    let comments = thread.load().await.to_vec();
    let now = Utc::now();

    let mut out = format!("Comments ({})\n", comments.len());
    if let Some(error) = thread.error() {
        out.push_str(&format!("(showing saved comments: {error})\n"));
    }
    if comments.is_empty() {
        out.push_str("No comments yet. Be the first to comment!\n");
    }
    for comment in &comments {
        out.push_str(&format!(
            "[{}] {} - {}\n  {}\n",
            comment.initials(),
            comment.name,
            relative_time(comment.created_at, now),
            comment.comment
        ));
    }
    out
}

pub async fn comments(state: &AppState, slug: &str) -> anyhow::Result<String> {
    let blog = fetch(state, slug).await?;
    if !blog.settings.enable_comments {
        return Ok("Comments are disabled for this blog.\n".to_string());
    }
    Ok(comments_section(state, &blog).await)
}

pub async fn comment(
    state: &AppState,
    slug: &str,
    name: &str,
    text: &str,
) -> anyhow::Result<String> {
    let blog = fetch(state, slug).await?;
    let mut thread = state.comments(&blog);
    thread.load().await;

    let mut draft = CommentDraft::new(name, text);
    let created = thread.submit(&mut draft).await?;
    state
        .toasts
        .show(Toast::new("Comment posted").with_description("Thanks for sharing your thoughts!"));

    Ok(format!(
        "Comment posted as {} ({} comments)\n",
        created.name,
        thread.comments().len()
    ))
}

pub async fn vote(
    state: &AppState,
    slug: &str,
    direction: VoteDirection,
) -> anyhow::Result<String> {
    let blog = fetch(state, slug).await?;
    if !(blog.settings.enable_voting && blog.voting.enabled) {
        return Ok("Voting is disabled for this blog.\n".to_string());
    }

    let controller = state.voting(&blog);
    let outcome = match direction {
        VoteDirection::Up => controller.vote(UserVote::Upvote).await?,
        VoteDirection::Down => controller.vote(UserVote::Downvote).await?,
        VoteDirection::Clear => controller.remove_vote().await?,
    };

    Ok(match outcome {
        VoteOutcome::Confirmed(tally) => tally_line(tally),
        VoteOutcome::Ignored(IgnoredReason::InFlight) => {
            "A vote is already being sent.\n".to_string()
        }
        VoteOutcome::Ignored(IgnoredReason::Debounced) => "Vote ignored (too fast).\n".to_string(),
        VoteOutcome::Discarded | VoteOutcome::Cancelled => tally_line(controller.tally()),
    })
}

pub fn favorite(state: &AppState, slug: &str) -> String {
    let added = state.favorites.toggle(slug);
    let title = if added {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    state.toasts.show(Toast::new(title).with_description(slug));
    format!("{title}: {slug}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use folio_core::ApiError;
    use folio_core::ports::BlogApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_article_sections() {
        let (api, state) = test_state::seeded();
        let page = render(&state, &api.first_slug()).await;

        assert!(page.contains("By John Doe | January 15, 2024 | 8 min read"));
        assert!(page.contains("Votes: +42 / -2 (score 40)"));
        assert!(page.contains("- Introduction (#heading-block-1)"));
        assert!(page.contains(r#"<article class="blog-content">"#));
        assert!(page.contains("- Copy Link: http://localhost:5173/blog/getting-started-with-react-and-typescript"));
        assert!(page.contains("Comments (1)"));
        assert!(page.contains("[AC] Alex Chen"));
    }

    #[tokio::test]
    async fn test_missing_blog() {
        let (_, state) = test_state::seeded();
        let page = render(&state, "missing").await;
        assert!(page.starts_with("Blog not found"));
    }

    #[tokio::test]
    async fn test_vote_reports_confirmed_tally() {
        let (api, state) = test_state::seeded();
        let line = vote(&state, &api.first_slug(), VoteDirection::Up)
            .await
            .unwrap();
        assert_eq!(line, "Votes: +43 / -2 (score 41) (you upvoted)\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_vote_is_debounced_across_commands() {
        let (api, state) = test_state::seeded();
        let slug = api.first_slug();

        let first = vote(&state, &slug, VoteDirection::Up).await.unwrap();
        let second = vote(&state, &slug, VoteDirection::Up).await.unwrap();

        assert_eq!(first, "Votes: +43 / -2 (score 41) (you upvoted)\n");
        assert_eq!(second, "Vote ignored (too fast).\n");
        assert_eq!(api.calls("vote"), 1);
        assert_eq!(api.calls("remove_vote"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_vote_after_debounce_window_toggles_off() {
        let (api, state) = test_state::seeded();
        let slug = api.first_slug();

        vote(&state, &slug, VoteDirection::Up).await.unwrap();
        tokio::time::advance(std::time::Duration::from_millis(400)).await;
        let line = vote(&state, &slug, VoteDirection::Up).await.unwrap();

        assert_eq!(line, "Votes: +42 / -2 (score 40)\n");
        assert_eq!(api.calls("remove_vote"), 1);
        assert!(Arc::ptr_eq(
            &state.voting(&fetch(&state, &slug).await.unwrap()),
            &state.voting(&fetch(&state, &slug).await.unwrap())
        ));
    }

    #[tokio::test]
    async fn test_failed_vote_shows_toast() {
        let (api, state) = test_state::seeded();
        let slug = api.first_slug();
        state.api.get_blog(&slug).await.unwrap();
        api.fail_with(Some(ApiError::Network("offline".into())));

        assert!(vote(&state, &slug, VoteDirection::Down).await.is_err());
        let toasts = state.toasts.toasts();
        assert_eq!(toasts[0].title.as_deref(), Some("Vote failed"));
    }

    #[tokio::test]
    async fn test_comment_rejects_blank_name() {
        let (api, state) = test_state::seeded();
        let err = comment(&state, &api.first_slug(), " ", "Nice")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Name is required"));
    }

    #[tokio::test]
    async fn test_comment_is_posted() {
        let (api, state) = test_state::seeded();
        let out = comment(&state, &api.first_slug(), "Ann Lee", "Nice")
            .await
            .unwrap();
        assert_eq!(out, "Comment posted as Ann Lee (2 comments)\n");
    }

    #[test]
    fn test_favorite_toggles() {
        let (_, state) = test_state::seeded();
        assert_eq!(favorite(&state, "a"), "Added to favorites: a\n");
        assert_eq!(favorite(&state, "a"), "Removed from favorites: a\n");
    }
}
