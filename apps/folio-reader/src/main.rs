//! # Folio Reader
//!
//! Terminal client for a configuration-driven blog. Every page of the
//! reader is a subcommand; `shell` keeps one session open so favorites,
//! caches and toasts carry over between commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use folio_core::domain::{CalendarView, ToastVariant};
use folio_core::ports::{ListBlogsParams, SortOrder};

mod background;
mod config;
mod pages;
mod routes;
mod state;
mod telemetry;

use config::AppConfig;
use pages::blog::VoteDirection;
use pages::calendar::CalendarQuery;
use pages::settings::SettingsChange;
use routes::Route;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Debug, Parser)]
#[command(
    name = "folio-reader",
    version,
    about = "Read, vote on and discuss blogs",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List blogs.
    Home {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortOrder>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Read a blog.
    Blog { slug: String },
    /// Show the comments of a blog.
    Comments { slug: String },
    /// Post a comment.
    Comment {
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },
    /// Vote on a blog.
    Vote { slug: String, direction: VoteArg },
    /// Add or remove a favorite.
    Favorite { slug: String },
    /// List favorites.
    Favorites,
    /// Search blogs.
    Search {
        query: String,
        /// Open the N-th result.
        #[arg(long)]
        pick: Option<usize>,
    },
    /// List tags, or the blogs with a tag.
    Tags { slug: Option<String> },
    /// Show the editorial calendar.
    Calendar {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_view, default_value = "month")]
        view: CalendarView,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// Show or change appearance settings.
    Settings {
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        /// Report the OS dark-mode preference (true or false).
        #[arg(long)]
        system_dark: Option<bool>,
    },
    /// Show the help centre.
    Help,
    /// Ask a question about the blog content.
    Ask { question: Vec<String> },
    /// Open a page by path, e.g. `/blog/my-post`.
    Open { route: String },
    /// Run commands interactively.
    Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VoteArg {
    Up,
    Down,
    Clear,
}

impl From<VoteArg> for VoteDirection {
    fn from(arg: VoteArg) -> Self {
        match arg {
            VoteArg::Up => VoteDirection::Up,
            VoteArg::Down => VoteDirection::Down,
            VoteArg::Clear => VoteDirection::Clear,
        }
    }
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    SortOrder::parse(value).ok_or_else(|| format!("expected newest, oldest or popular, got {value}"))
}

fn parse_view(value: &str) -> Result<CalendarView, String> {
    CalendarView::parse(value).ok_or_else(|| format!("expected month, week or day, got {value}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let state = AppState::new(config)?;

    match cli.command {
        Some(Command::Shell) => shell(state).await,
        Some(command) => {
            let result = execute(&state, command).await;
            flush_toasts(&state);
            print!("{}", result?);
            Ok(())
        }
        None => {
            print!("{}", pages::open(&state, &Route::Home).await);
            Ok(())
        }
    }
}

async fn execute(state: &AppState, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Home {
            page,
            limit,
            sort,
            tags,
            author,
            search,
        } => {
            let params = ListBlogsParams {
                page,
                limit,
                sort,
                tags,
                author,
                search,
            };
            pages::home::render(state, &params).await
        }
        Command::Blog { slug } => pages::blog::render(state, &slug).await,
        Command::Comments { slug } => pages::blog::comments(state, &slug).await?,
        Command::Comment { slug, name, text } => {
            pages::blog::comment(state, &slug, &name, &text).await?
        }
        Command::Vote { slug, direction } => {
            pages::blog::vote(state, &slug, direction.into()).await?
        }
        Command::Favorite { slug } => pages::blog::favorite(state, &slug),
        Command::Favorites => pages::home::favorites(state).await,
        Command::Search { query, pick } => pages::home::search(state, &query, pick).await,
        Command::Tags { slug } => pages::home::tags(state, slug.as_deref()).await,
        Command::Calendar { date, view, shift } => {
            pages::calendar::render(state, &CalendarQuery { view, date, shift }).await
        }
        Command::Settings {
            theme,
            mode,
            system_dark,
        } => pages::settings::update(
            state,
            SettingsChange {
                theme: theme.as_deref(),
                mode: mode.as_deref(),
                system_dark,
            },
        )?,
        Command::Help => pages::help::render(),
        Command::Ask { question } => pages::ask::render(state, &question.join(" ")).await,
        Command::Open { route } => pages::open(state, &Route::parse(&route)).await,
        Command::Shell => "Already in the shell.\n".to_string(),
    };
    Ok(output)
}

async fn shell(state: AppState) -> anyhow::Result<()> {
    #[cfg(feature = "scheduler")]
    let mut scheduler = start_scheduler(&state).await;

    eprintln!("folio-reader shell. Type `help` for commands, `quit` to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words = split_words(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit") => break,
            Some(_) => {}
        }

        let args = std::iter::once("folio-reader".to_string()).chain(words);
        match Cli::try_parse_from(args) {
            Ok(Cli {
                command: Some(command),
            }) => match execute(&state, command).await {
                Ok(output) => print!("{output}"),
                Err(e) => eprintln!("error: {e:#}"),
            },
            Ok(Cli { command: None }) => print!("{}", pages::open(&state, &Route::Home).await),
            Err(e) => eprint!("{e}"),
        }
        flush_toasts(&state);
    }

    #[cfg(feature = "scheduler")]
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Failed to stop scheduler: {}", e);
        }
    }

    tracing::info!("Shell closed");
    Ok(())
}

#[cfg(feature = "scheduler")]
async fn start_scheduler(state: &AppState) -> Option<background::Scheduler> {
    let config = state.config.scheduler.clone();
    if !config.enabled {
        return None;
    }

    let scheduler = match background::Scheduler::new(config).await {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to create scheduler: {}", e);
            return None;
        }
    };
    if let Err(e) = background::register_cache_sweep(&scheduler, state.api.clone()).await {
        tracing::error!("Failed to register cache sweep: {}", e);
        return None;
    }
    if let Err(e) = scheduler.start().await {
        tracing::error!("Failed to start scheduler: {}", e);
        return None;
    }
    Some(scheduler)
}

/// Print visible toasts to stderr and dismiss them.
fn flush_toasts(state: &AppState) {
    for toast in state.toasts.toasts().into_iter().rev() {
        let marker = match toast.variant {
            ToastVariant::Default => "*",
            ToastVariant::Destructive => "!",
        };
        let title = toast.title.as_deref().unwrap_or_default();
        match toast.description.as_deref() {
            Some(description) => eprintln!("{marker} {title}: {description}"),
            None => eprintln!("{marker} {title}"),
        }
        state.toasts.dismiss(&toast.id);
    }
}

/// Split a shell line into words. Double or single quotes group words.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_honours_quotes() {
        assert_eq!(
            split_words(r#"comment my-post --name "Ann Lee" --text 'Great read!'"#),
            vec!["comment", "my-post", "--name", "Ann Lee", "--text", "Great read!"]
        );
        assert_eq!(split_words("   "), Vec::<String>::new());
        assert_eq!(split_words(r#"search """#), vec!["search", ""]);
    }

    #[test]
    fn test_cli_parses_vote() {
        let cli = Cli::try_parse_from(["folio-reader", "vote", "my-post", "down"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Vote {
                direction: VoteArg::Down,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parses_calendar() {
        let cli = Cli::try_parse_from([
            "folio-reader",
            "calendar",
            "--view",
            "week",
            "--date",
            "2026-01-08",
            "--shift",
            "-1",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Calendar { date, view, shift }) => {
                assert_eq!(view, CalendarView::Week);
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 8));
                assert_eq!(shift, -1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_system_dark() {
        let cli =
            Cli::try_parse_from(["folio-reader", "settings", "--system-dark", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Settings {
                system_dark: Some(true),
                ..
            })
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["folio-reader", "home", "--sort", "random"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_settings() {
        let (_, state) = state::test_state::seeded();
        let output = execute(
            &state,
            Command::Settings {
                theme: Some("mono".into()),
                mode: None,
                system_dark: None,
            },
        )
        .await
        .unwrap();
        assert!(output.contains("Theme:       mono"));
    }
}
