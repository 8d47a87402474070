//! Stateful services that sit between the pages and the blog API.

mod comments;
mod loaders;
pub mod request;
mod search;
mod voting;

pub use comments::{CommentThread, SubmitError};
pub use loaders::{Catalog, FetchState, PREVIEW_LIMIT, load_blog};
pub use request::{RequestTicket, RequestTracker};
pub use search::{Debouncer, LiveSearch, SearchConfig, SearchResults};
pub use voting::{
    IgnoredReason, VoteAction, VoteError, VoteOutcome, VotingConfig, VotingController,
};
