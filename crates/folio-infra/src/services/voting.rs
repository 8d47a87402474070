//! Voting controller - optimistic vote toggling for one blog.
//!
//! Each action snapshots the tally, applies the speculative transition and
//! issues one request. Success installs the server tally; failure restores
//! the snapshot and shows a toast; cancellation restores it silently.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use folio_core::ApiError;
use folio_core::domain::{Toast, UserVote, VoteCall, VoteTally};
use folio_core::ports::{BlogApi, Notifier};

use super::request::{self, RequestTicket, RequestTracker};
use crate::env;

#[derive(Debug, Clone)]
pub struct VotingConfig {
    /// Repeats of the same action inside this window are dropped.
    pub debounce: Duration,
    /// Prop resync is ignored this long after a failed vote.
    pub error_cooldown: Duration,
    /// Prop resync is ignored this long after a confirmed vote.
    pub sync_cooldown: Duration,
    pub request_timeout: Duration,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            error_cooldown: Duration::from_millis(200),
            sync_cooldown: Duration::from_millis(100),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl VotingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce: env::millis_or(
                "FOLIO_VOTE_DEBOUNCE_MS",
                duration_millis(defaults.debounce),
            ),
            error_cooldown: env::millis_or(
                "FOLIO_VOTE_ERROR_COOLDOWN_MS",
                duration_millis(defaults.error_cooldown),
            ),
            sync_cooldown: env::millis_or(
                "FOLIO_VOTE_SYNC_COOLDOWN_MS",
                duration_millis(defaults.sync_cooldown),
            ),
            request_timeout: env::secs_or(
                "FOLIO_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            ),
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Vote(UserVote),
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    InFlight,
    Debounced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The server accepted the vote; its tally is now current.
    Confirmed(VoteTally),
    /// No request was made.
    Ignored(IgnoredReason),
    /// A newer request superseded this one; its response was dropped.
    Discarded,
    /// The request was cancelled and the tally restored.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("No blog selected")]
    NoBlog,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Default)]
struct VoteState {
    tally: VoteTally,
    in_flight: bool,
    last_action: Option<(VoteAction, Instant)>,
    sync_blocked_until: Option<Instant>,
    last_synced: Option<VoteTally>,
    error: Option<ApiError>,
}

pub struct VotingController {
    slug: String,
    api: Arc<dyn BlogApi>,
    notifier: Arc<dyn Notifier>,
    config: VotingConfig,
    tracker: RequestTracker,
    state: Mutex<VoteState>,
}

impl VotingController {
    /// Controller for `slug`. An unknown tally starts at zero votes.
    pub fn new(
        slug: impl Into<String>,
        initial: Option<VoteTally>,
        api: Arc<dyn BlogApi>,
        notifier: Arc<dyn Notifier>,
        config: VotingConfig,
    ) -> Self {
        Self {
            slug: slug.into(),
            api,
            notifier,
            config,
            tracker: RequestTracker::new(),
            state: Mutex::new(VoteState {
                tally: initial.unwrap_or_default(),
                last_synced: initial,
                ..VoteState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VoteState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn tally(&self) -> VoteTally {
        self.lock().tally
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.lock().error.clone()
    }

    /// Upvote or downvote; repeating the current vote withdraws it.
    pub async fn vote(&self, vote: UserVote) -> Result<VoteOutcome, VoteError> {
        self.act(VoteAction::Vote(vote)).await
    }

    /// Withdraw the viewer's vote.
    pub async fn remove_vote(&self) -> Result<VoteOutcome, VoteError> {
        self.act(VoteAction::Remove).await
    }

    /// Abort the pending request; its optimistic update is rolled back.
    pub fn cancel(&self) {
        self.tracker.cancel();
    }

    /// Adopt a tally coming from a freshly loaded blog document.
    ///
    /// Ignored while a vote is in flight, during the post-vote cooldown and
    /// when the tally has not changed since the last sync. Returns whether
    /// the local tally changed.
    pub fn sync_from_props(&self, incoming: VoteTally) -> bool {
        let mut state = self.lock();
        if state.in_flight {
            return false;
        }
        if state
            .sync_blocked_until
            .is_some_and(|until| Instant::now() < until)
        {
            tracing::debug!(slug = %self.slug, "Vote sync suppressed during cooldown");
            return false;
        }
        if state.last_synced == Some(incoming) {
            return false;
        }

        state.last_synced = Some(incoming);
        if state.tally == incoming {
            return false;
        }
        state.tally = incoming;
        true
    }

    async fn act(&self, action: VoteAction) -> Result<VoteOutcome, VoteError> {
        if self.slug.is_empty() {
            return Err(VoteError::NoBlog);
        }

        let (ticket, snapshot, call) = {
            let mut state = self.lock();
            let now = Instant::now();

            if state.in_flight {
                tracing::warn!(slug = %self.slug, "Vote request already in progress, ignoring");
                return Ok(VoteOutcome::Ignored(IgnoredReason::InFlight));
            }
            if let Some((last, at)) = state.last_action {
                if last == action && now.duration_since(at) < self.config.debounce {
                    tracing::debug!(slug = %self.slug, ?action, "Vote debounced");
                    return Ok(VoteOutcome::Ignored(IgnoredReason::Debounced));
                }
            }

            let snapshot = state.tally;
            let (next, call) = match action {
                VoteAction::Vote(vote) => snapshot.apply(vote),
                VoteAction::Remove => (snapshot.without_user_vote(), VoteCall::Remove),
            };

            state.last_action = Some((action, now));
            state.tally = next;
            state.in_flight = true;
            state.error = None;

            (self.tracker.begin(), snapshot, call)
        };

        tracing::debug!(slug = %self.slug, seq = ticket.seq(), ?call, "Sending vote");
        self.dispatch(ticket, snapshot, call).await
    }

    async fn dispatch(
        &self,
        ticket: RequestTicket,
        snapshot: VoteTally,
        call: VoteCall,
    ) -> Result<VoteOutcome, VoteError> {
        let api = self.api.as_ref();
        let slug = self.slug.as_str();
        let result = request::run(&ticket, self.config.request_timeout, async move {
            match call {
                VoteCall::Cast(vote) => api.vote(slug, vote).await,
                VoteCall::Remove => api.remove_vote(slug).await,
            }
        })
        .await;

        if !self.tracker.is_current(&ticket) {
            tracing::debug!(slug = %self.slug, seq = ticket.seq(), "Discarding stale vote response");
            return Ok(VoteOutcome::Discarded);
        }
        self.tracker.finish(&ticket);

        let error = {
            let mut state = self.lock();
            state.in_flight = false;

            match result {
                Ok(tally) => {
                    state.tally = tally;
                    state.sync_blocked_until = Some(Instant::now() + self.config.sync_cooldown);
                    return Ok(VoteOutcome::Confirmed(tally));
                }
                Err(ApiError::Cancelled) => {
                    state.tally = snapshot;
                    tracing::debug!(slug = %self.slug, "Vote cancelled");
                    return Ok(VoteOutcome::Cancelled);
                }
                Err(e) => {
                    state.tally = snapshot;
                    state.error = Some(e.clone());
                    state.sync_blocked_until = Some(Instant::now() + self.config.error_cooldown);
                    e
                }
            }
        };

        tracing::warn!(slug = %self.slug, code = error.code(), error = %error, "Vote failed");
        self.notifier
            .notify(Toast::error("Vote failed", error.to_string()));
        Err(VoteError::Api(error))
    }
}
