//! Request sequencing - at most one live request per tracker.
//!
//! Every [`RequestTracker::begin`] cancels the previous ticket and hands out
//! a higher sequence number; a response whose ticket is no longer current is
//! stale and must be discarded.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use folio_core::ApiError;

#[derive(Debug, Clone)]
pub struct RequestTicket {
    seq: u64,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Default)]
struct TrackerState {
    seq: u64,
    live: Option<CancellationToken>,
}

#[derive(Default)]
pub struct RequestTracker {
    state: Mutex<TrackerState>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, cancelling the one still pending.
    pub fn begin(&self) -> RequestTicket {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = state.live.take() {
            previous.cancel();
        }

        state.seq += 1;
        let token = CancellationToken::new();
        state.live = Some(token.clone());

        RequestTicket {
            seq: state.seq,
            token,
        }
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).seq == ticket.seq
    }

    /// Cancel the pending request, if any.
    pub fn cancel(&self) {
        if let Some(live) = self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .live
            .take()
        {
            live.cancel();
        }
    }

    /// Release `ticket` once its response has been handled.
    pub fn finish(&self, ticket: &RequestTicket) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.seq == ticket.seq {
            state.live = None;
        }
    }

    pub fn latest(&self) -> u64 {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).seq
    }
}

/// Drive `request` until it completes, `ticket` is cancelled or `timeout`
/// elapses.
pub async fn run<T, F>(ticket: &RequestTicket, timeout: Duration, request: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = ticket.token.cancelled() => Err(ApiError::Cancelled),
        result = tokio::time::timeout(timeout, request) => {
            result.unwrap_or(Err(ApiError::Timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cancels_previous_ticket() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert_eq!(tracker.latest(), 2);
    }

    #[test]
    fn test_finish_ignores_stale_ticket() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        tracker.finish(&first);
        tracker.cancel();
        assert!(second.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();

        let result: Result<(), ApiError> = run(&ticket, Duration::from_secs(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(ApiError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_observes_cancellation() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        tracker.cancel();

        let result = run(&ticket, Duration::from_secs(10), async { Ok(1) }).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_passes_result_through() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        let result = run(&ticket, Duration::from_secs(1), async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
