//! Toast centre - shows at most `limit` toasts and removes them on a timer.
//!
//! Listeners receive [`ToastEvent`]s over a broadcast channel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;

use folio_core::domain::Toast;
use folio_core::ports::Notifier;

#[derive(Debug, Clone)]
pub struct ToastConfig {
    /// Maximum visible toasts; the newest wins.
    pub limit: usize,
    /// Time a toast stays visible.
    pub remove_delay: Duration,
    /// Identical toasts inside this window are dropped.
    pub dedupe_window: Duration,
    pub buffer_size: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            limit: 1,
            remove_delay: Duration::from_millis(5000),
            dedupe_window: Duration::from_millis(500),
            buffer_size: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed(String),
}

struct VisibleToast {
    toast: Toast,
    shown_at: Instant,
}

#[derive(Default)]
struct ToastState {
    visible: Vec<VisibleToast>,
    last: Option<(Toast, Instant)>,
}

struct Inner {
    config: ToastConfig,
    state: Mutex<ToastState>,
    events: broadcast::Sender<ToastEvent>,
}

#[derive(Clone)]
pub struct ToastCenter {
    inner: Arc<Inner>,
}

impl ToastCenter {
    pub fn new(config: ToastConfig) -> Self {
        let (events, _) = broadcast::channel(config.buffer_size.max(1));
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(ToastState::default()),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.events.subscribe()
    }

    /// Show a toast, returning its id. Duplicates of the previous toast
    /// inside the dedupe window are dropped and return `None`.
    pub fn show(&self, toast: Toast) -> Option<String> {
        let now = Instant::now();
        let mut toast = toast;
        toast.id = uuid::Uuid::new_v4().to_string();

        let evicted = {
            let mut state = self.lock();

            if let Some((last, at)) = &state.last {
                if last.dedupe_key() == toast.dedupe_key()
                    && now.duration_since(*at) < self.inner.config.dedupe_window
                {
                    tracing::debug!(title = ?toast.title, "Duplicate toast suppressed");
                    return None;
                }
            }

            state.last = Some((toast.clone(), now));
            state.visible.insert(
                0,
                VisibleToast {
                    toast: toast.clone(),
                    shown_at: now,
                },
            );

            let limit = self.inner.config.limit.max(1);
            if state.visible.len() > limit {
                state.visible.split_off(limit)
            } else {
                Vec::new()
            }
        };

        for old in evicted {
            let _ = self.inner.events.send(ToastEvent::Dismissed(old.toast.id));
        }
        let _ = self.inner.events.send(ToastEvent::Shown(toast.clone()));

        self.schedule_removal(toast.id.clone());
        Some(toast.id)
    }

    pub fn dismiss(&self, id: &str) {
        let removed = {
            let mut state = self.lock();
            let before = state.visible.len();
            state.visible.retain(|v| v.toast.id != id);
            before != state.visible.len()
        };

        if removed {
            let _ = self.inner.events.send(ToastEvent::Dismissed(id.to_string()));
        }
    }

    /// Currently visible toasts, newest first.
    pub fn toasts(&self) -> Vec<Toast> {
        let now = Instant::now();
        let delay = self.inner.config.remove_delay;
        self.lock()
            .visible
            .iter()
            .filter(|v| now.duration_since(v.shown_at) < delay)
            .map(|v| v.toast.clone())
            .collect()
    }

    fn schedule_removal(&self, id: String) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(toast_id = %id, "No runtime, toast expires on read only");
            return;
        };

        let center = self.clone();
        let deadline = Instant::now() + self.inner.config.remove_delay;
        handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            center.dismiss(&id);
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ToastState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, toast: Toast) {
        self.show(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_newest_toast_wins() {
        let center = ToastCenter::default();
        let mut events = center.subscribe();

        let first = center.show(Toast::new("Saved")).unwrap();
        center.show(Toast::new("Copied"));

        let visible = center.toasts();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title.as_deref(), Some("Copied"));

        assert!(matches!(events.recv().await, Ok(ToastEvent::Shown(_))));
        assert_eq!(events.recv().await.ok(), Some(ToastEvent::Dismissed(first)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicates_suppressed_within_window() {
        let center = ToastCenter::default();
        assert!(center.show(Toast::error("Vote failed", "Timeout")).is_some());
        assert!(center.show(Toast::error("Vote failed", "Timeout")).is_none());

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(center.show(Toast::error("Vote failed", "Timeout")).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_after_delay() {
        let center = ToastCenter::default();
        let mut events = center.subscribe();
        let id = center.show(Toast::new("Hello")).unwrap();
        assert!(matches!(events.recv().await, Ok(ToastEvent::Shown(_))));

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert_eq!(center.toasts().len(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(events.recv().await.ok(), Some(ToastEvent::Dismissed(id)));
        assert!(center.toasts().is_empty());
    }
}
