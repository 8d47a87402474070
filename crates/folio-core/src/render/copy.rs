use std::time::{Duration, Instant};

/// "Copied" indicator of a code block. Reverts on its own after `revert_after`.
#[derive(Debug, Clone, Copy)]
pub struct CopyFeedback {
    revert_after: Duration,
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub const DEFAULT_REVERT: Duration = Duration::from_secs(2);

    pub fn new(revert_after: Duration) -> Self {
        Self {
            revert_after,
            copied_at: None,
        }
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.revert_after)
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REVERT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverts_after_delay() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::default();
        assert!(!feedback.is_copied(start));

        feedback.mark_copied(start);
        assert!(feedback.is_copied(start + Duration::from_millis(1999)));
        assert!(!feedback.is_copied(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_copy_again_restarts_window() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::default();
        feedback.mark_copied(start);
        feedback.mark_copied(start + Duration::from_millis(1500));
        assert!(feedback.is_copied(start + Duration::from_millis(3000)));
    }
}
