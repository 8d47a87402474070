use crate::domain::Toast;

/// Notifier trait - surfaces transient messages to the viewer.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}
