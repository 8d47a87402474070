//! Viewer notifications.

mod toast;

pub use toast::{ToastCenter, ToastConfig, ToastEvent};
