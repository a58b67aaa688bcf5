//! User-facing notifications
//!
//! Every terminal success or failure surfaces exactly one toast through
//! this seam; the UI shell decides how to render it.

use std::sync::Mutex;

use serde::Serialize;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);
}

/// Tracing-backed notifier for headless runs
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => tracing::info!(%message, "toast"),
            ToastKind::Error => tracing::warn!(%message, "toast"),
        }
    }
}

/// Collects every toast; used by tests and headless drivers
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(ToastKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.toasts.lock().expect("toast lock poisoned").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|(kind, _)| *kind == ToastKind::Error)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|(kind, _)| *kind == ToastKind::Success)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        self.toasts
            .lock()
            .expect("toast lock poisoned")
            .push((kind, message.to_string()));
    }
}
