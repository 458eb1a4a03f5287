use crate::error::server_message;
use crate::messages;
use std::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(description: &str) -> Self {
        Self {
            title: messages::SUCCESS_TITLE.into(),
            description: Some(description.into()),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            title: messages::ERROR_TITLE.into(),
            description: Some(description.into()),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn description(mut self, value: String) -> Self {
        self.description = Some(value);
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }

    /// Single line rendering used by the prompt line and the log notifier.
    pub fn line(&self) -> String {
        match &self.description {
            Some(d) => format!("{}: {}", self.title, d),
            None => self.title.clone(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Keeps toasts in memory until someone drains them. The dashboard shows the
/// latest one in its prompt line.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *toasts)
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.snapshot().pop()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}

/// Prints toasts to the terminal and mirrors them into the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => {
                info!(title = %toast.title, "toast");
                println!("{}", toast.line());
            }
            ToastVariant::Destructive => {
                warn!(title = %toast.title, "toast");
                eprintln!("{}", toast.line());
            }
        }
    }
}

/// Shows toasts as desktop notifications.
#[derive(Debug)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, toast: Toast) {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&toast.title)
            .body(toast.description.as_deref().unwrap_or_default());
        #[cfg(all(unix, not(target_os = "macos")))]
        if toast.is_destructive() {
            notification.urgency(notify_rust::Urgency::Critical);
        }

        if let Err(err) = notification.show() {
            // Desktop sessions are not always available (ssh, ci). Fall back to the terminal.
            warn!("Failed to show desktop notification: {err}");
            LogNotifier.notify(toast);
        }
    }
}

/// Logs a failed action and surfaces it as a destructive toast, preferring the
/// message sent by the backend over the local fallback.
pub fn report_failure(notifier: &dyn Notifier, err: &eyre::Report, fallback: &str) {
    error!("{fallback}: {err:?}");
    let description = server_message(err).unwrap_or(fallback);
    notifier.notify(Toast::error(description));
}
