//! User-facing notification surface.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message meant for the shopper, not for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Where notifications are delivered (toast area, terminal, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Messages received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// Drain the received notifications.
    pub fn take(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

/// Forwards notifications to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!(target: "stride::notify", "{}", notification.message),
            NotificationLevel::Warning => tracing::warn!(target: "stride::notify", "{}", notification.message),
            NotificationLevel::Error => tracing::error!(target: "stride::notify", "{}", notification.message),
        }
    }
}

/// Delivers every notification to each inner notifier, in order.
#[derive(Default)]
pub struct FanOutNotifier {
    targets: Vec<Arc<dyn Notifier>>,
}

impl FanOutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: Arc<dyn Notifier>) -> Self {
        self.targets.push(target);
        self
    }
}

impl Notifier for FanOutNotifier {
    fn notify(&self, notification: Notification) {
        for target in &self.targets {
            target.notify(notification.clone());
        }
    }
}

impl fmt::Debug for FanOutNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutNotifier")
            .field("targets", &self.targets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_reaches_every_target() {
        let first = Arc::new(RecordingNotifier::new());
        let second = Arc::new(RecordingNotifier::new());
        let fan_out = FanOutNotifier::new()
            .with(first.clone())
            .with(Arc::new(LogNotifier))
            .with(second.clone());

        fan_out.notify(Notification::error("Error adding product"));

        assert_eq!(first.messages(), vec!["Error adding product"]);
        assert_eq!(second.notifications(), first.notifications());
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(Notification::error("boom"));
        notifier.notify(Notification::warning("careful"));

        assert_eq!(notifier.messages(), vec!["boom", "careful"]);
        assert_eq!(notifier.notifications()[1].level, NotificationLevel::Warning);

        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_notification_serializes_level_lowercase() {
        let json = serde_json::to_string(&Notification::info("hi")).unwrap();
        assert_eq!(json, r#"{"level":"info","message":"hi"}"#);
    }
}
