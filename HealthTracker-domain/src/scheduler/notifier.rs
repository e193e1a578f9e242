use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::entities::reminder::{Reminder, ReminderKind};

/// Icon attached to every reminder notification
pub const NOTIFICATION_ICON: &str = "/logo192.png";

/// Outcome of asking the user to allow notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// The user dismissed the prompt without choosing
    Default,
}

impl NotificationPermission {
    pub fn is_granted(self) -> bool {
        self == NotificationPermission::Granted
    }
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl Notification {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        let body = match reminder.kind {
            ReminderKind::Medicine => "It's time for your medicine!",
            ReminderKind::Appointment => "It's time for your doctor appointment!",
        };

        Self {
            title: reminder.title.clone(),
            body: body.to_string(),
            icon: NOTIFICATION_ICON.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification permission not granted")]
    PermissionDenied,

    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Host notification facility
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask the host for permission to show notifications
    async fn request_permission(&self) -> NotificationPermission;

    /// Show a notification
    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError>;
}
